mod answer;
mod group;
mod question;
mod record;
mod table;

pub use answer::{AnswerKeyMap, KeyMatches};
pub use group::Group;
pub use question::{Question, QuestionError, QuestionOption};
pub use record::Record;
pub use table::{Cell, RawTable};
