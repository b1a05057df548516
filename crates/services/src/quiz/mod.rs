mod progress;
mod recommend;
mod service;
mod session;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use progress::QuizProgress;
pub use recommend::{MatchBasis, Recommendation, recommend};
pub use service::QuizService;
pub use session::{QuizOutcome, QuizPhase, QuizSession};
