#![forbid(unsafe_code)]

pub mod answers;
pub mod fields;
pub mod model;
pub mod normalize;
pub mod questions;
pub mod time;

pub use time::Clock;
