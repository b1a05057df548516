#![forbid(unsafe_code)]

pub mod app_services;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod quiz;

pub use career_core::Clock;

pub use app_services::AppServices;
pub use cache::LoadOnce;
pub use config::SheetsConfig;
pub use error::{CatalogError, QuizError};

pub use catalog::{CatalogService, GroupCard, ItemCard, ItemDetail};
pub use quiz::{
    MatchBasis, QuizOutcome, QuizPhase, QuizProgress, QuizService, QuizSession, Recommendation,
};
