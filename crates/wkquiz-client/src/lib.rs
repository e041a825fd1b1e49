//! wkquiz-client — WaniKani v2 API access and configuration.
//!
//! Implements the `StudyApi` trait over HTTP, including the cursor-style
//! pagination the list endpoints use.

pub mod config;
pub mod wanikani;

pub use config::{load_config_from, QuizConfig};
pub use wanikani::{Fetched, ReviewSource, WaniKaniClient};
