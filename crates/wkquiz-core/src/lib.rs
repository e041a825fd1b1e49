//! wkquiz-core — data model, traits, grading, and the quiz session.
//!
//! This crate holds everything that does not touch the network or the
//! real terminal, so the whole question/answer flow can be driven from
//! tests with the doubles in [`mock`].

pub mod error;
pub mod filter;
pub mod grading;
pub mod loader;
pub mod mock;
pub mod model;
pub mod quiz;
pub mod traits;

pub use error::ApiError;
pub use model::{Subject, SubjectKind, UserInfo};
pub use traits::{Prompter, StudyApi};
