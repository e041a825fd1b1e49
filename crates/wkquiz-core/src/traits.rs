//! Core trait definitions for the study API and the terminal.
//!
//! `StudyApi` is implemented by `wkquiz-client`; `Prompter` by the CLI's
//! terminal handle. Both have in-memory doubles in [`crate::mock`].

use async_trait::async_trait;

use crate::filter::SubjectFilter;
use crate::model::{ReviewStatistic, Subject, UserInfo};

// ---------------------------------------------------------------------------
// Study API trait
// ---------------------------------------------------------------------------

/// The three reads the quiz needs from the learning service.
#[async_trait]
pub trait StudyApi: Send + Sync {
    /// The current account's name and level.
    async fn user_info(&self) -> anyhow::Result<UserInfo>;

    /// Every subject matching `filter`, across all pages.
    async fn subjects(&self, filter: &SubjectFilter) -> anyhow::Result<Vec<Subject>>;

    /// Every review record on the account, across all pages.
    async fn review_statistics(&self) -> anyhow::Result<Vec<ReviewStatistic>>;
}

// ---------------------------------------------------------------------------
// Prompter trait
// ---------------------------------------------------------------------------

/// Line-oriented question/answer I/O.
#[async_trait]
pub trait Prompter: Send {
    /// Print `question` and read one line of input.
    ///
    /// Returns `None` once input is closed. The returned line has its
    /// line terminator stripped.
    async fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>>;

    /// Print one line of output.
    async fn say(&mut self, line: &str) -> anyhow::Result<()>;
}
