//! The `wkquiz quiz` command, also run when no command is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::Rng;

use wkquiz_client::config::load_config_from;
use wkquiz_client::WaniKaniClient;
use wkquiz_core::filter::ask_filter;
use wkquiz_core::loader::load_testable_subjects;
use wkquiz_core::quiz::{QuizSession, QuizSummary};
use wkquiz_core::traits::{Prompter, StudyApi};

pub async fn execute(config_path: Option<PathBuf>, prompter: &mut dyn Prompter) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    tracing::debug!(?config, "config loaded");
    let client = WaniKaniClient::from_config(&config)?;

    run(&client, prompter, &config.stop_word, rand::rng()).await?;
    Ok(())
}

/// Greet, ask for the filter, load subjects, then quiz until stopped.
pub async fn run<R: Rng>(
    api: &dyn StudyApi,
    prompter: &mut dyn Prompter,
    stop_word: &str,
    rng: R,
) -> Result<QuizSummary> {
    let user = api.user_info().await.context("failed to load user info")?;
    prompter.say(&format!("Hello, {}!", user.username)).await?;

    let filter = ask_filter(prompter, user.level).await?;

    let loaded = load_testable_subjects(api, &filter, prompter).await?;

    let mut session = QuizSession::new(loaded.subjects, rng).with_stop_word(stop_word);
    session.run(prompter).await
}
