//! Level and category selection.
//!
//! Parsing is pure and lives in [`parse_level`] / [`parse_categories`];
//! [`ask_level`] and [`ask_categories`] wrap them in re-prompt loops that
//! only return once the learner has typed something valid.

use std::fmt;

use anyhow::{bail, Result};
use thiserror::Error;

use crate::model::SubjectKind;
use crate::traits::Prompter;

pub const LEVEL_QUESTION: &str =
    "What level would you like to test? You can say 'all' or just leave it blank for all levels.";
pub const CATEGORY_QUESTION: &str = "What category would you like to test? Valid options are: radical (r), kanji (k), vocabulary (v), all, or just leaving it blank.";

/// Which levels to quiz on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSelection {
    /// Every level from 1 up to the account's current level.
    All,
    Single(u32),
}

impl LevelSelection {
    /// Expand into the concrete list of levels.
    pub fn levels(self, max_level: u32) -> Vec<u32> {
        match self {
            LevelSelection::All => (1..=max_level).collect(),
            LevelSelection::Single(level) => vec![level],
        }
    }
}

impl fmt::Display for LevelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelSelection::All => write!(f, "all"),
            LevelSelection::Single(level) => write!(f, "{level}"),
        }
    }
}

/// Why a level answer was rejected. The message is shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelInputError {
    #[error("You didn't enter a number.")]
    NotANumber,
    #[error("Levels start at 1.")]
    Zero,
    #[error("You haven't reached that level yet!")]
    AboveCurrent,
}

/// Parse a level answer against the account's current level.
pub fn parse_level(input: &str, max_level: u32) -> Result<LevelSelection, LevelInputError> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("all") {
        return Ok(LevelSelection::All);
    }
    let level: u32 = input.parse().map_err(|_| LevelInputError::NotANumber)?;
    if level == 0 {
        return Err(LevelInputError::Zero);
    }
    if level > max_level {
        return Err(LevelInputError::AboveCurrent);
    }
    Ok(LevelSelection::Single(level))
}

/// A category answer contained a token outside the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("That wasn't a valid entry.")]
pub struct CategoryInputError {
    pub token: String,
}

/// Parse a whitespace-separated category answer.
///
/// Empty input and `all` select every kind. Repeated kinds are collapsed,
/// keeping the order in which they first appeared.
pub fn parse_categories(input: &str) -> Result<Vec<SubjectKind>, CategoryInputError> {
    let mut kinds = Vec::new();
    let mut push = |kind: SubjectKind| {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    };

    let mut tokens = input.split_whitespace().peekable();
    if tokens.peek().is_none() {
        SubjectKind::ALL.into_iter().for_each(&mut push);
    }
    for token in tokens {
        if token.eq_ignore_ascii_case("all") {
            SubjectKind::ALL.into_iter().for_each(&mut push);
            continue;
        }
        let kind = token.parse::<SubjectKind>().map_err(|_| CategoryInputError {
            token: token.to_string(),
        })?;
        push(kind);
    }
    Ok(kinds)
}

/// The level/type restriction sent with the subjects request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectFilter {
    pub levels: Vec<u32>,
    pub types: Vec<SubjectKind>,
}

impl SubjectFilter {
    pub fn new(selection: LevelSelection, max_level: u32, types: Vec<SubjectKind>) -> Self {
        Self {
            levels: selection.levels(max_level),
            types,
        }
    }

    /// Render as `?levels=<csv>&types=<csv>`.
    pub fn query_string(&self) -> String {
        let levels = join(self.levels.iter());
        let types = join(self.types.iter());
        format!("?levels={levels}&types={types}")
    }
}

fn join<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| i.to_string()).collect::<Vec<_>>().join(",")
}

/// Ask for a level until the answer is valid.
pub async fn ask_level(prompter: &mut dyn Prompter, max_level: u32) -> Result<LevelSelection> {
    loop {
        let Some(answer) = prompter.ask(LEVEL_QUESTION).await? else {
            bail!("input closed while choosing a level");
        };
        match parse_level(&answer, max_level) {
            Ok(selection) => return Ok(selection),
            Err(e) => {
                tracing::debug!(input = %answer, "rejected level");
                prompter.say(&e.to_string()).await?;
            }
        }
    }
}

/// Ask for categories until every token is recognised.
pub async fn ask_categories(prompter: &mut dyn Prompter) -> Result<Vec<SubjectKind>> {
    loop {
        let Some(answer) = prompter.ask(CATEGORY_QUESTION).await? else {
            bail!("input closed while choosing categories");
        };
        match parse_categories(&answer) {
            Ok(kinds) => return Ok(kinds),
            Err(e) => {
                tracing::debug!(token = %e.token, "rejected category");
                prompter.say(&e.to_string()).await?;
            }
        }
    }
}

/// Run both prompts and build the subject filter.
pub async fn ask_filter(prompter: &mut dyn Prompter, max_level: u32) -> Result<SubjectFilter> {
    let selection = ask_level(prompter, max_level).await?;
    let types = ask_categories(prompter).await?;
    Ok(SubjectFilter::new(selection, max_level, types))
}
