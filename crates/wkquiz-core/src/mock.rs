//! In-memory doubles for the study API and the terminal.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::filter::SubjectFilter;
use crate::model::{ReviewStatistic, Subject, UserInfo};
use crate::traits::{Prompter, StudyApi};

/// A study API that serves fixed data.
///
/// Subjects are filtered by the requested types; levels are not modelled.
pub struct MockApi {
    user: UserInfo,
    subjects: Vec<Subject>,
    reviews: Vec<ReviewStatistic>,
    /// When set, every call fails with this error.
    failure: Option<ApiError>,
    call_count: AtomicU32,
    last_filter: Mutex<Option<SubjectFilter>>,
}

impl MockApi {
    pub fn new(user: UserInfo, subjects: Vec<Subject>, reviews: Vec<ReviewStatistic>) -> Self {
        Self {
            user,
            subjects,
            reviews,
            failure: None,
            call_count: AtomicU32::new(0),
            last_filter: Mutex::new(None),
        }
    }

    /// A mock whose every call fails with `error`.
    pub fn failing(error: ApiError) -> Self {
        let mut api = Self::new(
            UserInfo {
                username: String::new(),
                level: 0,
            },
            vec![],
            vec![],
        );
        api.failure = Some(error);
        api
    }

    /// Number of API calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The filter passed to the last `subjects` call.
    pub fn last_filter(&self) -> Option<SubjectFilter> {
        self.last_filter.lock().unwrap().clone()
    }

    fn record(&self) -> anyhow::Result<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        match &self.failure {
            Some(e) => Err(e.clone().into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl StudyApi for MockApi {
    async fn user_info(&self) -> anyhow::Result<UserInfo> {
        self.record()?;
        Ok(self.user.clone())
    }

    async fn subjects(&self, filter: &SubjectFilter) -> anyhow::Result<Vec<Subject>> {
        self.record()?;
        *self.last_filter.lock().unwrap() = Some(filter.clone());
        Ok(self
            .subjects
            .iter()
            .filter(|s| filter.types.contains(&s.object))
            .cloned()
            .collect())
    }

    async fn review_statistics(&self) -> anyhow::Result<Vec<ReviewStatistic>> {
        self.record()?;
        Ok(self.reviews.clone())
    }
}

/// A prompter that replays canned answers and records everything shown.
///
/// Once the script runs out, `ask` reports closed input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    questions: Vec<String>,
    said: Vec<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Questions asked, in order.
    pub fn questions(&self) -> Vec<String> {
        self.questions.clone()
    }

    /// Lines printed with `say`, in order.
    pub fn said(&self) -> Vec<String> {
        self.said.clone()
    }

    /// Questions and printed lines interleaved as they happened.
    pub fn transcript(&self) -> Vec<String> {
        self.transcript.clone()
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn ask(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        self.questions.push(question.to_string());
        self.transcript.push(question.to_string());
        Ok(self.answers.pop_front())
    }

    async fn say(&mut self, line: &str) -> anyhow::Result<()> {
        self.said.push(line.to_string());
        self.transcript.push(line.to_string());
        Ok(())
    }
}
