//! The interactive quiz session.
//!
//! Each round draws a subject uniformly at random (with replacement) and
//! walks it through `AwaitingMeaning → AwaitingReading → Graded`; radicals
//! skip the reading step. The stop word or closed input at any prompt
//! ends the session without grading the pending answer.

use anyhow::Result;
use rand::Rng;

use crate::grading::{meaning_correction, meaning_matches, reading_correction, reading_matches};
use crate::model::Subject;
use crate::traits::Prompter;

/// The input that ends a session.
pub const DEFAULT_STOP_WORD: &str = "!stop";

/// How a single subject went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail,
    /// The learner asked to stop before the subject was graded.
    Stopped,
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizSummary {
    /// Subjects graded (stopped subjects are not counted).
    pub asked: u32,
    pub passed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    AwaitingMeaning,
    AwaitingReading,
    Graded(Outcome),
}

/// A quiz over a fixed pool of eligible subjects.
pub struct QuizSession<R> {
    subjects: Vec<Subject>,
    rng: R,
    stop_word: String,
}

impl<R: Rng> QuizSession<R> {
    pub fn new(subjects: Vec<Subject>, rng: R) -> Self {
        Self {
            subjects,
            rng,
            stop_word: DEFAULT_STOP_WORD.to_string(),
        }
    }

    pub fn with_stop_word(mut self, stop_word: impl Into<String>) -> Self {
        self.stop_word = stop_word.into();
        self
    }

    /// Ask random subjects until the learner stops.
    pub async fn run(&mut self, prompter: &mut dyn Prompter) -> Result<QuizSummary> {
        let mut summary = QuizSummary::default();
        if self.subjects.is_empty() {
            prompter.say("Nothing to quiz on.").await?;
            return Ok(summary);
        }

        loop {
            let index = self.rng.random_range(0..self.subjects.len());
            match self.ask(&self.subjects[index], prompter).await? {
                Outcome::Stopped => break,
                outcome => {
                    summary.asked += 1;
                    if outcome == Outcome::Pass {
                        summary.passed += 1;
                    }
                    prompter.say("").await?;
                }
            }
        }

        tracing::debug!(asked = summary.asked, passed = summary.passed, "quiz finished");
        Ok(summary)
    }

    /// Quiz a single subject.
    pub async fn ask(&self, subject: &Subject, prompter: &mut dyn Prompter) -> Result<Outcome> {
        let mut step = Step::AwaitingMeaning;
        loop {
            step = match step {
                Step::AwaitingMeaning => {
                    let Some(answer) = self.read(prompter, "meaning", subject).await? else {
                        return Ok(Outcome::Stopped);
                    };
                    if meaning_matches(subject, &answer) {
                        prompter.say("Correct!").await?;
                        if wants_reading(subject) {
                            Step::AwaitingReading
                        } else {
                            Step::Graded(Outcome::Pass)
                        }
                    } else {
                        prompter.say("Incorrect.").await?;
                        prompter.say(&meaning_correction(subject)).await?;
                        Step::Graded(Outcome::Fail)
                    }
                }
                Step::AwaitingReading => {
                    let Some(answer) = self.read(prompter, "reading", subject).await? else {
                        return Ok(Outcome::Stopped);
                    };
                    if reading_matches(subject, &answer) {
                        prompter.say("Correct!").await?;
                        Step::Graded(Outcome::Pass)
                    } else {
                        prompter.say("Incorrect.").await?;
                        prompter.say(&reading_correction(subject)).await?;
                        Step::Graded(Outcome::Fail)
                    }
                }
                Step::Graded(outcome) => return Ok(outcome),
            };
        }
    }

    /// Ask one question; `None` means stop.
    async fn read(
        &self,
        prompter: &mut dyn Prompter,
        noun: &str,
        subject: &Subject,
    ) -> Result<Option<String>> {
        let question = format!(
            "What is the {noun} of the {}: {}?",
            subject.object,
            subject.characters()
        );
        Ok(prompter
            .ask(&question)
            .await?
            .filter(|answer| answer.trim() != self.stop_word))
    }
}

fn wants_reading(subject: &Subject) -> bool {
    subject.object.has_readings() && !subject.accepted_readings().is_empty()
}
