//! Subject loading and the eligibility filter.

use std::collections::HashSet;

use anyhow::{Context, Result};

use crate::filter::SubjectFilter;
use crate::model::{ReviewStatistic, Subject};
use crate::traits::{Prompter, StudyApi};

/// Outcome of [`load_testable_subjects`].
#[derive(Debug, Clone)]
pub struct TestableSubjects {
    /// How many subjects matched the filter before eligibility.
    pub fetched: usize,
    /// Subjects that can be quizzed, in API order.
    pub subjects: Vec<Subject>,
}

/// Keep the subjects that have display text and at least one review
/// record. Subject order is preserved.
pub fn testable_subjects(subjects: Vec<Subject>, reviews: &[ReviewStatistic]) -> Vec<Subject> {
    let reviewed: HashSet<u64> = reviews.iter().map(ReviewStatistic::subject_id).collect();
    subjects
        .into_iter()
        .filter(|s| !s.characters().is_empty() && reviewed.contains(&s.id))
        .collect()
}

/// Fetch subjects matching `filter`, then every review record, and
/// return the eligible intersection.
///
/// Progress is reported on `prompter` as each stage completes.
pub async fn load_testable_subjects(
    api: &dyn StudyApi,
    filter: &SubjectFilter,
    prompter: &mut dyn Prompter,
) -> Result<TestableSubjects> {
    prompter.say("Loading pages...").await?;
    let subjects = api
        .subjects(filter)
        .await
        .context("failed to load subjects")?;
    let fetched = subjects.len();
    tracing::debug!(fetched, query = %filter.query_string(), "subjects loaded");
    prompter.say(&format!("{fetched} results found.")).await?;

    prompter.say("Comparing with available reviews...").await?;
    let reviews = api
        .review_statistics()
        .await
        .context("failed to load reviews")?;
    tracing::debug!(reviews = reviews.len(), "reviews loaded");

    let subjects = testable_subjects(subjects, &reviews);
    prompter
        .say(&format!("{} testable reviews found.", subjects.len()))
        .await?;
    Ok(TestableSubjects { fetched, subjects })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::LevelSelection;
    use crate::mock::{MockApi, ScriptedPrompter};
    use crate::model::{fixtures, SubjectKind, UserInfo};

    fn pool() -> Vec<Subject> {
        let mut image_only = fixtures::radical(3, "", &["Leaf"]);
        image_only.data.characters = None;
        vec![
            fixtures::radical(1, "火", &["Fire"]),
            fixtures::kanji(2, "山", &["Mountain"], &["さん"]),
            image_only,
            fixtures::kanji(4, "人", &["Person"], &["にん"]),
            fixtures::radical(5, "", &["Blank"]),
        ]
    }

    #[test]
    fn eligibility_requires_text_and_review() {
        let reviews = vec![
            fixtures::review(2),
            fixtures::review(3),
            fixtures::review(4),
            fixtures::review(4),
            fixtures::review(5),
            fixtures::review(99),
        ];
        let ids: Vec<u64> = testable_subjects(pool(), &reviews)
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn eligibility_matches_definition_for_every_subset() {
        // Every combination of reviewed ids over the pool.
        for mask in 0u32..(1 << 5) {
            let reviews: Vec<ReviewStatistic> = (1..=5)
                .filter(|id| mask & (1 << (id - 1)) != 0)
                .map(fixtures::review)
                .collect();
            let result = testable_subjects(pool(), &reviews);
            for subject in pool() {
                let expected = !subject.characters().is_empty()
                    && reviews.iter().any(|r| r.subject_id() == subject.id);
                assert_eq!(
                    result.iter().any(|s| s.id == subject.id),
                    expected,
                    "subject {} with mask {mask:05b}",
                    subject.id
                );
            }
        }
    }

    #[test]
    fn no_reviews_means_nothing_testable() {
        assert!(testable_subjects(pool(), &[]).is_empty());
    }

    #[tokio::test]
    async fn load_reports_fetched_and_eligible() {
        let api = MockApi::new(
            UserInfo {
                username: "tester".into(),
                level: 3,
            },
            pool(),
            vec![fixtures::review(1), fixtures::review(4)],
        );
        let filter = SubjectFilter::new(LevelSelection::All, 3, SubjectKind::ALL.to_vec());

        let mut prompter = ScriptedPrompter::default();
        let loaded = load_testable_subjects(&api, &filter, &mut prompter)
            .await
            .unwrap();
        assert_eq!(loaded.fetched, 5);
        assert_eq!(
            loaded.subjects.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![1, 4]
        );
        assert_eq!(api.last_filter(), Some(filter));
        assert_eq!(
            prompter.said(),
            vec![
                "Loading pages...",
                "5 results found.",
                "Comparing with available reviews...",
                "2 testable reviews found.",
            ]
        );
    }

    #[tokio::test]
    async fn load_filters_by_requested_types() {
        let api = MockApi::new(
            UserInfo {
                username: "tester".into(),
                level: 3,
            },
            pool(),
            (1..=5).map(fixtures::review).collect(),
        );
        let filter = SubjectFilter::new(LevelSelection::All, 3, vec![SubjectKind::Kanji]);

        let mut prompter = ScriptedPrompter::default();
        let loaded = load_testable_subjects(&api, &filter, &mut prompter)
            .await
            .unwrap();
        assert_eq!(loaded.fetched, 2);
        assert!(loaded
            .subjects
            .iter()
            .all(|s| s.object == SubjectKind::Kanji));
    }

    #[tokio::test]
    async fn load_propagates_api_errors() {
        let api = MockApi::failing(crate::ApiError::Api {
            code: 401,
            message: "Unauthorized".into(),
        });
        let filter = SubjectFilter::new(LevelSelection::Single(1), 1, vec![SubjectKind::Kanji]);

        let mut prompter = ScriptedPrompter::default();
        let err = load_testable_subjects(&api, &filter, &mut prompter)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("Error 401: Unauthorized"));
        assert_eq!(prompter.said(), vec!["Loading pages..."]);
        assert!(err.downcast_ref::<crate::ApiError>().is_some());
    }
}
