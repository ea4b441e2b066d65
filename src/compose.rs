//! Builds display artifacts from normalized question records.
//!
//! Composition never fails: absent or empty inputs degrade to a
//! placeholder artifact, since a partial notification is strictly more
//! useful than none. Every question/daily invocation produces exactly
//! three artifacts in the order [primary, company-stats, similar].

use crate::models::{Artifact, CompanyStats, DailyChallenge, QuestionRecord, SimilarQuestionRef};

/// Discord spoiler marker wrapped around difficulty and topics so the
/// summary does not pre-reveal them.
const SPOILER: &str = "||";

const DAILY_DESCRIPTION: &str = "This is the daily LeetCode question, Good Luck!";
const QUESTION_DESCRIPTION: &str = "LC Question Details";
const COMPANY_TITLE: &str = "Company Encounter Summary";
const SIMILAR_TITLE: &str = "Similar Questions";
const NO_COMPANY_DATA: &str = "No Company Data Available";
const NO_SIMILAR: &str = "No Similar Questions Available";

/// Suffix appended to a similar-question field name behind the paywall.
const PAID_ONLY_SUFFIX: &str = " (Paid Only)";

/// Compose the primary artifact for a daily-challenge invocation.
#[must_use]
pub fn daily_artifact(daily: &DailyChallenge) -> Artifact {
    let title = format!("Daily LC — {}", daily.question.title);
    Artifact::new(title)
        .with_description(DAILY_DESCRIPTION)
        .fields(primary_fields(&daily.question, &daily.link))
}

/// Compose the primary artifact for a question-by-slug invocation.
#[must_use]
pub fn question_artifact(question: &QuestionRecord) -> Artifact {
    Artifact::new(question.title.clone())
        .with_description(QUESTION_DESCRIPTION)
        .fields(primary_fields(question, &question.link))
}

/// Compose the company-stats artifact.
///
/// Absent or empty stats produce the single-field placeholder rather than
/// dropping the artifact — the publish step always receives exactly three.
#[must_use]
pub fn company_artifact(stats: Option<&CompanyStats>) -> Artifact {
    let artifact = Artifact::new(COMPANY_TITLE);
    match stats {
        Some(stats) if !stats.categories.is_empty() => {
            stats.categories.iter().fold(artifact, |artifact, category| {
                let lines: Vec<String> = category
                    .companies
                    .iter()
                    .map(|company| format!("✓ {} ({})", company.name, company.times_encountered))
                    .collect();
                artifact.field(
                    format!("Category {}", category.label),
                    lines.join("\n"),
                    false,
                )
            })
        }
        _ => artifact.field(NO_COMPANY_DATA, "—", false),
    }
}

/// Compose the similar-questions artifact.
///
/// An empty list produces the single-field placeholder.
#[must_use]
pub fn similar_artifact(similar: &[SimilarQuestionRef]) -> Artifact {
    let artifact = Artifact::new(SIMILAR_TITLE);
    if similar.is_empty() {
        return artifact.field(NO_SIMILAR, "—", false);
    }
    similar.iter().fold(artifact, |artifact, entry| {
        let name = if entry.paid_only {
            format!("{}{PAID_ONLY_SUFFIX}", entry.title)
        } else {
            entry.title.clone()
        };
        artifact.field(name, QuestionRecord::problem_link(&entry.slug), false)
    })
}

/// Field set shared by both primary artifact kinds:
/// {Title, Link, Paid-Only, Topics, Difficulty}.
fn primary_fields(question: &QuestionRecord, link: &str) -> Vec<(String, String, bool)> {
    vec![
        ("Title".into(), question.title.clone(), true),
        ("Link".into(), link.to_owned(), true),
        ("Paid-Only".into(), question.paid_only.to_string(), true),
        (
            "Topics".into(),
            spoiler(&question.topics.join(", ")),
            true,
        ),
        (
            "Difficulty".into(),
            spoiler(&question.difficulty.to_string()),
            true,
        ),
    ]
}

fn spoiler(value: &str) -> String {
    format!("{SPOILER}{value}{SPOILER}")
}
