//! Question records as normalized from the remote problem-set service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Base URL for canonical problem links.
pub const PROBLEM_BASE_URL: &str = "https://leetcode.com/problems";

/// Site root used to resolve relative deep links from the daily endpoint.
pub const SITE_BASE_URL: &str = "https://leetcode.com";

/// Question difficulty tier as reported upstream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    /// Entry-level question.
    Easy,
    /// Mid-tier question.
    Medium,
    /// Hard question.
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// A single question as fetched for one command invocation.
///
/// Immutable once constructed; discarded after the artifacts are published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// Unique slug identifier, e.g. `two-sum`.
    pub slug: String,
    /// Human-readable title.
    pub title: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Whether the question requires a paid subscription.
    pub paid_only: bool,
    /// Topic tags in upstream insertion order.
    pub topics: Vec<String>,
    /// Canonical link to the question page.
    pub link: String,
}

impl QuestionRecord {
    /// Canonical problem-page link for a slug.
    #[must_use]
    pub fn problem_link(slug: &str) -> String {
        format!("{PROBLEM_BASE_URL}/{slug}")
    }
}

/// The daily challenge: a question plus its challenge date and deep link.
///
/// Refetched on every `daily` invocation, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyChallenge {
    /// Calendar day of the challenge, unique per day.
    pub date: NaiveDate,
    /// Deep link into the daily-challenge page.
    pub link: String,
    /// The challenge question itself.
    pub question: QuestionRecord,
}

/// One (company, encounter count) pair inside a stats category.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CompanyEncounter {
    /// Company name.
    pub name: String,
    /// How many times the question was reportedly encountered there.
    #[serde(rename = "timesEncountered")]
    pub times_encountered: u32,
}

/// A labelled category of company encounters, companies in given order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCategory {
    /// Category label, e.g. `6-Month`.
    pub label: String,
    /// Companies in the order the upstream service reported them.
    pub companies: Vec<CompanyEncounter>,
}

/// Company-frequency statistics for one question, categories in given order.
///
/// The upstream service withholds this branch for sessions without the
/// required permission; callers model that as the whole value being absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyStats {
    /// Ordered categories.
    pub categories: Vec<CompanyCategory>,
}

/// Lightweight reference to a related question, not a full record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarQuestionRef {
    /// Human-readable title.
    pub title: String,
    /// Unique slug identifier.
    pub slug: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Whether the question requires a paid subscription.
    pub paid_only: bool,
}
