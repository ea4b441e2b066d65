//! Static registry of the four read operations against the question service.

use serde_json::{json, Value};

use crate::errors::FetchError;

const QUESTION_DOCUMENT: &str = "\
query questionTitle($titleSlug: String!) {
    question(titleSlug: $titleSlug) {
        title
        titleSlug
        paidOnly: isPaidOnly
        difficulty
        topicTags {
            name
        }
    }
}";

const DAILY_DOCUMENT: &str = "\
query questionOfToday {
    activeDailyCodingChallengeQuestion {
        date
        link
        question {
            difficulty
            paidOnly: isPaidOnly
            title
            titleSlug
            topicTags {
                name
            }
        }
    }
}";

const COMPANY_DOCUMENT: &str = "\
query questionCompanyStats($titleSlug: String!) {
    question(titleSlug: $titleSlug) {
        companyTagStats
    }
}";

const SIMILAR_DOCUMENT: &str = "\
query SimilarQuestions($titleSlug: String!) {
    question(titleSlug: $titleSlug) {
        similarQuestionList {
            difficulty
            titleSlug
            title
            isPaidOnly
        }
    }
}";

/// One of the four parameterized read operations the client can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOperation {
    /// Fetch a single question by slug.
    QuestionById,
    /// Fetch the active daily challenge.
    DailyQuestion,
    /// Fetch company-frequency statistics for a slug.
    CompanyStats,
    /// Fetch similar-question references for a slug.
    SimilarQuestions,
}

impl QueryOperation {
    /// The GraphQL document for this operation.
    #[must_use]
    pub fn document(self) -> &'static str {
        match self {
            Self::QuestionById => QUESTION_DOCUMENT,
            Self::DailyQuestion => DAILY_DOCUMENT,
            Self::CompanyStats => COMPANY_DOCUMENT,
            Self::SimilarQuestions => SIMILAR_DOCUMENT,
        }
    }

    /// Key under `data` where this operation's result lives.
    #[must_use]
    pub fn root_key(self) -> &'static str {
        match self {
            Self::DailyQuestion => "activeDailyCodingChallengeQuestion",
            _ => "question",
        }
    }

    /// Operation name used in operator-facing logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::QuestionById => "question_by_id",
            Self::DailyQuestion => "daily_question",
            Self::CompanyStats => "company_stats",
            Self::SimilarQuestions => "similar_questions",
        }
    }

    /// Whether this operation declares a `titleSlug` variable.
    #[must_use]
    pub fn requires_slug(self) -> bool {
        !matches!(self, Self::DailyQuestion)
    }

    /// Bind the supplied parameters into a variables object.
    ///
    /// Every variable the operation declares must be supplied; this check
    /// runs before any network call is made.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Malformed`] when a declared variable is missing
    /// or empty.
    pub fn bind_variables(self, slug: Option<&str>) -> Result<Value, FetchError> {
        if !self.requires_slug() {
            return Ok(json!({}));
        }
        match slug {
            Some(slug) if !slug.is_empty() => Ok(json!({ "titleSlug": slug })),
            _ => Err(FetchError::Malformed(format!(
                "operation {} requires a titleSlug variable",
                self.name()
            ))),
        }
    }
}
