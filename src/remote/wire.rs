//! Wire formats for the upstream GraphQL service.
//!
//! Decodes raw response bodies into the normalized records in
//! [`crate::models`]. An upstream payload missing an optional branch
//! (e.g. withheld company stats) normalizes to an absent value, not an
//! error; a payload that contradicts the schema is [`FetchError::Malformed`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::QueryOperation;
use crate::errors::FetchError;
use crate::models::{
    CompanyCategory, CompanyEncounter, CompanyStats, DailyChallenge, Difficulty, QuestionRecord,
    SimilarQuestionRef, SITE_BASE_URL,
};

/// Request envelope posted to the GraphQL endpoint.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    /// Query document.
    pub query: &'a str,
    /// Bound variables object.
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
struct TopicTagWire {
    name: String,
}

#[derive(Debug, Deserialize)]
struct QuestionWire {
    title: String,
    #[serde(rename = "titleSlug")]
    title_slug: String,
    #[serde(rename = "paidOnly")]
    paid_only: bool,
    difficulty: String,
    #[serde(rename = "topicTags")]
    topic_tags: Vec<TopicTagWire>,
}

#[derive(Debug, Deserialize)]
struct DailyWire {
    date: String,
    link: String,
    question: QuestionWire,
}

#[derive(Debug, Deserialize)]
struct CompanyBranchWire {
    #[serde(rename = "companyTagStats")]
    company_tag_stats: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SimilarEntryWire {
    title: String,
    #[serde(rename = "titleSlug")]
    title_slug: String,
    difficulty: String,
    #[serde(rename = "isPaidOnly")]
    is_paid_only: bool,
}

#[derive(Debug, Deserialize)]
struct SimilarBranchWire {
    #[serde(rename = "similarQuestionList")]
    similar_question_list: Option<Vec<SimilarEntryWire>>,
}

/// Extract the operation's result object from a raw response body.
///
/// # Errors
///
/// Returns [`FetchError::Malformed`] when the body is not valid JSON or
/// carries no `data` object, and [`FetchError::NotFound`] when a slug
/// operation's root key resolves to `null` (unknown slug).
pub fn decode_envelope(operation: QueryOperation, body: &str) -> Result<Value, FetchError> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|err| FetchError::Malformed(format!("response is not JSON: {err}")))?;

    let data = envelope
        .get("data")
        .filter(|data| !data.is_null())
        .ok_or_else(|| {
            let detail = envelope
                .get("errors")
                .map_or_else(|| "no data object".into(), Value::to_string);
            FetchError::Malformed(format!(
                "{} returned no data: {detail}",
                operation.name()
            ))
        })?;

    match data.get(operation.root_key()) {
        Some(root) if !root.is_null() => Ok(root.clone()),
        // A null root on a slug operation means the slug is unknown; the
        // daily operation has no slug, so a null root there is a schema
        // anomaly.
        _ if operation.requires_slug() => Err(FetchError::NotFound(format!(
            "{} resolved to nothing",
            operation.name()
        ))),
        _ => Err(FetchError::Malformed(format!(
            "{} resolved to nothing",
            operation.name()
        ))),
    }
}

/// Normalize a question-by-id result into a [`QuestionRecord`].
///
/// # Errors
///
/// Returns [`FetchError::Malformed`] when required fields are missing or
/// the difficulty label is unknown.
pub fn normalize_question(root: Value) -> Result<QuestionRecord, FetchError> {
    let wire: QuestionWire = serde_json::from_value(root)
        .map_err(|err| FetchError::Malformed(format!("question shape mismatch: {err}")))?;
    question_from_wire(wire)
}

/// Normalize a daily-challenge result into a [`DailyChallenge`].
///
/// # Errors
///
/// Returns [`FetchError::Malformed`] when required fields are missing,
/// the challenge date does not parse, or the difficulty label is unknown.
pub fn normalize_daily(root: Value) -> Result<DailyChallenge, FetchError> {
    let wire: DailyWire = serde_json::from_value(root)
        .map_err(|err| FetchError::Malformed(format!("daily shape mismatch: {err}")))?;

    let date = NaiveDate::parse_from_str(&wire.date, "%Y-%m-%d")
        .map_err(|err| FetchError::Malformed(format!("bad challenge date {}: {err}", wire.date)))?;

    Ok(DailyChallenge {
        date,
        link: format!("{SITE_BASE_URL}{}", wire.link),
        question: question_from_wire(wire.question)?,
    })
}

/// Normalize a company-stats result.
///
/// The stats branch arrives as a JSON string inside the JSON response and
/// is decoded a second time here. A `null` branch means the upstream
/// session lacks the required permission; that is `None`, not an error.
///
/// # Errors
///
/// Returns [`FetchError::Malformed`] when a present stats branch does not
/// decode as a category map.
pub fn normalize_company(root: Value) -> Result<Option<CompanyStats>, FetchError> {
    let wire: CompanyBranchWire = serde_json::from_value(root)
        .map_err(|err| FetchError::Malformed(format!("company shape mismatch: {err}")))?;

    let Some(raw) = wire.company_tag_stats else {
        return Ok(None);
    };

    let decoded: Map<String, Value> = serde_json::from_str(&raw)
        .map_err(|err| FetchError::Malformed(format!("company stats string mismatch: {err}")))?;

    let mut categories = Vec::with_capacity(decoded.len());
    for (label, entries) in decoded {
        let companies: Vec<CompanyEncounter> = serde_json::from_value(entries).map_err(|err| {
            FetchError::Malformed(format!("company category {label} mismatch: {err}"))
        })?;
        categories.push(CompanyCategory { label, companies });
    }

    Ok(Some(CompanyStats { categories }))
}

/// Normalize a similar-questions result.
///
/// A missing or `null` list normalizes to an empty vector.
///
/// # Errors
///
/// Returns [`FetchError::Malformed`] when a present list entry does not
/// match the expected shape or carries an unknown difficulty label.
pub fn normalize_similar(root: Value) -> Result<Vec<SimilarQuestionRef>, FetchError> {
    let wire: SimilarBranchWire = serde_json::from_value(root)
        .map_err(|err| FetchError::Malformed(format!("similar shape mismatch: {err}")))?;

    wire.similar_question_list
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            Ok(SimilarQuestionRef {
                title: entry.title,
                difficulty: parse_difficulty(&entry.difficulty)?,
                paid_only: entry.is_paid_only,
                slug: entry.title_slug,
            })
        })
        .collect()
}

fn question_from_wire(wire: QuestionWire) -> Result<QuestionRecord, FetchError> {
    Ok(QuestionRecord {
        title: wire.title,
        difficulty: parse_difficulty(&wire.difficulty)?,
        paid_only: wire.paid_only,
        topics: wire.topic_tags.into_iter().map(|tag| tag.name).collect(),
        link: QuestionRecord::problem_link(&wire.title_slug),
        slug: wire.title_slug,
    })
}

fn parse_difficulty(label: &str) -> Result<Difficulty, FetchError> {
    match label {
        "Easy" => Ok(Difficulty::Easy),
        "Medium" => Ok(Difficulty::Medium),
        "Hard" => Ok(Difficulty::Hard),
        other => Err(FetchError::Malformed(format!(
            "unknown difficulty label: {other}"
        ))),
    }
}
