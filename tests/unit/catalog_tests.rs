//! Unit tests for the query catalog.

use lc_herald::catalog::QueryOperation;
use lc_herald::errors::FetchError;

#[test]
fn documents_declare_expected_operations() {
    assert!(QueryOperation::QuestionById
        .document()
        .contains("query questionTitle"));
    assert!(QueryOperation::DailyQuestion
        .document()
        .contains("query questionOfToday"));
    assert!(QueryOperation::CompanyStats
        .document()
        .contains("companyTagStats"));
    assert!(QueryOperation::SimilarQuestions
        .document()
        .contains("similarQuestionList"));
}

#[test]
fn root_keys_match_documents() {
    assert_eq!(
        QueryOperation::DailyQuestion.root_key(),
        "activeDailyCodingChallengeQuestion"
    );
    assert_eq!(QueryOperation::QuestionById.root_key(), "question");
    assert_eq!(QueryOperation::CompanyStats.root_key(), "question");
    assert_eq!(QueryOperation::SimilarQuestions.root_key(), "question");
}

#[test]
fn daily_operation_needs_no_slug() {
    assert!(!QueryOperation::DailyQuestion.requires_slug());
    let variables = QueryOperation::DailyQuestion
        .bind_variables(None)
        .expect("daily binds without slug");
    assert_eq!(variables, serde_json::json!({}));
}

#[test]
fn slug_operations_bind_title_slug() {
    for operation in [
        QueryOperation::QuestionById,
        QueryOperation::CompanyStats,
        QueryOperation::SimilarQuestions,
    ] {
        let variables = operation
            .bind_variables(Some("two-sum"))
            .expect("slug binds");
        assert_eq!(variables, serde_json::json!({ "titleSlug": "two-sum" }));
    }
}

#[test]
fn missing_slug_is_malformed_before_any_network_call() {
    let err = QueryOperation::QuestionById
        .bind_variables(None)
        .expect_err("missing slug rejected");
    assert!(matches!(err, FetchError::Malformed(_)));

    let err = QueryOperation::SimilarQuestions
        .bind_variables(Some(""))
        .expect_err("empty slug rejected");
    assert!(matches!(err, FetchError::Malformed(_)));
}
