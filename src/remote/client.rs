//! HTTP client for the upstream GraphQL question service.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::header::COOKIE;
use tracing::debug;

use crate::catalog::QueryOperation;
use crate::errors::FetchError;
use crate::models::{CompanyStats, DailyChallenge, QuestionRecord, SimilarQuestionRef};
use crate::remote::circuit::SessionBreaker;
use crate::remote::wire::{self, GraphQlRequest};
use crate::remote::QuestionSource;
use crate::{AppError, Result};

/// Session-cookie-authenticated client for the four catalog operations.
///
/// Holds the process-wide [`SessionBreaker`]; a breaker that is open
/// fails every call up front without touching the network.
pub struct RemoteQuestionClient {
    http: reqwest::Client,
    endpoint: String,
    session_cookie: String,
    breaker: SessionBreaker,
}

impl RemoteQuestionClient {
    /// Build a client against the given endpoint with a bounded timeout.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(endpoint: String, session_cookie: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Config(format!("failed to build http client: {err}")))?;
        Ok(Self {
            http,
            endpoint,
            session_cookie,
            breaker: SessionBreaker::default(),
        })
    }

    /// Execute one catalog operation and return its decoded result object.
    ///
    /// # Errors
    ///
    /// Returns the classified [`FetchError`] for breaker-open, transport,
    /// auth, schema, and unknown-slug failures.
    async fn execute(
        &self,
        operation: QueryOperation,
        slug: Option<&str>,
    ) -> std::result::Result<serde_json::Value, FetchError> {
        self.breaker.check()?;
        let variables = operation.bind_variables(slug)?;
        let request = GraphQlRequest {
            query: operation.document(),
            variables,
        };

        debug!(operation = operation.name(), "executing upstream query");

        let response = self
            .http
            .post(&self.endpoint)
            .header(COOKIE, &self.session_cookie)
            .json(&request)
            .send()
            .await
            .map_err(|err| FetchError::Transport(format!("request failed: {err}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            self.breaker.record_unauthorized();
            return Err(FetchError::Unauthorized(format!(
                "upstream rejected session cookie ({status})"
            )));
        }
        if !status.is_success() {
            return Err(FetchError::Transport(format!(
                "upstream returned {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Transport(format!("failed to read body: {err}")))?;

        let root = wire::decode_envelope(operation, &body)?;
        self.breaker.record_success();
        Ok(root)
    }
}

impl QuestionSource for RemoteQuestionClient {
    fn fetch_question(
        &self,
        slug: &str,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<QuestionRecord, FetchError>> + Send + '_>>
    {
        let slug = slug.to_owned();
        Box::pin(async move {
            let root = self
                .execute(QueryOperation::QuestionById, Some(&slug))
                .await?;
            wire::normalize_question(root)
        })
    }

    fn fetch_daily(
        &self,
    ) -> Pin<Box<dyn Future<Output = std::result::Result<DailyChallenge, FetchError>> + Send + '_>>
    {
        Box::pin(async move {
            let root = self.execute(QueryOperation::DailyQuestion, None).await?;
            wire::normalize_daily(root)
        })
    }

    fn fetch_company_stats(
        &self,
        slug: &str,
    ) -> Pin<
        Box<
            dyn Future<Output = std::result::Result<Option<CompanyStats>, FetchError>> + Send + '_,
        >,
    > {
        let slug = slug.to_owned();
        Box::pin(async move {
            let root = self
                .execute(QueryOperation::CompanyStats, Some(&slug))
                .await?;
            wire::normalize_company(root)
        })
    }

    fn fetch_similar(
        &self,
        slug: &str,
    ) -> Pin<
        Box<
            dyn Future<Output = std::result::Result<Vec<SimilarQuestionRef>, FetchError>>
                + Send
                + '_,
        >,
    > {
        let slug = slug.to_owned();
        Box::pin(async move {
            let root = self
                .execute(QueryOperation::SimilarQuestions, Some(&slug))
                .await?;
            wire::normalize_similar(root)
        })
    }
}
