//! Client for the remote question service and its failure handling.
//!
//! The [`QuestionSource`] trait decouples the orchestrator from the HTTP
//! transport; [`RemoteQuestionClient`] is the production implementation,
//! tests substitute in-memory fakes.

pub mod circuit;
pub mod client;
pub mod wire;

use std::future::Future;
use std::pin::Pin;

use crate::errors::FetchError;
use crate::models::{CompanyStats, DailyChallenge, QuestionRecord, SimilarQuestionRef};

pub use circuit::SessionBreaker;
pub use client::RemoteQuestionClient;

/// Typed read operations against the question service.
///
/// Implementations classify failures per [`FetchError`]; absent optional
/// branches (withheld company stats, empty similar list) are values, not
/// errors.
pub trait QuestionSource: Send + Sync {
    /// Fetch a single question by slug.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] for an unknown slug, or the
    /// classified transport/auth/schema failure.
    fn fetch_question(
        &self,
        slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<QuestionRecord, FetchError>> + Send + '_>>;

    /// Fetch the active daily challenge.
    ///
    /// # Errors
    ///
    /// Returns the classified transport/auth/schema failure.
    fn fetch_daily(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<DailyChallenge, FetchError>> + Send + '_>>;

    /// Fetch company-frequency statistics for a slug.
    ///
    /// `None` means the upstream service withheld the stats branch.
    ///
    /// # Errors
    ///
    /// Returns the classified transport/auth/schema failure.
    fn fetch_company_stats(
        &self,
        slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<CompanyStats>, FetchError>> + Send + '_>>;

    /// Fetch similar-question references for a slug.
    ///
    /// # Errors
    ///
    /// Returns the classified transport/auth/schema failure.
    fn fetch_similar(
        &self,
        slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<SimilarQuestionRef>, FetchError>> + Send + '_>>;
}
