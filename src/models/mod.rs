//! Domain model types, value-like and constructed fresh per invocation.

pub mod artifact;
pub mod question;

pub use artifact::{Artifact, ArtifactField, ThreadHandle};
pub use question::{
    CompanyCategory, CompanyEncounter, CompanyStats, DailyChallenge, Difficulty, QuestionRecord,
    SimilarQuestionRef, PROBLEM_BASE_URL, SITE_BASE_URL,
};
