//! Idempotent placement of artifacts into time-windowed discussion threads.
//!
//! The [`ThreadSurface`] trait is the platform port; [`ThreadPublisher`]
//! runs the resolve/reuse/create state machine against it. The Discord
//! adapter lives in [`crate::discord`], tests use an in-memory fake.

pub mod publisher;
pub mod surface;

pub use publisher::{PublishOutcome, ThreadPublisher};
pub use surface::{ThreadMessage, ThreadSurface};
