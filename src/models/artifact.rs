//! Display artifacts and thread handles exchanged with the publisher.

use chrono::{DateTime, Utc};

/// One (label, value) pair inside an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactField {
    /// Field label.
    pub name: String,
    /// Rendered field value.
    pub value: String,
    /// Whether the platform may place this field inline with its neighbors.
    pub inline: bool,
}

/// A structured display unit: title, optional description, ordered fields.
///
/// Maps directly onto a chat platform's rich-card primitive. A pipeline
/// invocation always produces artifacts in the order
/// [primary, company-stats, similar-questions].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Card title.
    pub title: String,
    /// Optional card description shown under the title.
    pub description: Option<String>,
    /// Ordered field list.
    pub fields: Vec<ArtifactField>,
}

impl Artifact {
    /// Start an artifact with the given title and no fields.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Attach a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a field, preserving insertion order.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(ArtifactField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Append fields in order from (name, value, inline) tuples.
    #[must_use]
    pub fn fields<I, N, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (N, V, bool)>,
        N: Into<String>,
        V: Into<String>,
    {
        for (name, value, inline) in fields {
            self = self.field(name, value, inline);
        }
        self
    }
}

/// Reference to a discussion thread on the host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadHandle {
    /// Platform identifier of the thread.
    pub id: u64,
    /// Thread name as shown to users.
    pub name: String,
    /// When the thread was created.
    pub created_at: DateTime<Utc>,
    /// Identifier of the parent channel the thread hangs off.
    pub parent_channel: u64,
}
