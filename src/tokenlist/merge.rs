//! Reconciliation of a fresh token list against the persisted document
//!
//! Decides whether a new version gets published. The engine is pure: the
//! caller reads the previous document and writes the published one.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::error::{Result, UpdateError};
use crate::types::{Token, TokenListDocument, Version};

/// State of the previously persisted token list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviousDocument {
    Found(TokenListDocument),
    /// No file at the expected path
    Missing,
    /// File exists but could not be read or parsed
    Corrupt(String),
}

/// What to do with an unreadable previous document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CorruptPolicy {
    /// Leave the file untouched and skip the write
    #[default]
    Preserve,
    /// Replace it with a fresh version 1
    Rewrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyList,
    NoPreviousVersion,
    CorruptPrevious,
    Unchanged,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::EmptyList => "empty token list",
            SkipReason::NoPreviousVersion => "no previous version",
            SkipReason::CorruptPrevious => "previous version unreadable",
            SkipReason::Unchanged => "token list unchanged",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeDecision {
    Skip(SkipReason),
    Publish(TokenListDocument),
}

impl MergeDecision {
    pub fn is_publish(&self) -> bool {
        matches!(self, MergeDecision::Publish(_))
    }
}

/// Document-level fields of a published list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
    pub name: String,
    pub logo_uri: String,
}

pub struct MergeEngine {
    header: DocumentHeader,
    time_format: String,
    policy: CorruptPolicy,
}

impl MergeEngine {
    pub fn new(
        header: DocumentHeader,
        time_format: impl Into<String>,
        policy: CorruptPolicy,
    ) -> Result<Self> {
        let time_format = time_format.into();
        if StrftimeItems::new(&time_format).any(|item| matches!(item, Item::Error)) {
            return Err(UpdateError::Config(format!(
                "invalid timestamp format: {}",
                time_format
            )));
        }

        Ok(Self {
            header,
            time_format,
            policy,
        })
    }

    /// `tokens` must already be sorted; equality with the previous list is order-sensitive
    pub fn reconcile(
        &self,
        tokens: Vec<Token>,
        previous: &PreviousDocument,
        now: DateTime<Utc>,
    ) -> MergeDecision {
        if tokens.is_empty() {
            return MergeDecision::Skip(SkipReason::EmptyList);
        }

        let previous_major = match previous {
            PreviousDocument::Found(doc) => {
                if doc.tokens == tokens {
                    return MergeDecision::Skip(SkipReason::Unchanged);
                }
                doc.version.major
            }
            PreviousDocument::Missing => {
                return MergeDecision::Skip(SkipReason::NoPreviousVersion);
            }
            PreviousDocument::Corrupt(_) => match self.policy {
                CorruptPolicy::Preserve => {
                    return MergeDecision::Skip(SkipReason::CorruptPrevious);
                }
                CorruptPolicy::Rewrite => 0,
            },
        };

        MergeDecision::Publish(TokenListDocument {
            name: self.header.name.clone(),
            logo_uri: self.header.logo_uri.clone(),
            timestamp: now.format(&self.time_format).to_string(),
            tokens,
            version: Version {
                major: previous_major + 1,
            },
        })
    }
}
