//! Advisory messages derived from the simulated state.
//!
//! Advisories are transient: the evaluator recomputes the whole list on
//! each check tick and the caller swaps it in only when it changed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single advisory produced by the status evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "class", content = "message", rename_all = "lowercase")]
pub enum Advisory {
    /// Actionable condition, rendered with an `ALERT:` prefix
    Alert(String),
    /// Informational rolling status, rendered with a `STATUS:` prefix
    Status(String),
}

impl Advisory {
    pub fn is_alert(&self) -> bool {
        matches!(self, Advisory::Alert(_))
    }

    /// The message body without its class prefix
    pub fn message(&self) -> &str {
        match self {
            Advisory::Alert(m) | Advisory::Status(m) => m,
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::Alert(m) => write!(f, "ALERT: {m}"),
            Advisory::Status(m) => write!(f, "STATUS: {m}"),
        }
    }
}
