//! Version Error Types
//!
//! Descriptor queries never fail; these errors come from parsing version and
//! requirement strings supplied by callers.

use crate::core::error_handling::ContextualError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("Version string is empty")]
    Empty,

    #[error("Invalid {component} version component: '{value}'")]
    InvalidComponent {
        component: &'static str,
        value: String,
    },

    #[error("Expected {expected} version components, found {count}")]
    ComponentCount { expected: usize, count: usize },

    #[error("Too many version components: {count} (at most 3 allowed)")]
    TooManyComponents { count: usize },
}

/// Result type for version parsing
pub type VersionResult<T> = Result<T, VersionError>;

impl ContextualError for VersionError {
    fn is_user_actionable(&self) -> bool {
        // Every variant stems from malformed caller input
        true
    }

    fn user_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}
