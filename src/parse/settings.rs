//! Parser configuration

use serde::{Deserialize, Serialize};

/// What to do with a header field letter that has no defined meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnknownFieldPolicy {
    /// Abort the whole parse with `ParseError::UnhandledField`
    Reject,
    /// Skip the field through the end of its line
    Discard,
}

impl Default for UnknownFieldPolicy {
    fn default() -> Self {
        UnknownFieldPolicy::Reject
    }
}

/// Configuration options for reading ABC input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSettings {
    /// Name of the input, shown in scan error messages (e.g. a file name)
    pub source_name: String,

    /// Handling of undocumented header field letters
    pub unknown_fields: UnknownFieldPolicy,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            source_name: String::from("input"),
            unknown_fields: UnknownFieldPolicy::default(),
        }
    }
}

impl ParseSettings {
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }
}
