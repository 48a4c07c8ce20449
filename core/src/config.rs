//! Client configuration.
//!
//! Every field except the URL has a default, so a config file only needs
//! `url` to be useful.

use serde::{Deserialize, Serialize};

use crate::types::UnknownLabels;

pub const DEFAULT_PARSE_METHOD: &str = "parse";
pub const DEFAULT_EXPAND_METHOD: &str = "expand";

/// Settings for a `LibpostalClient`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Libpostal service, e.g. `http://localhost:4400`.
    pub url: String,
    #[serde(default = "default_parse_method")]
    pub parse_method: String,
    #[serde(default = "default_expand_method")]
    pub expand_method: String,
    #[serde(default)]
    pub unknown_labels: UnknownLabels,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            parse_method: default_parse_method(),
            expand_method: default_expand_method(),
            unknown_labels: UnknownLabels::default(),
        }
    }

    pub fn parse_method(mut self, name: impl Into<String>) -> Self {
        self.parse_method = name.into();
        self
    }

    pub fn expand_method(mut self, name: impl Into<String>) -> Self {
        self.expand_method = name.into();
        self
    }

    pub fn unknown_labels(mut self, policy: UnknownLabels) -> Self {
        self.unknown_labels = policy;
        self
    }
}

fn default_parse_method() -> String {
    DEFAULT_PARSE_METHOD.to_string()
}

fn default_expand_method() -> String {
    DEFAULT_EXPAND_METHOD.to_string()
}
