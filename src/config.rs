//! Tool enablement configuration.
//!
//! A read-only map from tool name to enabled flag, built once at startup.
//! Tools absent from the map are enabled.

use std::collections::HashMap;

/// Compiled-in enablement. Flip an entry to `false` to hide that tool.
const BUILTIN_TOOLS: &[(&str, bool)] = &[
    ("get-me", true),
    ("list-users", true),
    ("get-user", true),
    ("search", true),
    ("get-all-pages", true),
    ("get-page", true),
    ("create-page", true),
    ("update-page", true),
    ("get-database", true),
    ("create-database", true),
    ("query-database", true),
    ("get-block", true),
    ("get-block-children", true),
    ("append-block-children", true),
    ("delete-block", true),
    ("list-comments", true),
    ("create-comment", true),
];

/// Which tools the registry exposes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolConfig {
    enabled: HashMap<String, bool>,
}

impl ToolConfig {
    /// The compiled-in enablement map.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN_TOOLS.iter().copied())
    }

    /// Build from explicit `(name, enabled)` pairs. Later entries win.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        Self {
            enabled: entries
                .into_iter()
                .map(|(name, enabled)| (name.to_string(), enabled))
                .collect(),
        }
    }

    /// Return a copy with the named tools disabled.
    pub fn disabling<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        for name in names {
            self.enabled.insert(name.as_ref().to_string(), false);
        }
        self
    }

    /// Whether `name` should be registered. Defaults to `true` when unlisted.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.get(name).copied().unwrap_or(true)
    }
}
