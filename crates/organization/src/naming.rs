use serde::{Deserialize, Serialize};
use std::fmt;

/// File naming convention, judged on the stem before the first `.`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NamingConvention {
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "other")]
    Other,
}

impl NamingConvention {
    /// Classify a file name.
    ///
    /// Returns `None` for names that fit every convention (a single lowercase
    /// word such as `index` or `utils`) and for dot-files.
    pub fn classify(file_name: &str) -> Option<Self> {
        let stem = file_name.split('.').next().unwrap_or_default();
        // Dunder names like `__init__` are plain words.
        let stem = stem.trim_matches('_');
        if stem.is_empty() {
            return None;
        }

        let has_upper = stem.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = stem.chars().any(|c| c.is_ascii_lowercase());
        let has_dash = stem.contains('-');
        let has_underscore = stem.contains('_');
        let alnum_only = stem.chars().all(|c| c.is_ascii_alphanumeric());

        if alnum_only {
            if !has_upper {
                return None;
            }
            let first_upper = stem.chars().next().is_some_and(|c| c.is_ascii_uppercase());
            return Some(match (first_upper, has_lower) {
                (true, true) => NamingConvention::PascalCase,
                (false, _) => NamingConvention::CamelCase,
                (true, false) => NamingConvention::Other,
            });
        }

        if has_upper || (has_dash && has_underscore) {
            return Some(NamingConvention::Other);
        }

        let separator = if has_dash { '-' } else { '_' };
        let well_formed = stem
            .split(separator)
            .all(|word| !word.is_empty() && word.chars().all(|c| c.is_ascii_alphanumeric()));

        Some(match (well_formed, has_dash) {
            (true, true) => NamingConvention::KebabCase,
            (true, false) => NamingConvention::SnakeCase,
            (false, _) => NamingConvention::Other,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NamingConvention::KebabCase => "kebab-case",
            NamingConvention::CamelCase => "camelCase",
            NamingConvention::PascalCase => "PascalCase",
            NamingConvention::SnakeCase => "snake_case",
            NamingConvention::Other => "other",
        }
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
