//! Offline quick check.
//!
//! A cheap structural pass mirroring the first stage of the validation
//! service: delimiter balance, then every `NAME(` call must be a known
//! function. It is advisory only and never blocks a submission.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Functions accepted by the quick check out of the box.
pub const DEFAULT_FUNCTIONS: &[&str] = &["SUM", "AVERAGE", "COUNTROWS", "CALCULATE", "MIN", "MAX"];

/// Message shown when the quick check passes.
pub const OK_MESSAGE: &str = "Quick-sanity OK";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    UnbalancedParentheses,
    UnbalancedBrackets,
    UnknownFunction(String),
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::UnbalancedParentheses => write!(f, "Unbalanced parentheses"),
            Finding::UnbalancedBrackets => write!(f, "Unbalanced brackets"),
            Finding::UnknownFunction(name) => write!(f, "Unknown function (quick-check): {name}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuickCheck {
    known: BTreeSet<String>,
}

impl Default for QuickCheck {
    fn default() -> Self {
        Self::with_extra(std::iter::empty::<&str>())
    }
}

impl QuickCheck {
    /// Default function set plus `extra` (case-insensitive).
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let known = DEFAULT_FUNCTIONS
            .iter()
            .map(|f| f.to_string())
            .chain(extra.into_iter().map(|f| f.as_ref().trim().to_uppercase()))
            .filter(|f| !f.is_empty())
            .collect();
        Self { known }
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.known.contains(&name.to_uppercase())
    }

    /// Returns the first problem found, in check order.
    pub fn check(&self, dax: &str) -> Result<(), Finding> {
        if count(dax, '(') != count(dax, ')') {
            return Err(Finding::UnbalancedParentheses);
        }
        if count(dax, '[') != count(dax, ']') {
            return Err(Finding::UnbalancedBrackets);
        }
        match function_calls(dax).into_iter().find(|f| !self.is_known(f)) {
            Some(unknown) => Err(Finding::UnknownFunction(unknown.to_string())),
            None => Ok(()),
        }
    }
}

fn count(text: &str, c: char) -> usize {
    text.chars().filter(|&x| x == c).count()
}

/// A run of `[A-Z0-9_]` followed by optional whitespace and `(`.
///
/// Lower-case identifiers are not treated as calls, matching the service.
static CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z_0-9]+)\s*\(").expect("call pattern is valid"));

fn function_calls(dax: &str) -> Vec<&str> {
    CALL_REGEX
        .captures_iter(dax)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}
