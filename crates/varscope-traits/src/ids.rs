//! Identifier types used across the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticker symbol of a tradable instrument (e.g. `SPY`).
///
/// Whether the symbol exists is the data source's concern; the engine only
/// requires it to be non-empty after trimming.
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    /// Create a new symbol, trimming surrounding whitespace.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_string())
    }

    /// Get the symbol as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the symbol is blank.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_trims() {
        let sym = Symbol::new("  SPY ");
        assert_eq!(sym.as_str(), "SPY");
        assert_eq!(sym.to_string(), "SPY");
        assert!(Symbol::from("   ").is_empty());
    }
}
