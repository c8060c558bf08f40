//! Human-readable descriptors for each applied rewrite.

use std::fmt;

use crate::ingredient::SemanticToken;

/// Category of a change, rendered as the descriptor prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeCategory {
    /// Exact-text substitution of a known misspelling or stray value.
    Literal,
    /// Pattern-based repair such as opacity suffix fixes or blur unification.
    Pattern,
    /// Replacement of a matched recipe by its semantic token.
    Token,
}

impl ChangeCategory {
    /// Return the category label used in descriptors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Pattern => "pattern",
            Self::Token => "token",
        }
    }
}

/// One change applied to a class literal.
///
/// # Examples
/// ```
/// use glaze_tokens::{Change, SemanticToken};
///
/// let change = Change::token(SemanticToken::GlassPanel);
/// assert_eq!(change.to_string(), "token: glass-panel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Change {
    category: ChangeCategory,
    detail: String,
}

impl Change {
    /// A literal substitution of `from` by `to`.
    #[must_use]
    pub fn literal(from: &str, to: &str) -> Self {
        Self {
            category: ChangeCategory::Literal,
            detail: format!("{from} -> {to}"),
        }
    }

    /// A pattern repair named `rule` turning `from` into `to`.
    #[must_use]
    pub fn pattern(rule: &str, from: &str, to: &str) -> Self {
        Self {
            category: ChangeCategory::Pattern,
            detail: format!("{rule} {from} -> {to}"),
        }
    }

    /// A set-level insertion made by a preparation rule.
    #[must_use]
    pub fn inserted(rule: &str, token: &str) -> Self {
        Self {
            category: ChangeCategory::Pattern,
            detail: format!("{rule} +{token}"),
        }
    }

    /// A recipe replaced by `token`.
    #[must_use]
    pub fn token(token: SemanticToken) -> Self {
        Self {
            category: ChangeCategory::Token,
            detail: token.as_str().to_owned(),
        }
    }

    /// The change category.
    #[must_use]
    pub fn category(&self) -> ChangeCategory {
        self.category
    }

    /// The descriptor text after the category prefix.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category.as_str(), self.detail)
    }
}
