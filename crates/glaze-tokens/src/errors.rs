//! Error types raised while validating a recipe catalog.

use thiserror::Error;

/// Problems found when a catalog is constructed.
///
/// Rewriting itself never fails; only a malformed recipe table is rejected.
///
/// # Examples
/// ```
/// use glaze_tokens::CatalogError;
///
/// let err = CatalogError::EmptyTier { recipe: "glass-panel" };
/// assert_eq!(err.to_string(), "recipe `glass-panel` declares an empty tier");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The catalog holds no recipes.
    #[error("catalog declares no recipes")]
    Empty,
    /// Two recipes share a name.
    #[error("recipe `{0}` is declared more than once")]
    DuplicateRecipe(&'static str),
    /// A recipe has no required ingredient, so it would match any class set.
    #[error("recipe `{recipe}` has no required ingredient")]
    NoRequiredIngredient {
        /// Offending recipe.
        recipe: &'static str,
    },
    /// A tier lists no tokens, so its ingredient can never be satisfied.
    #[error("recipe `{recipe}` declares an empty tier")]
    EmptyTier {
        /// Offending recipe.
        recipe: &'static str,
    },
    /// An ingredient token is empty or contains whitespace.
    #[error("recipe `{recipe}` names malformed token `{token}`")]
    MalformedToken {
        /// Offending recipe.
        recipe: &'static str,
        /// The malformed token.
        token: &'static str,
    },
    /// An ingredient token equals a semantic output token, which would let a
    /// recipe consume the output of another pass.
    #[error("recipe `{recipe}` consumes semantic token `{token}`")]
    ConsumesSemanticToken {
        /// Offending recipe.
        recipe: &'static str,
        /// The semantic token named as an ingredient.
        token: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_malformed_token() {
        let err = CatalogError::MalformedToken {
            recipe: "pill-glass",
            token: "px 4",
        };
        assert_eq!(
            err.to_string(),
            "recipe `pill-glass` names malformed token `px 4`"
        );
    }

    #[test]
    fn formats_duplicate_recipe() {
        assert_eq!(
            CatalogError::DuplicateRecipe("btn-glass").to_string(),
            "recipe `btn-glass` is declared more than once"
        );
    }

    #[test]
    fn formats_semantic_token_consumption() {
        let err = CatalogError::ConsumesSemanticToken {
            recipe: "glass-panel",
            token: "glass-inset",
        };
        assert!(err.to_string().contains("glass-inset"));
    }
}
