//! Closed vocabularies for recipe ingredients and semantic output tokens.
//!
//! Recipes are assembled from these types so that every role, acceptance
//! rule, and output token is an enumerable value rather than a loose string
//! compared ad hoc.

use std::fmt;
use std::str::FromStr;

/// Semantic token emitted in place of a matched recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemanticToken {
    /// Raised glass surface with the strongest fill.
    GlassSurface,
    /// Glass panel with a subtle fill.
    GlassPanel,
    /// Inset glass well with the faintest fill.
    GlassInset,
    /// Primary glass button.
    BtnGlass,
    /// Secondary glass button.
    BtnGlassSecondary,
    /// Rounded glass badge.
    PillGlass,
}

impl SemanticToken {
    /// Every semantic token, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::GlassSurface,
        Self::GlassPanel,
        Self::GlassInset,
        Self::BtnGlass,
        Self::BtnGlassSecondary,
        Self::PillGlass,
    ];

    /// Return the class name written into markup.
    ///
    /// # Examples
    ///
    /// ```
    /// use glaze_tokens::SemanticToken;
    ///
    /// assert_eq!(SemanticToken::GlassPanel.as_str(), "glass-panel");
    /// assert_eq!(SemanticToken::BtnGlassSecondary.as_str(), "btn-glass-secondary");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GlassSurface => "glass-surface",
            Self::GlassPanel => "glass-panel",
            Self::GlassInset => "glass-inset",
            Self::BtnGlass => "btn-glass",
            Self::BtnGlassSecondary => "btn-glass-secondary",
            Self::PillGlass => "pill-glass",
        }
    }

    /// Whether `token` is the class name of some semantic token.
    #[must_use]
    pub fn is_semantic(token: &str) -> bool {
        Self::ALL.iter().any(|t| t.as_str() == token)
    }
}

impl fmt::Display for SemanticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`SemanticToken`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticTokenParseError(pub String);

impl fmt::Display for SemanticTokenParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown semantic token: {}", self.0)
    }
}

impl std::error::Error for SemanticTokenParseError {}

impl FromStr for SemanticToken {
    type Err = SemanticTokenParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == trimmed)
            .ok_or_else(|| SemanticTokenParseError(trimmed.to_owned()))
    }
}

/// Role an ingredient plays inside a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The plain `border` width keyword.
    BorderKeyword,
    /// A white border colour with opacity, e.g. `border-white/15`.
    BorderOpacity,
    /// A white background fill, e.g. `bg-white/[0.04]`.
    BackgroundFill,
    /// A white hover background, e.g. `hover:bg-white/15`.
    HoverFill,
    /// A backdrop blur level.
    Blur,
    /// A corner radius.
    Corner,
    /// Horizontal padding.
    PaddingX,
    /// Vertical padding.
    PaddingY,
    /// Any hover variant.
    Hover,
    /// Font size.
    TextSize,
}

impl Role {
    /// Short label used in trace output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BorderKeyword => "border-keyword",
            Self::BorderOpacity => "border-opacity",
            Self::BackgroundFill => "background-fill",
            Self::HoverFill => "hover-fill",
            Self::Blur => "blur",
            Self::Corner => "corner",
            Self::PaddingX => "padding-x",
            Self::PaddingY => "padding-y",
            Self::Hover => "hover",
            Self::TextSize => "text-size",
        }
    }
}

/// Which tokens satisfy an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    /// Exactly this token.
    Exact(&'static str),
    /// Any token of this closed tier.
    Tier(&'static [&'static str]),
    /// Any token starting with this prefix.
    Family(&'static str),
}

impl Accept {
    /// Whether `token` satisfies this acceptance rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use glaze_tokens::Accept;
    ///
    /// assert!(Accept::Exact("border").accepts("border"));
    /// assert!(Accept::Tier(&["px-4", "px-5"]).accepts("px-5"));
    /// assert!(Accept::Family("py-").accepts("py-2.5"));
    /// assert!(!Accept::Family("py-").accepts("md:py-2"));
    /// ```
    #[must_use]
    pub fn accepts(&self, token: &str) -> bool {
        match self {
            Self::Exact(value) => *value == token,
            Self::Tier(values) => values.contains(&token),
            Self::Family(prefix) => token.starts_with(prefix),
        }
    }

    /// Literal tokens named by this rule; families name none.
    #[must_use]
    pub fn literals(&self) -> &[&'static str] {
        match self {
            Self::Exact(value) => std::slice::from_ref(value),
            Self::Tier(values) => values,
            Self::Family(_) => &[],
        }
    }
}

/// What the rewriter does with the token bound to an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Required, and removed when the recipe is applied.
    Consumed,
    /// Never blocks a match; removed when present.
    Optional,
    /// Required, but kept in the rewritten string.
    ///
    /// Ingredients bind independently, so one token can satisfy an anchor
    /// and a removed ingredient at once. Removal wins: `btn-glass-soft` keeps
    /// `hover:opacity-80` as its hover anchor but drops a lone
    /// `hover:bg-white/[0.06]`, which it also binds as the hover fill.
    Anchor,
}

impl Binding {
    /// Whether absence of the ingredient blocks the match.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::Consumed | Self::Anchor)
    }

    /// Whether a bound token is removed by the rewriter.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Consumed | Self::Optional)
    }
}

/// A role together with its acceptance rule and binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ingredient {
    /// Role in the recipe.
    pub role: Role,
    /// Tokens that satisfy the role.
    pub accept: Accept,
    /// Treatment of the bound token.
    pub binding: Binding,
}

impl Ingredient {
    /// Required ingredient removed on rewrite.
    #[must_use]
    pub const fn consumed(role: Role, accept: Accept) -> Self {
        Self {
            role,
            accept,
            binding: Binding::Consumed,
        }
    }

    /// Ingredient removed if present but never required.
    #[must_use]
    pub const fn optional(role: Role, accept: Accept) -> Self {
        Self {
            role,
            accept,
            binding: Binding::Optional,
        }
    }

    /// Required ingredient kept in the output.
    #[must_use]
    pub const fn anchor(role: Role, accept: Accept) -> Self {
        Self {
            role,
            accept,
            binding: Binding::Anchor,
        }
    }
}
