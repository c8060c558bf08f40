//! The ordered recipe table and its validation.
//!
//! List order is priority order: exact button recipes, then the soft button
//! heuristic, then glass tiers, then the pill badge. The first recipe whose
//! required ingredients are all present wins.

use std::collections::HashSet;

use crate::class_set::ClassSet;
use crate::errors::CatalogError;
use crate::ingredient::{Accept, Ingredient, Role, SemanticToken};

/// Background fills accepted by `glass-surface`.
pub const SURFACE_FILL: &[&str] = &[
    "bg-white/[0.06]",
    "bg-white/[0.07]",
    "bg-white/[0.08]",
    "bg-white/[0.09]",
    "bg-white/[0.10]",
];
/// Background fills accepted by `glass-panel`.
pub const PANEL_FILL: &[&str] = &[
    "bg-white/[0.03]",
    "bg-white/[0.035]",
    "bg-white/[0.04]",
    "bg-white/[0.05]",
];
/// Background fills accepted by `glass-inset`.
pub const INSET_FILL: &[&str] = &["bg-white/[0.03]", "bg-white/[0.04]"];

/// Border opacities accepted by `glass-surface`.
pub const SURFACE_BORDER: &[&str] = &["border-white/15", "border-white/20", "border-white/25"];
/// Border opacities accepted by `glass-panel`.
pub const PANEL_BORDER: &[&str] = &["border-white/10", "border-white/12", "border-white/15"];
/// Border opacities accepted by `glass-inset`.
pub const INSET_BORDER: &[&str] = &["border-white/10", "border-white/12"];

/// Fills that mark a soft-matched button as primary.
pub const PRIMARY_BUTTON_FILL: &[&str] = &["bg-white/10", "bg-white/15", "bg-white/[0.10]"];
/// Hover fills that mark a soft-matched button as primary.
pub const PRIMARY_BUTTON_HOVER: &[&str] = &["hover:bg-white/15", "hover:bg-white/20"];
/// Fills that mark a soft-matched button as secondary.
pub const SECONDARY_BUTTON_FILL: &[&str] = &["bg-white/[0.03]", "bg-white/[0.04]"];
/// Hover fills that mark a soft-matched button as secondary.
pub const SECONDARY_BUTTON_HOVER: &[&str] = &["hover:bg-white/[0.06]", "hover:bg-white/[0.08]"];

const BLUR: Ingredient = Ingredient::optional(Role::Blur, Accept::Exact("backdrop-blur-md"));
const BORDER: Ingredient = Ingredient::consumed(Role::BorderKeyword, Accept::Exact("border"));

/// How a matched recipe chooses its output token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Always this token.
    Fixed(SemanticToken),
    /// Primary or secondary button, picked by [`ButtonVariantRule`].
    ButtonVariant,
}

/// Extra condition a class set must meet before a recipe is tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// No extra condition.
    None,
    /// Reject sets that look like buttons (horizontal and vertical padding
    /// plus a hover variant), so a button's border, fill, and blur are not
    /// read as a decorative panel.
    NotButtonLike,
}

impl Guard {
    /// Whether `set` passes the guard.
    #[must_use]
    pub fn permits(&self, set: &ClassSet) -> bool {
        match self {
            Self::None => true,
            Self::NotButtonLike => !is_button_like(set),
        }
    }
}

fn is_button_like(set: &ClassSet) -> bool {
    set.has_prefix("px-") && set.has_prefix("py-") && set.has_prefix("hover:")
}

/// Default-to-primary rule for soft-matched buttons.
///
/// A button whose fill or hover fill falls in a primary tier is primary;
/// otherwise one in a secondary tier is secondary; anything else falls back
/// to primary, so a secondary-looking button without tier tokens is tagged
/// primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonVariantRule;

impl ButtonVariantRule {
    /// Pick the button token from the bound fill and hover fill.
    ///
    /// # Examples
    /// ```
    /// use glaze_tokens::{ButtonVariantRule, SemanticToken};
    ///
    /// let rule = ButtonVariantRule;
    /// assert_eq!(
    ///     rule.resolve(Some("bg-white/[0.03]"), None),
    ///     SemanticToken::BtnGlassSecondary
    /// );
    /// assert_eq!(rule.resolve(None, None), SemanticToken::BtnGlass);
    /// ```
    #[must_use]
    pub fn resolve(&self, fill: Option<&str>, hover: Option<&str>) -> SemanticToken {
        let in_tier = |token: Option<&str>, tier: &[&str]| token.is_some_and(|t| tier.contains(&t));
        if in_tier(fill, PRIMARY_BUTTON_FILL) || in_tier(hover, PRIMARY_BUTTON_HOVER) {
            SemanticToken::BtnGlass
        } else if in_tier(fill, SECONDARY_BUTTON_FILL) || in_tier(hover, SECONDARY_BUTTON_HOVER) {
            SemanticToken::BtnGlassSecondary
        } else {
            SemanticToken::BtnGlass
        }
    }
}

/// A named composite of ingredients replaced by one semantic token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    /// Unique recipe name used in diagnostics.
    pub name: &'static str,
    /// Ingredients in binding order.
    pub ingredients: &'static [Ingredient],
    /// Output token policy.
    pub output: Output,
    /// Pre-condition on the whole class set.
    pub guard: Guard,
}

const fn exact_button(
    name: &'static str,
    token: SemanticToken,
    ingredients: &'static [Ingredient],
) -> Recipe {
    Recipe {
        name,
        ingredients,
        output: Output::Fixed(token),
        guard: Guard::None,
    }
}

const fn glass(
    name: &'static str,
    token: SemanticToken,
    ingredients: &'static [Ingredient],
) -> Recipe {
    Recipe {
        name,
        ingredients,
        output: Output::Fixed(token),
        guard: Guard::NotButtonLike,
    }
}

/// Builtin recipes in priority order.
pub const BUILTIN_RECIPES: &[Recipe] = &[
    exact_button(
        "btn-glass",
        SemanticToken::BtnGlass,
        &[
            Ingredient::anchor(Role::Corner, Accept::Exact("rounded-xl")),
            Ingredient::anchor(Role::PaddingX, Accept::Exact("px-5")),
            Ingredient::anchor(Role::PaddingY, Accept::Exact("py-2.5")),
            Ingredient::anchor(Role::TextSize, Accept::Exact("text-sm")),
            BORDER,
            Ingredient::consumed(Role::BorderOpacity, Accept::Exact("border-white/20")),
            Ingredient::consumed(Role::BackgroundFill, Accept::Exact("bg-white/10")),
            Ingredient::consumed(Role::HoverFill, Accept::Exact("hover:bg-white/15")),
            BLUR,
        ],
    ),
    exact_button(
        "btn-glass-secondary",
        SemanticToken::BtnGlassSecondary,
        &[
            Ingredient::anchor(Role::Corner, Accept::Exact("rounded-xl")),
            Ingredient::anchor(Role::PaddingX, Accept::Exact("px-5")),
            Ingredient::anchor(Role::PaddingY, Accept::Exact("py-2.5")),
            Ingredient::anchor(Role::TextSize, Accept::Exact("text-sm")),
            BORDER,
            Ingredient::consumed(Role::BorderOpacity, Accept::Exact("border-white/15")),
            Ingredient::consumed(Role::BackgroundFill, Accept::Exact("bg-white/[0.03]")),
            Ingredient::consumed(Role::HoverFill, Accept::Exact("hover:bg-white/[0.06]")),
            BLUR,
        ],
    ),
    Recipe {
        name: "btn-glass-soft",
        ingredients: &[
            Ingredient::anchor(Role::PaddingX, Accept::Family("px-")),
            Ingredient::anchor(Role::PaddingY, Accept::Family("py-")),
            Ingredient::anchor(Role::Hover, Accept::Family("hover:")),
            Ingredient::anchor(Role::Corner, Accept::Family("rounded-")),
            BORDER,
            Ingredient::optional(Role::BorderOpacity, Accept::Family("border-white/")),
            Ingredient::optional(Role::BackgroundFill, Accept::Family("bg-white/")),
            Ingredient::optional(Role::HoverFill, Accept::Family("hover:bg-white")),
            BLUR,
        ],
        output: Output::ButtonVariant,
        guard: Guard::None,
    },
    glass(
        "glass-surface",
        SemanticToken::GlassSurface,
        &[
            BORDER,
            Ingredient::consumed(Role::BorderOpacity, Accept::Tier(SURFACE_BORDER)),
            Ingredient::consumed(Role::BackgroundFill, Accept::Tier(SURFACE_FILL)),
            BLUR,
        ],
    ),
    glass(
        "glass-panel",
        SemanticToken::GlassPanel,
        &[
            BORDER,
            Ingredient::consumed(Role::BorderOpacity, Accept::Tier(PANEL_BORDER)),
            Ingredient::consumed(Role::BackgroundFill, Accept::Tier(PANEL_FILL)),
            BLUR,
        ],
    ),
    glass(
        "glass-inset",
        SemanticToken::GlassInset,
        &[
            BORDER,
            Ingredient::consumed(Role::BorderOpacity, Accept::Tier(INSET_BORDER)),
            Ingredient::consumed(Role::BackgroundFill, Accept::Tier(INSET_FILL)),
            BLUR,
        ],
    ),
    Recipe {
        name: "pill-glass",
        ingredients: &[
            Ingredient::consumed(Role::Corner, Accept::Exact("rounded-full")),
            Ingredient::consumed(Role::PaddingX, Accept::Family("px-")),
            Ingredient::consumed(Role::PaddingY, Accept::Family("py-")),
            Ingredient::consumed(Role::BackgroundFill, Accept::Family("bg-white/")),
            Ingredient::consumed(Role::BorderOpacity, Accept::Family("border-white/")),
            Ingredient::optional(Role::BorderKeyword, Accept::Exact("border")),
            BLUR,
        ],
        output: Output::Fixed(SemanticToken::PillGlass),
        guard: Guard::None,
    },
];

/// A validated, ordered list of recipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Catalog {
    recipes: &'static [Recipe],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The builtin recipe table.
    #[must_use]
    pub const fn builtin() -> Self {
        Self {
            recipes: BUILTIN_RECIPES,
        }
    }

    /// Build a catalog from `recipes`, listed in priority order.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the table is empty, a name repeats, a
    /// recipe has no required ingredient, a tier is empty, a token is
    /// malformed, or a token equals a semantic output token.
    pub fn new(recipes: &'static [Recipe]) -> Result<Self, CatalogError> {
        let catalog = Self { recipes };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Recipes in priority order.
    #[must_use]
    pub fn recipes(&self) -> &'static [Recipe] {
        self.recipes
    }

    /// Check the table invariants described on [`Catalog::new`].
    ///
    /// # Errors
    /// Returns the first [`CatalogError`] found.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.recipes.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut names = HashSet::new();
        for recipe in self.recipes {
            if !names.insert(recipe.name) {
                return Err(CatalogError::DuplicateRecipe(recipe.name));
            }
            validate_recipe(recipe)?;
        }
        Ok(())
    }
}

fn validate_recipe(recipe: &Recipe) -> Result<(), CatalogError> {
    let name = recipe.name;
    if !recipe.ingredients.iter().any(|i| i.binding.is_required()) {
        return Err(CatalogError::NoRequiredIngredient { recipe: name });
    }
    for ingredient in recipe.ingredients {
        if matches!(ingredient.accept, Accept::Tier(values) if values.is_empty()) {
            return Err(CatalogError::EmptyTier { recipe: name });
        }
        for &token in ingredient.accept.literals() {
            validate_token(name, token)?;
        }
        if let Accept::Family(prefix) = ingredient.accept {
            validate_token(name, prefix)?;
            if let Some(token) = SemanticToken::ALL
                .iter()
                .find(|t| t.as_str().starts_with(prefix))
            {
                return Err(CatalogError::ConsumesSemanticToken {
                    recipe: name,
                    token: token.as_str(),
                });
            }
        }
    }
    Ok(())
}

fn validate_token(recipe: &'static str, token: &'static str) -> Result<(), CatalogError> {
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(CatalogError::MalformedToken { recipe, token });
    }
    if SemanticToken::is_semantic(token) {
        return Err(CatalogError::ConsumesSemanticToken { recipe, token });
    }
    Ok(())
}
