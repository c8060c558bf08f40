//! First-match recipe lookup over a class set.

use tracing::{debug, trace};

use crate::catalog::{ButtonVariantRule, Catalog, Output, Recipe};
use crate::class_set::ClassSet;
use crate::ingredient::{Ingredient, Role, SemanticToken};

/// A class-set token bound to one recipe ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bound<'s> {
    /// The ingredient the token satisfies.
    pub ingredient: Ingredient,
    /// The first token in sequence order that satisfies it.
    pub token: &'s str,
}

/// A recipe satisfied by a class set, with its resolved output token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'s> {
    recipe: &'static Recipe,
    token: SemanticToken,
    bound: Vec<Bound<'s>>,
}

impl<'s> Match<'s> {
    /// The recipe that matched.
    #[must_use]
    pub fn recipe(&self) -> &'static Recipe {
        self.recipe
    }

    /// The semantic token replacing the recipe.
    #[must_use]
    pub fn token(&self) -> SemanticToken {
        self.token
    }

    /// Every bound ingredient, in recipe order. A token may appear under
    /// several ingredients.
    #[must_use]
    pub fn bound(&self) -> &[Bound<'s>] {
        &self.bound
    }

    /// Tokens the rewriter removes: those bound to consumed or optional
    /// ingredients.
    pub fn removed_tokens(&self) -> impl Iterator<Item = &'s str> + '_ {
        self.bound
            .iter()
            .filter(|b| b.ingredient.binding.is_removed())
            .map(|b| b.token)
    }
}

/// Finds the highest-priority recipe satisfied by a class set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matcher {
    catalog: Catalog,
    variant_rule: ButtonVariantRule,
}

impl Matcher {
    /// Create a matcher over `catalog`.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            variant_rule: ButtonVariantRule,
        }
    }

    /// The catalog searched by this matcher.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Return the first recipe, in catalog order, whose guard passes and
    /// whose required ingredients are all present.
    ///
    /// Sets that already hold a semantic token never match, so the rewrite
    /// never applies to its own output.
    ///
    /// # Examples
    /// ```
    /// use glaze_tokens::{ClassSet, Matcher, SemanticToken};
    ///
    /// let matcher = Matcher::default();
    /// let set = ClassSet::split("border border-white/10 bg-white/[0.04]");
    /// let found = matcher.find(&set).map(|m| m.token());
    /// assert_eq!(found, Some(SemanticToken::GlassPanel));
    ///
    /// let done = ClassSet::split("glass-panel border border-white/10 bg-white/[0.04]");
    /// assert!(matcher.find(&done).is_none());
    /// ```
    #[must_use]
    pub fn find<'s>(&self, set: &'s ClassSet) -> Option<Match<'s>> {
        if let Some(existing) = set.iter().find(|t| SemanticToken::is_semantic(t)) {
            trace!(token = existing, "class set already tokenised");
            return None;
        }
        self.catalog.recipes().iter().find_map(|recipe| {
            if !recipe.guard.permits(set) {
                trace!(recipe = recipe.name, "recipe guard rejected class set");
                return None;
            }
            let bound = bind(recipe, set)?;
            let token = match recipe.output {
                Output::Fixed(token) => token,
                Output::ButtonVariant => self.variant_rule.resolve(
                    bound_role(&bound, Role::BackgroundFill),
                    bound_role(&bound, Role::HoverFill),
                ),
            };
            debug!(recipe = recipe.name, %token, "matched class recipe");
            Some(Match {
                recipe,
                token,
                bound,
            })
        })
    }
}

fn bound_role<'s>(bound: &[Bound<'s>], role: Role) -> Option<&'s str> {
    bound
        .iter()
        .find(|b| b.ingredient.role == role)
        .map(|b| b.token)
}

fn bind<'s>(recipe: &Recipe, set: &'s ClassSet) -> Option<Vec<Bound<'s>>> {
    let mut bound = Vec::with_capacity(recipe.ingredients.len());
    for ingredient in recipe.ingredients {
        match set.iter().find(|t| ingredient.accept.accepts(t)) {
            Some(token) => bound.push(Bound {
                ingredient: *ingredient,
                token,
            }),
            None if ingredient.binding.is_required() => {
                trace!(
                    recipe = recipe.name,
                    role = ingredient.role.as_str(),
                    "required ingredient missing"
                );
                return None;
            }
            None => {}
        }
    }
    Some(bound)
}
