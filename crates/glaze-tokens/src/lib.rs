//! Class-string repair and semantic token rewriting.
//!
//! The crate normalises utility-class strings in component source. A class
//! literal is split into tokens, known typos and malformed opacity suffixes
//! are repaired, and the first recipe in a fixed priority order whose
//! ingredients are all present is collapsed into one semantic token such as
//! `glass-panel` or `btn-glass`. The rewrite is idempotent: running it over
//! its own output changes nothing.
//!
//! [`Pipeline`] runs the whole process for one class string, while
//! [`rewrite_source`] finds class attributes in a source file and rewrites
//! their static text in place.

mod adapter;
mod catalog;
mod change;
mod class_set;
mod errors;
mod ingredient;
mod matcher;
mod pipeline;
mod repair;
mod rewriter;

pub use adapter::{SourceRewrite, rewrite_source};
pub use catalog::{
    BUILTIN_RECIPES, ButtonVariantRule, Catalog, Guard, INSET_BORDER, INSET_FILL, Output,
    PANEL_BORDER, PANEL_FILL, PRIMARY_BUTTON_FILL, PRIMARY_BUTTON_HOVER, Recipe,
    SECONDARY_BUTTON_FILL, SECONDARY_BUTTON_HOVER, SURFACE_BORDER, SURFACE_FILL,
};
pub use change::{Change, ChangeCategory};
pub use class_set::ClassSet;
pub use errors::CatalogError;
pub use ingredient::{Accept, Binding, Ingredient, Role, SemanticToken, SemanticTokenParseError};
pub use matcher::{Bound, Match, Matcher};
pub use pipeline::{Pipeline, Rewrite, RewriteOptions};
pub use repair::{
    BLUR_VARIANTS, CANONICAL_BLUR, DEFAULT_BORDER_COLOUR, LITERAL_FIXES, OPACITY_DEFAULTS, Repair,
    repair,
};
pub use rewriter::apply;
