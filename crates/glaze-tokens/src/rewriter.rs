//! Replace a matched recipe's ingredients with its semantic token.

use std::collections::HashSet;

use crate::class_set::ClassSet;
use crate::matcher::Match;

/// Remove every token bound to a consumed or optional ingredient, then put
/// the recipe's semantic token at the front.
///
/// All occurrences of a removed token go, duplicates included, even when the
/// same token also satisfies an anchor. Unrelated tokens keep their relative
/// order.
///
/// # Examples
/// ```
/// use glaze_tokens::{ClassSet, Matcher, apply};
///
/// let set = ClassSet::split("shadow-lg border bg-white/[0.04] border-white/10 p-4");
/// let Some(found) = Matcher::default().find(&set) else {
///     panic!("expected glass-panel");
/// };
/// assert_eq!(apply(&set, &found).join(), "glass-panel shadow-lg p-4");
/// ```
#[must_use]
pub fn apply(set: &ClassSet, found: &Match<'_>) -> ClassSet {
    let removed: HashSet<&str> = found.removed_tokens().collect();
    let mut out = set.clone();
    out.retain(|t| !removed.contains(t));
    out.insert_front(found.token().as_str());
    out
}
