//! Token-level repairs applied before recipe matching.
//!
//! Repairs run in the fixed order of [`Repair::ORDER`]: literal fixes first,
//! then the opacity digit collapse, then the bare-suffix default, then blur
//! unification. Each rule is idempotent. The digit collapse resolves its
//! result through [`LITERAL_FIXES`], so no rule produces input for an earlier
//! rule.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::change::Change;
use crate::class_set::ClassSet;

/// Known misspellings and out-of-range values with their replacements.
pub const LITERAL_FIXES: &[(&str, &str)] = &[
    ("bg-transparant", "bg-transparent"),
    ("hover:bg-white/50", "hover:bg-white/15"),
    ("hover:bg-white/40", "hover:bg-white/15"),
    ("border-white/50", "border-white/20"),
    ("border-white/40", "border-white/20"),
];

/// Opacity families and the level given to a bare `family/` token.
pub const OPACITY_DEFAULTS: &[(&str, &str)] = &[("border-white", "15"), ("divide-white", "10")];

/// The single blur level kept after unification.
pub const CANONICAL_BLUR: &str = "backdrop-blur-md";

/// Blur levels rewritten to [`CANONICAL_BLUR`].
pub const BLUR_VARIANTS: &[&str] = &[
    "backdrop-blur",
    "backdrop-blur-sm",
    "backdrop-blur-lg",
    "backdrop-blur-xl",
    "backdrop-blur-2xl",
    "backdrop-blur-3xl",
];

/// Default colour inserted by [`RewriteOptions::default_border_opacity`].
///
/// [`RewriteOptions::default_border_opacity`]: crate::RewriteOptions::default_border_opacity
pub const DEFAULT_BORDER_COLOUR: &str = "border-white/15";

static OPACITY_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:[^:\s]+:)*)(border-white|divide-white)/(\d{4,})$")
        .unwrap_or_else(|_| unreachable!())
});

static OPACITY_BARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:[^:\s]+:)*)(border-white|divide-white)/$").unwrap_or_else(|_| unreachable!())
});

static BORDER_WIDTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^border(?:-[xytrbse])?(?:-\d+)?$").unwrap_or_else(|_| unreachable!())
});

static BORDER_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^border-(?:solid|dashed|dotted|double|hidden|none)$")
        .unwrap_or_else(|_| unreachable!())
});

/// A single token repair rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repair {
    /// Exact substitutions from [`LITERAL_FIXES`].
    Literal,
    /// Collapse a four-or-more digit opacity suffix to its final two digits,
    /// then apply any literal fix for the collapsed token.
    OpacityDigits,
    /// Give a bare `family/` token its family default level.
    OpacityDefault,
    /// Rewrite every blur level to [`CANONICAL_BLUR`].
    BlurUnify,
}

impl Repair {
    /// Application order of the repair rules.
    pub const ORDER: [Self; 4] = [
        Self::Literal,
        Self::OpacityDigits,
        Self::OpacityDefault,
        Self::BlurUnify,
    ];

    /// Rule name used in change descriptors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::OpacityDigits => "opacity-digits",
            Self::OpacityDefault => "opacity-default",
            Self::BlurUnify => "blur-unify",
        }
    }

    /// Repaired form of `token`, or `None` when the rule does not apply.
    ///
    /// # Examples
    /// ```
    /// use glaze_tokens::Repair;
    ///
    /// assert_eq!(
    ///     Repair::OpacityDigits.apply("border-white/151515").as_deref(),
    ///     Some("border-white/15")
    /// );
    /// assert_eq!(
    ///     Repair::OpacityDefault.apply("divide-white/").as_deref(),
    ///     Some("divide-white/10")
    /// );
    /// assert_eq!(Repair::BlurUnify.apply("backdrop-blur-md"), None);
    /// ```
    #[must_use]
    pub fn apply(&self, token: &str) -> Option<String> {
        match self {
            Self::Literal => LITERAL_FIXES
                .iter()
                .find(|(from, _)| *from == token)
                .map(|(_, to)| (*to).to_owned()),
            Self::OpacityDigits => {
                let caps = OPACITY_DIGITS_RE.captures(token)?;
                let variants = caps.get(1)?.as_str();
                let family = caps.get(2)?.as_str();
                let digits = caps.get(3)?.as_str();
                let tail = digits.get(digits.len().saturating_sub(2)..)?;
                let collapsed = format!("{variants}{family}/{tail}");
                Some(Self::Literal.apply(&collapsed).unwrap_or(collapsed))
            }
            Self::OpacityDefault => {
                let caps = OPACITY_BARE_RE.captures(token)?;
                let variants = caps.get(1)?.as_str();
                let family = caps.get(2)?.as_str();
                let (_, level) = OPACITY_DEFAULTS.iter().find(|(f, _)| *f == family)?;
                Some(format!("{variants}{family}/{level}"))
            }
            Self::BlurUnify => BLUR_VARIANTS
                .contains(&token)
                .then(|| CANONICAL_BLUR.to_owned()),
        }
    }

    fn describe(&self, from: &str, to: &str) -> Change {
        match self {
            Self::Literal => Change::literal(from, to),
            _ => Change::pattern(self.name(), from, to),
        }
    }
}

/// Apply every rule in [`Repair::ORDER`] to each token of `set`.
///
/// One change is recorded per rewritten token occurrence.
pub fn repair(set: &mut ClassSet, changes: &mut Vec<Change>) {
    for rule in Repair::ORDER {
        set.replace_each(|token| {
            let next = rule.apply(token)?;
            trace!(rule = rule.name(), from = token, to = %next, "repaired class token");
            changes.push(rule.describe(token, &next));
            Some(next)
        });
    }
}

/// Insert a plain `border` when a border colour is present without any
/// border width token.
pub(crate) fn insert_border_keyword(set: &mut ClassSet, changes: &mut Vec<Change>) {
    let has_colour = set.has_prefix("border-white/");
    let has_width = set.iter().any(|t| BORDER_WIDTH_RE.is_match(t));
    if has_colour && !has_width {
        set.insert_front("border");
        changes.push(Change::inserted("border-keyword", "border"));
    }
}

/// Insert [`DEFAULT_BORDER_COLOUR`] after a plain `border` that has no
/// border colour of any kind.
pub(crate) fn default_border_opacity(set: &mut ClassSet, changes: &mut Vec<Change>) {
    if !set.contains("border") {
        return;
    }
    let has_colour = set.iter().any(|t| {
        t.starts_with("border-") && !BORDER_WIDTH_RE.is_match(t) && !BORDER_STYLE_RE.is_match(t)
    });
    if !has_colour {
        set.insert_after("border", DEFAULT_BORDER_COLOUR);
        changes.push(Change::inserted("border-opacity", DEFAULT_BORDER_COLOUR));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn repaired(input: &str) -> (String, Vec<String>) {
        let mut set = ClassSet::split(input);
        let mut changes = Vec::new();
        repair(&mut set, &mut changes);
        (
            set.join(),
            changes.iter().map(ToString::to_string).collect(),
        )
    }

    #[rstest]
    #[case("border-white/151515", "border-white/15")]
    #[case("border-white/1515", "border-white/15")]
    #[case("border-white/151510", "border-white/10")]
    #[case("divide-white/10101010", "divide-white/10")]
    #[case("hover:border-white/202020", "hover:border-white/20")]
    #[case("border-white/0123456789", "border-white/89")]
    #[case("border-white/4040", "border-white/20")]
    #[case("border-white/5050", "border-white/20")]
    #[case("border-white/124040", "border-white/20")]
    fn collapses_repeated_opacity_digits(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Repair::OpacityDigits.apply(input).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("border-white/15")]
    #[case("border-white/100")]
    #[case("text-white/151515")]
    #[case("border-white/[0.15]")]
    fn leaves_well_formed_opacity_alone(#[case] input: &str) {
        assert_eq!(Repair::OpacityDigits.apply(input), None);
    }

    #[rstest]
    #[case("border-white/", "border-white/15")]
    #[case("divide-white/", "divide-white/10")]
    #[case("md:border-white/", "md:border-white/15")]
    fn defaults_bare_opacity_suffix(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Repair::OpacityDefault.apply(input).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("backdrop-blur")]
    #[case("backdrop-blur-sm")]
    #[case("backdrop-blur-lg")]
    #[case("backdrop-blur-3xl")]
    fn unifies_blur_levels(#[case] input: &str) {
        assert_eq!(Repair::BlurUnify.apply(input).as_deref(), Some(CANONICAL_BLUR));
    }

    #[test]
    fn blur_unification_keeps_unrelated_blur_utilities() {
        assert_eq!(Repair::BlurUnify.apply("backdrop-blur-none"), None);
        assert_eq!(Repair::BlurUnify.apply("blur-sm"), None);
    }

    #[test]
    fn literal_fixes_match_whole_tokens_only() {
        assert_eq!(
            Repair::Literal.apply("bg-transparant").as_deref(),
            Some("bg-transparent")
        );
        assert_eq!(Repair::Literal.apply("border-white/500"), None);
        assert_eq!(Repair::Literal.apply("md:bg-transparant"), None);
    }

    #[test]
    fn repair_records_one_change_per_token() {
        let (text, changes) = repaired("border-white/151515 backdrop-blur bg-transparant");
        assert_eq!(text, "border-white/15 backdrop-blur-md bg-transparent");
        assert_eq!(
            changes,
            vec![
                "literal: bg-transparant -> bg-transparent",
                "pattern: opacity-digits border-white/151515 -> border-white/15",
                "pattern: blur-unify backdrop-blur -> backdrop-blur-md",
            ]
        );
    }

    #[rstest]
    #[case("border-white/151515 divide-white/ backdrop-blur-lg hover:bg-white/50")]
    #[case("border-white/ px-2")]
    #[case("bg-transparant text-sm")]
    #[case("border-white/4040 hover:border-white/5050")]
    fn repair_is_idempotent(#[case] input: &str) {
        let (once, _) = repaired(input);
        let (twice, changes) = repaired(&once);
        assert_eq!(once, twice);
        assert!(changes.is_empty());
    }

    #[test]
    fn no_rule_output_is_input_for_another_rule() {
        let outputs = LITERAL_FIXES
            .iter()
            .map(|(_, to)| (*to).to_owned())
            .chain(LITERAL_FIXES.iter().filter_map(|(from, _)| {
                let (family, level) = from.rsplit_once('/')?;
                Repair::OpacityDigits.apply(&format!("{family}/{level}{level}"))
            }))
            .chain(OPACITY_DEFAULTS.iter().map(|(family, level)| format!("{family}/{level}")))
            .chain([CANONICAL_BLUR.to_owned()]);
        for token in outputs {
            for rule in Repair::ORDER {
                assert_eq!(rule.apply(&token), None, "{} rewrites {token}", rule.name());
            }
        }
    }

    #[test]
    fn collapsed_digits_record_the_final_token() {
        let (text, changes) = repaired("border-white/4040");
        assert_eq!(text, "border-white/20");
        assert_eq!(
            changes,
            vec!["pattern: opacity-digits border-white/4040 -> border-white/20"]
        );
    }

    #[test]
    fn inserts_border_keyword_only_without_width() {
        let mut changes = Vec::new();
        let mut set = ClassSet::split("border-white/15 bg-white/[0.04]");
        insert_border_keyword(&mut set, &mut changes);
        assert_eq!(set.join(), "border border-white/15 bg-white/[0.04]");

        let mut set = ClassSet::split("border-2 border-white/15");
        insert_border_keyword(&mut set, &mut changes);
        assert_eq!(set.join(), "border-2 border-white/15");
        assert_eq!(changes.len(), 1);
    }

    #[rstest]
    #[case("rounded border px-2", "rounded border border-white/15 px-2")]
    #[case("border border-dashed", "border border-white/15 border-dashed")]
    #[case("border border-emerald-400/30", "border border-emerald-400/30")]
    #[case("border border-white/10", "border border-white/10")]
    #[case("border-t", "border-t")]
    fn defaults_border_colour_after_plain_border(#[case] input: &str, #[case] expected: &str) {
        let mut set = ClassSet::split(input);
        default_border_opacity(&mut set, &mut Vec::new());
        assert_eq!(set.join(), expected);
    }
}
