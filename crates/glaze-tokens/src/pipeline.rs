//! Repair, match, and rewrite a single class string.

use crate::catalog::Catalog;
use crate::change::Change;
use crate::class_set::ClassSet;
use crate::matcher::Matcher;
use crate::repair::{default_border_opacity, insert_border_keyword, repair};
use crate::rewriter::apply;

/// Optional set-level preparation applied after token repairs.
///
/// Both rules are off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Insert a plain `border` when a `border-white/*` colour has no border
    /// width token beside it.
    pub insert_border_keyword: bool,
    /// Insert `border-white/15` after a plain `border` that has no border
    /// colour.
    pub default_border_opacity: bool,
}

impl RewriteOptions {
    /// Set [`RewriteOptions::insert_border_keyword`].
    #[must_use]
    pub fn with_insert_border_keyword(mut self, enabled: bool) -> Self {
        self.insert_border_keyword = enabled;
        self
    }

    /// Set [`RewriteOptions::default_border_opacity`].
    #[must_use]
    pub fn with_default_border_opacity(mut self, enabled: bool) -> Self {
        self.default_border_opacity = enabled;
        self
    }
}

/// Outcome of rewriting one class string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The rewritten class string; the input verbatim when nothing changed.
    pub text: String,
    /// Changes in the order they were applied.
    pub changes: Vec<Change>,
}

impl Rewrite {
    /// Whether any change was applied.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// The full class-string rewrite: repair, prepare, match, apply.
///
/// # Examples
/// ```
/// use glaze_tokens::Pipeline;
///
/// let pipeline = Pipeline::default();
/// let out = pipeline.rewrite_class_string("backdrop-blur bg-white/[0.04] border border-white/10");
/// assert_eq!(out.text, "glass-panel");
/// assert!(!pipeline.rewrite_class_string(&out.text).is_changed());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pipeline {
    matcher: Matcher,
    options: RewriteOptions,
}

impl Pipeline {
    /// Create a pipeline over `catalog` with `options`.
    #[must_use]
    pub fn new(catalog: Catalog, options: RewriteOptions) -> Self {
        Self {
            matcher: Matcher::new(catalog),
            options,
        }
    }

    /// The preparation options in use.
    #[must_use]
    pub fn options(&self) -> RewriteOptions {
        self.options
    }

    /// The recipe matcher in use.
    #[must_use]
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Rewrite one class string.
    ///
    /// Whitespace is normalised only when some change applies; otherwise the
    /// input comes back verbatim with no changes.
    #[must_use]
    pub fn rewrite_class_string(&self, text: &str) -> Rewrite {
        let mut set = ClassSet::split(text);
        let mut changes = Vec::new();

        repair(&mut set, &mut changes);
        if self.options.insert_border_keyword {
            insert_border_keyword(&mut set, &mut changes);
        }
        if self.options.default_border_opacity {
            default_border_opacity(&mut set, &mut changes);
        }

        let rewritten = self
            .matcher
            .find(&set)
            .map(|found| (found.token(), apply(&set, &found)));
        if let Some((token, next)) = rewritten {
            changes.push(Change::token(token));
            set = next;
        }

        let text = if changes.is_empty() {
            text.to_owned()
        } else {
            set.join()
        };
        Rewrite { text, changes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient::SemanticToken;
    use rstest::{fixture, rstest};

    #[fixture]
    fn pipeline() -> Pipeline {
        Pipeline::default()
    }

    fn descriptors(rewrite: &Rewrite) -> Vec<String> {
        rewrite.changes.iter().map(ToString::to_string).collect()
    }

    #[rstest]
    fn primary_button_keeps_layout_tokens(pipeline: Pipeline) {
        let out = pipeline.rewrite_class_string(
            "rounded-xl border border-white/20 bg-white/10 px-5 py-2.5 text-sm hover:bg-white/15",
        );
        assert_eq!(out.text, "btn-glass rounded-xl px-5 py-2.5 text-sm");
        assert_eq!(descriptors(&out), vec!["token: btn-glass"]);
    }

    #[rstest]
    fn glass_surface_consumes_blur(pipeline: Pipeline) {
        let out =
            pipeline.rewrite_class_string("border backdrop-blur-md bg-white/[0.07] border-white/15");
        assert_eq!(out.text, "glass-surface");
    }

    #[rstest]
    #[case("border-white/151515", "border-white/15")]
    #[case("border-white/", "border-white/15")]
    fn repairs_opacity_suffixes(pipeline: Pipeline, #[case] input: &str, #[case] expected: &str) {
        assert_eq!(pipeline.rewrite_class_string(input).text, expected);
    }

    #[rstest]
    fn unifies_blur_before_matching(pipeline: Pipeline) {
        let out = pipeline.rewrite_class_string("backdrop-blur bg-white/[0.04] border border-white/10");
        assert_eq!(out.text, "glass-panel");
        assert_eq!(
            descriptors(&out),
            vec![
                "pattern: blur-unify backdrop-blur -> backdrop-blur-md",
                "token: glass-panel",
            ]
        );
    }

    #[rstest]
    #[case("glass-panel text-white/70 p-4")]
    #[case("  glass-panel   p-4 ")]
    #[case("flex items-center")]
    #[case("")]
    fn unchanged_input_is_returned_verbatim(pipeline: Pipeline, #[case] input: &str) {
        let out = pipeline.rewrite_class_string(input);
        assert_eq!(out.text, input);
        assert!(!out.is_changed());
    }

    #[rstest]
    #[case("rounded-xl border border-white/20 bg-white/10 px-5 py-2.5 text-sm hover:bg-white/15")]
    #[case("border backdrop-blur-lg bg-white/[0.07] border-white/151515 shadow")]
    #[case("rounded-full px-3 py-1 border-white/ bg-white/10 text-xs")]
    #[case("rounded-md border px-4 py-2 hover:bg-white/20 bg-transparant")]
    #[case("divide-y divide-white/ border-white/12 text-sm")]
    #[case("border border-white/50 bg-white/[0.09]")]
    #[case("border border-white/5050 bg-white/[0.07]")]
    #[case("border-white/4040 hover:bg-white/40")]
    fn rewriting_is_idempotent(pipeline: Pipeline, #[case] input: &str) {
        let once = pipeline.rewrite_class_string(input);
        let twice = pipeline.rewrite_class_string(&once.text);
        assert_eq!(twice.text, once.text);
        assert!(!twice.is_changed(), "second pass changed {:?}", twice.changes);
    }

    #[rstest]
    #[case("rounded-xl border border-white/20 bg-white/10 px-5 py-2.5 text-sm hover:bg-white/15")]
    #[case("rounded-full border px-3 py-1 border-white/15 bg-white/[0.07] hover:bg-white/20")]
    #[case("rounded-full px-3 py-1 border border-white/15 bg-white/[0.07]")]
    fn adds_at_most_one_semantic_token(pipeline: Pipeline, #[case] input: &str) {
        let out = pipeline.rewrite_class_string(input);
        let semantic = ClassSet::split(&out.text)
            .iter()
            .filter(|t| SemanticToken::is_semantic(t))
            .count();
        assert_eq!(semantic, 1);
    }

    #[test]
    fn border_options_prepare_sets_for_matching() {
        let options = RewriteOptions::default()
            .with_insert_border_keyword(true)
            .with_default_border_opacity(true);
        let pipeline = Pipeline::new(Catalog::builtin(), options);

        let keyword = pipeline.rewrite_class_string("border-white/10 bg-white/[0.04] p-3");
        assert_eq!(keyword.text, "glass-panel p-3");

        let colour = pipeline.rewrite_class_string("border bg-white/[0.07] rounded-2xl");
        assert_eq!(colour.text, "glass-surface rounded-2xl");
        assert_eq!(
            descriptors(&colour),
            vec![
                "pattern: border-opacity +border-white/15",
                "token: glass-surface",
            ]
        );
    }

    #[test]
    fn border_options_are_off_by_default() {
        let out = Pipeline::default().rewrite_class_string("border-white/10 bg-white/[0.04]");
        assert!(!out.is_changed());
        assert_eq!(Pipeline::default().options(), RewriteOptions::default());
    }
}
