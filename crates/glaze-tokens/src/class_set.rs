//! Ordered class-token sequences split from a single class literal.

use std::fmt;

/// An ordered sequence of atomic class tokens.
///
/// Duplicates are preserved in position, while membership queries treat the
/// sequence as a set. Tokens never contain whitespace.
///
/// # Examples
/// ```
/// use glaze_tokens::ClassSet;
///
/// let set = ClassSet::split("  rounded-xl   border px-5 ");
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.join(), "rounded-xl border px-5");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet {
    tokens: Vec<String>,
}

impl ClassSet {
    /// Split `text` on runs of whitespace, dropping leading and trailing runs.
    #[must_use]
    pub fn split(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().map(str::to_owned).collect(),
        }
    }

    /// Join the tokens with single spaces in sequence order.
    #[must_use]
    pub fn join(&self) -> String {
        self.tokens.join(" ")
    }

    /// Number of tokens, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sequence holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Whether `token` occurs anywhere in the sequence.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.iter().any(|t| t == token)
    }

    /// Whether any of `candidates` occurs in the sequence.
    #[must_use]
    pub fn contains_any(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|c| self.contains(c))
    }

    /// First token starting with `prefix`, in sequence order.
    #[must_use]
    pub fn first_with_prefix(&self, prefix: &str) -> Option<&str> {
        self.iter().find(|t| t.starts_with(prefix))
    }

    /// Whether some token starts with `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.first_with_prefix(prefix).is_some()
    }

    /// Put `token` at the front of the sequence.
    pub fn insert_front(&mut self, token: impl Into<String>) {
        self.tokens.insert(0, token.into());
    }

    /// Put `token` directly after the first occurrence of `anchor`, or at the
    /// end when `anchor` is absent.
    pub fn insert_after(&mut self, anchor: &str, token: impl Into<String>) {
        let at = self
            .tokens
            .iter()
            .position(|t| t == anchor)
            .map_or(self.tokens.len(), |i| i + 1);
        self.tokens.insert(at, token.into());
    }

    /// Keep only the tokens for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.tokens.retain(|t| keep(t));
    }

    /// Replace tokens in place; `f` returns `Some` for tokens it rewrites.
    pub fn replace_each(&mut self, mut f: impl FnMut(&str) -> Option<String>) {
        for token in &mut self.tokens {
            if let Some(next) = f(token) {
                *token = next;
            }
        }
    }
}

impl fmt::Display for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

impl<'a> FromIterator<&'a str> for ClassSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(str::to_owned).collect(),
        }
    }
}
