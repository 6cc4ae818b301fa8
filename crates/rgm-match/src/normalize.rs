//! Author name normalization.

use std::collections::BTreeSet;

/// Honorifics removed from the start of a name.
const TITLES: &[&str] = &["dr", "prof", "professor", "mr", "ms", "mrs"];

/// Generational and degree suffixes removed from the end of a name.
const SUFFIXES: &[&str] = &[
    "jr", "sr", "ii", "iii", "iv", "phd", "md", "dphil", "mphil", "msc", "mba", "mph", "dds",
    "dvm", "esq",
];

/// Normalize a raw name with the built-in title and suffix lists.
///
/// ```
/// assert_eq!(rgm_match::normalize_author_name("Dr. John A. Smith Jr."), "john a smith");
/// ```
pub fn normalize_author_name(name: &str) -> String {
    NameNormalizer::default().normalize(name)
}

/// Name normalizer with optional extra titles and suffixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameNormalizer {
    extra_titles: BTreeSet<String>,
    extra_suffixes: BTreeSet<String>,
}

impl NameNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add titles to strip in addition to the built-in list.
    #[must_use]
    pub fn with_titles<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_titles.extend(
            titles
                .into_iter()
                .map(|t| affix_key(t.as_ref()))
                .filter(|t| !t.is_empty()),
        );
        self
    }

    /// Add suffixes to strip in addition to the built-in list.
    #[must_use]
    pub fn with_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra_suffixes.extend(
            suffixes
                .into_iter()
                .map(|s| affix_key(s.as_ref()))
                .filter(|s| !s.is_empty()),
        );
        self
    }

    /// Lowercase, strip leading titles and trailing suffixes, replace
    /// punctuation with spaces and collapse whitespace.
    ///
    /// A hyphen between two letters or digits is kept so that double-barrelled
    /// names stay one token; any other hyphen is punctuation. The
    /// last remaining token is never stripped, so "Dr." alone yields "dr".
    pub fn normalize(&self, name: &str) -> String {
        let lowered = name.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|ch: char| ch.is_whitespace() || ch == ',')
            .filter(|token| !token.is_empty())
            .collect();

        let mut start = 0;
        let mut end = tokens.len();
        while end - start > 1 && self.is_title(tokens[start]) {
            start += 1;
        }
        while end - start > 1 && self.is_suffix(tokens[end - 1]) {
            end -= 1;
        }

        let mut cleaned = String::with_capacity(lowered.len());
        for token in &tokens[start..end] {
            let chars: Vec<char> = token.chars().collect();
            for (idx, &ch) in chars.iter().enumerate() {
                let joins_parts = ch == '-'
                    && idx > 0
                    && chars[idx - 1].is_alphanumeric()
                    && chars.get(idx + 1).is_some_and(|next| next.is_alphanumeric());
                cleaned.push(if ch.is_alphanumeric() || joins_parts {
                    ch
                } else {
                    ' '
                });
            }
            cleaned.push(' ');
        }
        cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn is_title(&self, token: &str) -> bool {
        let key = affix_key(token);
        TITLES.contains(&key.as_str()) || self.extra_titles.contains(&key)
    }

    fn is_suffix(&self, token: &str) -> bool {
        let key = affix_key(token);
        SUFFIXES.contains(&key.as_str()) || self.extra_suffixes.contains(&key)
    }
}

/// Comparison key for titles and suffixes: `Ph.D.` and `(PhD)` both become `phd`.
pub(crate) fn affix_key(token: &str) -> String {
    token
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
