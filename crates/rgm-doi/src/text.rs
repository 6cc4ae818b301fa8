//! Small text and deserialization helpers shared by the registry decoders.

use quick_xml::escape::unescape;
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Deserialize `null` as the type's default (registries send `null` for empty lists).
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Collapse runs of whitespace into single spaces and trim.
pub(crate) fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed, collapsed text, or `None` when nothing is left.
pub(crate) fn clean(raw: Option<&str>) -> Option<String> {
    raw.map(collapse_whitespace).filter(|s| !s.is_empty())
}

/// Elements that separate blocks of text. Any other tag is inline and
/// removed without leaving a gap.
const BLOCK_TAGS: &[&str] = &["abstract", "br", "div", "li", "list", "p", "sec", "title"];

/// Strip JATS/HTML tags and decode XML entities, numeric references included.
pub(crate) fn strip_markup(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(open) = rest.find('<') {
        let Some(len) = rest[open..].find('>') else {
            break;
        };
        text.push_str(&rest[..open]);
        if is_block_tag(&rest[open + 1..open + len]) {
            text.push(' ');
        }
        rest = &rest[open + len + 1..];
    }
    text.push_str(rest);

    match unescape(&text) {
        Ok(decoded) => collapse_whitespace(&decoded),
        Err(err) => {
            debug!(error = %err, "abstract has malformed entities, keeping them as text");
            collapse_whitespace(&text)
        }
    }
}

/// `tag` is the text between `<` and `>`, e.g. `/jats:p` or `jats:sec id="s1"`.
fn is_block_tag(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default();
    let local = name.rsplit(':').next().unwrap_or(name);
    BLOCK_TAGS
        .iter()
        .any(|block| local.eq_ignore_ascii_case(block))
}
