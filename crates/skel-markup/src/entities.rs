//! Named HTML entity decoding.
//!
//! Component markup routinely uses HTML entities that an XML reader does not
//! know about. They are rewritten to Unicode before the fragment reaches the
//! reader; the five XML entities are left for the reader itself.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static NAMED_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z][a-zA-Z0-9]*);").expect("invalid entity regex"));

/// HTML entities commonly found in UI copy.
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("nbsp", "\u{00a0}"),
    ("ensp", "\u{2002}"),
    ("emsp", "\u{2003}"),
    ("thinsp", "\u{2009}"),
    ("mdash", "\u{2014}"),
    ("ndash", "\u{2013}"),
    ("hellip", "\u{2026}"),
    ("bull", "\u{2022}"),
    ("middot", "\u{00b7}"),
    ("ldquo", "\u{201c}"),
    ("rdquo", "\u{201d}"),
    ("lsquo", "\u{2018}"),
    ("rsquo", "\u{2019}"),
    ("laquo", "\u{00ab}"),
    ("raquo", "\u{00bb}"),
    ("larr", "\u{2190}"),
    ("rarr", "\u{2192}"),
    ("uarr", "\u{2191}"),
    ("darr", "\u{2193}"),
    ("times", "\u{00d7}"),
    ("divide", "\u{00f7}"),
    ("plusmn", "\u{00b1}"),
    ("deg", "\u{00b0}"),
    ("copy", "\u{00a9}"),
    ("reg", "\u{00ae}"),
    ("trade", "\u{2122}"),
    ("euro", "\u{20ac}"),
    ("pound", "\u{00a3}"),
    ("yen", "\u{00a5}"),
    ("cent", "\u{00a2}"),
    ("check", "\u{2713}"),
    ("star", "\u{2606}"),
];

/// Replace known named HTML entities with their characters.
///
/// Unknown names and the XML entities (`amp`, `lt`, `gt`, `quot`, `apos`) are
/// left untouched. Returns the input unchanged when nothing needs replacing.
pub(crate) fn decode_html_entities(markup: &str) -> Cow<'_, str> {
    if !markup.contains('&') {
        return Cow::Borrowed(markup);
    }
    NAMED_ENTITY.replace_all(markup, |caps: &Captures| {
        lookup(&caps[1]).map_or_else(|| caps[0].to_owned(), str::to_owned)
    })
}

fn lookup(name: &str) -> Option<&'static str> {
    HTML_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == name)
        .map(|(_, ch)| *ch)
}

/// Resolve a general reference reported by the XML reader (`amp`, `#38`, `#x26`).
///
/// Unresolvable references are echoed back in their source form.
pub(crate) fn resolve_reference(name: &str) -> String {
    let resolved = match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => name.strip_prefix('#').and_then(|code| {
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse::<u32>().ok(),
            };
            value.and_then(char::from_u32)
        }),
    };
    resolved.map_or_else(|| format!("&{name};"), String::from)
}
