//! `@tag value` decoding for documentation comments.
//!
//! Decoding never fails: unknown tags pass through and malformed numbers become
//! `NaN`.
use once_cell::sync::Lazy;
use ordered_float::OrderedFloat;
use regex::Regex;

use crate::flatten;
use crate::schema::{AnnotationValue, Annotations, SchemaNode};

// ------------------------------- Tags ------------------------------------ //

/// `@name` then either a same-line value, a newline, or the end of the text.
static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@(?P<tag>[\w-]+)(?:(?P<value>[ \t\r\x0B\x0C][^\n]*)|\n|$)")
        .expect("tag pattern is valid")
});

const NUMERIC_TAGS: &[&str] = &[
    "maximum",
    "exclusiveMaximum",
    "minimum",
    "exclusiveMinimum",
    "maxLength",
    "minLength",
    "multipleOf",
    "maxItems",
    "minItems",
    "maxProperties",
    "minProperties",
];

/// Value of a tag as written, before coercion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawTag {
    /// Tag with nothing after it on its line.
    Flag,
    Text(String),
}

impl RawTag {
    /// Text form; a bare flag reads as `"true"`.
    pub fn as_text(&self) -> &str {
        match self {
            RawTag::Flag => "true",
            RawTag::Text(t) => t,
        }
    }
}

/// Every tag in `text`, in order of appearance.
pub fn extract_tags(text: &str) -> Vec<(String, RawTag)> {
    TAG_RE
        .captures_iter(text)
        .map(|caps| {
            let tag = caps["tag"].to_string();
            let raw = match caps.name("value").map(|m| m.as_str().trim()) {
                Some(v) if !v.is_empty() => RawTag::Text(v.to_string()),
                _ => RawTag::Flag,
            };
            (tag, raw)
        })
        .collect()
}

// ------------------------------ Coercion --------------------------------- //

/// Number parsing with JavaScript `Number(..)` rules: surrounding whitespace is
/// ignored, empty text is zero, `0x`/`0o`/`0b` prefixes and `Infinity` are
/// accepted, anything else that is not a decimal literal is `NaN`.
pub fn parse_js_number(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match t.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u128::from_str_radix(&t[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }
    // Rust also takes "inf"/"nan" spellings; JS does not.
    if !t.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

fn number(n: f64) -> AnnotationValue {
    AnnotationValue::Number(OrderedFloat(n))
}

/// Coerce one raw tag by what the tag means.
pub fn coerce(tag: &str, raw: &RawTag) -> AnnotationValue {
    match tag {
        "examples" => AnnotationValue::List(raw.as_text().split('\n').map(|l| l.trim().to_string()).collect()),
        t if NUMERIC_TAGS.contains(&t) => number(parse_js_number(raw.as_text())),
        "readOnly" | "writeOnly" | "ignore" => AnnotationValue::Boolean(true),
        "deprecated" | "uniqueItems" => AnnotationValue::Boolean(!raw.as_text().is_empty()),
        "default" => match raw.as_text() {
            "true" => AnnotationValue::Boolean(true),
            "false" => AnnotationValue::Boolean(false),
            other => {
                let n = parse_js_number(other);
                if n.is_nan() {
                    AnnotationValue::String(other.to_string())
                } else {
                    number(n)
                }
            }
        },
        _ => match raw {
            RawTag::Flag => AnnotationValue::Boolean(true),
            RawTag::Text(t) => AnnotationValue::String(t.clone()),
        },
    }
}

/// Decode every tag of a comment. A repeated tag keeps its first position and
/// its last value.
pub fn decode(text: &str) -> Annotations {
    let mut out = Annotations::new();
    for (tag, raw) in extract_tags(text) {
        let value = coerce(&tag, &raw);
        out.insert(tag, value);
    }
    out
}

/// Fill `annotations` on every node that has a comment. Returns how many
/// nodes were decoded.
pub fn decode_forest(forest: &mut [SchemaNode]) -> usize {
    let mut decoded = 0;
    flatten::for_each_mut(forest, |_, node| {
        if let Some(text) = node.raw_comment.as_deref() {
            node.annotations = Some(decode(text));
            decoded += 1;
        }
    });
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawTag {
        RawTag::Text(s.into())
    }

    #[test]
    fn extracts_tags_from_jsdoc_block() {
        let comment = "*\n     * @title A - COMMENTs\n     * @ignore\n     * @titleBy {{ soadkoaskdo as | }}\n     ";
        let tags = extract_tags(comment);
        assert_eq!(
            tags,
            [
                ("title".to_string(), text("A - COMMENTs")),
                ("ignore".to_string(), RawTag::Flag),
                ("titleBy".to_string(), text("{{ soadkoaskdo as | }}")),
            ]
        );
    }

    #[test]
    fn tag_at_end_of_text_is_a_flag() {
        assert_eq!(extract_tags("* @ignore"), [("ignore".to_string(), RawTag::Flag)]);
        assert_eq!(extract_tags("* @ignore   "), [("ignore".to_string(), RawTag::Flag)]);
    }

    #[test]
    fn hyphenated_names_and_glued_punctuation() {
        assert_eq!(extract_tags("@x-order 3"), [("x-order".to_string(), text("3"))]);
        assert!(extract_tags("mail me at someone@example.com").is_empty());
        assert!(extract_tags("@foo{bar}").is_empty());
    }

    #[test]
    fn value_runs_to_end_of_line() {
        let tags = extract_tags("@readOnly @ignore\n@title x");
        assert_eq!(tags, [("readOnly".to_string(), text("@ignore")), ("title".to_string(), text("x"))]);
    }

    #[test]
    fn numeric_tags() {
        assert_eq!(decode("@minimum 3")["minimum"], number(3.0));
        assert!(decode("@minimum abc")["minimum"].as_f64().unwrap().is_nan());
        assert!(decode("@maxLength")["maxLength"].as_f64().unwrap().is_nan());
        assert_eq!(decode("@multipleOf 0.5")["multipleOf"], number(0.5));
        assert_eq!(decode("@maxItems 0x10")["maxItems"], number(16.0));
    }

    #[test]
    fn js_number_rules() {
        assert_eq!(parse_js_number(" 42 "), 42.0);
        assert_eq!(parse_js_number("-1e3"), -1000.0);
        assert_eq!(parse_js_number(".5"), 0.5);
        assert_eq!(parse_js_number(""), 0.0);
        assert_eq!(parse_js_number("Infinity"), f64::INFINITY);
        assert!(parse_js_number("inf").is_nan());
        assert!(parse_js_number("NaN").is_nan());
        assert!(parse_js_number("1,000").is_nan());
        assert!(parse_js_number("0xZZ").is_nan());
    }

    #[test]
    fn boolean_tags() {
        let a = decode("@ignore\n@readOnly no\n@writeOnly");
        assert_eq!(a["ignore"], AnnotationValue::Boolean(true));
        assert_eq!(a["readOnly"], AnnotationValue::Boolean(true));
        assert_eq!(a["writeOnly"], AnnotationValue::Boolean(true));
        assert_eq!(coerce("deprecated", &text("use v2")), AnnotationValue::Boolean(true));
        assert_eq!(coerce("uniqueItems", &RawTag::Flag), AnnotationValue::Boolean(true));
        assert_eq!(coerce("deprecated", &text("")), AnnotationValue::Boolean(false));
    }

    #[test]
    fn default_tag() {
        assert_eq!(coerce("default", &text("true")), AnnotationValue::Boolean(true));
        assert_eq!(coerce("default", &text("false")), AnnotationValue::Boolean(false));
        assert_eq!(coerce("default", &text("12")), number(12.0));
        assert_eq!(coerce("default", &text("hello")), AnnotationValue::String("hello".into()));
        assert_eq!(coerce("default", &text("NaN")), AnnotationValue::String("NaN".into()));
        assert_eq!(coerce("default", &RawTag::Flag), AnnotationValue::Boolean(true));
    }

    #[test]
    fn examples_tag() {
        assert_eq!(coerce("examples", &text("  a  ")), AnnotationValue::List(vec!["a".into()]));
        assert_eq!(coerce("examples", &text("a\n b ")), AnnotationValue::List(vec!["a".into(), "b".into()]));
        assert_eq!(coerce("examples", &RawTag::Flag), AnnotationValue::List(vec!["true".into()]));
        assert_eq!(decode("* @examples\n")["examples"], AnnotationValue::List(vec!["true".into()]));
    }

    #[test]
    fn unknown_tags_pass_through() {
        let a = decode("* @title AA \n * @oaksdoakds\n");
        assert_eq!(a["title"], AnnotationValue::String("AA".into()));
        assert_eq!(a["oaksdoakds"], AnnotationValue::Boolean(true));
    }

    #[test]
    fn repeated_tag_keeps_first_position_last_value() {
        let a = decode("@title one\n@format x\n@title two");
        let keys: Vec<_> = a.keys().map(String::as_str).collect();
        assert_eq!(keys, ["title", "format"]);
        assert_eq!(a["title"], AnnotationValue::String("two".into()));
    }

    #[test]
    fn decoding_is_idempotent() {
        let comment = "* @minimum nope\n * @default 7\n * @examples x\n * @custom";
        assert_eq!(decode(comment), decode(comment));
    }

    #[test]
    fn comment_without_tags_decodes_to_empty_map() {
        assert!(decode("just prose").is_empty());
    }
}
