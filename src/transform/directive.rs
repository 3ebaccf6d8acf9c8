//! Override key directive grammar
//!
//! Override documents may embed an operation in a property name as a
//! bracketed tag: `"items[transform:append]"`. Three operations are
//! recognized:
//! - `[transform:remove]` — delete the property from the output
//! - `[transform:append]` — append elements to the output array
//! - `[transform:match:<field>]` — patch output array items whose `<field>` matches
//!
//! Any other bracketed text is not a directive and the key is plain.

/// The operation encoded by a directive tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Delete the target property from the output
    Remove,
    /// Append the override array's elements to the target array
    Append,
    /// Patch target array items whose `field` value matches (case-insensitive)
    MatchSet { field: String },
}

impl DirectiveKind {
    /// Returns the operation name as it appears in the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveKind::Remove => "remove",
            DirectiveKind::Append => "append",
            DirectiveKind::MatchSet { .. } => "match",
        }
    }
}

/// An override key after directive extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    /// The directive encoded in the key, if any
    pub directive: Option<DirectiveKind>,
    /// The key with the directive tag removed
    pub plain_name: String,
}

const TAG_PREFIX: &str = "[transform:";

/// Parse an override key, extracting a directive tag if present.
///
/// The tag may appear anywhere in the key, not just as a suffix;
/// `plain_name` is the key with the tag substring removed. A key whose
/// bracketed content is not one of the recognized operations is plain.
pub fn parse_key(key: &str) -> ParsedKey {
    let mut search = 0;
    while let Some(found) = key[search..].find(TAG_PREFIX) {
        let start = search + found;
        let body_start = start + TAG_PREFIX.len();
        let Some(close) = key[body_start..].find(']') else {
            break;
        };
        let end = body_start + close;

        if let Some(kind) = recognize(&key[body_start..end]) {
            let mut plain_name = String::with_capacity(key.len());
            plain_name.push_str(&key[..start]);
            plain_name.push_str(&key[end + 1..]);
            return ParsedKey {
                directive: Some(kind),
                plain_name,
            };
        }

        // Unrecognized tag; keep scanning from the next candidate.
        search = body_start;
    }

    ParsedKey {
        directive: None,
        plain_name: key.to_string(),
    }
}

/// Recognize a tag body (the text between `[transform:` and `]`)
fn recognize(body: &str) -> Option<DirectiveKind> {
    match body {
        "remove" => Some(DirectiveKind::Remove),
        "append" => Some(DirectiveKind::Append),
        _ => body
            .strip_prefix("match:")
            .filter(|field| !field.is_empty())
            .map(|field| DirectiveKind::MatchSet {
                field: field.to_string(),
            }),
    }
}
