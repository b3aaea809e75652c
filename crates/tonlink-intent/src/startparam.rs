//! Start-parameter decoding.
//!
//! The deep-link start parameter is one opaque string with no
//! self-describing framing; links in the wild use several ad-hoc
//! encodings. Decoding tries each candidate grammar in strict priority
//! order and the first successful match wins:
//!
//! 1. **Structured** — standard-alphabet base64 of a UTF-8 JSON object
//!    with optional `address`/`amount`/`comment` keys.
//! 2. **Delimited** — `_`-separated plain text, 1-3 segments.
//! 3. **Bare address** — the whole string looks like a user-friendly
//!    address.
//! 4. **Bare comment** — anything else.
//!
//! Each grammar is an independent pure matcher, so adding or reordering
//! grammars cannot interleave state. The address check here is a shallow
//! prefix heuristic on purpose: full checksum validation happens
//! downstream, and a malformed-but-prefixed string must still land in the
//! recipient slot rather than be silently reinterpreted as a comment.

use tracing::debug;

/// Which grammar matched a start parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMethod {
    /// Base64-encoded JSON object.
    Structured,
    /// Underscore-delimited segments.
    Delimited,
    /// The whole string is an address.
    BareAddress,
    /// The whole string is a comment.
    BareComment,
    /// Empty or absent input.
    None,
}

/// Fields extracted by a grammar; any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamFields {
    pub recipient: Option<String>,
    pub amount: Option<String>,
    pub comment: Option<String>,
}

impl ParamFields {
    /// True when no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.recipient.is_none() && self.amount.is_none() && self.comment.is_none()
    }
}

/// A decoded start parameter with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedStartParam {
    /// The grammar that matched.
    pub method: DecodeMethod,
    /// Extracted fields.
    pub fields: ParamFields,
    /// Intermediate tokens, retained for diagnostics only.
    pub raw_parts: Vec<String>,
}

impl DecodedStartParam {
    fn none() -> Self {
        DecodedStartParam {
            method: DecodeMethod::None,
            fields: ParamFields::default(),
            raw_parts: Vec::new(),
        }
    }
}

/// The candidate grammars, in priority order. Anything they all decline
/// falls through to the bare-comment grammar.
const MATCHERS: &[fn(&str) -> Option<DecodedStartParam>] = &[
    match_structured,
    match_delimited,
    match_bare_address,
];

/// Decode a start parameter. Deterministic, total, never fails.
pub fn decode(raw: &str) -> DecodedStartParam {
    let raw = raw.trim();
    if raw.is_empty() {
        return DecodedStartParam::none();
    }

    let decoded = MATCHERS
        .iter()
        .find_map(|matcher| matcher(raw))
        .unwrap_or_else(|| bare_comment(raw));
    debug!(method = ?decoded.method, "start parameter decoded");
    decoded
}

/// Shallow recipient heuristic: user-friendly address prefix only.
fn looks_like_address(s: &str) -> bool {
    s.starts_with("EQ") || s.starts_with("UQ")
}

/// Store a token as a field value only when it is non-empty.
fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Grammar 1: base64 JSON object.
fn match_structured(raw: &str) -> Option<DecodedStartParam> {
    let bytes =
        base64::Engine::decode(&base64::engine::general_purpose::STANDARD, raw).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    let value: serde_json::Value = serde_json::from_str(&text).ok()?;
    let object = value.as_object()?;

    // Links in the wild carry both string and numeric values.
    let field = |key: &str| -> Option<String> {
        match object.get(key)? {
            serde_json::Value::String(s) => non_empty(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    };

    Some(DecodedStartParam {
        method: DecodeMethod::Structured,
        fields: ParamFields {
            recipient: field("address"),
            amount: field("amount"),
            comment: field("comment"),
        },
        raw_parts: vec![text],
    })
}

/// Grammar 2: underscore-delimited segments.
///
/// When the first token carries the address prefix the scheme is
/// `address_amount_comment`. A lone token is a comment. Otherwise the
/// scheme is `comment_amount`, and the first token is deliberately
/// dropped: without an address prefix there is no way to tell a comment
/// from a mistyped recipient, and guessing would misdirect funds.
fn match_delimited(raw: &str) -> Option<DecodedStartParam> {
    if !raw.contains('_') {
        return None;
    }

    let parts: Vec<String> = raw.split('_').map(str::to_string).collect();
    let mut fields = ParamFields::default();

    if looks_like_address(&parts[0]) {
        fields.recipient = non_empty(&parts[0]);
        fields.amount = parts.get(1).and_then(|p| non_empty(p));
        fields.comment = parts.get(2).and_then(|p| non_empty(p));
    } else if parts.len() == 1 {
        fields.comment = non_empty(&parts[0]);
    } else {
        fields.amount = parts.get(1).and_then(|p| non_empty(p));
    }

    Some(DecodedStartParam {
        method: DecodeMethod::Delimited,
        fields,
        raw_parts: parts,
    })
}

/// Grammar 3: the whole string is an address.
fn match_bare_address(raw: &str) -> Option<DecodedStartParam> {
    if !looks_like_address(raw) {
        return None;
    }

    Some(DecodedStartParam {
        method: DecodeMethod::BareAddress,
        fields: ParamFields {
            recipient: Some(raw.to_string()),
            ..ParamFields::default()
        },
        raw_parts: vec![raw.to_string()],
    })
}

/// Fallback grammar: the whole string is a comment.
fn bare_comment(raw: &str) -> DecodedStartParam {
    DecodedStartParam {
        method: DecodeMethod::BareComment,
        fields: ParamFields {
            comment: Some(raw.to_string()),
            ..ParamFields::default()
        },
        raw_parts: vec![raw.to_string()],
    }
}
