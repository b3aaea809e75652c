//! Start-parameter encoding.
//!
//! The inverse of [`crate::startparam::decode`], used to build shareable
//! transfer links. The compact delimited form is only safe when every
//! field survives an underscore split; anything else goes through the
//! structured (base64 JSON) form, which is lossless for arbitrary text.

use serde_json::json;

use crate::startparam::ParamFields;

/// Encode transfer fields as a deep-link start parameter.
///
/// Produces `recipient_amount_comment` when that round-trips (recipient
/// carries the user-friendly prefix and no field contains `_`), otherwise
/// base64 of a JSON object with `address`/`amount`/`comment` keys.
pub fn encode_start_param(fields: &ParamFields) -> String {
    if let Some(delimited) = try_delimited(fields) {
        return delimited;
    }

    let mut object = serde_json::Map::new();
    if let Some(recipient) = &fields.recipient {
        object.insert("address".to_string(), json!(recipient));
    }
    if let Some(amount) = &fields.amount {
        object.insert("amount".to_string(), json!(amount));
    }
    if let Some(comment) = &fields.comment {
        object.insert("comment".to_string(), json!(comment));
    }

    let text = serde_json::Value::Object(object).to_string();
    base64::Engine::encode(&base64::engine::general_purpose::STANDARD, text)
}

/// The delimited form, when it decodes back to the same fields.
fn try_delimited(fields: &ParamFields) -> Option<String> {
    let recipient = fields.recipient.as_deref()?;
    if !(recipient.starts_with("EQ") || recipient.starts_with("UQ")) {
        return None;
    }

    // An underscore in any segment would shift tokens on decode.
    let safe = |s: &str| !s.contains('_') && !s.is_empty();
    if !safe(recipient) {
        return None;
    }

    let mut out = recipient.to_string();
    match (&fields.amount, &fields.comment) {
        (Some(amount), Some(comment)) if safe(amount) && safe(comment) => {
            out.push('_');
            out.push_str(amount);
            out.push('_');
            out.push_str(comment);
        }
        (Some(amount), None) if safe(amount) => {
            out.push('_');
            out.push_str(amount);
        }
        (None, None) => {}
        // A comment without an amount, or an unsafe segment, cannot be
        // expressed positionally.
        _ => return None,
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::startparam::{decode, DecodeMethod};

    // This account's friendly form avoids '_' and '-'.
    const EQ: &str = "EQA9frIn5aPrALJIlBNHmbHzNOBrUHPzpOcmHvYGMdfjoEuC";

    fn fields(
        recipient: Option<&str>,
        amount: Option<&str>,
        comment: Option<&str>,
    ) -> ParamFields {
        ParamFields {
            recipient: recipient.map(str::to_string),
            amount: amount.map(str::to_string),
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn test_delimited_roundtrip() {
        let f = fields(Some(EQ), Some("2.5"), Some("thanks"));
        let encoded = encode_start_param(&f);
        assert_eq!(encoded, format!("{EQ}_2.5_thanks"));

        let decoded = decode(&encoded);
        assert_eq!(decoded.method, DecodeMethod::Delimited);
        assert_eq!(decoded.fields, f);
    }

    #[test]
    fn test_delimited_address_and_amount() {
        let f = fields(Some(EQ), Some("10"), None);
        let encoded = encode_start_param(&f);
        assert_eq!(encoded, format!("{EQ}_10"));
        assert_eq!(decode(&encoded).fields, f);
    }

    #[test]
    fn test_bare_address_roundtrip() {
        let f = fields(Some(EQ), None, None);
        let encoded = encode_start_param(&f);
        assert_eq!(encoded, EQ);
        let decoded = decode(&encoded);
        assert_eq!(decoded.method, DecodeMethod::BareAddress);
        assert_eq!(decoded.fields, f);
    }

    #[test]
    fn test_structured_fallback_for_unsafe_comment() {
        // A space cannot ride in the delimited form.
        let f = fields(Some(EQ), Some("1"), Some("thank you"));
        let encoded = encode_start_param(&f);
        let decoded = decode(&encoded);
        assert_eq!(decoded.method, DecodeMethod::Structured);
        assert_eq!(decoded.fields, f);
    }

    #[test]
    fn test_structured_fallback_for_underscored_address() {
        // Friendly forms may legitimately contain '_'.
        let f = fields(
            Some("EQCVFC7j4_pCvJvxpRfwTcYAhlzdCe02zx5Ybdoiq0vEf_lT"),
            Some("1"),
            None,
        );
        let encoded = encode_start_param(&f);
        let decoded = decode(&encoded);
        assert_eq!(decoded.method, DecodeMethod::Structured);
        assert_eq!(decoded.fields, f);
    }

    #[test]
    fn test_structured_fallback_without_recipient() {
        // The comment-only positional scheme is lossy; never emit it.
        let f = fields(None, Some("3"), Some("note"));
        let decoded = decode(&encode_start_param(&f));
        assert_eq!(decoded.method, DecodeMethod::Structured);
        assert_eq!(decoded.fields, f);
    }

    #[test]
    fn test_comment_without_amount_uses_structured() {
        let f = fields(Some(EQ), None, Some("gift"));
        let decoded = decode(&encode_start_param(&f));
        assert_eq!(decoded.method, DecodeMethod::Structured);
        assert_eq!(decoded.fields, f);
    }
}
