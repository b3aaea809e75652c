//! Transfer intent resolution.
//!
//! One pure function merges the two input channels into a single
//! immutable [`TransferIntent`]. Each field is resolved independently:
//! an explicit URL value always beats a start-param value, and a
//! recipient may well come from the URL while the amount comes from the
//! deep link. No validation happens here; the submitter validates the
//! resolved intent before any wallet contact.

use tracing::debug;

use crate::startparam::decode;
use crate::url::UrlFields;

/// Where a resolved field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// Supplied explicitly in the URL query string.
    Url,
    /// Extracted from the deep-link start parameter.
    StartParam,
    /// Not supplied by either channel.
    #[default]
    None,
}

/// Per-field provenance of a [`TransferIntent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSources {
    pub recipient: Origin,
    pub amount: Origin,
    pub comment: Origin,
}

/// A resolved transfer intent.
///
/// Fields are candidate values, not yet validated; empty string means
/// absent. Constructed once per page load and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransferIntent {
    pub recipient: String,
    pub amount: String,
    pub comment: String,
    pub source: FieldSources,
}

impl TransferIntent {
    /// True when both fields required for submission are present.
    pub fn is_complete(&self) -> bool {
        !self.recipient.is_empty() && !self.amount.is_empty()
    }

    /// True when neither channel yielded any field.
    pub fn is_empty(&self) -> bool {
        self.recipient.is_empty() && self.amount.is_empty() && self.comment.is_empty()
    }
}

/// Merge URL fields with a decoded start parameter.
///
/// `start_param` is the raw deep-link string (or `None` when the app was
/// not entered through a link); it is decoded internally.
pub fn resolve(url: &UrlFields, start_param: Option<&str>) -> TransferIntent {
    let decoded = match start_param {
        Some(raw) => decode(raw),
        None => decode(""),
    };

    let (recipient, recipient_src) =
        pick(url.recipient.as_deref(), decoded.fields.recipient.as_deref());
    let (amount, amount_src) =
        pick(url.amount.as_deref(), decoded.fields.amount.as_deref());
    let (comment, comment_src) =
        pick(url.comment.as_deref(), decoded.fields.comment.as_deref());

    let intent = TransferIntent {
        recipient,
        amount,
        comment,
        source: FieldSources {
            recipient: recipient_src,
            amount: amount_src,
            comment: comment_src,
        },
    };

    debug!(
        method = ?decoded.method,
        complete = intent.is_complete(),
        "transfer intent resolved"
    );
    intent
}

/// Field-level precedence: URL beats start param beats nothing.
fn pick(url: Option<&str>, start: Option<&str>) -> (String, Origin) {
    match url {
        Some(v) if !v.is_empty() => return (v.to_string(), Origin::Url),
        _ => {}
    }
    match start {
        Some(v) if !v.is_empty() => (v.to_string(), Origin::StartParam),
        _ => (String::new(), Origin::None),
    }
}
