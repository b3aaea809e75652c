//! URL query-string field ingestion.
//!
//! Different entry pages historically used different key names for the
//! same fields (`address` vs `adress` vs `recipient`, `amount` vs `ton`).
//! This module normalizes them to the semantic names the resolver works
//! with.

/// Transfer fields read from the page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlFields {
    pub recipient: Option<String>,
    pub amount: Option<String>,
    pub comment: Option<String>,
}

impl UrlFields {
    /// Build from decoded query pairs, normalizing key aliases.
    ///
    /// Recognized keys: `recipient`/`address`/`adress` for the
    /// recipient, `amount`/`ton` for the amount, `comment` for the
    /// comment. The first non-empty occurrence of each field wins;
    /// unknown keys are ignored.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut fields = UrlFields::default();
        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match key {
                "recipient" | "address" | "adress" => {
                    if fields.recipient.is_none() {
                        fields.recipient = Some(value.to_string());
                    }
                }
                "amount" | "ton" => {
                    if fields.amount.is_none() {
                        fields.amount = Some(value.to_string());
                    }
                }
                "comment" => {
                    if fields.comment.is_none() {
                        fields.comment = Some(value.to_string());
                    }
                }
                _ => {}
            }
        }
        fields
    }
}
