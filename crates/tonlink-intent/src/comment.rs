//! Transfer comment grammar.
//!
//! Deep-link parameters on the host platform are restricted to
//! `[A-Za-z0-9_-]`, so a comment that stays inside that alphabet can ride
//! in a shared link (and be submitted as plain text). Anything else is not
//! rejected: the comment is flagged here and the submitter re-encodes it
//! as a binary cell payload instead.

/// Maximum comment length in characters.
pub const MAX_COMMENT_CHARS: usize = 512;

/// Result of checking a comment against the deep-link grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentValidation {
    raw: String,
    is_valid: bool,
    reason: Option<String>,
}

impl CommentValidation {
    /// Check a free-text comment against the deep-link grammar.
    ///
    /// The empty string is always valid (absence of a comment). A comment
    /// beginning with `@` is valid when the remainder is at most 511
    /// characters of `[A-Za-z0-9_-]`; any other comment is valid when the
    /// whole string is at most 512 such characters.
    pub fn validate(raw: &str) -> Self {
        let reason = check(raw);
        CommentValidation {
            raw: raw.to_string(),
            is_valid: reason.is_none(),
            reason,
        }
    }

    /// The comment as supplied.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True when the comment fits the deep-link grammar.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// User-displayable explanation when invalid.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// Returns a rejection reason, or `None` when the comment conforms.
fn check(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    let (body, limit) = match raw.strip_prefix('@') {
        Some(rest) => (rest, MAX_COMMENT_CHARS - 1),
        None => (raw, MAX_COMMENT_CHARS),
    };

    let len = body.chars().count();
    if len > limit {
        return Some(format!(
            "Comment is too long: {} characters (max {})",
            len, limit
        ));
    }

    if !body.chars().all(is_link_safe) {
        return Some(
            "Comment may only contain letters, digits, '_' and '-'".to_string(),
        );
    }

    None
}

/// The deep-link parameter alphabet.
fn is_link_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_valid() {
        let v = CommentValidation::validate("");
        assert!(v.is_valid());
        assert_eq!(v.reason(), None);
    }

    #[test]
    fn test_link_safe_comment() {
        assert!(CommentValidation::validate("invoice-42_final").is_valid());
    }

    #[test]
    fn test_at_prefixed_comment() {
        assert!(CommentValidation::validate("@abc_def").is_valid());
    }

    #[test]
    fn test_space_rejected() {
        let v = CommentValidation::validate("hello world");
        assert!(!v.is_valid());
        assert!(v.reason().unwrap().contains("letters"));
    }

    #[test]
    fn test_unicode_rejected() {
        assert!(!CommentValidation::validate("спасибо").is_valid());
    }

    #[test]
    fn test_length_limits() {
        let max = "a".repeat(MAX_COMMENT_CHARS);
        assert!(CommentValidation::validate(&max).is_valid());
        assert!(!CommentValidation::validate(&format!("{max}a")).is_valid());

        // After '@' only 511 characters fit.
        let at_max = format!("@{}", "a".repeat(MAX_COMMENT_CHARS - 1));
        assert!(CommentValidation::validate(&at_max).is_valid());
        let at_over = format!("@{}", "a".repeat(MAX_COMMENT_CHARS));
        let v = CommentValidation::validate(&at_over);
        assert!(!v.is_valid());
        assert!(v.reason().unwrap().contains("512"));
    }

    #[test]
    fn test_bare_at_is_valid() {
        assert!(CommentValidation::validate("@").is_valid());
    }
}
