//! Transfer parameter ingestion and intent resolution.
//!
//! A transfer request reaches the Mini App through two mutually
//! inconsistent channels:
//!
//! - the page URL query string (`address`/`amount`/`comment`, with
//!   per-entry-page key aliases), and
//! - one opaque deep-link *start parameter*, which may be a base64 JSON
//!   object, an underscore-delimited tuple, a bare address, or a bare
//!   comment.
//!
//! This crate turns both into a single [`TransferIntent`]:
//!
//! 1. [`decode`] tries the candidate start-param grammars in priority
//!    order; the first match wins.
//! 2. [`resolve`] merges URL-supplied fields with decoded fields,
//!    field by field, with URL values always taking precedence.
//!
//! Everything here is synchronous, pure and total; no validation beyond
//! shallow heuristics happens during decoding. Recipient and comment
//! validation live in `tonlink-address` and [`comment`], and are applied
//! by the submitter before any wallet contact.

pub mod comment;
pub mod launch;
pub mod link;
pub mod resolver;
pub mod startparam;
pub mod url;

pub use comment::{CommentValidation, MAX_COMMENT_CHARS};
pub use launch::LaunchContext;
pub use link::encode_start_param;
pub use resolver::{resolve, FieldSources, Origin, TransferIntent};
pub use startparam::{decode, DecodeMethod, DecodedStartParam, ParamFields};
pub use url::UrlFields;
