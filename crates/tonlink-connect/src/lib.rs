//! Wallet-connect transfer submission.
//!
//! Bridges a resolved [`tonlink_intent::TransferIntent`] to a wallet:
//! amount conversion to nanotons, comment payload cells (plain text or
//! base64 BoC), transaction-request marshaling with a signing deadline,
//! and a single classified outcome vocabulary for every failure mode.
//!
//! # Example
//!
//! ```no_run
//! use tonlink_connect::{submit, TransactionOutcome, WalletConnector};
//! use tonlink_intent::{resolve, UrlFields};
//!
//! async fn send<C: WalletConnector>(connector: &C) {
//!     let url = UrlFields::from_query_pairs([
//!         ("recipient", "EQA9frIn5aPrALJIlBNHmbHzNOBrUHPzpOcmHvYGMdfjoEuC"),
//!         ("amount", "1.5"),
//!     ]);
//!     let intent = resolve(&url, None);
//!     match submit(&intent, connector).await {
//!         TransactionOutcome::Success { transaction_id } => {
//!             println!("sent: {transaction_id}");
//!         }
//!         outcome => println!("failed: {outcome:?}"),
//!     }
//! }
//! ```

mod connector;
mod error;
mod payload;
mod submit;

pub use connector::{
    MessagePayload, Network, TransactionReply, TransactionRequest, TransferMessage,
    WalletConnector, WalletSession,
};
pub use error::{ConnectorError, ErrorKind, TransactionOutcome};
pub use payload::{
    boc_base64, comment_cell, serialize_boc, Cell, CellBuilder, PayloadError, PayloadResult,
    MAX_COMMENT_BYTES,
};
pub use submit::{submit, to_nano, TX_VALIDITY_SECS};
