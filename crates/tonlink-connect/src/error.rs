//! Error kinds and submission outcomes.

use thiserror::Error;

/// Classified failure of a transfer submission.
///
/// These are error *kinds*, not exception types: local precondition
/// failures and remapped wallet-layer failures share one vocabulary, and
/// the `Display` form is the stable kebab-case identifier the
/// presentation layer keys its messages on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recipient failed address validation (or was missing).
    InvalidRecipient,
    /// Amount is non-numeric or not positive.
    InvalidAmount,
    /// Comment payload exceeds the protocol size limit.
    InvalidCommentEncoding,
    /// The user declined the transaction in the wallet UI.
    UserRejected,
    /// The wallet reported insufficient balance.
    InsufficientBalance,
    /// No active wallet session.
    WalletNotConnected,
    /// The launch parameters matched no transfer grammar.
    DecodeAmbiguous,
    /// Unrecognized wallet-layer failure; detail carries the raw message.
    Unknown,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::InvalidRecipient => "invalid-recipient",
            ErrorKind::InvalidAmount => "invalid-amount",
            ErrorKind::InvalidCommentEncoding => "invalid-comment-encoding",
            ErrorKind::UserRejected => "user-rejected",
            ErrorKind::InsufficientBalance => "insufficient-balance",
            ErrorKind::WalletNotConnected => "wallet-not-connected",
            ErrorKind::DecodeAmbiguous => "decode-ambiguous",
            ErrorKind::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Failures surfaced by a wallet-connect channel implementation.
///
/// The submitter catches these and remaps them to [`ErrorKind`]; they
/// never reach the presentation layer directly.
#[derive(Debug, Clone, Error)]
pub enum ConnectorError {
    #[error("User rejected the transaction")]
    Rejected,

    #[error("Insufficient balance")]
    InsufficientBalance,

    #[error("Wallet is not connected")]
    NotConnected,

    #[error("Payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Other(String),
}

impl ErrorKind {
    /// Map a wallet-layer failure to its kind.
    pub fn from_connector(err: &ConnectorError) -> Self {
        match err {
            ConnectorError::Rejected => ErrorKind::UserRejected,
            ConnectorError::InsufficientBalance => ErrorKind::InsufficientBalance,
            ConnectorError::NotConnected => ErrorKind::WalletNotConnected,
            ConnectorError::PayloadTooLarge(_) => ErrorKind::InvalidCommentEncoding,
            ConnectorError::BadRequest(_) => ErrorKind::InvalidRecipient,
            ConnectorError::Other(_) => ErrorKind::Unknown,
        }
    }
}

/// State of a transfer submission, as rendered by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransactionOutcome {
    /// No submission attempted yet.
    #[default]
    Idle,
    /// A submission is awaiting wallet/user approval.
    Pending,
    /// The wallet accepted the transfer.
    Success {
        /// Opaque transaction reference (signed BoC) from the wallet.
        transaction_id: String,
    },
    /// The submission failed; terminal for this attempt.
    Failed {
        kind: ErrorKind,
        /// Human-readable detail for display.
        detail: String,
    },
}

impl TransactionOutcome {
    /// Shorthand for a classified failure.
    pub fn failed(kind: ErrorKind, detail: impl Into<String>) -> Self {
        TransactionOutcome::Failed {
            kind,
            detail: detail.into(),
        }
    }

    /// True for the success state.
    pub fn is_success(&self) -> bool {
        matches!(self, TransactionOutcome::Success { .. })
    }
}
