//! Transfer submission.
//!
//! Validates a resolved transfer intent, marshals it into a wallet
//! transaction request, and maps every failure mode to a classified
//! outcome. Submission never panics and never returns a raw wallet
//! error to the caller.

use tonlink_address::ValidatedAddress;
use tonlink_intent::{CommentValidation, TransferIntent};

use crate::connector::{
    MessagePayload, TransactionRequest, TransferMessage, WalletConnector,
};
use crate::error::{ErrorKind, TransactionOutcome};
use crate::payload::{boc_base64, comment_cell};

/// Seconds a signed request stays valid.
pub const TX_VALIDITY_SECS: u64 = 360;

/// Nanotons per TON.
const NANO_PER_TON: f64 = 1e9;

/// Parse a user-entered TON amount into nanotons.
///
/// Accepts decimal notation (`"1.5"`, `"10"`); rejects non-numeric,
/// non-finite, zero, and negative input.
pub fn to_nano(amount: &str) -> Option<u128> {
    let tons: f64 = amount.trim().parse().ok()?;
    if !tons.is_finite() || tons <= 0.0 {
        return None;
    }
    Some((tons * NANO_PER_TON).round() as u128)
}

/// Marshal a validated transfer into the wallet wire request.
///
/// Pure: the caller supplies the clock. Returns `None` only when the
/// comment cannot be encoded within the payload bound.
fn build_request(
    recipient: &ValidatedAddress,
    nano: u128,
    comment: &str,
    now_unix: u64,
) -> Option<TransactionRequest> {
    let payload = if comment.is_empty() {
        None
    } else if CommentValidation::validate(comment).is_valid() {
        Some(MessagePayload::Text(comment.to_string()))
    } else {
        let cell = comment_cell(comment).ok()?;
        Some(MessagePayload::Boc(boc_base64(&cell)))
    };

    Some(TransactionRequest {
        valid_until: now_unix + TX_VALIDITY_SECS,
        messages: vec![TransferMessage {
            address: recipient.canonical()?.to_string(),
            amount: nano.to_string(),
            payload,
        }],
    })
}

/// Submit a transfer intent through the connected wallet.
///
/// Precondition failures short-circuit to a classified [`TransactionOutcome`]
/// without touching the wallet; wallet-layer errors are remapped via
/// [`ErrorKind::from_connector`].
pub async fn submit<C: WalletConnector>(
    intent: &TransferIntent,
    connector: &C,
) -> TransactionOutcome {
    let Some(session) = connector.session() else {
        return TransactionOutcome::failed(
            ErrorKind::WalletNotConnected,
            "Connect a wallet before sending",
        );
    };

    if intent.is_empty() {
        return TransactionOutcome::failed(
            ErrorKind::DecodeAmbiguous,
            "No transfer details were found in the link",
        );
    }

    if intent.recipient.is_empty() {
        return TransactionOutcome::failed(
            ErrorKind::InvalidRecipient,
            "Recipient address is missing",
        );
    }
    let recipient = ValidatedAddress::validate(&intent.recipient);
    if !recipient.is_valid() {
        return TransactionOutcome::failed(
            ErrorKind::InvalidRecipient,
            format!("Not a TON address: {}", recipient.raw()),
        );
    }

    let Some(nano) = to_nano(&intent.amount) else {
        return TransactionOutcome::failed(
            ErrorKind::InvalidAmount,
            "Amount must be a positive number of TON",
        );
    };

    let now_unix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let Some(request) = build_request(&recipient, nano, &intent.comment, now_unix) else {
        return TransactionOutcome::failed(
            ErrorKind::InvalidCommentEncoding,
            "Comment is too large to attach",
        );
    };

    tracing::debug!(
        recipient = %request.messages[0].address,
        amount = %request.messages[0].amount,
        wallet = %session.address,
        "submitting transfer"
    );

    match connector.send_transaction(&request).await {
        Ok(reply) => {
            tracing::info!("transfer accepted by wallet");
            TransactionOutcome::Success {
                transaction_id: reply.boc,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "transfer rejected");
            TransactionOutcome::failed(ErrorKind::from_connector(&err), err.to_string())
        }
    }
}
