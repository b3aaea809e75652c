//! Wallet-connect channel.
//!
//! [`WalletConnector`] is the seam between the transfer logic and the
//! wallet bridge. The production implementation lives at the embedding
//! boundary; tests use an in-memory mock.

use serde::{Deserialize, Serialize};

use crate::error::ConnectorError;

/// TON network selector, in wallet-connect chain-id form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    /// Mainnet, chain id `-239`.
    #[serde(rename = "-239")]
    Mainnet,
    /// Testnet, chain id `-3`.
    #[serde(rename = "-3")]
    Testnet,
}

impl Network {
    /// The wire chain id.
    pub fn chain_id(&self) -> &'static str {
        match self {
            Network::Mainnet => "-239",
            Network::Testnet => "-3",
        }
    }
}

/// An established wallet connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSession {
    /// Connected account address, raw form.
    pub address: String,
    /// Network the wallet is on.
    pub network: Network,
}

/// Payload of a single transfer message.
///
/// Link-safe comments ride as plain text; anything else is a
/// base64-encoded comment cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessagePayload {
    /// Plain-text comment, attached verbatim by the wallet.
    Text(String),
    /// Base64 Bag of Cells carrying the comment cell.
    Boc(String),
}

/// One outgoing message of a transaction request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferMessage {
    /// Destination address.
    pub address: String,
    /// Amount in nanotons, decimal string.
    pub amount: String,
    /// Optional comment payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<MessagePayload>,
}

/// A transaction request handed to the wallet for signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// Unix deadline after which the wallet must refuse to sign.
    pub valid_until: u64,
    pub messages: Vec<TransferMessage>,
}

/// Wallet's answer to an approved transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReply {
    /// The signed external message, base64 BoC.
    pub boc: String,
}

/// Bridge to a wallet-connect implementation.
pub trait WalletConnector {
    /// The current session, if a wallet is connected.
    fn session(&self) -> Option<&WalletSession>;

    /// Open the wallet connection flow.
    fn connect(&mut self) -> impl std::future::Future<Output = Result<WalletSession, ConnectorError>> + Send;

    /// Tear down the current session.
    fn disconnect(&mut self) -> impl std::future::Future<Output = ()> + Send;

    /// Hand a transaction to the wallet for user approval and signing.
    fn send_transaction(
        &self,
        request: &TransactionRequest,
    ) -> impl std::future::Future<Output = Result<TransactionReply, ConnectorError>> + Send;
}
