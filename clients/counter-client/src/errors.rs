//! Errors module for the counter client
//!
//! This module contains all error definitions used by the counter client.
//! Codec errors are split from transport errors so a caller can reject bad
//! input locally, before any network call is made.

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Errors raised while constructing an instruction for encoding
///
/// These are always local and recoverable: the offending value is rejected
/// before a transaction is built or sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The caller supplied an amount that does not fit in the `u32` field
    /// the on-chain program expects
    #[error("amount {amount} does not fit in an unsigned 32-bit field")]
    AmountOutOfRange {
        /// The rejected amount
        amount: u64,
    },
}

/// Errors raised while decoding bytes fetched from the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodingError {
    /// Fewer bytes were supplied than the fixed layout requires
    ///
    /// Indicates a corrupted account or one owned by a different program.
    #[error("data truncated: need at least {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes required by the fixed layout
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// The discriminant byte is not in the closed variant set
    ///
    /// Indicates a protocol or version mismatch with the deployed program.
    #[error("unknown instruction discriminant {0:#04x}")]
    UnknownVariant(u8),
}

/// Top-level error type for the RPC client wrapper
#[derive(Debug, Error)]
pub enum ClientError {
    /// A value was rejected before encoding
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Bytes fetched from the ledger did not decode
    #[error(transparent)]
    Decoding(#[from] DecodingError),

    /// The RPC request itself failed
    #[error("rpc request failed: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    /// The requested account does not exist on the cluster
    #[error("account {0} not found")]
    AccountNotFound(Pubkey),
}
