//! # Counter Client
//!
//! Client-side library for a minimal on-chain counter program. The program
//! stores a single little-endian `u32` per data account and accepts two
//! instructions, increment and decrement, each carrying a `u32` amount.
//!
//! This crate owns the byte-for-byte encoding of both formats (the deployed
//! program decodes raw bytes with no tolerance for drift), the construction
//! of the transaction instruction that carries them, and a thin blocking RPC
//! wrapper for submitting transactions and inspecting program accounts.

use solana_sdk::declare_id;

// Module declarations
pub mod client;
pub mod errors;
pub mod instruction;
pub mod state;

// Re-export for easier access
pub use client::*;
pub use errors::*;
pub use instruction::*;
pub use state::*;

// Program ID - This should be updated when the counter program is redeployed
declare_id!("9aN1KaEMbCcTbJrbjuzhZRkfwtnMibPdga8agbuFtm85");
