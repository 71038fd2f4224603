//! Instruction codec for the counter program
//!
//! The on-chain program accepts a two-variant Borsh enum. Its wire form is a
//! single discriminant byte followed by the variant's `u32` amount in
//! little-endian order, exactly [`CounterInstruction::PACKED_LEN`] bytes with
//! no trailing data. The variant set is closed against the deployed program:
//! a new variant cannot be added without redeploying it, so an unrecognized
//! discriminant is always an error, never a default.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use crate::errors::{DecodingError, EncodingError};

/// Discriminant byte for [`CounterInstruction::Increment`]
pub const TAG_INCREMENT: u8 = 0;

/// Discriminant byte for [`CounterInstruction::Decrement`]
pub const TAG_DECREMENT: u8 = 1;

/// An instruction understood by the counter program
///
/// Amounts are validated at construction: the constructors take a `u64` and
/// reject anything above `u32::MAX`, so a value the wire format cannot
/// represent never exists inside this type. The original encoder relied on
/// the serialization library's unspecified behavior here; the explicit check
/// is a deliberate improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterInstruction {
    /// Add `num1` to the stored count
    Increment {
        /// Amount to add
        num1: u32,
    },
    /// Subtract `num1` from the stored count
    Decrement {
        /// Amount to subtract
        num1: u32,
    },
}

impl CounterInstruction {
    /// Encoded size: one discriminant byte plus a little-endian `u32`
    pub const PACKED_LEN: usize = 5;

    /// Build an increment instruction, rejecting out-of-range amounts
    ///
    /// # Arguments
    /// * `amount` - Amount to add to the counter
    ///
    /// # Returns
    /// * `Result<Self, EncodingError>` - The instruction, or
    ///   [`EncodingError::AmountOutOfRange`] if `amount` exceeds `u32::MAX`
    pub fn increment(amount: u64) -> Result<Self, EncodingError> {
        Ok(Self::Increment {
            num1: checked_amount(amount)?,
        })
    }

    /// Build a decrement instruction, rejecting out-of-range amounts
    ///
    /// # Arguments
    /// * `amount` - Amount to subtract from the counter
    ///
    /// # Returns
    /// * `Result<Self, EncodingError>` - The instruction, or
    ///   [`EncodingError::AmountOutOfRange`] if `amount` exceeds `u32::MAX`
    pub fn decrement(amount: u64) -> Result<Self, EncodingError> {
        Ok(Self::Decrement {
            num1: checked_amount(amount)?,
        })
    }

    /// The amount carried by either variant
    pub fn amount(&self) -> u32 {
        match *self {
            Self::Increment { num1 } | Self::Decrement { num1 } => num1,
        }
    }

    /// Serialize into the fixed 5-byte wire form
    ///
    /// Deterministic and pure. Infallible: the range check already happened
    /// at construction and the `u32` field cannot hold an unencodable value.
    pub fn pack(&self) -> [u8; Self::PACKED_LEN] {
        let (tag, num1) = match *self {
            Self::Increment { num1 } => (TAG_INCREMENT, num1),
            Self::Decrement { num1 } => (TAG_DECREMENT, num1),
        };
        let mut data = [0u8; Self::PACKED_LEN];
        data[0] = tag;
        data[1..].copy_from_slice(&num1.to_le_bytes());
        data
    }

    /// Deserialize from the wire form
    ///
    /// # Arguments
    /// * `input` - At least [`Self::PACKED_LEN`] bytes; the discriminant
    ///   first, then the little-endian amount
    ///
    /// # Returns
    /// * `Result<Self, DecodingError>` - The decoded instruction,
    ///   [`DecodingError::Truncated`] when fewer than 5 bytes are supplied,
    ///   or [`DecodingError::UnknownVariant`] for a discriminant outside the
    ///   closed set
    pub fn unpack(input: &[u8]) -> Result<Self, DecodingError> {
        let truncated = DecodingError::Truncated {
            expected: Self::PACKED_LEN,
            actual: input.len(),
        };
        let (&tag, rest) = input.split_first().ok_or(truncated)?;
        let amount_bytes: [u8; 4] = rest
            .get(..4)
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(truncated)?;
        let num1 = u32::from_le_bytes(amount_bytes);

        match tag {
            TAG_INCREMENT => Ok(Self::Increment { num1 }),
            TAG_DECREMENT => Ok(Self::Decrement { num1 }),
            other => Err(DecodingError::UnknownVariant(other)),
        }
    }

    /// Build the Solana instruction carrying this operation
    ///
    /// The counter program takes a single account: the writable data account
    /// holding the count. It does not need to sign.
    ///
    /// # Arguments
    /// * `program_id` - The deployed counter program
    /// * `counter_account` - The data account to mutate
    pub fn build_instruction(&self, program_id: &Pubkey, counter_account: &Pubkey) -> Instruction {
        Instruction {
            program_id: *program_id,
            accounts: vec![AccountMeta::new(*counter_account, false)],
            data: self.pack().to_vec(),
        }
    }
}

fn checked_amount(amount: u64) -> Result<u32, EncodingError> {
    u32::try_from(amount).map_err(|_| EncodingError::AmountOutOfRange { amount })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn packs_increment_zero() {
        let instruction = CounterInstruction::increment(0).unwrap();
        assert_eq!(instruction.pack(), [0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn packs_decrement_ten() {
        let instruction = CounterInstruction::decrement(10).unwrap();
        assert_eq!(instruction.pack(), [0x01, 0x0A, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn unpacks_decrement_ten() {
        let instruction = CounterInstruction::unpack(&[0x01, 0x0A, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(instruction, CounterInstruction::Decrement { num1: 10 });
    }

    #[test]
    fn rejects_truncated_input() {
        assert_matches!(
            CounterInstruction::unpack(&[]),
            Err(DecodingError::Truncated {
                expected: 5,
                actual: 0
            })
        );
        assert_matches!(
            CounterInstruction::unpack(&[0x00, 0x00]),
            Err(DecodingError::Truncated {
                expected: 5,
                actual: 2
            })
        );
    }

    #[test]
    fn rejects_unknown_discriminant() {
        assert_matches!(
            CounterInstruction::unpack(&[0x02, 0x00, 0x00, 0x00, 0x00]),
            Err(DecodingError::UnknownVariant(0x02))
        );
    }

    #[test]
    fn rejects_amount_above_u32() {
        let amount = u64::from(u32::MAX) + 1;
        assert_matches!(
            CounterInstruction::increment(amount),
            Err(EncodingError::AmountOutOfRange { amount: a }) if a == amount
        );
        assert_matches!(
            CounterInstruction::decrement(u64::MAX),
            Err(EncodingError::AmountOutOfRange { amount: u64::MAX })
        );
    }

    #[test]
    fn accepts_u32_max() {
        let instruction = CounterInstruction::increment(u64::from(u32::MAX)).unwrap();
        assert_eq!(instruction.amount(), u32::MAX);
    }

    #[test]
    fn builds_single_writable_account_instruction() {
        let program_id = Pubkey::new_unique();
        let counter_account = Pubkey::new_unique();
        let instruction = CounterInstruction::Increment { num1: 7 }
            .build_instruction(&program_id, &counter_account);

        assert_eq!(instruction.program_id, program_id);
        assert_eq!(instruction.data, vec![0x00, 0x07, 0x00, 0x00, 0x00]);
        assert_eq!(instruction.accounts.len(), 1);
        assert_eq!(instruction.accounts[0].pubkey, counter_account);
        assert!(instruction.accounts[0].is_writable);
        assert!(!instruction.accounts[0].is_signer);
    }

    proptest! {
        #[test]
        fn round_trips_increment(num1: u32) {
            let instruction = CounterInstruction::Increment { num1 };
            prop_assert_eq!(CounterInstruction::unpack(&instruction.pack()), Ok(instruction));
        }

        #[test]
        fn round_trips_decrement(num1: u32) {
            let instruction = CounterInstruction::Decrement { num1 };
            prop_assert_eq!(CounterInstruction::unpack(&instruction.pack()), Ok(instruction));
        }

        #[test]
        fn constructors_match_u32_range(amount: u64) {
            let result = CounterInstruction::increment(amount);
            if amount <= u64::from(u32::MAX) {
                prop_assert_eq!(result.unwrap().amount() as u64, amount);
            } else {
                prop_assert_eq!(result, Err(EncodingError::AmountOutOfRange { amount }));
            }
        }
    }
}
