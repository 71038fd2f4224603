//! State module for the counter client
//!
//! This module mirrors the account layout the on-chain counter program
//! reads and writes: a single little-endian `u32`, exactly
//! [`CounterAccount::LEN`] bytes. The Borsh derives keep the type aligned
//! with the program's own struct; the layout is pinned byte-for-byte by the
//! tests below.

use borsh::{BorshDeserialize, BorshSerialize};

use crate::errors::DecodingError;

/// The counter program's account state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CounterAccount {
    /// The current count value
    pub count: u32,
}

impl CounterAccount {
    /// Encoded size of a counter account in bytes
    pub const LEN: usize = 4;

    /// Create a counter state value
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    /// Bytes required to store one zero-valued record on the ledger
    ///
    /// Used as the `space` argument when creating the data account, so the
    /// account is allocated exactly as large as the program will write.
    pub const fn size_of_default() -> usize {
        Self::LEN
    }

    /// Serialize into the fixed 4-byte wire form
    pub fn pack(&self) -> [u8; Self::LEN] {
        self.count.to_le_bytes()
    }

    /// Deserialize from raw account data
    ///
    /// Bytes beyond the fourth are ignored, so a larger account slot with
    /// reserved space still decodes.
    ///
    /// # Arguments
    /// * `data` - Raw account data fetched from the ledger
    ///
    /// # Returns
    /// * `Result<Self, DecodingError>` - The decoded state, or
    ///   [`DecodingError::Truncated`] when fewer than [`Self::LEN`] bytes
    ///   are supplied
    pub fn unpack(data: &[u8]) -> Result<Self, DecodingError> {
        let truncated = DecodingError::Truncated {
            expected: Self::LEN,
            actual: data.len(),
        };
        let bytes = data.get(..Self::LEN).ok_or(truncated)?;
        Self::try_from_slice(bytes).map_err(|_| truncated)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn size_of_default_is_four() {
        assert_eq!(CounterAccount::size_of_default(), 4);
        assert_eq!(CounterAccount::default().pack().len(), 4);
    }

    #[test]
    fn pack_matches_borsh_layout() {
        let account = CounterAccount::new(0xDEAD_BEEF);
        let via_borsh = borsh::to_vec(&account).unwrap();
        assert_eq!(account.pack().as_slice(), via_borsh.as_slice());
    }

    #[test]
    fn packs_little_endian() {
        assert_eq!(CounterAccount::new(10).pack(), [0x0A, 0x00, 0x00, 0x00]);
        assert_eq!(
            CounterAccount::new(0x0102_0304).pack(),
            [0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn ignores_trailing_bytes() {
        let account = CounterAccount::unpack(&[0x2A, 0x00, 0x00, 0x00, 0xFF, 0xFF]).unwrap();
        assert_eq!(account.count, 42);
    }

    #[test]
    fn rejects_truncated_data() {
        assert_matches!(
            CounterAccount::unpack(&[0x00, 0x00]),
            Err(DecodingError::Truncated {
                expected: 4,
                actual: 2
            })
        );
        assert_matches!(
            CounterAccount::unpack(&[]),
            Err(DecodingError::Truncated {
                expected: 4,
                actual: 0
            })
        );
    }

    proptest! {
        #[test]
        fn round_trips(count: u32) {
            let account = CounterAccount::new(count);
            prop_assert_eq!(CounterAccount::unpack(&account.pack()), Ok(account));
        }
    }
}
