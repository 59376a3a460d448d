//! Deck dimensioning and the fixed Fiat-Shamir domain labels.
//!
//! Every party must derive its parameters from the same `DeckDimensions` and
//! seed every transcript with the same label; a mismatch on either side makes
//! honest proofs fail to verify.

use crate::error::CardProtocolError;

use serde::{Deserialize, Serialize};

/// Largest deck the encoding table is allowed to enumerate.
pub const MAX_DECK_SIZE: usize = 1 << 16;

pub const SETUP_DOMAIN: &[u8] = b"mental-poker/v1/setup";
pub const KEY_OWNERSHIP_DOMAIN: &[u8] = b"mental-poker/v1/key-ownership";
pub const MASKING_DOMAIN: &[u8] = b"mental-poker/v1/mask";
pub const REMASKING_DOMAIN: &[u8] = b"mental-poker/v1/remask";
pub const REVEAL_DOMAIN: &[u8] = b"mental-poker/v1/reveal";

/// `suits × ranks` layout of a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckDimensions {
    pub suits: usize,
    pub ranks: usize,
}

impl DeckDimensions {
    pub const STANDARD: Self = Self {
        suits: 4,
        ranks: 13,
    };

    pub fn new(suits: usize, ranks: usize) -> Result<Self, CardProtocolError> {
        let dimensions = Self { suits, ranks };
        dimensions.validate()?;
        Ok(dimensions)
    }

    pub fn validate(&self) -> Result<(), CardProtocolError> {
        match self.suits.checked_mul(self.ranks) {
            Some(size) if size > 0 && size <= MAX_DECK_SIZE => Ok(()),
            _ => Err(CardProtocolError::InvalidDimension {
                suits: self.suits,
                ranks: self.ranks,
            }),
        }
    }

    /// Number of cards; only meaningful after `validate`.
    pub fn deck_size(&self) -> usize {
        self.suits * self.ranks
    }
}

impl Default for DeckDimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_oversized_decks() {
        assert!(DeckDimensions::new(0, 13).is_err());
        assert!(DeckDimensions::new(4, 0).is_err());
        assert!(DeckDimensions::new(usize::MAX, 2).is_err());
        assert!(DeckDimensions::new(MAX_DECK_SIZE, 2).is_err());
        assert_eq!(DeckDimensions::new(4, 13).unwrap().deck_size(), 52);
    }

    #[test]
    fn loads_from_json() {
        let dimensions: DeckDimensions =
            serde_json::from_str(r#"{ "suits": 2, "ranks": 26 }"#).unwrap();
        assert!(dimensions.validate().is_ok());
        assert_eq!(dimensions.deck_size(), 52);

        let broken: DeckDimensions = serde_json::from_str(r#"{ "suits": 0, "ranks": 52 }"#).unwrap();
        assert_eq!(
            broken.validate(),
            Err(CardProtocolError::InvalidDimension { suits: 0, ranks: 52 })
        );
    }
}
