use proof_essentials::error::CryptoError;
use thiserror::Error;

/// Failures of the card protocol. Verification failures carry the name of
/// the player at fault so the surrounding game can exclude them.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CardProtocolError {
    #[error("Cannot build a deck of {suits} x {ranks} cards")]
    InvalidDimension { suits: usize, ranks: usize },

    #[error("Invalid {0} proof")]
    InvalidProof(&'static str),

    #[error("Player {player} failed to prove ownership of their key")]
    InvalidKeyOwnership { player: String },

    #[error("Player {player} published a key that is already in the game")]
    DuplicatePlayerKey { player: String },

    #[error("No player keys to aggregate")]
    EmptyPlayerSet,

    #[error("Invalid reveal token from player {player} for card {card}")]
    InvalidRevealToken { player: String, card: String },

    #[error("Masked card {card} has an identity first component and cannot be revealed")]
    DegenerateMaskedCard { card: String },

    #[error("Expected reveal tokens from {expected} players, got {received} (missing: {missing:?})")]
    IncompleteRevealSet {
        expected: usize,
        received: usize,
        missing: Vec<String>,
    },

    #[error("Unmasked element is not an encoded card")]
    UnknownCardElement,

    #[error("Card {0} has no playing-card mapping")]
    UnmappedCard(usize),

    #[error("Player has no secret key")]
    SecretKeyMissing,

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("No such card in hand")]
    CardNotFound,
}
