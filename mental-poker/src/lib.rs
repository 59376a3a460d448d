//! Barnett-Smart mental poker: cards are masked under a key shared by every
//! player and can only be read once each of them contributes a proven reveal
//! token. Shuffling is left to a verifiable-shuffle collaborator; this crate
//! covers encoding, key aggregation, (re)masking, reveal tokens and decoding.

use ark_std::rand::Rng;

pub mod classic;
pub mod config;
pub mod discrete_log_cards;
pub mod encoding;
pub mod error;
pub mod player;
pub mod reveal;

pub use error::{CardProtocolError, GameError};

/// Card masking protocol of Barnett and Smart (2003) over a DDH-hard group.
///
/// Implementations are stateless: parameters and the aggregate key are plain
/// values handed to every call, and every call that needs entropy takes the
/// randomness source explicitly.
pub trait BarnettSmartProtocol {
    type Scalar;
    type Parameters;
    type PlayerPublicKey;
    type PlayerSecretKey;
    type AggregatePublicKey;

    type Card;
    type MaskedCard;
    type RevealToken;

    type ZKProofKeyOwnership;
    type ZKProofMasking;
    type ZKProofRemasking;
    type ZKProofReveal;

    /// Derive the public parameters and card encoding for an `m × n` deck.
    /// The result only depends on `(m, n)`, so every player can recompute it.
    fn setup(m: usize, n: usize) -> Result<Self::Parameters, CardProtocolError>;

    fn player_keygen<R: Rng>(
        rng: &mut R,
        pp: &Self::Parameters,
    ) -> Result<(Self::PlayerPublicKey, Self::PlayerSecretKey), CardProtocolError>;

    /// Prove knowledge of the secret key behind `pk`, bound to `player_public_info`.
    fn prove_key_ownership<R: Rng>(
        rng: &mut R,
        pp: &Self::Parameters,
        pk: &Self::PlayerPublicKey,
        sk: &Self::PlayerSecretKey,
        player_public_info: &[u8],
    ) -> Result<Self::ZKProofKeyOwnership, CardProtocolError>;

    fn verify_key_ownership(
        pp: &Self::Parameters,
        pk: &Self::PlayerPublicKey,
        player_public_info: &[u8],
        key_proof: &Self::ZKProofKeyOwnership,
    ) -> Result<(), CardProtocolError>;

    /// Verify every ownership proof and combine the keys into the joint masking key.
    fn compute_aggregate_key<B: AsRef<[u8]>>(
        pp: &Self::Parameters,
        player_keys_proof_info: &[(Self::PlayerPublicKey, Self::ZKProofKeyOwnership, B)],
    ) -> Result<Self::AggregatePublicKey, CardProtocolError>;

    /// Mask `original_card` with randomness `r`. The proof only hides `r`: it
    /// is stated over the card itself, so whoever verifies it must already
    /// know which card was masked, as with the public starting deck.
    fn mask<R: Rng>(
        rng: &mut R,
        pp: &Self::Parameters,
        shared_key: &Self::AggregatePublicKey,
        original_card: &Self::Card,
        r: &Self::Scalar,
    ) -> Result<(Self::MaskedCard, Self::ZKProofMasking), CardProtocolError>;

    /// Check a masking proof against the card it claims to mask. Fails for
    /// any other `card`, so this cannot vouch for a masking of a secret card.
    fn verify_mask(
        pp: &Self::Parameters,
        shared_key: &Self::AggregatePublicKey,
        card: &Self::Card,
        masked_card: &Self::MaskedCard,
        proof: &Self::ZKProofMasking,
    ) -> Result<(), CardProtocolError>;

    fn remask<R: Rng>(
        rng: &mut R,
        pp: &Self::Parameters,
        shared_key: &Self::AggregatePublicKey,
        original_masked: &Self::MaskedCard,
        alpha: &Self::Scalar,
    ) -> Result<(Self::MaskedCard, Self::ZKProofRemasking), CardProtocolError>;

    fn verify_remask(
        pp: &Self::Parameters,
        shared_key: &Self::AggregatePublicKey,
        original_masked: &Self::MaskedCard,
        remasked: &Self::MaskedCard,
        proof: &Self::ZKProofRemasking,
    ) -> Result<(), CardProtocolError>;

    fn compute_reveal_token<R: Rng>(
        rng: &mut R,
        pp: &Self::Parameters,
        sk: &Self::PlayerSecretKey,
        pk: &Self::PlayerPublicKey,
        masked_card: &Self::MaskedCard,
    ) -> Result<(Self::RevealToken, Self::ZKProofReveal), CardProtocolError>;

    fn verify_reveal_token(
        pp: &Self::Parameters,
        pk: &Self::PlayerPublicKey,
        reveal_token: &Self::RevealToken,
        masked_card: &Self::MaskedCard,
        proof: &Self::ZKProofReveal,
    ) -> Result<(), CardProtocolError>;

    /// Recover the encoded card from one verified token per key holder.
    fn unmask(
        pp: &Self::Parameters,
        shared_key: &Self::AggregatePublicKey,
        decryption_key: &[(Self::RevealToken, Self::ZKProofReveal, Self::PlayerPublicKey)],
        masked_card: &Self::MaskedCard,
    ) -> Result<Self::Card, CardProtocolError>;
}
