pub mod proofs;

use crate::error::CryptoError;
use crate::utils::rand::FiatShamirRng;

use ark_std::rand::Rng;
use digest::Digest;

/// A non-interactive argument made sound by the Fiat-Shamir transform.
///
/// `prove` and `verify` must be handed `FiatShamirRng`s in the same state
/// (same seed, same prior absorptions) for an honest proof to verify.
pub trait ArgumentOfKnowledge {
    type CommonReferenceString;
    type Statement;
    type Witness;
    type Proof;

    fn prove<R: Rng, D: Digest>(
        rng: &mut R,
        common_reference_string: &Self::CommonReferenceString,
        statement: &Self::Statement,
        witness: &Self::Witness,
        fs_rng: &mut FiatShamirRng<D>,
    ) -> Result<Self::Proof, CryptoError>;

    fn verify<D: Digest>(
        common_reference_string: &Self::CommonReferenceString,
        statement: &Self::Statement,
        proof: &Self::Proof,
        fs_rng: &mut FiatShamirRng<D>,
    ) -> Result<(), CryptoError>;
}
