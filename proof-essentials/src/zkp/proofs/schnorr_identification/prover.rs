use super::proof::{absorb_transcript, Proof};
use super::{Parameters, Statement, Witness};

use crate::error::CryptoError;
use crate::utils::rand::{sample_nonzero, FiatShamirRng};

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_std::rand::Rng;
use ark_std::UniformRand;
use digest::Digest;

/// Commit to a nonce `k`, derive the challenge `c` from the transcript and
/// open with `k - c·w`.
pub fn prove<C: CurveGroup, R: Rng, D: Digest>(
    rng: &mut R,
    generator: &Parameters<C>,
    statement: &Statement<C>,
    witness: &Witness<C>,
    fs_rng: &mut FiatShamirRng<D>,
) -> Result<Proof<C>, CryptoError> {
    let nonce: C::ScalarField = sample_nonzero(rng);
    let random_commit = generator.mul_bigint(nonce.into_bigint()).into_affine();

    absorb_transcript::<C, D>(generator, statement, &random_commit, fs_rng);
    let challenge = C::ScalarField::rand(fs_rng);

    Ok(Proof {
        random_commit,
        opening: nonce - challenge * witness,
    })
}
