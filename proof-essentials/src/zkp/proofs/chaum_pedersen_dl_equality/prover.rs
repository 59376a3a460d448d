use super::proof::{absorb_public_input, Proof};
use super::{Parameters, Statement, Witness};

use crate::error::CryptoError;
use crate::utils::rand::{sample_nonzero, FiatShamirRng};

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_std::rand::Rng;
use ark_std::UniformRand;
use digest::Digest;

/// Commit to the same nonce under both bases, `(a, b) = (ω·g, ω·h)`, and
/// respond with `r = ω + c·w`.
pub fn prove<C: CurveGroup, R: Rng, D: Digest>(
    rng: &mut R,
    parameters: &Parameters<C>,
    statement: &Statement<C>,
    witness: &Witness<C>,
    fs_rng: &mut FiatShamirRng<D>,
) -> Result<Proof<C>, CryptoError> {
    absorb_public_input(parameters, statement, fs_rng);

    // one nonce per proof, never reused
    let omega: C::ScalarField = sample_nonzero(rng);
    let commitments = C::normalize_batch(&[
        parameters.g.mul_bigint(omega.into_bigint()),
        parameters.h.mul_bigint(omega.into_bigint()),
    ]);
    let (a, b) = (commitments[0], commitments[1]);

    fs_rng.absorb(&a);
    fs_rng.absorb(&b);
    let c = C::ScalarField::rand(fs_rng);

    Ok(Proof {
        a,
        b,
        r: omega + c * witness,
    })
}
