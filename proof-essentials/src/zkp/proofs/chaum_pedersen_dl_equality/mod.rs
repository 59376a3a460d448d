//! Chaum-Pedersen argument that `log_g(x) == log_h(y)` for a statement `(x, y)`.

pub mod proof;
pub mod prover;

use crate::error::CryptoError;
use crate::utils::rand::FiatShamirRng;
use crate::zkp::ArgumentOfKnowledge;

use ark_ec::CurveGroup;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::marker::PhantomData;
use ark_std::rand::Rng;
use digest::Digest;

pub struct DLEquality<C: CurveGroup> {
    _group: PhantomData<C>,
}

/// The two bases `g` and `h`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Parameters<C: CurveGroup> {
    pub g: C::Affine,
    pub h: C::Affine,
}

impl<C: CurveGroup> Parameters<C> {
    pub fn new(g: &C::Affine, h: &C::Affine) -> Self {
        Self { g: *g, h: *h }
    }
}

/// `(x, y) = (w·g, w·h)` for the secret witness `w`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Statement<C: CurveGroup>(pub C::Affine, pub C::Affine);

impl<C: CurveGroup> Statement<C> {
    pub fn new(x: &C::Affine, y: &C::Affine) -> Self {
        Self(*x, *y)
    }
}

pub type Witness<C> = <C as ark_ec::Group>::ScalarField;

impl<C: CurveGroup> ArgumentOfKnowledge for DLEquality<C> {
    type CommonReferenceString = Parameters<C>;
    type Statement = Statement<C>;
    type Witness = Witness<C>;
    type Proof = proof::Proof<C>;

    fn prove<R: Rng, D: Digest>(
        rng: &mut R,
        common_reference_string: &Self::CommonReferenceString,
        statement: &Self::Statement,
        witness: &Self::Witness,
        fs_rng: &mut FiatShamirRng<D>,
    ) -> Result<Self::Proof, CryptoError> {
        prover::prove::<C, R, D>(rng, common_reference_string, statement, witness, fs_rng)
    }

    fn verify<D: Digest>(
        common_reference_string: &Self::CommonReferenceString,
        statement: &Self::Statement,
        proof: &Self::Proof,
        fs_rng: &mut FiatShamirRng<D>,
    ) -> Result<(), CryptoError> {
        proof.verify(common_reference_string, statement, fs_rng)
    }
}
