use super::{Parameters, Statement};
use crate::error::CryptoError;

use crate::utils::rand::FiatShamirRng;
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Valid};
use ark_std::UniformRand;
use digest::Digest;

const LABEL: &[u8] = b"schnorr_identity";

#[derive(Copy, Clone, CanonicalDeserialize, CanonicalSerialize, Debug, PartialEq, Eq)]
pub struct Proof<C>
where
    C: CurveGroup,
{
    pub(crate) random_commit: C::Affine,
    pub(crate) opening: C::ScalarField,
}

pub(crate) fn absorb_transcript<C: CurveGroup, D: Digest>(
    pp: &Parameters<C>,
    statement: &Statement<C>,
    random_commit: &C::Affine,
    fs_rng: &mut FiatShamirRng<D>,
) {
    fs_rng.absorb_label(LABEL);
    fs_rng.absorb(pp);
    fs_rng.absorb(statement);
    fs_rng.absorb(random_commit);
}

impl<C: CurveGroup> Proof<C> {
    pub fn verify<D: Digest>(
        &self,
        pp: &Parameters<C>,
        statement: &Statement<C>,
        fs_rng: &mut FiatShamirRng<D>,
    ) -> Result<(), CryptoError> {
        if pp.check().is_err() || statement.check().is_err() || self.random_commit.check().is_err()
        {
            return Err(CryptoError::InvalidGroupElement(String::from(
                "Schnorr Identification",
            )));
        }

        absorb_transcript::<C, D>(pp, statement, &self.random_commit, fs_rng);

        let c = C::ScalarField::rand(fs_rng);

        // opening·g + c·pk == random_commit
        if *pp * self.opening + *statement * c != self.random_commit.into_group() {
            return Err(CryptoError::ProofVerificationError(String::from(
                "Schnorr Identification",
            )));
        }

        Ok(())
    }
}
