use crate::error::CryptoError;

use super::{Parameters, Statement};

use crate::utils::rand::FiatShamirRng;
use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Valid};
use ark_std::UniformRand;
use digest::Digest;

const LABEL: &[u8] = b"chaum_pedersen";

#[derive(Clone, Copy, Eq, Hash, PartialEq, Debug, CanonicalDeserialize, CanonicalSerialize)]
pub struct Proof<C>
where
    C: CurveGroup,
{
    pub(crate) a: C::Affine,
    pub(crate) b: C::Affine,
    pub(crate) r: C::ScalarField,
}

pub(crate) fn absorb_public_input<C: CurveGroup, D: Digest>(
    parameters: &Parameters<C>,
    statement: &Statement<C>,
    fs_rng: &mut FiatShamirRng<D>,
) {
    fs_rng.absorb_label(LABEL);
    fs_rng.absorb(&parameters.g);
    fs_rng.absorb(&parameters.h);
    fs_rng.absorb(&statement.0);
    fs_rng.absorb(&statement.1);
}

impl<C: CurveGroup> Proof<C> {
    pub fn verify<D: Digest>(
        &self,
        parameters: &Parameters<C>,
        statement: &Statement<C>,
        fs_rng: &mut FiatShamirRng<D>,
    ) -> Result<(), CryptoError> {
        for point in [
            &parameters.g,
            &parameters.h,
            &statement.0,
            &statement.1,
            &self.a,
            &self.b,
        ] {
            if point.check().is_err() {
                return Err(CryptoError::InvalidGroupElement(String::from(
                    "Chaum-Pedersen",
                )));
            }
        }

        absorb_public_input(parameters, statement, fs_rng);
        fs_rng.absorb(&self.a);
        fs_rng.absorb(&self.b);

        let c = C::ScalarField::rand(fs_rng);

        // r·g == a + c·x
        if parameters.g * self.r != self.a.into_group() + statement.0 * c {
            tracing::trace!("chaum-pedersen check against g failed");
            return Err(CryptoError::ProofVerificationError(String::from(
                "Chaum-Pedersen",
            )));
        }

        // r·h == b + c·y
        if parameters.h * self.r != self.b.into_group() + statement.1 * c {
            tracing::trace!("chaum-pedersen check against h failed");
            return Err(CryptoError::ProofVerificationError(String::from(
                "Chaum-Pedersen",
            )));
        }

        Ok(())
    }
}
