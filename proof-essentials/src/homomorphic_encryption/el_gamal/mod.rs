use crate::error::CryptoError;
use crate::homomorphic_encryption::HomomorphicEncryptionScheme;
use crate::utils::rand::sample_nonzero;

use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Valid};
use ark_std::hash::Hash;
use ark_std::{marker::PhantomData, rand::Rng};

pub mod arithmetic;

#[derive(Clone)]
pub struct ElGamal<C: CurveGroup> {
    _group: PhantomData<C>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Parameters<C: CurveGroup> {
    pub generator: C::Affine,
}

pub type PublicKey<C> = <C as CurveGroup>::Affine;

pub type SecretKey<C> = <C as Group>::ScalarField;

#[derive(Clone, Copy, Eq, Hash, PartialEq, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct Plaintext<C: CurveGroup>(pub C::Affine);

/// `(c1, c2) = (r·G, m + r·pk)`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct Ciphertext<C: CurveGroup>(pub C::Affine, pub C::Affine);

impl<C: CurveGroup> Ciphertext<C> {
    /// A ciphertext whose first component is the identity was produced with
    /// zero randomness and hides nothing.
    pub fn is_degenerate(&self) -> bool {
        self.0.is_zero()
    }

    /// Rejects components that are off the curve or outside the prime-order subgroup.
    pub fn check_components(&self) -> Result<(), CryptoError> {
        self.0
            .check()
            .and_then(|_| self.1.check())
            .map_err(|_| CryptoError::InvalidGroupElement(String::from("ElGamal ciphertext")))
    }
}

impl<C: CurveGroup> HomomorphicEncryptionScheme<C::ScalarField> for ElGamal<C> {
    type Parameters = Parameters<C>;
    type PublicKey = PublicKey<C>;
    type SecretKey = SecretKey<C>;
    type Plaintext = Plaintext<C>;
    type Ciphertext = Ciphertext<C>;

    fn setup<R: Rng>(rng: &mut R) -> Result<Self::Parameters, CryptoError> {
        let generator: C = sample_nonzero(rng);

        Ok(Parameters {
            generator: generator.into_affine(),
        })
    }

    fn keygen<R: Rng>(
        pp: &Self::Parameters,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey), CryptoError> {
        let secret_key: C::ScalarField = sample_nonzero(rng);
        let public_key = pp.generator.mul_bigint(secret_key.into_bigint()).into_affine();

        Ok((public_key, secret_key))
    }

    fn encrypt(
        pp: &Self::Parameters,
        pk: &Self::PublicKey,
        message: &Self::Plaintext,
        r: &C::ScalarField,
    ) -> Result<Self::Ciphertext, CryptoError> {
        let shared = pk.mul_bigint(r.into_bigint());
        let c1 = pp.generator.mul_bigint(r.into_bigint()).into_affine();
        let c2 = (message.0.into_group() + shared).into_affine();

        Ok(Ciphertext(c1, c2))
    }

    fn decrypt(
        _pp: &Self::Parameters,
        sk: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::Plaintext, CryptoError> {
        let shared = ciphertext.0.mul_bigint(sk.into_bigint());
        let m = ciphertext.1.into_group() - shared;

        Ok(Plaintext(m.into_affine()))
    }
}
