use crate::error::CryptoError;

use ark_ff::Field;
use ark_std::rand::Rng;

pub mod el_gamal;

/// An additively homomorphic public-key encryption scheme over a field of scalars.
pub trait HomomorphicEncryptionScheme<Scalar: Field> {
    type Parameters;
    type PublicKey;
    type SecretKey;
    type Plaintext;
    type Ciphertext;

    fn setup<R: Rng>(rng: &mut R) -> Result<Self::Parameters, CryptoError>;

    fn keygen<R: Rng>(
        pp: &Self::Parameters,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey), CryptoError>;

    /// Encrypt `message` under `pk` using the caller-supplied randomness `r`.
    fn encrypt(
        pp: &Self::Parameters,
        pk: &Self::PublicKey,
        message: &Self::Plaintext,
        r: &Scalar,
    ) -> Result<Self::Ciphertext, CryptoError>;

    fn decrypt(
        pp: &Self::Parameters,
        sk: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<Self::Plaintext, CryptoError>;
}
