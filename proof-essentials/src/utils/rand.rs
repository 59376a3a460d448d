use ark_serialize::CanonicalSerialize;
use ark_std::marker::PhantomData;
use ark_std::rand::{Rng, RngCore, SeedableRng};
use ark_std::{UniformRand, Zero};
use digest::generic_array::GenericArray;
use digest::Digest;
use rand_chacha::ChaChaRng;

/// Draw uniformly until the sample is not the additive identity.
pub fn sample_nonzero<T: UniformRand + Zero, R: Rng + ?Sized>(rng: &mut R) -> T {
    loop {
        let sample = T::rand(rng);
        if !sample.is_zero() {
            return sample;
        }
    }
}

/// Deterministic public-coin generator used to derive Fiat-Shamir challenges.
///
/// Every absorbed item is folded into the running seed as
/// `seed = H(bytes || seed)`, where `bytes` is the compressed canonical
/// encoding of the item, after which the inner ChaCha stream is re-keyed with
/// the first 32 bytes of the new seed. Prover and verifier obtain the same
/// challenges iff they absorb the same items in the same order.
pub struct FiatShamirRng<D: Digest> {
    r: ChaChaRng,
    seed: GenericArray<u8, D::OutputSize>,
    #[doc(hidden)]
    digest: PhantomData<D>,
}

impl<D: Digest> RngCore for FiatShamirRng<D> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.r.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.r.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.r.fill_bytes(dest);
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), ark_std::rand::Error> {
        self.r.fill_bytes(dest);
        Ok(())
    }
}

impl<D: Digest> FiatShamirRng<D> {
    /// Create a new `Self` from a domain-separation seed: `self.seed = H(seed)`.
    #[inline]
    pub fn from_seed(seed: &[u8]) -> Self {
        let seed = D::digest(seed);
        let r = ChaChaRng::from_seed(Self::chacha_seed(&seed));
        Self {
            r,
            seed,
            digest: PhantomData,
        }
    }

    /// Refresh `self.seed` with the canonical encoding of `item`:
    /// `self.seed = H(item || self.seed)`.
    #[inline]
    pub fn absorb<T: CanonicalSerialize>(&mut self, item: &T) {
        let mut bytes = Vec::with_capacity(item.compressed_size() + self.seed.len());
        item.serialize_compressed(&mut bytes)
            .expect("serializing into a Vec cannot fail");
        self.reseed(bytes);
    }

    /// Refresh `self.seed` with a length-prefixed protocol label:
    /// `self.seed = H(u64_le(len) || label || self.seed)`.
    #[inline]
    pub fn absorb_label(&mut self, label: &[u8]) {
        let mut bytes = Vec::with_capacity(8 + label.len() + self.seed.len());
        bytes.extend_from_slice(&(label.len() as u64).to_le_bytes());
        bytes.extend_from_slice(label);
        self.reseed(bytes);
    }

    fn reseed(&mut self, mut bytes: Vec<u8>) {
        bytes.extend_from_slice(&self.seed);
        self.seed = D::digest(&bytes);
        self.r = ChaChaRng::from_seed(Self::chacha_seed(&self.seed));
    }

    fn chacha_seed(seed: &[u8]) -> [u8; 32] {
        let mut r_seed = [0u8; 32];
        for (dst, src) in r_seed.iter_mut().zip(seed.iter()) {
            *dst = *src;
        }
        r_seed
    }
}
