use super::{Ciphertext, Plaintext};

use ark_ec::{AffineRepr, CurveGroup};
use ark_std::ops::{Add, Mul, Neg, Sub};
use ark_std::{rand::Rng, UniformRand, Zero};

impl<C: CurveGroup> Add for Plaintext<C> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self((self.0.into_group() + rhs.0.into_group()).into_affine())
    }
}

impl<C: CurveGroup> Sub for Plaintext<C> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self((self.0.into_group() - rhs.0.into_group()).into_affine())
    }
}

impl<C: CurveGroup> Neg for Plaintext<C> {
    type Output = Self;

    fn neg(self) -> Self {
        Self((-self.0.into_group()).into_affine())
    }
}

impl<C: CurveGroup> Mul<C::ScalarField> for Plaintext<C> {
    type Output = Self;

    fn mul(self, x: C::ScalarField) -> Self {
        Self((self.0 * x).into_affine())
    }
}

impl<C: CurveGroup> Zero for Plaintext<C> {
    fn zero() -> Self {
        Self(C::Affine::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<C: CurveGroup> UniformRand for Plaintext<C> {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(C::rand(rng).into_affine())
    }
}

/// Component-wise group addition. Adding an encryption of the identity
/// re-randomizes a ciphertext without changing its plaintext.
impl<C: CurveGroup> Add for Ciphertext<C> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let c1 = self.0.into_group() + rhs.0.into_group();
        let c2 = self.1.into_group() + rhs.1.into_group();
        let normalized = C::normalize_batch(&[c1, c2]);
        Self(normalized[0], normalized[1])
    }
}

impl<C: CurveGroup> Sub for Ciphertext<C> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let c1 = self.0.into_group() - rhs.0.into_group();
        let c2 = self.1.into_group() - rhs.1.into_group();
        let normalized = C::normalize_batch(&[c1, c2]);
        Self(normalized[0], normalized[1])
    }
}

impl<C: CurveGroup> Mul<C::ScalarField> for Ciphertext<C> {
    type Output = Self;

    fn mul(self, x: C::ScalarField) -> Self {
        let normalized = C::normalize_batch(&[self.0 * x, self.1 * x]);
        Self(normalized[0], normalized[1])
    }
}

impl<C: CurveGroup> Zero for Ciphertext<C> {
    fn zero() -> Self {
        Self(C::Affine::zero(), C::Affine::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero() && self.1.is_zero()
    }
}

impl<C: CurveGroup> UniformRand for Ciphertext<C> {
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let c1 = C::rand(rng);
        let c2 = C::rand(rng);
        let normalized = C::normalize_batch(&[c1, c2]);
        Self(normalized[0], normalized[1])
    }
}
