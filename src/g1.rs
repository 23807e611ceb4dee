//! `G1`: the short Weierstrass curve `y^2 = x^3 + 4` over `Fp`.
//!
//! Complete addition and doubling use the exception-free formulas
//! (Algorithms 7 and 9) of Renes, Costello and Batina, "Complete addition
//! formulas for prime order elliptic curves", <https://eprint.iacr.org/2015/1060>
//! — the same reference the teacher workspace's `primeorder` crate cites for
//! its generic short-Weierstrass point arithmetic.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::fp::Fp;
use crate::fr::Scalar;

/// `3*b` for `b = 4`, pre-multiplied so the addition/doubling formulas can
/// use a single `Fp` multiplication instead of three additions each time.
fn mul_by_3b(x: Fp) -> Fp {
    x * Fp::from_u64(12)
}

/// A point in affine coordinates, or the point at infinity.
#[derive(Copy, Clone, Debug)]
pub struct G1Affine {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    pub(crate) infinity: Choice,
}

impl ConditionallySelectable for G1Affine {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G1Affine {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl ConstantTimeEq for G1Affine {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | (!self.infinity & !other.infinity & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y))
    }
}

impl PartialEq for G1Affine {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}
impl Eq for G1Affine {}

impl G1Affine {
    pub fn identity() -> G1Affine {
        G1Affine {
            x: Fp::zero(),
            y: Fp::one(),
            infinity: Choice::from(1u8),
        }
    }

    /// The standard BLS12-381 `G1` generator.
    pub fn generator() -> G1Affine {
        G1Affine {
            x: Fp::from_raw_unchecked([
                0x5cb3_8790_fd53_0c16,
                0x7817_fc67_9976_fff5,
                0x154f_95c7_143b_a1c1,
                0xf0ae_6acd_f3d0_e747,
                0xedce_6ecc_21db_f440,
                0x1201_7741_9e0b_fb75,
            ]),
            y: Fp::from_raw_unchecked([
                0xbaac_93d5_0ce7_2271,
                0x8c22_631a_7918_fd8e,
                0xdd59_5f13_5707_25ce,
                0x51ac_5829_5040_5194,
                0x0e1c_8c3f_ad00_59c0,
                0x0bbc_3efc_5008_a26a,
            ]),
            infinity: Choice::from(0u8),
        }
    }

    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    pub fn neg(&self) -> G1Affine {
        G1Affine {
            x: self.x,
            y: Fp::conditional_select(&-self.y, &Fp::one(), self.infinity),
            infinity: self.infinity,
        }
    }

    pub fn to_curve(&self) -> G1Projective {
        G1Projective {
            x: self.x,
            y: self.y,
            z: Fp::conditional_select(&Fp::one(), &Fp::zero(), self.infinity),
        }
    }

    pub(crate) fn from_raw_parts(x: Fp, y: Fp, infinity: Choice) -> G1Affine {
        G1Affine { x, y, infinity }
    }

    pub(crate) fn x(&self) -> Fp {
        self.x
    }

    pub(crate) fn y(&self) -> Fp {
        self.y
    }
}

/// A point in homogeneous projective coordinates `(X, Y, Z)`. The identity
/// is any point with `Z = 0`.
#[derive(Copy, Clone, Debug)]
pub struct G1Projective {
    pub(crate) x: Fp,
    pub(crate) y: Fp,
    pub(crate) z: Fp,
}

impl ConditionallySelectable for G1Projective {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G1Projective {
            x: Fp::conditional_select(&a.x, &b.x, choice),
            y: Fp::conditional_select(&a.y, &b.y, choice),
            z: Fp::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl From<G1Affine> for G1Projective {
    fn from(p: G1Affine) -> G1Projective {
        p.to_curve()
    }
}

impl G1Projective {
    pub fn identity() -> G1Projective {
        G1Projective {
            x: Fp::zero(),
            y: Fp::one(),
            z: Fp::zero(),
        }
    }

    pub fn generator() -> G1Projective {
        G1Affine::generator().to_curve()
    }

    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    pub fn to_affine(&self) -> G1Affine {
        let zinv = self.z.invert();
        let is_zero = zinv.is_none();
        let zinv = zinv.unwrap_or(Fp::zero());
        let x = self.x * zinv;
        let y = self.y * zinv;

        let identity = G1Affine::identity();
        G1Affine {
            x: Fp::conditional_select(&x, &identity.x, is_zero),
            y: Fp::conditional_select(&y, &identity.y, is_zero),
            infinity: is_zero,
        }
    }

    /// Complete addition (Algorithm 7, eprint 2015/1060).
    pub fn add(&self, rhs: &G1Projective) -> G1Projective {
        let t0 = self.x * rhs.x;
        let t1 = self.y * rhs.y;
        let t2 = self.z * rhs.z;
        let t3 = self.x + self.y;
        let t4 = rhs.x + rhs.y;
        let t3 = t3 * t4;
        let t4 = t0 + t1;
        let t3 = t3 - t4;
        let t4 = self.y + self.z;
        let x3 = rhs.y + rhs.z;
        let t4 = t4 * x3;
        let x3 = t1 + t2;
        let t4 = t4 - x3;
        let x3 = self.x + self.z;
        let y3 = rhs.x + rhs.z;
        let x3 = x3 * y3;
        let y3 = t0 + t2;
        let y3 = x3 - y3;
        let x3 = t0 + t0;
        let t0 = x3 + t0;
        let t2 = mul_by_3b(t2);
        let z3 = t1 + t2;
        let t1 = t1 - t2;
        let y3 = mul_by_3b(y3);
        let x3 = t4 * y3;
        let t2 = t3 * t1;
        let x3 = t2 - x3;
        let y3 = y3 * t0;
        let t1 = t1 * z3;
        let y3 = t1 + y3;
        let t0 = t0 * t3;
        let z3 = z3 * t4;
        let z3 = z3 + t0;

        G1Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn add_mixed(&self, rhs: &G1Affine) -> G1Projective {
        self.add(&rhs.to_curve())
    }

    /// Exception-free doubling (Algorithm 9, eprint 2015/1060).
    pub fn double(&self) -> G1Projective {
        let t0 = self.y.square();
        let z3 = t0 + t0;
        let z3 = z3 + z3;
        let z3 = z3 + z3;
        let t1 = self.y * self.z;
        let t2 = self.z.square();
        let t2 = mul_by_3b(t2);
        let x3 = t2 * z3;
        let y3 = t0 + t2;
        let z3 = t1 * z3;
        let t1 = t2 + t2;
        let t2 = t1 + t2;
        let t0 = t0 - t2;
        let y3 = t0 * y3;
        let y3 = x3 + y3;
        let t1 = self.x * self.y;
        let x3 = t0 * t1;
        let x3 = x3 + x3;

        G1Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn neg(&self) -> G1Projective {
        G1Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    pub fn sub(&self, rhs: &G1Projective) -> G1Projective {
        self.add(&rhs.neg())
    }

    /// Double-and-add scalar multiplication, high to low over the 32-byte
    /// little-endian scalar. The top bit of the top limb is always zero
    /// for a valid `Fr` element and is skipped.
    pub fn mul(&self, scalar: &Scalar) -> G1Projective {
        self.mul_bytes(&scalar.to_bytes())
    }

    /// Double-and-add over an explicit little-endian byte schedule. Split
    /// out from [`Self::mul`] so tests can exercise small, hand-written
    /// scalars without round-tripping them through `Fr`'s Montgomery form.
    pub(crate) fn mul_bytes(&self, bytes: &[u8; 32]) -> G1Projective {
        let mut acc = G1Projective::identity();

        for (byte_idx, byte) in bytes.iter().enumerate().rev() {
            let bit_range: core::ops::Range<u32> = if byte_idx == 31 { 0..7 } else { 0..8 };
            for bit in bit_range.rev() {
                acc = acc.double();
                if ((byte >> bit) & 1) == 1 {
                    acc = acc.add(self);
                }
            }
        }

        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_identity() {
        assert!(bool::from(G1Projective::identity().is_identity()));
        assert!(bool::from(G1Affine::identity().is_identity()));
    }

    #[test]
    fn add_identity_is_noop() {
        let g = G1Projective::generator();
        let sum = g.add(&G1Projective::identity());
        assert_eq!(sum.to_affine(), g.to_affine());
    }

    #[test]
    fn double_eq_add_self() {
        let g = G1Projective::generator();
        assert_eq!(g.double().to_affine(), g.add(&g).to_affine());
    }

    #[test]
    fn add_commutative() {
        let g = G1Projective::generator();
        let h = g.double();
        assert_eq!(g.add(&h).to_affine(), h.add(&g).to_affine());
    }

    #[test]
    fn scalar_mul_small_n() {
        let g = G1Projective::generator();

        let zero = [0u8; 32];
        assert_eq!(
            g.mul_bytes(&zero).to_affine(),
            G1Projective::identity().to_affine()
        );

        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(g.mul_bytes(&one).to_affine(), g.to_affine());

        let mut two = [0u8; 32];
        two[0] = 2;
        assert_eq!(g.mul_bytes(&two).to_affine(), g.double().to_affine());

        let mut five = [0u8; 32];
        five[0] = 5;
        let expected = g.add(&g).add(&g).add(&g).add(&g);
        assert_eq!(g.mul_bytes(&five).to_affine(), expected.to_affine());
    }
}
