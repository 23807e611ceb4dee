//! `Fp12 = Fp6[w]/(w^2 - v)`, the full extension `Gt` lives inside.

use core::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::fp::Fp;
use crate::fp2::Fp2;
use crate::fp6::Fp6;

/// `(u+1)^((p-1)/6)`, the fixed `Fp2` Frobenius coefficient. `Fp6`'s own
/// coefficient, `(u+1)^((p-1)/3)`, is just this value squared.
///
/// This is the standard BLS12-381 constant; any deviation silently breaks
/// every pairing (spec §4.5).
pub(crate) fn frobenius_coeff_fp12_c1() -> Fp2 {
    Fp2 {
        c0: Fp::from_raw_unchecked([
            0x0708_9552_b319_d465,
            0xc669_5f92_b50a_8313,
            0x97e8_3ccc_d117_228f,
            0xa35b_aeca_b2dc_29ee,
            0x1ce3_93ea_5daa_ce4d,
            0x08f2_220f_b0fb_66eb,
        ]),
        c1: Fp::from_raw_unchecked([
            0xb2f6_6aad_4ce5_d646,
            0x5842_a06b_fc49_7cec,
            0xcf48_95d4_2599_d394,
            0xc11b_9cba_40a8_e8d0,
            0x2e38_13cb_e5a0_de89,
            0x110e_efda_8884_7faf,
        ]),
    }
}

/// `c0 + c1*w`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Fp12 {
    pub(crate) c0: Fp6,
    pub(crate) c1: Fp6,
}

impl ConstantTimeEq for Fp12 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl Eq for Fp12 {}
impl PartialEq for Fp12 {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp12 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp12 {
            c0: Fp6::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp6::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl Fp12 {
    pub const fn zero() -> Fp12 {
        Fp12 {
            c0: Fp6::zero(),
            c1: Fp6::zero(),
        }
    }

    pub const fn one() -> Fp12 {
        Fp12 {
            c0: Fp6::one(),
            c1: Fp6::zero(),
        }
    }

    pub fn add(&self, rhs: &Fp12) -> Fp12 {
        Fp12 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }

    pub fn sub(&self, rhs: &Fp12) -> Fp12 {
        Fp12 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }

    pub fn neg(&self) -> Fp12 {
        Fp12 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }

    pub fn conjugate(&self) -> Fp12 {
        Fp12 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    /// Karatsuba over `Fp6`, folding the square of `c1` through the
    /// sextic non-residue (`w^2 = v`).
    pub fn mul(&self, rhs: &Fp12) -> Fp12 {
        let aa = self.c0 * rhs.c0;
        let bb = self.c1 * rhs.c1;
        let c0 = aa + bb.mul_by_nonresidue();
        let c1 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - aa - bb;
        Fp12 { c0, c1 }
    }

    pub fn square(&self) -> Fp12 {
        let ab = self.c0 * self.c1;
        let c0_plus_c1 = self.c0 + self.c1;
        let c0 = (self.c1.mul_by_nonresidue() + self.c0) * c0_plus_c1 - ab - ab.mul_by_nonresidue();
        let c1 = ab + ab;
        Fp12 { c0, c1 }
    }

    /// Sparse multiplication used by the Miller-loop line function
    /// `ell`: `self * (c0 + c1*v + c4*v*w)`.
    pub fn mul_by_014(&self, c0: &Fp2, c1: &Fp2, c4: &Fp2) -> Fp12 {
        let aa = self.c0.mul_by_01(c0, c1);
        let bb = self.c1.mul_by_1(c4);
        let o = *c1 + *c4;
        let c1 = (self.c1 + self.c0).mul_by_01(c0, &o) - aa - bb;
        let c0 = aa + bb.mul_by_nonresidue();
        Fp12 { c0, c1 }
    }

    /// Single Frobenius application: per-component `Fp6` Frobenius, then
    /// rescale `c1` by `(u+1)^((p-1)/6)`.
    pub fn frobenius_map(&self) -> Fp12 {
        let c0 = self.c0.frobenius_map();
        let c1 = self.c1.frobenius_map();
        let gamma = frobenius_coeff_fp12_c1();

        Fp12 {
            c0,
            c1: Fp6 {
                c0: c1.c0 * gamma,
                c1: c1.c1 * gamma,
                c2: c1.c2 * gamma,
            },
        }
    }

    /// `result = (c0^2 - beta*c1^2)^{-1} * (c0, -c1)`.
    pub fn invert(&self) -> CtOption<Fp12> {
        (self.c0.square() - self.c1.square().mul_by_nonresidue())
            .invert()
            .map(|t| Fp12 {
                c0: self.c0 * t,
                c1: self.c1.neg() * t,
            })
    }
}

impl<'a> Neg for &'a Fp12 {
    type Output = Fp12;
    fn neg(self) -> Fp12 {
        self.neg()
    }
}
impl Neg for Fp12 {
    type Output = Fp12;
    fn neg(self) -> Fp12 {
        -&self
    }
}
impl<'a, 'b> Add<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;
    fn add(self, rhs: &'b Fp12) -> Fp12 {
        self.add(rhs)
    }
}
impl<'a, 'b> Sub<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;
    fn sub(self, rhs: &'b Fp12) -> Fp12 {
        self.sub(rhs)
    }
}
impl<'a, 'b> Mul<&'b Fp12> for &'a Fp12 {
    type Output = Fp12;
    fn mul(self, rhs: &'b Fp12) -> Fp12 {
        self.mul(rhs)
    }
}

impl_binops_additive!(Fp12, Fp12);
impl_binops_multiplicative!(Fp12, Fp12);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_eq_mul_self() {
        let a = Fp12 {
            c0: Fp6::one(),
            c1: Fp6 {
                c0: Fp2::one(),
                c1: Fp2::zero(),
                c2: Fp2::zero(),
            },
        };
        assert_eq!(a.square(), a * a);
    }

    #[test]
    fn invert_one_is_one() {
        let inv = Fp12::one().invert();
        assert!(bool::from(inv.is_some()));
        assert_eq!(inv.unwrap(), Fp12::one());
    }

    #[test]
    fn conjugate_preserves_c0() {
        let a = Fp12 {
            c0: Fp6::one(),
            c1: Fp6::one(),
        };
        assert_eq!(a.conjugate().c0, a.c0);
    }

    #[test]
    fn frobenius_order_twelve_is_identity() {
        let a = Fp12 {
            c0: Fp6 {
                c0: Fp2::one() + Fp2::one(),
                c1: Fp2::one(),
                c2: Fp2::zero(),
            },
            c1: Fp6 {
                c0: Fp2::one(),
                c1: Fp2::zero(),
                c2: Fp2::one() + Fp2::one() + Fp2::one(),
            },
        };
        let mut acc = a;
        for _ in 0..12 {
            acc = acc.frobenius_map();
        }
        assert_eq!(acc, a);
    }
}
