//! `Fp6 = Fp2[v]/(v^3 - (u+1))`, the sextic extension used inside `Fp12`.

use core::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::fp2::Fp2;

/// `c0 + c1*v + c2*v^2`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Fp6 {
    pub(crate) c0: Fp2,
    pub(crate) c1: Fp2,
    pub(crate) c2: Fp2,
}

impl ConstantTimeEq for Fp6 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1) & self.c2.ct_eq(&other.c2)
    }
}

impl Eq for Fp6 {}
impl PartialEq for Fp6 {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp6 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp6 {
            c0: Fp2::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp2::conditional_select(&a.c1, &b.c1, choice),
            c2: Fp2::conditional_select(&a.c2, &b.c2, choice),
        }
    }
}

impl Fp6 {
    pub const fn zero() -> Fp6 {
        Fp6 {
            c0: Fp2::zero(),
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }

    pub const fn one() -> Fp6 {
        Fp6 {
            c0: Fp2::one(),
            c1: Fp2::zero(),
            c2: Fp2::zero(),
        }
    }

    pub fn add(&self, rhs: &Fp6) -> Fp6 {
        Fp6 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
            c2: self.c2 + rhs.c2,
        }
    }

    pub fn sub(&self, rhs: &Fp6) -> Fp6 {
        Fp6 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
            c2: self.c2 - rhs.c2,
        }
    }

    pub fn neg(&self) -> Fp6 {
        Fp6 {
            c0: -self.c0,
            c1: -self.c1,
            c2: -self.c2,
        }
    }

    /// Shifts components up by one power of `v`, folding the overflow
    /// through the non-residue: `c*(u+1) + a*v + b*v^2`.
    pub fn mul_by_nonresidue(&self) -> Fp6 {
        Fp6 {
            c0: self.c2.mul_by_nonresidue(),
            c1: self.c0,
            c2: self.c1,
        }
    }

    /// Karatsuba-3 multiplication.
    pub fn mul(&self, rhs: &Fp6) -> Fp6 {
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        let t2 = self.c2 * rhs.c2;

        let c0 = t0 + ((self.c1 + self.c2) * (rhs.c1 + rhs.c2) - t1 - t2).mul_by_nonresidue();
        let c1 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - t0 - t1 + t2.mul_by_nonresidue();
        let c2 = (self.c0 + self.c2) * (rhs.c0 + rhs.c2) - t0 + t1 - t2;

        Fp6 { c0, c1, c2 }
    }

    /// Chung–Hasan SQR3 squaring formula.
    pub fn square(&self) -> Fp6 {
        let s0 = self.c0.square();
        let ab = self.c0 * self.c1;
        let s1 = ab + ab;
        let s2 = (self.c0 - self.c1 + self.c2).square();
        let bc = self.c1 * self.c2;
        let s3 = bc + bc;
        let s4 = self.c2.square();

        Fp6 {
            c0: s0 + s3.mul_by_nonresidue(),
            c1: s1 + s4.mul_by_nonresidue(),
            c2: s1 + s2 + s3 - s0 - s4,
        }
    }

    /// Sparse multiplication by `(0, c1, 0)`, used in Miller-loop line
    /// evaluations.
    pub fn mul_by_1(&self, c1: &Fp2) -> Fp6 {
        let b_b = self.c1 * c1;
        let t1 = ((self.c1 + self.c2) * c1 - b_b).mul_by_nonresidue();
        let t2 = (self.c0 + self.c1) * c1 - b_b;
        Fp6 {
            c0: t1,
            c1: t2,
            c2: b_b,
        }
    }

    /// Sparse multiplication by `(c0, c1, 0)`.
    pub fn mul_by_01(&self, c0: &Fp2, c1: &Fp2) -> Fp6 {
        let a_a = self.c0 * c0;
        let b_b = self.c1 * c1;

        let t1 = ((self.c1 + self.c2) * c1 - b_b).mul_by_nonresidue() + a_a;
        let t2 = (*c0 + *c1) * (self.c0 + self.c1) - a_a - b_b;
        let t3 = (self.c0 + self.c2) * c0 - a_a + b_b;

        Fp6 {
            c0: t1,
            c1: t2,
            c2: t3,
        }
    }

    /// Single Frobenius application: per-component `Fp2` conjugation, then
    /// rescale `c1`/`c2` by `(u+1)^((p-1)/3)` / `(u+1)^((2p-2)/3)` — the
    /// `Fp12` coefficient `(u+1)^((p-1)/6)` squared once and twice.
    pub fn frobenius_map(&self) -> Fp6 {
        let c0 = self.c0.frobenius_map();
        let c1 = self.c1.frobenius_map();
        let c2 = self.c2.frobenius_map();

        let gamma1 = crate::fp12::frobenius_coeff_fp12_c1().square();
        let gamma2 = gamma1.square();

        Fp6 {
            c0,
            c1: c1 * gamma1,
            c2: c2 * gamma2,
        }
    }

    /// Classical cyclotomic inverse: reduces to a single `Fp2` inversion.
    pub fn invert(&self) -> CtOption<Fp6> {
        let c0 = self.c0.square() - (self.c1 * self.c2).mul_by_nonresidue();
        let c1 = self.c2.square().mul_by_nonresidue() - self.c0 * self.c1;
        let c2 = self.c1.square() - self.c0 * self.c2;

        let t = ((self.c2 * c1) + (self.c1 * c2)).mul_by_nonresidue() + self.c0 * c0;

        t.invert().map(|t| Fp6 {
            c0: t * c0,
            c1: t * c1,
            c2: t * c2,
        })
    }
}

impl<'a> Neg for &'a Fp6 {
    type Output = Fp6;
    fn neg(self) -> Fp6 {
        self.neg()
    }
}
impl Neg for Fp6 {
    type Output = Fp6;
    fn neg(self) -> Fp6 {
        -&self
    }
}
impl<'a, 'b> Add<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;
    fn add(self, rhs: &'b Fp6) -> Fp6 {
        self.add(rhs)
    }
}
impl<'a, 'b> Sub<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;
    fn sub(self, rhs: &'b Fp6) -> Fp6 {
        self.sub(rhs)
    }
}
impl<'a, 'b> Mul<&'b Fp6> for &'a Fp6 {
    type Output = Fp6;
    fn mul(self, rhs: &'b Fp6) -> Fp6 {
        self.mul(rhs)
    }
}

impl_binops_additive!(Fp6, Fp6);
impl_binops_multiplicative!(Fp6, Fp6);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_eq_mul_self() {
        let a = Fp6 {
            c0: Fp2::one(),
            c1: Fp2::one(),
            c2: Fp2::zero(),
        };
        assert_eq!(a.square(), a * a);
    }

    #[test]
    fn mul_by_nonresidue_matches_full_mul() {
        let a = Fp6 {
            c0: Fp2::one() + Fp2::one(),
            c1: Fp2::one(),
            c2: Fp2::one(),
        };
        let v = Fp6 {
            c0: Fp2::zero(),
            c1: Fp2::one(),
            c2: Fp2::zero(),
        };
        assert_eq!(a.mul_by_nonresidue(), a * v);
    }

    #[test]
    fn frobenius_order_six_is_identity() {
        let a = Fp6 {
            c0: Fp2::one() + Fp2::one(),
            c1: Fp2::one(),
            c2: Fp2::one() + Fp2::one() + Fp2::one(),
        };
        let mut acc = a;
        for _ in 0..6 {
            acc = acc.frobenius_map();
        }
        assert_eq!(acc, a);
    }
}
