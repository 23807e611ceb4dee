//! `Fp2 = Fp[u]/(u^2 + 1)`, the quadratic extension used as the base of the
//! `G2` curve and the `Fp6`/`Fp12` tower.

use core::ops::{Add, Mul, Neg, Sub};

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

use crate::fp::Fp;

/// `c0 + c1 * u`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Fp2 {
    pub(crate) c0: Fp,
    pub(crate) c1: Fp,
}

impl ConstantTimeEq for Fp2 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.c0.ct_eq(&other.c0) & self.c1.ct_eq(&other.c1)
    }
}

impl Eq for Fp2 {}
impl PartialEq for Fp2 {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}

impl ConditionallySelectable for Fp2 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Fp2 {
            c0: Fp::conditional_select(&a.c0, &b.c0, choice),
            c1: Fp::conditional_select(&a.c1, &b.c1, choice),
        }
    }
}

impl Fp2 {
    pub const fn zero() -> Fp2 {
        Fp2 {
            c0: Fp::zero(),
            c1: Fp::zero(),
        }
    }

    pub const fn one() -> Fp2 {
        Fp2 {
            c0: Fp::one(),
            c1: Fp::zero(),
        }
    }

    pub fn is_zero(&self) -> Choice {
        self.c0.is_zero() & self.c1.is_zero()
    }

    pub fn add(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: self.c0 + rhs.c0,
            c1: self.c1 + rhs.c1,
        }
    }

    pub fn sub(&self, rhs: &Fp2) -> Fp2 {
        Fp2 {
            c0: self.c0 - rhs.c0,
            c1: self.c1 - rhs.c1,
        }
    }

    pub fn neg(&self) -> Fp2 {
        Fp2 {
            c0: -self.c0,
            c1: -self.c1,
        }
    }

    /// Karatsuba multiplication over the two components.
    pub fn mul(&self, rhs: &Fp2) -> Fp2 {
        let aa = self.c0 * rhs.c0;
        let bb = self.c1 * rhs.c1;
        let c0 = aa - bb;
        let c1 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - aa - bb;
        Fp2 { c0, c1 }
    }

    /// `(c0+c1)(c0-c1), 2*c0*c1` — the complex-multiplication squaring
    /// formula, cheaper than a full `mul`.
    pub fn square(&self) -> Fp2 {
        let a = self.c0 + self.c1;
        let b = self.c0 - self.c1;
        let c = self.c0 + self.c0;
        Fp2 {
            c0: a * b,
            c1: c * self.c1,
        }
    }

    /// Multiplies by the `Fp6` cubic non-residue `u+1`:
    /// `(a+bu)(1+u) = (a-b) + (a+b)u`.
    pub fn mul_by_nonresidue(&self) -> Fp2 {
        Fp2 {
            c0: self.c0 - self.c1,
            c1: self.c0 + self.c1,
        }
    }

    /// Frobenius over `Fp2` is conjugation: `(c0+c1 u)^p = c0 - c1 u`.
    pub fn frobenius_map(&self) -> Fp2 {
        self.conjugate()
    }

    pub fn conjugate(&self) -> Fp2 {
        Fp2 {
            c0: self.c0,
            c1: -self.c1,
        }
    }

    pub fn invert(&self) -> CtOption<Fp2> {
        // 1/(c0+c1 u) = (c0 - c1 u) / (c0^2 + c1^2)
        let norm = self.c0.square() + self.c1.square();
        norm.invert().map(|inv| Fp2 {
            c0: self.c0 * inv,
            c1: self.c1.neg() * inv,
        })
    }
}

impl<'a> Neg for &'a Fp2 {
    type Output = Fp2;
    fn neg(self) -> Fp2 {
        self.neg()
    }
}
impl Neg for Fp2 {
    type Output = Fp2;
    fn neg(self) -> Fp2 {
        -&self
    }
}

impl<'a, 'b> Add<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    fn add(self, rhs: &'b Fp2) -> Fp2 {
        self.add(rhs)
    }
}
impl<'a, 'b> Sub<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    fn sub(self, rhs: &'b Fp2) -> Fp2 {
        self.sub(rhs)
    }
}
impl<'a, 'b> Mul<&'b Fp2> for &'a Fp2 {
    type Output = Fp2;
    fn mul(self, rhs: &'b Fp2) -> Fp2 {
        self.mul(rhs)
    }
}

impl_binops_additive!(Fp2, Fp2);
impl_binops_multiplicative!(Fp2, Fp2);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fp2_of(a: u64, b: u64) -> Fp2 {
        Fp2 {
            c0: Fp::from_u64(a),
            c1: Fp::from_u64(b),
        }
    }

    #[test]
    fn square_eq_mul_self() {
        let a = Fp2 {
            c0: Fp::one() + Fp::one(),
            c1: Fp::one(),
        };
        assert_eq!(a.square(), a * a);
    }

    #[test]
    fn conjugate_twice_is_identity() {
        let a = Fp2 {
            c0: Fp::one(),
            c1: Fp::one() + Fp::one(),
        };
        assert_eq!(a.conjugate().conjugate(), a);
    }

    #[test]
    fn invert_round_trip() {
        let a = Fp2 {
            c0: Fp::one() + Fp::one(),
            c1: Fp::one(),
        };
        let inv = a.invert().unwrap();
        assert_eq!(a * inv, Fp2::one());
    }

    proptest! {
        #[test]
        fn field_laws(a0 in any::<u64>(), a1 in any::<u64>(), b0 in any::<u64>(), b1 in any::<u64>()) {
            let a = fp2_of(a0, a1);
            let b = fp2_of(b0, b1);

            prop_assert_eq!(a + b, b + a);
            prop_assert_eq!(a * b, b * a);
            prop_assert_eq!(a * Fp2::one(), a);
            prop_assert_eq!(a + (-a), Fp2::zero());
            prop_assert_eq!(a.square(), a * a);
            prop_assert_eq!(a.conjugate().conjugate(), a);

            let inv = a.invert();
            if bool::from(inv.is_some()) {
                prop_assert_eq!(inv.unwrap() * a, Fp2::one());
            } else {
                prop_assert!(bool::from(a.is_zero()));
            }
        }
    }
}
