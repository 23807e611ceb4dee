//! `G2`: the same short-Weierstrass structure as `G1` but over `Fp2`, curve
//! constant `4(u+1)`. Also defines [`G2Prepared`], the precomputed
//! Miller-loop line coefficients consumed by the pairing engine.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::fp::Fp;
use crate::fp2::Fp2;
use crate::pairing::{miller_loop_drive, MillerLoopDriver};

/// `3*b` for `b = 4(u+1)`.
fn mul_by_3b(x: Fp2) -> Fp2 {
    let b3 = Fp2 {
        c0: Fp::from_u64(12),
        c1: Fp::from_u64(12),
    };
    x * b3
}

#[derive(Copy, Clone, Debug)]
pub struct G2Affine {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) infinity: Choice,
}

impl ConditionallySelectable for G2Affine {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        G2Affine {
            x: Fp2::conditional_select(&a.x, &b.x, choice),
            y: Fp2::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl ConstantTimeEq for G2Affine {
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.infinity & other.infinity)
            | (!self.infinity & !other.infinity & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y))
    }
}

impl PartialEq for G2Affine {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}
impl Eq for G2Affine {}

impl G2Affine {
    pub fn identity() -> G2Affine {
        G2Affine {
            x: Fp2::zero(),
            y: Fp2::one(),
            infinity: Choice::from(1u8),
        }
    }

    /// The standard BLS12-381 `G2` generator.
    pub fn generator() -> G2Affine {
        G2Affine {
            x: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0xf5f2_8fa2_0294_0a10,
                    0xb3f5_fb26_87b4_961a,
                    0xa1a8_93b5_3e2a_e580,
                    0x9894_999d_1a3c_aee9,
                    0x6f67_b763_1863_366b,
                    0x0581_9192_4350_bcd7,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xa5a9_c075_9e23_f606,
                    0xaaa0_c59d_bccd_60c3,
                    0x3bb1_7e18_e286_7806,
                    0x1b1a_b6cc_8541_b367,
                    0xc2b6_ed0e_f215_8547,
                    0x1192_2a09_7360_edf3,
                ]),
            },
            y: Fp2 {
                c0: Fp::from_raw_unchecked([
                    0x4c73_0af8_6049_4c4a,
                    0x597c_fa1f_5e36_9c5a,
                    0xe7e6_856c_aa0a_635a,
                    0xbbef_b5e9_6e0d_495f,
                    0x07d3_a975_f0ef_25a2,
                    0x0083_fd8e_7e80_dae5,
                ]),
                c1: Fp::from_raw_unchecked([
                    0xadc0_fc92_df64_b05d,
                    0x18aa_270a_2b14_61dc,
                    0x86ad_ac6a_3be4_eba0,
                    0x7949_5c4e_c93d_c0c0,
                    0xba55_8cde_af3d_0057,
                    0x1606_8ba1_e0ab_38b9,
                ]),
            },
            infinity: Choice::from(0u8),
        }
    }

    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Flips `y`, selecting `Fp2::one()` when infinity so the stored `y`
    /// is never the identity's negated placeholder.
    pub fn neg(&self) -> G2Affine {
        G2Affine {
            x: self.x,
            y: Fp2::conditional_select(&-self.y, &Fp2::one(), self.infinity),
            infinity: self.infinity,
        }
    }

    pub fn to_curve(&self) -> G2Projective {
        G2Projective {
            x: self.x,
            y: self.y,
            z: Fp2::conditional_select(&Fp2::one(), &Fp2::zero(), self.infinity),
        }
    }

    pub(crate) fn from_raw_parts(x: Fp2, y: Fp2, infinity: Choice) -> G2Affine {
        G2Affine { x, y, infinity }
    }

    pub(crate) fn x(&self) -> Fp2 {
        self.x
    }

    pub(crate) fn y(&self) -> Fp2 {
        self.y
    }
}

#[derive(Copy, Clone, Debug)]
pub struct G2Projective {
    pub(crate) x: Fp2,
    pub(crate) y: Fp2,
    pub(crate) z: Fp2,
}

impl From<G2Affine> for G2Projective {
    fn from(p: G2Affine) -> G2Projective {
        p.to_curve()
    }
}

impl G2Projective {
    pub fn identity() -> G2Projective {
        G2Projective {
            x: Fp2::zero(),
            y: Fp2::one(),
            z: Fp2::zero(),
        }
    }

    pub fn generator() -> G2Projective {
        G2Affine::generator().to_curve()
    }

    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    pub fn to_affine(&self) -> G2Affine {
        let zinv = self.z.invert();
        let is_zero = zinv.is_none();
        let zinv = zinv.unwrap_or(Fp2::zero());
        let x = self.x * zinv;
        let y = self.y * zinv;

        let identity = G2Affine::identity();
        G2Affine {
            x: Fp2::conditional_select(&x, &identity.x, is_zero),
            y: Fp2::conditional_select(&y, &identity.y, is_zero),
            infinity: is_zero,
        }
    }

    pub fn add(&self, rhs: &G2Projective) -> G2Projective {
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

        G2Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn double(&self) -> G2Projective {
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

        G2Projective {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    pub fn neg(&self) -> G2Projective {
        G2Projective {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

/// Line-coefficient triples for one Miller loop against a fixed `G2`
/// point, precomputed so [`crate::pairing::multi_miller_loop`] can reuse
/// them across many `G1` bases. Always holds exactly 68 triples (§4.7).
#[derive(Clone, Debug)]
pub struct G2Prepared {
    pub(crate) infinity: Choice,
    pub(crate) coeffs: Vec<(Fp2, Fp2, Fp2)>,
}

struct LineCollector {
    cur: G2Projective,
    base: G2Affine,
    coeffs: Vec<(Fp2, Fp2, Fp2)>,
}

impl MillerLoopDriver for LineCollector {
    type Output = ();

    fn doubling_step(&mut self, _: Self::Output) -> Self::Output {
        let coeffs = crate::pairing::doubling_step(&mut self.cur);
        self.coeffs.push(coeffs);
    }

    fn addition_step(&mut self, _: Self::Output) -> Self::Output {
        let coeffs = crate::pairing::addition_step(&mut self.cur, &self.base);
        self.coeffs.push(coeffs);
    }

    fn square_output(_: Self::Output) -> Self::Output {}
    fn conjugate(_: Self::Output) -> Self::Output {}
    fn one() -> Self::Output {}
}

impl From<G2Affine> for G2Prepared {
    fn from(q: G2Affine) -> G2Prepared {
        let is_identity = q.is_identity();
        // Substitute the generator when `q` is the identity to keep the
        // schedule well-defined; the identity flag survives separately and
        // is consulted by the multi-pairing driver to mask these lines out.
        let base = G2Affine::conditional_select(&q, &G2Affine::generator(), is_identity);

        let mut collector = LineCollector {
            cur: base.to_curve(),
            base,
            coeffs: Vec::with_capacity(68),
        };

        miller_loop_drive(&mut collector);

        debug_assert_eq!(collector.coeffs.len(), 68);

        G2Prepared {
            infinity: is_identity,
            coeffs: collector.coeffs,
        }
    }
}

impl G2Prepared {
    pub(crate) fn from_raw_parts(infinity: Choice, coeffs: Vec<(Fp2, Fp2, Fp2)>) -> G2Prepared {
        G2Prepared { infinity, coeffs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_eq_add_self() {
        let g = G2Projective::generator();
        assert_eq!(g.double().to_affine(), g.add(&g).to_affine());
    }

    #[test]
    fn prepared_has_68_coeffs() {
        let p = G2Prepared::from(G2Affine::generator());
        assert_eq!(p.coeffs.len(), 68);

        let identity = G2Prepared::from(G2Affine::identity());
        assert_eq!(identity.coeffs.len(), 68);
        assert!(bool::from(identity.infinity));
    }
}
