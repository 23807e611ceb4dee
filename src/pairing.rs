//! The optimal Ate pairing over BLS12-381: a single generic Miller-loop
//! driver (§4.8) instantiated three ways — line-triple collection (see
//! [`crate::g2::G2Prepared`]), a single pairing, and a multi-pairing used by
//! the Groth16 verifier — followed by final exponentiation into `Gt`.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::fp2::Fp2;
use crate::fp12::Fp12;
use crate::g1::G1Affine;
use crate::g2::{G2Affine, G2Prepared, G2Projective};

/// `X = 0xd201000000010000`, the BLS parameter. Negative, which is why the
/// Miller loop and the cyclotomic exponentiation both end in a conjugation.
const BLS_X: u64 = 0xd201_0000_0001_0000;
const BLS_X_IS_NEGATIVE: bool = true;

/// The driver abstraction the Miller loop is generic over (§4.8, Design
/// Notes "Polymorphic driver"): three concrete instantiations share this
/// one schedule instead of three copies of the bit-iteration logic.
pub(crate) trait MillerLoopDriver {
    type Output;

    fn doubling_step(&mut self, f: Self::Output) -> Self::Output;
    fn addition_step(&mut self, f: Self::Output) -> Self::Output;
    fn square_output(f: Self::Output) -> Self::Output;
    fn conjugate(f: Self::Output) -> Self::Output;
    fn one() -> Self::Output;
}

/// Walks the fixed schedule derived from `X >> 1`, skipping leading zero
/// bits up to and including the first set one, then doubling (and, on set
/// bits, adding) per iteration, squaring the output each time. One final
/// doubling and a conjugation (because `X` is negative) finish the loop.
pub(crate) fn miller_loop_drive<D: MillerLoopDriver>(driver: &mut D) -> D::Output {
    let mut f = D::one();

    let mut found_one = false;
    for bit in (0..64).rev().map(|b| (((BLS_X >> 1) >> b) & 1) == 1) {
        if !found_one {
            found_one = bit;
            continue;
        }

        f = driver.doubling_step(f);
        if bit {
            f = driver.addition_step(f);
        }
        f = D::square_output(f);
    }

    f = driver.doubling_step(f);

    if BLS_X_IS_NEGATIVE {
        f = D::conjugate(f);
    }

    f
}

/// Doubling step on the projective Miller-loop state (Algorithm 26, eprint
/// 2010/354), returning the updated state's line triple `(tmp0, tmp3, tmp6)`.
pub(crate) fn doubling_step(r: &mut G2Projective) -> (Fp2, Fp2, Fp2) {
    let tmp0 = r.x.square();
    let tmp1 = r.y.square();
    let tmp2 = tmp1.square();
    let tmp3 = (tmp1 + r.x).square() - tmp0 - tmp2;
    let tmp3 = tmp3 + tmp3;
    let tmp4 = tmp0 + tmp0 + tmp0;
    let tmp6 = r.x + tmp4;
    let tmp5 = tmp4.square();
    let zsquared = r.z.square();
    r.x = tmp5 - tmp3 - tmp3;
    r.z = (r.z + r.y).square() - tmp1 - zsquared;
    r.y = (tmp3 - r.x) * tmp4;
    let tmp2 = tmp2 + tmp2;
    let tmp2 = tmp2 + tmp2;
    let tmp2 = tmp2 + tmp2;
    r.y -= tmp2;
    let tmp3 = tmp4 * zsquared;
    let tmp3 = tmp3 + tmp3;
    let tmp3 = -tmp3;
    let tmp6 = tmp6.square() - tmp0 - tmp5;
    let tmp1 = tmp1 + tmp1;
    let tmp1 = tmp1 + tmp1;
    let tmp6 = tmp6 - tmp1;
    let tmp0 = r.z * zsquared;
    let tmp0 = tmp0 + tmp0;

    (tmp0, tmp3, tmp6)
}

/// Addition step on the projective Miller-loop state against fixed affine
/// `q` (Algorithm 27, eprint 2010/354), returning `(2*r.z, 2*(-t6), t9)`.
pub(crate) fn addition_step(r: &mut G2Projective, q: &G2Affine) -> (Fp2, Fp2, Fp2) {
    let zsquared = r.z.square();
    let ysquared = q.y().square();
    let t0 = zsquared * q.x();
    let t1 = ((q.y() + r.z).square() - ysquared - zsquared) * zsquared;
    let t2 = t0 - r.x;
    let t3 = t2.square();
    let t4 = t3 + t3;
    let t4 = t4 + t4;
    let t5 = t4 * t2;
    let t6 = t1 - r.y - r.y;
    let t9 = t6 * q.x();
    let t7 = t4 * r.x;
    r.x = t6.square() - t5 - t7 - t7;
    r.z = (r.z + t2).square() - zsquared - t3;
    let t10 = q.y() + r.z;
    let t8 = (t7 - r.x) * t6;
    let t0 = r.y * t5;
    let t0 = t0 + t0;
    r.y = t8 - t0;
    let t10 = t10.square() - ysquared;
    let ztsquared = r.z.square();
    let t10 = t10 - ztsquared;
    let t9 = t9 + t9 - t10;
    let t10 = r.z + r.z;
    let t6 = -t6;
    let t1 = t6 + t6;

    (t10, t1, t9)
}

/// Line evaluation: multiplies the precomputed coefficients by the fixed
/// `G1` point's coordinates and folds them into the accumulator via the
/// `014`-sparse `Fp12` multiplication. Note the reordering: the triple
/// `(c0,c1,c2)` is consumed as `(c4,c1,c0)`.
fn ell(f: &mut Fp12, coeffs: &(Fp2, Fp2, Fp2), p: &G1Affine) {
    let c0 = Fp2 {
        c0: coeffs.0.c0 * p.y(),
        c1: coeffs.0.c1 * p.y(),
    };
    let c1 = Fp2 {
        c0: coeffs.1.c0 * p.x(),
        c1: coeffs.1.c1 * p.x(),
    };
    *f = f.mul_by_014(&coeffs.2, &c1, &c0);
}

struct SinglePairingDriver {
    p: G1Affine,
    cur: G2Projective,
    base: G2Affine,
}

impl MillerLoopDriver for SinglePairingDriver {
    type Output = Fp12;

    fn doubling_step(&mut self, f: Self::Output) -> Self::Output {
        let mut f = f;
        let coeffs = doubling_step(&mut self.cur);
        ell(&mut f, &coeffs, &self.p);
        f
    }

    fn addition_step(&mut self, f: Self::Output) -> Self::Output {
        let mut f = f;
        let coeffs = addition_step(&mut self.cur, &self.base);
        ell(&mut f, &coeffs, &self.p);
        f
    }

    fn square_output(f: Self::Output) -> Self::Output {
        f.square()
    }

    fn conjugate(f: Self::Output) -> Self::Output {
        f.conjugate()
    }

    fn one() -> Self::Output {
        Fp12::one()
    }
}

/// A single pairing `e(p, q)`, fully reduced into `Gt`.
pub fn pairing(p: &G1Affine, q: &G2Affine) -> Gt {
    let p_is_identity = p.is_identity();
    let q_is_identity = q.is_identity();

    let p2 = G1Affine::conditional_select(p, &G1Affine::generator(), p_is_identity);
    let q2 = G2Affine::conditional_select(q, &G2Affine::generator(), q_is_identity);

    let mut driver = SinglePairingDriver {
        p: p2,
        cur: q2.to_curve(),
        base: q2,
    };
    let f = miller_loop_drive(&mut driver);
    let result = final_exponentiation(&f);

    Gt::conditional_select(&result, &Gt::identity(), p_is_identity | q_is_identity)
}

struct MultiPairingDriver<'a> {
    terms: &'a [(&'a G1Affine, &'a G2Prepared)],
    index: usize,
}

impl<'a> MillerLoopDriver for MultiPairingDriver<'a> {
    type Output = Fp12;

    fn doubling_step(&mut self, f: Self::Output) -> Self::Output {
        let f = self.apply_terms(f);
        self.index += 1;
        f
    }

    fn addition_step(&mut self, f: Self::Output) -> Self::Output {
        let f = self.apply_terms(f);
        self.index += 1;
        f
    }

    fn square_output(f: Self::Output) -> Self::Output {
        f.square()
    }

    fn conjugate(f: Self::Output) -> Self::Output {
        f.conjugate()
    }

    fn one() -> Self::Output {
        Fp12::one()
    }
}

impl<'a> MultiPairingDriver<'a> {
    fn apply_terms(&self, f: Fp12) -> Fp12 {
        let mut f = f;
        for (p, prepared) in self.terms {
            let coeffs = prepared.coeffs[self.index];
            let mut candidate = f;
            ell(&mut candidate, &coeffs, p);
            f = Fp12::conditional_select(&candidate, &f, prepared.infinity);
        }
        f
    }
}

/// The not-yet-reduced output of a Miller loop; call
/// [`MillerLoopResult::final_exponentiation`] to land in `Gt`.
#[derive(Copy, Clone, Debug)]
pub struct MillerLoopResult(Fp12);

impl MillerLoopResult {
    pub fn final_exponentiation(&self) -> Gt {
        final_exponentiation(&self.0)
    }
}

/// Evaluates the Miller loop jointly over every `(G1Affine, G2Prepared)`
/// term, each doubling/addition step applying every term's line
/// coefficients (masking out terms whose `G2` input was the identity)
/// before the shared accumulator is squared.
pub fn multi_miller_loop(terms: &[(&G1Affine, &G2Prepared)]) -> MillerLoopResult {
    let mut driver = MultiPairingDriver { terms, index: 0 };
    MillerLoopResult(miller_loop_drive(&mut driver))
}

/// The pairing target group, the image of final exponentiation inside
/// `Fp12`. Equality is by field value.
#[derive(Copy, Clone, Debug)]
pub struct Gt(pub(crate) Fp12);

impl ConstantTimeEq for Gt {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Gt {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.ct_eq(other))
    }
}
impl Eq for Gt {}

impl ConditionallySelectable for Gt {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Gt(Fp12::conditional_select(&a.0, &b.0, choice))
    }
}

impl Gt {
    pub fn identity() -> Gt {
        Gt(Fp12::one())
    }
}

fn fp4_square(a: Fp2, b: Fp2) -> (Fp2, Fp2) {
    let t0 = a.square();
    let t1 = b.square();
    let t2 = t1.mul_by_nonresidue();
    let c0 = t2 + t0;
    let t2 = (a + b).square() - t0 - t1;
    (c0, t2)
}

/// Granger–Scott cyclotomic squaring, decomposing `f` into six `Fp2`
/// components and recombining as `Fp12(Fp6(z0,z4,z3), Fp6(z2,z1,z5))`.
fn cyclotomic_square(f: Fp12) -> Fp12 {
    let mut z0 = f.c0.c0;
    let mut z4 = f.c0.c1;
    let mut z3 = f.c0.c2;
    let mut z2 = f.c1.c0;
    let mut z1 = f.c1.c1;
    let mut z5 = f.c1.c2;

    let (t0, t1) = fp4_square(z0, z1);

    z0 = t0 - z0;
    z0 = z0 + z0 + t0;

    z1 = t1 + z1;
    z1 = z1 + z1 + t1;

    let (mut t0, t1) = fp4_square(z2, z3);
    let (t2, t3) = fp4_square(z4, z5);

    z4 = t0 - z4;
    z4 = z4 + z4 + t0;

    z5 = t1 + z5;
    z5 = z5 + z5 + t1;

    t0 = t3.mul_by_nonresidue();
    z2 = t0 + z2;
    z2 = z2 + z2 + t0;

    z3 = t2 - z3;
    z3 = z3 + z3 + t2;

    Fp12 {
        c0: crate::fp6::Fp6 {
            c0: z0,
            c1: z4,
            c2: z3,
        },
        c1: crate::fp6::Fp6 {
            c0: z2,
            c1: z1,
            c2: z5,
        },
    }
}

/// Exponentiation by `X` in the cyclotomic subgroup, followed by
/// conjugation (because `X < 0`).
fn cyclotomic_exp(f: Fp12) -> Fp12 {
    let mut tmp = Fp12::one();
    let mut found_one = false;
    for bit in (0..64).rev().map(|b| ((BLS_X >> b) & 1) == 1) {
        if found_one {
            tmp = cyclotomic_square(tmp);
        } else {
            found_one = bit;
        }

        if bit {
            tmp *= f;
        }
    }

    tmp.conjugate()
}

/// `f^((p^12 - 1) / r)`. The easy part clears everything outside the order-
/// `r` cyclotomic subgroup; the hard part is a BLS-friendly addition chain
/// over `cyclotomic_exp`/`cyclotomic_square`. If the easy part's `invert`
/// signals zero (only possible on a malformed, non-pairing-output `f`), the
/// result collapses to `Fp12::zero()` rather than panicking.
fn final_exponentiation(f: &Fp12) -> Gt {
    let t0 = f
        .frobenius_map()
        .frobenius_map()
        .frobenius_map()
        .frobenius_map()
        .frobenius_map()
        .frobenius_map();

    Gt(f.invert()
        .map(|t1| {
            let mut t2 = t0 * t1;
            let t1 = t2;
            t2 = t2.frobenius_map().frobenius_map();
            t2 *= t1;

            let t1 = cyclotomic_square(t2).conjugate();
            let t3 = cyclotomic_exp(t2);
            let t4 = cyclotomic_square(t3);
            let t5 = t1 * t3;
            let t1 = cyclotomic_exp(t5);
            let t0 = cyclotomic_exp(t1);
            let mut t6 = cyclotomic_exp(t0);
            t6 *= t4;
            let t4 = cyclotomic_exp(t6);
            let t5 = t5.conjugate();
            let mut t4 = t4 * t5 * t2;
            let t5 = t2.conjugate();
            let mut t1 = t1 * t2;
            t1 = t1.frobenius_map().frobenius_map().frobenius_map();
            t6 *= t5;
            t6 = t6.frobenius_map();
            let mut t3 = t3 * t0;
            t3 = t3.frobenius_map().frobenius_map();
            t3 *= t1;
            t3 *= t6;
            t3 *= t4;
            t3
        })
        .unwrap_or_else(Fp12::zero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::g1::G1Projective;
    use crate::g2::G2Projective;

    #[test]
    fn pairing_identity_is_one() {
        let g1 = G1Affine::generator();
        let g2 = G2Affine::generator();
        assert_eq!(pairing(&G1Affine::identity(), &g2), Gt::identity());
        assert_eq!(pairing(&g1, &G2Affine::identity()), Gt::identity());
    }

    #[test]
    fn pairing_nondegenerate() {
        let g1 = G1Affine::generator();
        let g2 = G2Affine::generator();
        assert_ne!(pairing(&g1, &g2), Gt::identity());
    }

    #[test]
    fn bilinearity_doubling() {
        let g1 = G1Projective::generator();
        let g2 = G2Projective::generator();

        let lhs = pairing(&g1.double().to_affine(), &g2.to_affine());
        let rhs = pairing(&g1.to_affine(), &g2.double().to_affine());
        assert_eq!(lhs, rhs);

        let base = pairing(&g1.to_affine(), &g2.to_affine());
        assert_eq!(lhs, Gt(base.0.square()));
    }

    #[test]
    fn multi_miller_loop_matches_single_pairing() {
        let g1 = G1Affine::generator();
        let g2 = G2Affine::generator();

        let prepared = G2Prepared::from(g2);
        let single = pairing(&g1, &g2);
        let multi = multi_miller_loop(&[(&g1, &prepared)]).final_exponentiation();
        assert_eq!(single, multi);
    }

    #[test]
    fn multi_miller_loop_masks_identity_terms() {
        let g1 = G1Affine::generator();
        let g2 = G2Affine::generator();

        let prepared = G2Prepared::from(g2);
        let prepared_identity = G2Prepared::from(G2Affine::identity());

        let single = pairing(&g1, &g2);
        let multi = multi_miller_loop(&[
            (&g1, &prepared),
            (&G1Affine::generator(), &prepared_identity),
        ])
        .final_exponentiation();
        assert_eq!(single, multi);
    }
}
