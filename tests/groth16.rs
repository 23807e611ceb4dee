//! End-to-end verifier fixture (§8, S5): builds a valid Groth16 instance
//! algebraically (no real circuit is available to hand-author here),
//! round-trips it through the JSON boundary, and checks both the accept
//! and reject paths through the public `verify_proof_json` entry point.

use bls12_381_groth16_verifier::json::{
    proof_to_json, public_inputs_to_json, verifying_key_to_json,
};
use bls12_381_groth16_verifier::{verify_proof_json, G1Projective, G2Projective, Proof, Scalar, VerifyingKey};

/// Same construction as the internal `groth16::tests::toy_instance`: pick
/// `alpha`, `beta`, and a shared `gamma == delta` freely, set `A = alpha`,
/// `B = beta`, and `C = -(IC_0 + x*IC_1)` so the `gamma`/`delta` terms
/// cancel and the check collapses to `e(alpha,beta) == e(alpha,beta)`.
fn fixture() -> (VerifyingKey, Proof, Scalar) {
    let alpha = G1Projective::generator().double();
    let beta = G2Projective::generator().double().double();
    let shared = G2Projective::generator();

    let ic0 = G1Projective::generator();
    let ic1 = G1Projective::generator().double().double().double();

    let x = Scalar::one();
    let vk_x = ic0.add(&ic1.mul(&x));
    let c = vk_x.neg();

    let vk = VerifyingKey {
        alpha_g1: alpha.to_affine(),
        beta_g1: G1Projective::generator().to_affine(),
        beta_g2: beta.to_affine(),
        gamma_g2: shared.to_affine(),
        delta_g2: shared.to_affine(),
        delta_g1: G1Projective::generator().to_affine(),
        ic: vec![ic0.to_affine(), ic1.to_affine()],
    };

    let proof = Proof {
        a: alpha.to_affine(),
        b: beta.to_affine(),
        c: c.to_affine(),
    };

    (vk, proof, x)
}

#[test]
fn accepts_fixture_round_tripped_through_json() {
    let (vk, proof, x) = fixture();

    let vk_json = verifying_key_to_json(&vk).unwrap();
    let proof_json = proof_to_json(&proof).unwrap();
    let inputs_json = public_inputs_to_json(&[x]).unwrap();

    assert!(verify_proof_json(&vk_json, &proof_json, &inputs_json).unwrap());
}

#[test]
fn rejects_fixture_with_tampered_last_input_byte() {
    let (vk, proof, _x) = fixture();

    let vk_json = verifying_key_to_json(&vk).unwrap();
    let proof_json = proof_to_json(&proof).unwrap();

    // Scalar::one()'s top limb, with its low byte flipped: no longer the
    // Montgomery encoding of 1, so the reconstructed public input changes
    // and the equation no longer holds. §6.3's document is a bare array.
    let tampered_inputs_json =
        r#"[{"data":[8589934590,6378425256633387010,11064306276430008309,1739710354780652912]}]"#;

    assert!(!verify_proof_json(&vk_json, &proof_json, tampered_inputs_json).unwrap());
}

#[test]
fn rejects_malformed_json() {
    let (vk, proof, x) = fixture();
    let proof_json = proof_to_json(&proof).unwrap();
    let inputs_json = public_inputs_to_json(&[x]).unwrap();

    assert!(verify_proof_json("{not json", &proof_json, &inputs_json).is_err());
    let _ = vk;
}
