//! The JSON I/O boundary (§6): every field element crosses this boundary
//! as its raw Montgomery-form limb array, so (de)serialization here is a
//! direct struct-field mapping onto the same limbs the arithmetic core
//! already uses — no byte-level encode/decode step is needed for `Fp`/`Fr`.

#[cfg(feature = "alloc")]
use alloc::{string::String, vec::Vec};

use serde::{Deserialize, Serialize};
use subtle::Choice;

use crate::fp::Fp;
use crate::fp2::Fp2;
use crate::fr::Scalar;
use crate::g1::G1Affine;
use crate::g2::G2Affine;
use crate::groth16::{Proof, VerifyingKey};

#[derive(Serialize, Deserialize)]
struct FpJson {
    data: [u64; 6],
}

#[derive(Serialize, Deserialize)]
struct FrJson {
    data: [u64; 4],
}

#[derive(Serialize, Deserialize)]
struct Fp2Json {
    c0: FpJson,
    c1: FpJson,
}

/// `Choice` as the §6 wire format sees it: `{"data": 0}` or `{"data": 1}`,
/// not a bare JSON boolean.
#[derive(Serialize, Deserialize)]
struct ChoiceJson {
    data: u8,
}

#[derive(Serialize, Deserialize)]
struct G1Json {
    x: FpJson,
    y: FpJson,
    infinity: ChoiceJson,
}

#[derive(Serialize, Deserialize)]
struct G2Json {
    x: Fp2Json,
    y: Fp2Json,
    infinity: ChoiceJson,
}

#[derive(Serialize, Deserialize)]
struct ProofJson {
    a: G1Json,
    b: G2Json,
    c: G1Json,
}

#[derive(Serialize, Deserialize)]
struct VerifyingKeyJson {
    alpha_g1: G1Json,
    beta_g1: G1Json,
    beta_g2: G2Json,
    gamma_g2: G2Json,
    delta_g1: G1Json,
    delta_g2: G2Json,
    ic: Vec<G1Json>,
}

/// §6.3's public-inputs document is a bare top-level array, not an object
/// wrapping one — `#[serde(transparent)]` makes this newtype (de)serialize
/// as exactly `[Scalar, ...]`.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
struct PublicInputsJson(Vec<FrJson>);

fn fp_from_json(v: &FpJson) -> Fp {
    Fp::from_raw_unchecked(v.data)
}

fn fp_to_json(v: &Fp) -> FpJson {
    FpJson { data: v.to_raw() }
}

fn fp2_from_json(v: &Fp2Json) -> Fp2 {
    Fp2 {
        c0: fp_from_json(&v.c0),
        c1: fp_from_json(&v.c1),
    }
}

fn fp2_to_json(v: &Fp2) -> Fp2Json {
    Fp2Json {
        c0: fp_to_json(&v.c0),
        c1: fp_to_json(&v.c1),
    }
}

fn g1_from_json(v: &G1Json) -> G1Affine {
    G1Affine::from_raw_parts(
        fp_from_json(&v.x),
        fp_from_json(&v.y),
        Choice::from(v.infinity.data),
    )
}

fn g1_to_json(v: &G1Affine) -> G1Json {
    G1Json {
        x: fp_to_json(&v.x()),
        y: fp_to_json(&v.y()),
        infinity: ChoiceJson {
            data: v.is_identity().unwrap_u8(),
        },
    }
}

fn g2_from_json(v: &G2Json) -> G2Affine {
    G2Affine::from_raw_parts(
        fp2_from_json(&v.x),
        fp2_from_json(&v.y),
        Choice::from(v.infinity.data),
    )
}

fn g2_to_json(v: &G2Affine) -> G2Json {
    G2Json {
        x: fp2_to_json(&v.x()),
        y: fp2_to_json(&v.y()),
        infinity: ChoiceJson {
            data: v.is_identity().unwrap_u8(),
        },
    }
}

/// Parses a JSON-encoded [`Proof`] (§6.2).
pub fn proof_from_json(s: &str) -> Result<Proof, serde_json::Error> {
    let raw: ProofJson = serde_json::from_str(s)?;
    Ok(Proof {
        a: g1_from_json(&raw.a),
        b: g2_from_json(&raw.b),
        c: g1_from_json(&raw.c),
    })
}

/// Serializes a [`Proof`] back to JSON, inverse of [`proof_from_json`].
pub fn proof_to_json(p: &Proof) -> Result<String, serde_json::Error> {
    let raw = ProofJson {
        a: g1_to_json(&p.a),
        b: g2_to_json(&p.b),
        c: g1_to_json(&p.c),
    };
    serde_json::to_string(&raw)
}

/// Parses a JSON-encoded [`VerifyingKey`] (§6.1).
pub fn verifying_key_from_json(s: &str) -> Result<VerifyingKey, serde_json::Error> {
    let raw: VerifyingKeyJson = serde_json::from_str(s)?;
    Ok(VerifyingKey {
        alpha_g1: g1_from_json(&raw.alpha_g1),
        beta_g1: g1_from_json(&raw.beta_g1),
        beta_g2: g2_from_json(&raw.beta_g2),
        gamma_g2: g2_from_json(&raw.gamma_g2),
        delta_g1: g1_from_json(&raw.delta_g1),
        delta_g2: g2_from_json(&raw.delta_g2),
        ic: raw.ic.iter().map(g1_from_json).collect(),
    })
}

/// Serializes a [`VerifyingKey`] back to JSON, inverse of
/// [`verifying_key_from_json`].
pub fn verifying_key_to_json(vk: &VerifyingKey) -> Result<String, serde_json::Error> {
    let raw = VerifyingKeyJson {
        alpha_g1: g1_to_json(&vk.alpha_g1),
        beta_g1: g1_to_json(&vk.beta_g1),
        beta_g2: g2_to_json(&vk.beta_g2),
        gamma_g2: g2_to_json(&vk.gamma_g2),
        delta_g1: g1_to_json(&vk.delta_g1),
        delta_g2: g2_to_json(&vk.delta_g2),
        ic: vk.ic.iter().map(g1_to_json).collect(),
    };
    serde_json::to_string(&raw)
}

/// Parses a JSON-encoded list of public input scalars (§6.3): a bare
/// top-level array of raw Montgomery-form limb groups, passed through to
/// `Fr` unchanged like every other field element at this boundary.
pub fn public_inputs_from_json(s: &str) -> Result<Vec<Scalar>, serde_json::Error> {
    let raw: PublicInputsJson = serde_json::from_str(s)?;
    Ok(raw
        .0
        .iter()
        .map(|v| Scalar::from_raw_unchecked(v.data))
        .collect())
}

/// Serializes a list of public input scalars back to JSON, inverse of
/// [`public_inputs_from_json`].
pub fn public_inputs_to_json(values: &[Scalar]) -> Result<String, serde_json::Error> {
    let raw = PublicInputsJson(values.iter().map(|v| FrJson { data: v.to_raw() }).collect());
    serde_json::to_string(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::g1::G1Projective;

    #[test]
    fn g1_round_trips_through_json() {
        let g = G1Projective::generator().to_affine();
        let json = serde_json::to_string(&g1_to_json(&g)).unwrap();
        let raw: G1Json = serde_json::from_str(&json).unwrap();
        assert_eq!(g1_from_json(&raw), g);
    }

    #[test]
    fn public_inputs_parses_flat_array() {
        // The Montgomery encoding of 1 (`R mod q`) — the JSON boundary
        // carries limbs through unchanged, so the fixture uses the same
        // encoded value `Scalar::one()` is built from. §6.3's document is a
        // bare top-level array, not an object wrapping one.
        let json =
            r#"[{"data":[8589934590,6378425256633387010,11064306276430008309,1739710354780652911]}]"#;
        let inputs = public_inputs_from_json(json).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0], Scalar::one());
    }
}
