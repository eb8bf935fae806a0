//! Verification
//!
//! Checks, for commitment `C`, witness `W`, point `u` and claim `v`:
//!
//! ```text
//!   e(W, [α]G2 - [u]G2) == e(C - [v]G1, G2)
//! ```
//!
//! By bilinearity this is `q(α)(α - u) == f(α) - v` in the exponent, which
//! holds iff `f(u) == v` when `W` came from exact division. The hiding form
//! subtracts `[v_r]H` as well and thereby checks the blinding polynomial's
//! opening in the same equation.
//!
//! We evaluate both sides as one product
//!   e(W, [α-u]G2) · e(-(C - [v]G1), G2) == 1
//! with a single multi-Miller loop and final exponentiation. A failed check
//! is reported as `false`, never as an error.

#![forbid(unsafe_code)]

use ark_bn254::{Bn254, G1Projective};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::One;
use tracing::instrument;

use crate::{Commitment, EvaluationProof, HidingOpening, Opening, VerificationKey, F, G1};

/// Check that `com_q` proves `com_f` opens to `v` at `u`.
#[instrument(level = "debug", skip_all)]
pub fn verify(
    com_f: &Commitment,
    com_q: &EvaluationProof,
    u: F,
    v: F,
    vk: &VerificationKey,
) -> bool {
    let shifted = com_f.0.into_group() - G1::generator() * v;
    let ok = pairing_check(shifted, com_q.0, u, vk);
    tracing::debug!(ok, "evaluation proof checked");
    ok
}

/// Check a hiding opening: `com_f` opens to `v` with blinding value `v_r` at `u`.
#[instrument(level = "debug", skip_all)]
pub fn verify_hiding(
    com_f: &Commitment,
    com_q: &EvaluationProof,
    u: F,
    v: F,
    v_r: F,
    h: G1,
    vk: &VerificationKey,
) -> bool {
    let shifted = com_f.0.into_group() - G1::generator() * v - h * v_r;
    let ok = pairing_check(shifted, com_q.0, u, vk);
    tracing::debug!(ok, "hiding evaluation proof checked");
    ok
}

/// [`verify`] over an [`Opening`] bundle.
pub fn verify_opening(com_f: &Commitment, opening: &Opening, vk: &VerificationKey) -> bool {
    verify(com_f, &opening.proof, opening.point, opening.value, vk)
}

/// [`verify_hiding`] over a [`HidingOpening`] bundle.
pub fn verify_hiding_opening(
    com_f: &Commitment,
    opening: &HidingOpening,
    h: G1,
    vk: &VerificationKey,
) -> bool {
    verify_hiding(
        com_f,
        &opening.proof,
        opening.point,
        opening.value,
        opening.blinding_value,
        h,
        vk,
    )
}

/// e(W, [α-u]G2) · e(-shifted, G2) == 1
fn pairing_check(shifted: G1Projective, witness: G1, u: F, vk: &VerificationKey) -> bool {
    let g2 = vk.g2();
    let right_g2 = (vk.alpha_g2().into_group() - g2 * u).into_affine();
    let minus_shifted = (-shifted).into_affine();

    let a = [
        <Bn254 as Pairing>::G1Prepared::from(witness),
        <Bn254 as Pairing>::G1Prepared::from(minus_shifted),
    ];
    let b = [
        <Bn254 as Pairing>::G2Prepared::from(right_g2),
        <Bn254 as Pairing>::G2Prepared::from(g2),
    ];

    let mlo = <Bn254 as Pairing>::multi_miller_loop(a, b);
    match <Bn254 as Pairing>::final_exponentiation(mlo) {
        Some(fe) => fe.0.is_one(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{commit, open, prove, setup, Polynomial};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn pairing_form_matches_direct_comparison() {
        let mut rng = StdRng::seed_from_u64(31);
        let (pp, vk) = setup(3, &mut rng).unwrap();
        let f = Polynomial::random(3, &mut rng);
        let u = F::from(10u64);
        let com_f = commit(&pp, f.coefficients()).unwrap();
        let com_q = prove(&pp, f.coefficients(), u).unwrap();

        for v in [f.evaluate(u), f.evaluate(u) + F::one()] {
            let lhs = Bn254::pairing(com_q.0, (vk.alpha_g2().into_group() - vk.g2() * u).into_affine());
            let rhs = Bn254::pairing((com_f.0.into_group() - G1::generator() * v).into_affine(), vk.g2());
            assert_eq!(lhs == rhs, verify(&com_f, &com_q, u, v, &vk));
        }
    }

    #[test]
    fn opening_bundle_verifies() {
        let mut rng = StdRng::seed_from_u64(32);
        let (pp, vk) = setup(2, &mut rng).unwrap();
        let f = Polynomial::random(2, &mut rng);
        let com_f = commit(&pp, f.coefficients()).unwrap();
        let opening = open(&pp, &f, F::from(3u64)).unwrap();
        assert!(verify_opening(&com_f, &opening, &vk));

        let tampered = Opening { point: F::from(4u64), ..opening };
        assert!(!verify_opening(&com_f, &tampered, &vk));
    }

    #[test]
    fn proof_from_other_setup_is_rejected() {
        let (pp_a, _) = setup(2, &mut StdRng::seed_from_u64(33)).unwrap();
        let (_, vk_b) = setup(2, &mut StdRng::seed_from_u64(34)).unwrap();
        let f = Polynomial::from_u64(&[1, 2, 3]);
        let u = F::from(2u64);
        let com_f = commit(&pp_a, f.coefficients()).unwrap();
        let com_q = prove(&pp_a, f.coefficients(), u).unwrap();
        assert!(!verify(&com_f, &com_q, u, f.evaluate(u), &vk_b));
    }
}
