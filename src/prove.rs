//! Evaluation proofs
//!
//! To open `f` at `u` the prover commits to the witness polynomial
//!
//! ```text
//!   q(X) = (f(X) - f(u)) / (X - u)
//! ```
//!
//! computed by synthetic division from the highest coefficient down. The
//! division's final carry is `f(u)` and is deliberately not surfaced here:
//! the claimed value travels separately, and the pairing check only passes
//! when that claim equals the true remainder, i.e. when the division was
//! exact for the claimed value.
//!
//! Which prover runs is an explicit choice. [`HonestProver`] is the only
//! implementation that works from public parameters alone; the forging one
//! lives in [`crate::adversarial`] and needs the leaked secret.

#![forbid(unsafe_code)]

use ark_ff::Zero;
use tracing::instrument;

use crate::{
    commit::combine, poly, EvaluationProof, HidingParameters, KzgError, Polynomial,
    PublicParameters, F,
};

/// Capability to produce an evaluation proof for `coefficients` at `point`.
pub trait Prover {
    /// Produce the witness commitment for opening `coefficients` at `point`.
    fn prove(&self, coefficients: &[F], point: F) -> Result<EvaluationProof, KzgError>;
}

/// Honest prover backed only by the public ladder.
#[derive(Debug, Clone, Copy)]
pub struct HonestProver<'a> {
    /// Public ladder the commitments were made against.
    pub pp: &'a PublicParameters,
}

impl Prover for HonestProver<'_> {
    fn prove(&self, coefficients: &[F], point: F) -> Result<EvaluationProof, KzgError> {
        prove(self.pp, coefficients, point)
    }
}

/// A claimed evaluation together with its proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opening {
    /// Evaluation point `u`.
    pub point: F,
    /// Claimed value `f(u)`.
    pub value: F,
    /// Commitment to `(f(X) - f(u)) / (X - u)`.
    pub proof: EvaluationProof,
}

/// Opening of a hiding commitment: value and blinding value at the same point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HidingOpening {
    /// Evaluation point `u`.
    pub point: F,
    /// Claimed value `f(u)`.
    pub value: F,
    /// Blinding polynomial value `r(u)`.
    pub blinding_value: F,
    /// Combined witness commitment for `f` and `r`.
    pub proof: EvaluationProof,
}

/// Quotient of `coefficients` by `(X - u)`, low→high, one entry shorter than
/// the input (empty for constants).
pub fn quotient_coefficients(coefficients: &[F], u: F) -> Vec<F> {
    let (q, _remainder) = poly::synthetic_division(coefficients, u);
    q
}

/// Prove the evaluation of `coefficients` at `u`.
///
/// The caller computes the claimed value independently (e.g. with
/// [`Polynomial::evaluate`]). Fails with `LengthMismatch` when the polynomial
/// does not fit the ladder.
#[instrument(level = "debug", skip_all, fields(len = coefficients.len()))]
pub fn prove(pp: &PublicParameters, coefficients: &[F], u: F) -> Result<EvaluationProof, KzgError> {
    check_fits(pp.len(), coefficients.len())?;
    let q = quotient_coefficients(coefficients, u);
    if q.iter().all(|c| c.is_zero()) {
        return Ok(EvaluationProof::identity());
    }
    let bases = pp.truncated(q.len())?;
    Ok(EvaluationProof(combine(bases, &q, None)?))
}

/// Prove the evaluation of a hiding commitment at `u`.
///
/// Divides `coefficients` and `blinding` independently and commits both
/// quotients against their own ladders.
#[instrument(level = "debug", skip_all, fields(len = coefficients.len()))]
pub fn prove_hiding(
    pp: &PublicParameters,
    coefficients: &[F],
    u: F,
    hp: &HidingParameters,
    blinding: &[F],
) -> Result<EvaluationProof, KzgError> {
    check_fits(pp.len(), coefficients.len())?;
    check_fits(hp.len(), blinding.len())?;
    let q = quotient_coefficients(coefficients, u);
    let q_r = quotient_coefficients(blinding, u);
    let bases = pp.truncated(q.len())?;
    let blind_bases = hp.truncated(q_r.len())?;
    Ok(EvaluationProof(combine(bases, &q, Some((blind_bases, &q_r)))?))
}

/// Evaluate `f` at `u` and prove it.
pub fn open(pp: &PublicParameters, f: &Polynomial, u: F) -> Result<Opening, KzgError> {
    let proof = prove(pp, f.coefficients(), u)?;
    Ok(Opening { point: u, value: f.evaluate(u), proof })
}

/// Evaluate `f` and its blinding polynomial `r` at `u` and prove both.
pub fn open_hiding(
    pp: &PublicParameters,
    f: &Polynomial,
    hp: &HidingParameters,
    r: &Polynomial,
    u: F,
) -> Result<HidingOpening, KzgError> {
    let proof = prove_hiding(pp, f.coefficients(), u, hp, r.coefficients())?;
    Ok(HidingOpening { point: u, value: f.evaluate(u), blinding_value: r.evaluate(u), proof })
}

fn check_fits(ladder_len: usize, got: usize) -> Result<(), KzgError> {
    if got > ladder_len {
        return Err(KzgError::LengthMismatch { expected: ladder_len, got });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{commit, setup, setup_hiding};
    use ark_ec::{AffineRepr, CurveGroup};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn quotient_follows_synthetic_division() {
        // (x^2 - 1) / (x - 1) = x + 1
        let coeffs = Polynomial::new(vec![-F::from(1u64), F::zero(), F::from(1u64)]);
        let q = quotient_coefficients(coeffs.coefficients(), F::from(1u64));
        assert_eq!(q, vec![F::from(1u64), F::from(1u64)]);

        assert!(quotient_coefficients(&[F::from(3u64)], F::from(8u64)).is_empty());
        assert!(quotient_coefficients(&[], F::from(8u64)).is_empty());
    }

    #[test]
    fn proof_is_commitment_to_quotient() {
        let mut rng = StdRng::seed_from_u64(21);
        let (pp, _) = setup(4, &mut rng).unwrap();
        let f = Polynomial::from_u64(&[5, 4, 3, 2, 1]);
        let u = F::from(5u64);

        let proof = prove(&pp, f.coefficients(), u).unwrap();
        let (q, rem) = f.divide_by_linear(u);
        assert_eq!(rem, F::from(975u64));
        let padded = q.padded_to(pp.len()).unwrap();
        assert_eq!(proof.0, commit(&pp, padded.coefficients()).unwrap().0);
    }

    #[test]
    fn constant_polynomial_has_identity_proof() {
        let mut rng = StdRng::seed_from_u64(22);
        let (pp, _) = setup(3, &mut rng).unwrap();
        let proof = prove(&pp, &[F::from(42u64)], F::from(9u64)).unwrap();
        assert_eq!(proof, EvaluationProof::identity());
        assert_eq!(proof.0, crate::G1::identity());

        let padded = Polynomial::from_u64(&[42]).padded_to(pp.len()).unwrap();
        assert_eq!(prove(&pp, padded.coefficients(), F::from(9u64)).unwrap(), proof);
    }

    #[test]
    fn oversized_polynomial_is_rejected() {
        let mut rng = StdRng::seed_from_u64(23);
        let (pp, _) = setup(2, &mut rng).unwrap();
        let f = Polynomial::random(3, &mut rng);
        assert_eq!(
            prove(&pp, f.coefficients(), F::from(1u64)).unwrap_err(),
            KzgError::LengthMismatch { expected: 3, got: 4 }
        );
    }

    #[test]
    fn honest_prover_matches_free_function() {
        let mut rng = StdRng::seed_from_u64(24);
        let (pp, _) = setup(3, &mut rng).unwrap();
        let f = Polynomial::random(3, &mut rng);
        let u = F::from(77u64);
        let prover = HonestProver { pp: &pp };
        assert_eq!(prover.prove(f.coefficients(), u).unwrap(), prove(&pp, f.coefficients(), u).unwrap());
    }

    #[test]
    fn hiding_proof_combines_both_quotients() {
        let mut rng = StdRng::seed_from_u64(25);
        let (pp, _, hp) = setup_hiding(3, &mut rng).unwrap();
        let f = Polynomial::random(3, &mut rng);
        let r = Polynomial::random(3, &mut rng);
        let u = F::from(4u64);

        let opening = open_hiding(&pp, &f, &hp, &r, u).unwrap();
        let plain = prove(&pp, f.coefficients(), u).unwrap();
        let (q_r, _) = r.divide_by_linear(u);
        let blind = combine(hp.truncated(q_r.len()).unwrap(), q_r.coefficients(), None).unwrap();
        assert_eq!(opening.proof.0, (plain.0.into_group() + blind).into_affine());
        assert_eq!(opening.value, f.evaluate(u));
        assert_eq!(opening.blinding_value, r.evaluate(u));
    }
}
