//! Commitment engine
//!
//! A commitment is the linear combination `Σ cᵢ · pp[i]` of the public ladder,
//! i.e. `[f(α)]G1` without ever knowing α. The hiding flavour adds
//! `Σ rᵢ · pp_h[i] = [r(α)]H` for a blinding polynomial `r` sampled fresh per
//! commitment.
//!
//! Length discipline: the coefficient vector must match the ladder **exactly**.
//! There is no implicit zero-padding; callers pad with
//! [`Polynomial::padded_to`](crate::Polynomial::padded_to) if they mean to.

#![forbid(unsafe_code)]

use ark_bn254::G1Projective;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{PrimeField, Zero};
use tracing::instrument;

use crate::{Commitment, HidingParameters, KzgError, PublicParameters, F, G1};

/// Linear accumulator `Σ cᵢ · bases[i]` over a fixed base slice.
///
/// Shared by commitments and quotient (witness) commitments.
pub struct Aggregator<'a> {
    bases: &'a [G1],
    acc: G1Projective,
}

impl<'a> Aggregator<'a> {
    /// Start an accumulation against `bases`, beginning at the identity.
    pub fn new(bases: &'a [G1]) -> Self {
        Self { bases, acc: G1Projective::zero() }
    }

    /// Fold in `coeffs`, which must have exactly one scalar per base.
    pub fn add_coeffs(&mut self, coeffs: &[F]) -> Result<(), KzgError> {
        if coeffs.len() != self.bases.len() {
            return Err(KzgError::LengthMismatch { expected: self.bases.len(), got: coeffs.len() });
        }
        for (base, c) in self.bases.iter().zip(coeffs) {
            if c.is_zero() {
                continue;
            }
            self.acc += base.mul_bigint(c.into_bigint());
        }
        Ok(())
    }

    /// Finish and return the accumulated point in affine form.
    pub fn finalize(self) -> G1 {
        self.acc.into_affine()
    }
}

/// Commit to `coefficients` (low→high) against `pp`.
///
/// Fails with `LengthMismatch` unless `coefficients.len() == pp.len()`.
#[instrument(level = "debug", skip_all, fields(len = coefficients.len()))]
pub fn commit(pp: &PublicParameters, coefficients: &[F]) -> Result<Commitment, KzgError> {
    Ok(Commitment(combine(pp.powers(), coefficients, None)?))
}

/// Hiding commitment `[f(α)]G1 + [r(α)]H`.
///
/// Both vectors must match their ladders exactly. Sample `blinding` freshly
/// for every call; reusing it across commitments to the same `f` makes the
/// commitments equal.
#[instrument(level = "debug", skip_all, fields(len = coefficients.len()))]
pub fn commit_hiding(
    pp: &PublicParameters,
    coefficients: &[F],
    hp: &HidingParameters,
    blinding: &[F],
) -> Result<Commitment, KzgError> {
    Ok(Commitment(combine(pp.powers(), coefficients, Some((hp.powers(), blinding)))?))
}

/// `Σ cᵢ·bases[i]` plus, optionally, `Σ rᵢ·blind_bases[i]`.
pub(crate) fn combine(
    bases: &[G1],
    coeffs: &[F],
    blinding: Option<(&[G1], &[F])>,
) -> Result<G1, KzgError> {
    let mut agg = Aggregator::new(bases);
    agg.add_coeffs(coeffs)?;
    let value = agg.finalize();
    match blinding {
        None => Ok(value),
        Some((blind_bases, blind_coeffs)) => {
            let mut agg_r = Aggregator::new(blind_bases);
            agg_r.add_coeffs(blind_coeffs)?;
            Ok((value.into_group() + agg_r.finalize()).into_affine())
        }
    }
}
