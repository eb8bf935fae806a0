//! Compromised setup and forging prover
//!
//! Whoever keeps α can open any commitment to any value. Given
//! `C = [f(α)]G1` and a target `v'`, the forger computes
//!
//! ```text
//!   q' = (f(α) - v') / (α - u)        (in the scalar field)
//!   W' = [q']G1
//! ```
//!
//! and `e(W', [α-u]G2) == e(C - [v']G1, G2)` holds by construction. The
//! verifier is unchanged and cannot tell. Nothing in this module is reachable
//! from the honest API; callers opt in by name.

#![forbid(unsafe_code)]

use std::fmt;

use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::Field;
use rand::{CryptoRng, RngCore};
use tracing::instrument;
use zeroize::Zeroize;

use crate::{
    poly,
    prove::Prover,
    setup::{check_degree, derive_keys, ToxicWaste},
    EvaluationProof, KzgError, PublicParameters, VerificationKey, F, G1,
};

/// The leaked setup secret α.
///
/// Zeroized on drop. `Debug` never prints the scalar.
pub struct Trapdoor(F);

impl Trapdoor {
    /// The secret scalar.
    pub fn alpha(&self) -> F {
        self.0
    }
}

impl fmt::Debug for Trapdoor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Trapdoor(<redacted>)")
    }
}

impl Drop for Trapdoor {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Setup that hands the secret back to the caller.
///
/// The ladder and key are identical in form to [`crate::setup`]; only the
/// returned trapdoor differs.
#[instrument(level = "info", skip_all, fields(degree = degree))]
pub fn setup<R: RngCore + CryptoRng + ?Sized>(
    degree: usize,
    rng: &mut R,
) -> Result<(PublicParameters, VerificationKey, Trapdoor), KzgError> {
    check_degree(degree)?;
    let alpha = ToxicWaste::sample(rng);
    let (pp, vk) = derive_keys(degree, &alpha);
    tracing::warn!("setup secret retained by caller; parameters are compromised");
    Ok((pp, vk, Trapdoor(*alpha.expose())))
}

/// Forge a proof that `coefficients` evaluates to `fake_value` at `u`.
///
/// Fails with `NonInvertible` when `u == α`, and with `LengthMismatch` when
/// the polynomial does not fit `pp`.
#[instrument(level = "info", skip_all)]
pub fn prove(
    pp: &PublicParameters,
    coefficients: &[F],
    u: F,
    trapdoor: &Trapdoor,
    fake_value: F,
) -> Result<EvaluationProof, KzgError> {
    if coefficients.len() > pp.len() {
        return Err(KzgError::LengthMismatch { expected: pp.len(), got: coefficients.len() });
    }
    let alpha = trapdoor.alpha();
    let f_alpha = poly::horner(coefficients, alpha);
    let denom_inv = (alpha - u).inverse().ok_or(KzgError::NonInvertible)?;
    let q_fake = (f_alpha - fake_value) * denom_inv;
    tracing::warn!("forged evaluation proof produced with leaked setup secret");
    Ok(EvaluationProof((pp.g1() * q_fake).into_affine()))
}

/// [`Prover`] that answers every opening with a fixed fake value.
pub struct ForgingProver<'a> {
    /// Ladder the victim committed against.
    pub pp: &'a PublicParameters,
    /// Leaked setup secret.
    pub trapdoor: &'a Trapdoor,
    /// Value every forged opening claims.
    pub fake_value: F,
}

impl Prover for ForgingProver<'_> {
    fn prove(&self, coefficients: &[F], point: F) -> Result<EvaluationProof, KzgError> {
        prove(self.pp, coefficients, point, self.trapdoor, self.fake_value)
    }
}

/// `[f(α)]G1` computed directly from the secret, bypassing the ladder.
///
/// Equals the honest commitment; useful to show the trapdoor reproduces it.
pub fn commit_with_trapdoor(coefficients: &[F], trapdoor: &Trapdoor) -> G1 {
    (G1::generator() * poly::horner(coefficients, trapdoor.alpha())).into_affine()
}
