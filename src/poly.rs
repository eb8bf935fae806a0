//! Coefficient-form polynomials
//!
//! `Polynomial` stores monomial coefficients **low→high** (index `i` is the
//! coefficient of `Xⁱ`). Lengths are kept exactly as given: trailing zeros
//! are never trimmed, because the commitment ladder requires an exact match
//! between coefficient count and parameter count.
//!
//! Helpers here are the peripheral algebra the commitment core consumes:
//! - Horner evaluation (high→low fold),
//! - addition and multiplication,
//! - synthetic division by `(X - u)` returning quotient and remainder,
//! - Lagrange interpolation from `(x, y)` pairs.

#![forbid(unsafe_code)]

use std::ops::{Add, Mul};

use ark_ff::{Field, One, UniformRand, Zero};
use rand::Rng;

use crate::{KzgError, F};

/// Immutable polynomial in monomial basis (coefficients low→high).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial {
    coeffs: Vec<F>,
}

impl Polynomial {
    /// Wrap a coefficient vector (low→high). No trimming is performed.
    pub fn new(coeffs: Vec<F>) -> Self {
        Self { coeffs }
    }

    /// Convenience constructor from small integer coefficients.
    pub fn from_u64(coeffs: &[u64]) -> Self {
        Self::new(coeffs.iter().map(|&c| F::from(c)).collect())
    }

    /// Sample `degree + 1` uniform coefficients.
    ///
    /// Used for blinding polynomials in the hiding flavour: sample a fresh one
    /// for every commitment, even when committing the same `f` again.
    pub fn random<R: Rng + ?Sized>(degree: usize, rng: &mut R) -> Self {
        Self::new((0..=degree).map(|_| F::rand(rng)).collect())
    }

    /// Coefficients low→high.
    #[inline]
    pub fn coefficients(&self) -> &[F] {
        &self.coeffs
    }

    /// Number of stored coefficients.
    #[inline]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// True for the empty (zero) polynomial.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Nominal degree, `len - 1` (0 for the empty polynomial).
    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Return a copy zero-padded to exactly `len` coefficients.
    ///
    /// Fails with `LengthMismatch` if the polynomial is already longer.
    pub fn padded_to(&self, len: usize) -> Result<Self, KzgError> {
        if self.coeffs.len() > len {
            return Err(KzgError::LengthMismatch { expected: len, got: self.coeffs.len() });
        }
        let mut coeffs = self.coeffs.clone();
        coeffs.resize(len, F::zero());
        Ok(Self::new(coeffs))
    }

    /// Evaluate at `x` with Horner's rule.
    pub fn evaluate(&self, x: F) -> F {
        horner(&self.coeffs, x)
    }

    /// Divide by `(X - u)`, returning `(quotient, remainder)`.
    ///
    /// The remainder equals `f(u)`; the quotient has `len - 1` coefficients.
    pub fn divide_by_linear(&self, u: F) -> (Self, F) {
        let (q, rem) = synthetic_division(&self.coeffs, u);
        (Self::new(q), rem)
    }

    /// Lagrange interpolation through `points`.
    ///
    /// Returns exactly `points.len()` coefficients. Abscissae must be
    /// pairwise distinct.
    pub fn interpolate(points: &[(F, F)]) -> Result<Self, KzgError> {
        let n = points.len();
        for (i, (xi, _)) in points.iter().enumerate() {
            if points[i + 1..].iter().any(|(xj, _)| xj == xi) {
                return Err(KzgError::DuplicatePoint);
            }
        }

        let mut acc = vec![F::zero(); n];
        for (i, &(xi, yi)) in points.iter().enumerate() {
            // numerator ∏_{j≠i} (X - x_j), denominator ∏_{j≠i} (x_i - x_j)
            let mut basis = vec![F::one()];
            let mut denom = F::one();
            for (j, &(xj, _)) in points.iter().enumerate() {
                if i == j {
                    continue;
                }
                basis = mul_by_linear(&basis, xj);
                denom *= xi - xj;
            }
            let scale = yi * denom.inverse().ok_or(KzgError::DuplicatePoint)?;
            for (a, b) in acc.iter_mut().zip(basis.iter()) {
                *a += *b * scale;
            }
        }
        Ok(Self::new(acc))
    }
}

impl From<Vec<F>> for Polynomial {
    fn from(coeffs: Vec<F>) -> Self {
        Self::new(coeffs)
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let (long, short) = if self.len() >= rhs.len() { (self, rhs) } else { (rhs, self) };
        let mut out = long.coeffs.clone();
        for (o, s) in out.iter_mut().zip(short.coeffs.iter()) {
            *o += s;
        }
        Polynomial::new(out)
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        if self.is_empty() || rhs.is_empty() {
            return Polynomial::default();
        }
        let mut out = vec![F::zero(); self.len() + rhs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] += *a * b;
            }
        }
        Polynomial::new(out)
    }
}

/// Horner fold over coefficients stored low→high.
pub fn horner(coeffs: &[F], x: F) -> F {
    let mut acc = F::zero();
    for &c in coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

/// Synthetic division of `coeffs` (low→high) by `(X - u)`.
///
/// Processes from the highest degree down, carrying `b_{i-1} = a_i + u·b_i`.
/// Returns the quotient (low→high, `len - 1` entries) and the remainder `f(u)`.
pub fn synthetic_division(coeffs: &[F], u: F) -> (Vec<F>, F) {
    let n = coeffs.len();
    if n == 0 {
        return (Vec::new(), F::zero());
    }
    let mut q = vec![F::zero(); n - 1];
    let mut carry = F::zero();
    for i in (1..n).rev() {
        carry = coeffs[i] + u * carry;
        q[i - 1] = carry;
    }
    let rem = coeffs[0] + u * carry;
    (q, rem)
}

/// Multiply a low→high coefficient vector by `(X - root)`.
fn mul_by_linear(coeffs: &[F], root: F) -> Vec<F> {
    let mut out = vec![F::zero(); coeffs.len() + 1];
    for (k, &c) in coeffs.iter().enumerate() {
        out[k + 1] += c;
        out[k] -= root * c;
    }
    out
}
