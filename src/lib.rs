//! Public surface & core types
//!
//! KZG polynomial commitments over BN254. A prover binds a polynomial `f`
//! to a single G1 point and later opens it at a point `u` with a single G1
//! witness; the verifier checks one pairing identity against the one-element
//! G2 verification key `[α]G2`.
//!
//! ## Call order (public contract)
//!
//! ```text
//!   setup(d)           -> (pp, vk)               α is dropped and zeroized
//!   commit(pp, f)      -> C  = [f(α)]G1          |f| must equal |pp|
//!   prove(pp, f, u)    -> W  = [q(α)]G1          q = (f - f(u)) / (X - u)
//!   verify(C, W, u, v, vk)                       e(W, [α-u]G2) == e(C - [v]G1, G2)
//! ```
//!
//! The hiding flavour adds a second ladder `[β·αⁱ]G1` and a freshly sampled
//! blinding polynomial per commitment. The [`adversarial`] module keeps α and
//! forges openings to arbitrary values; it exists to show that everything
//! above rests on α staying secret, and is never selected implicitly.

#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms)]

/// Error taxonomy shared by every module.
pub mod errors;
/// Fixed-width scalar codec and canonical point bytes.
pub mod codec;
/// Coefficient-form polynomials (Horner, add/mul, division by `X - u`, Lagrange).
pub mod poly;
/// Trusted setup: public ladder, verification key, hiding ladder.
pub mod setup;
/// Linear commitment over the public ladder (plain and hiding).
pub mod commit;
/// Evaluation proofs via exact synthetic division.
pub mod prove;
/// Pairing-based verification predicate.
pub mod verify;
/// Compromised setup and forging prover.
pub mod adversarial;

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

pub use commit::{commit, commit_hiding, Aggregator};
pub use errors::KzgError;
pub use poly::Polynomial;
pub use prove::{
    open, open_hiding, prove, prove_hiding, quotient_coefficients, HidingOpening, HonestProver,
    Opening, Prover,
};
pub use setup::{setup, setup_hiding, HidingParameters, PublicParameters, VerificationKey};
pub use verify::{verify, verify_hiding, verify_hiding_opening, verify_opening};

/// Scalar field used across the crate (BN254).
pub type F = ark_bn254::Fr;

/// G1 affine group element used for parameters, commitments and proofs.
pub type G1 = ark_bn254::G1Affine;

/// G2 affine group element used for the verification key.
pub type G2 = ark_bn254::G2Affine;

/// Commitment to a polynomial: `[f(α)]G1` (plus `[r(α)]H` when hiding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct Commitment(pub G1);

/// Evaluation proof: commitment to the quotient `q(X) = (f(X) - f(u)) / (X - u)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct EvaluationProof(pub G1);

impl EvaluationProof {
    /// The proof for a constant polynomial: the group identity.
    pub fn identity() -> Self {
        EvaluationProof(G1::identity())
    }
}
