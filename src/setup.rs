//! Trusted setup
//!
//! Produces the public ladder `pp = ([α⁰]G1, [α¹]G1, …, [α^d]G1)` and the
//! verification key `[α]G2` from a freshly sampled secret α.
//!
//! Secret discipline:
//! - α lives in a [`ToxicWaste`] guard owned by the setup call's frame. It is
//!   never returned, stored, or logged, and the guard zeroizes it on drop.
//! - The hiding flavour samples an independent β, publishes `H = [β]G1` and
//!   the second ladder `[β·αⁱ]G1`. Using the same α for both ladders is what
//!   lets a single pairing check cover the value and blinding terms at once.
//! - Randomness is injected (`RngCore + CryptoRng`) so tests can run
//!   deterministically. Never reuse one seeded source for independent setups.

#![forbid(unsafe_code)]

use ark_bn254::{G1Projective, G2Projective};
use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_ff::UniformRand;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
};
use blake3::Hasher;
use rand::{CryptoRng, RngCore};
use tracing::instrument;
use zeroize::Zeroize;

use crate::{codec, KzgError, F, G1, G2};

/// Public ladder `[αⁱ]G1` for `i = 0..=d`.
///
/// Immutable once produced; safe to share read-only across threads. Always
/// holds at least `[1]G1` and `[α]G1`, including when decoded from bytes.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize)]
pub struct PublicParameters {
    powers: Vec<G1>,
}

/// Verification key `[α]G2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct VerificationKey {
    alpha_g2: G2,
}

/// Blinding base `H = [β]G1` and ladder `[β·αⁱ]G1` for hiding commitments.
#[derive(Debug, Clone, PartialEq, Eq, CanonicalSerialize)]
pub struct HidingParameters {
    h: G1,
    powers: Vec<G1>,
}

impl PublicParameters {
    /// Load an externally produced ladder. Needs at least `[1]G1` and `[α]G1`.
    pub fn from_powers(powers: Vec<G1>) -> Result<Self, KzgError> {
        if powers.len() < 2 {
            return Err(KzgError::InvalidDegree(powers.len().saturating_sub(1)));
        }
        Ok(Self { powers })
    }

    /// Maximum supported degree `d` (inclusive).
    #[inline]
    pub fn max_degree(&self) -> usize {
        self.powers.len().saturating_sub(1)
    }

    /// Number of ladder elements, `d + 1`.
    #[inline]
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    /// Always false for a constructed ladder; provided for slice-like symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// The full ladder.
    #[inline]
    pub fn powers(&self) -> &[G1] {
        &self.powers
    }

    /// `[1]G1`, the first ladder element.
    #[inline]
    pub fn g1(&self) -> G1 {
        self.powers.first().copied().unwrap_or_else(G1::generator)
    }

    /// Prefix of the ladder of length `len`.
    pub fn truncated(&self, len: usize) -> Result<&[G1], KzgError> {
        self.powers
            .get(..len)
            .ok_or(KzgError::LengthMismatch { expected: self.powers.len(), got: len })
    }

    /// BLAKE3 fingerprint of the ladder (compressed canonical points).
    pub fn digest(&self) -> [u8; 32] {
        let parts: Vec<Vec<u8>> = self.powers.iter().map(codec::encode_g1).collect();
        hash_parts(b"pp.g1", &parts)
    }
}

impl VerificationKey {
    /// Wrap an externally produced `[α]G2`.
    pub fn new(alpha_g2: G2) -> Self {
        Self { alpha_g2 }
    }

    /// `[α]G2`.
    #[inline]
    pub fn alpha_g2(&self) -> G2 {
        self.alpha_g2
    }

    /// The fixed G2 generator the key is expressed against.
    #[inline]
    pub fn g2(&self) -> G2 {
        G2::generator()
    }

    /// BLAKE3 fingerprint of the key.
    pub fn digest(&self) -> [u8; 32] {
        hash_parts(b"vk.g2", &[codec::encode_g2(&self.alpha_g2)])
    }
}

impl HidingParameters {
    /// Load an externally produced blinding ladder. Needs at least two powers,
    /// the first of which is `h`.
    pub fn from_parts(h: G1, powers: Vec<G1>) -> Result<Self, KzgError> {
        if powers.len() < 2 {
            return Err(KzgError::InvalidDegree(powers.len().saturating_sub(1)));
        }
        if powers[0] != h {
            return Err(KzgError::Encoding("blinding ladder does not start at H".into()));
        }
        Ok(Self { h, powers })
    }

    /// Blinding base `H = [β]G1`.
    #[inline]
    pub fn h(&self) -> G1 {
        self.h
    }

    /// Ladder `[β·αⁱ]G1`.
    #[inline]
    pub fn powers(&self) -> &[G1] {
        &self.powers
    }

    /// Number of ladder elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    /// Always false for a constructed ladder.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// Prefix of the blinding ladder of length `len`.
    pub fn truncated(&self, len: usize) -> Result<&[G1], KzgError> {
        self.powers
            .get(..len)
            .ok_or(KzgError::LengthMismatch { expected: self.powers.len(), got: len })
    }
}

impl Valid for PublicParameters {
    fn check(&self) -> Result<(), SerializationError> {
        if self.powers.len() < 2 {
            return Err(SerializationError::InvalidData);
        }
        self.powers.check()
    }
}

impl CanonicalDeserialize for PublicParameters {
    fn deserialize_with_mode<R: Read>(
        reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let powers = Vec::<G1>::deserialize_with_mode(reader, compress, validate)?;
        // Points were already checked per `validate`; the length invariant
        // holds even for unchecked decoding.
        Self::from_powers(powers).map_err(|_| SerializationError::InvalidData)
    }
}

impl Valid for HidingParameters {
    fn check(&self) -> Result<(), SerializationError> {
        if self.powers.len() < 2 || self.powers[0] != self.h {
            return Err(SerializationError::InvalidData);
        }
        self.h.check()?;
        self.powers.check()
    }
}

impl CanonicalDeserialize for HidingParameters {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let h = G1::deserialize_with_mode(&mut reader, compress, validate)?;
        let powers = Vec::<G1>::deserialize_with_mode(&mut reader, compress, validate)?;
        Self::from_parts(h, powers).map_err(|_| SerializationError::InvalidData)
    }
}

/// Secret scalar scoped to a setup call; zeroized when dropped.
pub(crate) struct ToxicWaste(F);

impl ToxicWaste {
    pub(crate) fn sample<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        ToxicWaste(F::rand(rng))
    }

    #[inline]
    pub(crate) fn expose(&self) -> &F {
        &self.0
    }

    fn wipe(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for ToxicWaste {
    fn drop(&mut self) {
        self.wipe();
    }
}

/// Honest trusted setup for polynomials of degree at most `degree`.
///
/// α is sampled, used, and zeroized inside this call.
#[instrument(level = "info", skip_all, fields(degree = degree))]
pub fn setup<R: RngCore + CryptoRng + ?Sized>(
    degree: usize,
    rng: &mut R,
) -> Result<(PublicParameters, VerificationKey), KzgError> {
    check_degree(degree)?;
    let alpha = ToxicWaste::sample(rng);
    Ok(derive_keys(degree, &alpha))
}

/// Honest trusted setup that also emits hiding parameters.
///
/// α and β are both dropped (and zeroized) before returning.
#[instrument(level = "info", skip_all, fields(degree = degree))]
pub fn setup_hiding<R: RngCore + CryptoRng + ?Sized>(
    degree: usize,
    rng: &mut R,
) -> Result<(PublicParameters, VerificationKey, HidingParameters), KzgError> {
    check_degree(degree)?;
    let alpha = ToxicWaste::sample(rng);
    let beta = ToxicWaste::sample(rng);

    let (pp, vk) = derive_keys(degree, &alpha);
    let h = (G1Projective::generator() * beta.expose()).into_affine();
    let powers = power_ladder(h.into_group(), &alpha, degree + 1);
    Ok((pp, vk, HidingParameters { h, powers }))
}

pub(crate) fn check_degree(degree: usize) -> Result<(), KzgError> {
    if degree == 0 {
        return Err(KzgError::InvalidDegree(degree));
    }
    Ok(())
}

/// Ladder and verification key for a given secret. Shared with the
/// compromised setup, which differs only in what it returns.
pub(crate) fn derive_keys(degree: usize, alpha: &ToxicWaste) -> (PublicParameters, VerificationKey) {
    let powers = power_ladder(G1Projective::generator(), alpha, degree + 1);
    let alpha_g2 = (G2Projective::generator() * alpha.expose()).into_affine();
    tracing::debug!(len = powers.len(), "derived public ladder");
    (PublicParameters { powers }, VerificationKey { alpha_g2 })
}

/// `[base, α·base, α²·base, …]` of length `len`, normalised in one batch.
fn power_ladder(base: G1Projective, alpha: &ToxicWaste, len: usize) -> Vec<G1> {
    let mut proj = Vec::with_capacity(len);
    let mut acc = base;
    for _ in 0..len {
        proj.push(acc);
        acc *= alpha.expose();
    }
    G1Projective::normalize_batch(&proj)
}

fn hash_parts(label: &[u8], parts: &[Vec<u8>]) -> [u8; 32] {
    let mut h = Hasher::new();
    h.update(b"KZG.params.v1");
    h.update(label);
    for p in parts {
        h.update(&(p.len() as u64).to_be_bytes());
        h.update(p);
    }
    *h.finalize().as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Bn254;
    use ark_ec::pairing::Pairing;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn degree_zero_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(setup(0, &mut rng).unwrap_err(), KzgError::InvalidDegree(0));
        assert_eq!(setup_hiding(0, &mut rng).unwrap_err(), KzgError::InvalidDegree(0));
    }

    #[test]
    fn ladder_has_degree_plus_one_powers() {
        let mut rng = StdRng::seed_from_u64(1);
        for d in [1usize, 4, 16] {
            let (pp, _) = setup(d, &mut rng).unwrap();
            assert_eq!(pp.len(), d + 1);
            assert_eq!(pp.max_degree(), d);
            assert_eq!(pp.g1(), G1::generator());
        }
    }

    #[test]
    fn ladder_is_geometric_in_alpha() {
        // e([α^{i+1}]G1, G2) == e([α^i]G1, [α]G2) for every rung.
        let mut rng = StdRng::seed_from_u64(2);
        let (pp, vk) = setup(5, &mut rng).unwrap();
        for w in pp.powers().windows(2) {
            assert_eq!(Bn254::pairing(w[1], vk.g2()), Bn254::pairing(w[0], vk.alpha_g2()));
        }
    }

    #[test]
    fn hiding_ladder_shares_alpha() {
        let mut rng = StdRng::seed_from_u64(3);
        let (pp, vk, hp) = setup_hiding(3, &mut rng).unwrap();
        assert_eq!(hp.len(), pp.len());
        assert_eq!(hp.powers()[0], hp.h());
        assert_ne!(hp.h(), pp.g1());
        for w in hp.powers().windows(2) {
            assert_eq!(Bn254::pairing(w[1], vk.g2()), Bn254::pairing(w[0], vk.alpha_g2()));
        }
    }

    #[test]
    fn same_seed_same_parameters_different_seed_different() {
        let (a, va) = setup(3, &mut StdRng::seed_from_u64(9)).unwrap();
        let (b, vb) = setup(3, &mut StdRng::seed_from_u64(9)).unwrap();
        let (c, vc) = setup(3, &mut StdRng::seed_from_u64(10)).unwrap();
        assert_eq!(a.digest(), b.digest());
        assert_eq!(va.digest(), vb.digest());
        assert_ne!(a.digest(), c.digest());
        assert_ne!(va.digest(), vc.digest());
    }

    #[test]
    fn loaded_ladders_are_validated() {
        assert_eq!(
            PublicParameters::from_powers(vec![G1::generator()]).unwrap_err(),
            KzgError::InvalidDegree(0)
        );
        let (pp, _) = setup(2, &mut StdRng::seed_from_u64(4)).unwrap();
        let reloaded = PublicParameters::from_powers(pp.powers().to_vec()).unwrap();
        assert_eq!(reloaded, pp);
        assert!(pp.truncated(4).is_err());
        assert_eq!(pp.truncated(2).unwrap().len(), 2);
    }

    #[test]
    fn wipe_run_on_drop_clears_the_secret_scalar() {
        // `Drop` delegates to `wipe`; the dropped value itself is unobservable.
        let mut waste = ToxicWaste(F::from(42u64));
        waste.wipe();
        assert_eq!(*waste.expose(), F::from(0u64));
    }

    #[test]
    fn short_ladders_do_not_decode() {
        assert!(matches!(
            PublicParameters::deserialize_compressed(&[0u8; 8][..]),
            Err(SerializationError::InvalidData)
        ));
        assert!(PublicParameters::deserialize_compressed_unchecked(&[0u8; 8][..]).is_err());

        // One-element ladder: length prefix 1 followed by the generator.
        let mut bytes = Vec::new();
        vec![G1::generator()].serialize_compressed(&mut bytes).unwrap();
        assert!(PublicParameters::deserialize_compressed(&bytes[..]).is_err());

        let (pp, _, hp) = setup_hiding(2, &mut StdRng::seed_from_u64(5)).unwrap();
        let mut bytes = Vec::new();
        pp.serialize_compressed(&mut bytes).unwrap();
        assert_eq!(PublicParameters::deserialize_compressed(&bytes[..]).unwrap(), pp);

        let mut bytes = Vec::new();
        hp.serialize_compressed(&mut bytes).unwrap();
        assert_eq!(HidingParameters::deserialize_compressed(&bytes[..]).unwrap(), hp);

        // H that does not head its own ladder.
        let mut bytes = Vec::new();
        pp.g1().serialize_compressed(&mut bytes).unwrap();
        hp.powers().to_vec().serialize_compressed(&mut bytes).unwrap();
        assert!(HidingParameters::deserialize_compressed(&bytes[..]).is_err());
    }

    #[test]
    fn accessors_do_not_panic_on_degenerate_ladders() {
        let empty = PublicParameters { powers: Vec::new() };
        assert_eq!(empty.max_degree(), 0);
        assert_eq!(empty.g1(), G1::generator());
        assert!(empty.is_empty());
    }
}
