//! Fixed-width encodings
//!
//! Scalars travel as 32 little-endian bytes in canonical form (strictly less
//! than the BN254 scalar modulus). Points use arkworks' compressed canonical
//! encoding, which feeds the parameter digests.

#![forbid(unsafe_code)]

use ark_ff::{BigInteger, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::{KzgError, F, G1, G2};

/// Byte width of an encoded scalar.
pub const SCALAR_BYTES: usize = 32;

/// Encode a scalar as 32 little-endian bytes.
pub fn encode_scalar(s: &F) -> [u8; SCALAR_BYTES] {
    let mut out = [0u8; SCALAR_BYTES];
    let bytes = s.into_bigint().to_bytes_le();
    out[..bytes.len()].copy_from_slice(&bytes);
    out
}

/// Decode a scalar from 32 little-endian bytes, rejecting non-canonical input.
pub fn decode_scalar(bytes: &[u8; SCALAR_BYTES]) -> Result<F, KzgError> {
    Ok(F::deserialize_compressed(&bytes[..])?)
}

/// Compressed canonical bytes of a G1 point.
pub fn encode_g1(p: &G1) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(p.compressed_size());
    p.serialize_compressed(&mut bytes)
        .expect("G1 serialization into a Vec should not fail");
    bytes
}

/// Compressed canonical bytes of a G2 point.
pub fn encode_g2(p: &G2) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(p.compressed_size());
    p.serialize_compressed(&mut bytes)
        .expect("G2 serialization into a Vec should not fail");
    bytes
}
