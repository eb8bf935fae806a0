//! KZG demo CLI
//!
//! Usage (defaults in parentheses):
//!   cargo run --bin kzg-demo -- \
//!     [--degree 4] [--point 5] [--fake 999] [--seed <u64>] \
//!     [--hiding false] [--export params.bin]
//!
//! Flags:
//!   --degree <d>      : max degree of the setup; the demo polynomial is
//!                       f(x) = (d+1) + d·x + … + 1·x^d   (4 ⇒ 5+4x+3x²+2x³+x⁴)
//!   --point <u>       : evaluation point (5)
//!   --fake <v'>       : value the forging prover claims (999)
//!   --seed <u64>      : deterministic randomness (tests/demos only)
//!   --hiding <bool>   : also run the hiding flavour (false)
//!   --export <PATH>   : write pp + vk as arkworks canonical compressed bytes
//!
//! Without --seed the setup draws from OS entropy, except in `dev-srs` builds
//! which fall back to a fixed seed. Logging honours RUST_LOG (default info).

#![forbid(unsafe_code)]

use std::{env, fs, path::Path};

use anyhow::{bail, Context};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use kzg_pcs::{
    adversarial, commit, commit_hiding, open, open_hiding, setup_hiding, verify, verify_hiding_opening,
    verify_opening, Polynomial, PublicParameters, VerificationKey, F,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

fn parse_flag(args: &[String], key: &str) -> Option<String> {
    let mut it = args.iter();
    while let Some(a) = it.next() {
        if a == key {
            return it.next().cloned();
        }
    }
    None
}

fn parse_bool(s: &str) -> bool {
    matches!(s, "1" | "true" | "True" | "TRUE" | "yes" | "y")
}

fn parse_u64_flag(args: &[String], key: &str, default: u64) -> anyhow::Result<u64> {
    match parse_flag(args, key) {
        None => Ok(default),
        Some(s) => s.parse::<u64>().with_context(|| format!("{key} expects an unsigned integer, got {s:?}")),
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        #[cfg(feature = "dev-srs")]
        None => {
            tracing::warn!("(dev-srs) using fixed demo seed; parameters are not secret");
            StdRng::from_seed([42u8; 32])
        }
        #[cfg(not(feature = "dev-srs"))]
        None => StdRng::from_entropy(),
    }
}

/// Exported layout: `pp || vk`, arkworks canonical compressed bytes.
fn export_params(pp: &PublicParameters, vk: &VerificationKey) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    pp.serialize_compressed(&mut bytes)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    vk.serialize_compressed(&mut bytes)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(bytes)
}

/// Inverse of [`export_params`]; rejects trailing bytes.
fn import_params(mut bytes: &[u8]) -> anyhow::Result<(PublicParameters, VerificationKey)> {
    let pp = PublicParameters::deserialize_compressed(&mut bytes)
        .map_err(|e| anyhow::anyhow!("decoding pp: {e}"))?;
    let vk = VerificationKey::deserialize_compressed(&mut bytes)
        .map_err(|e| anyhow::anyhow!("decoding vk: {e}"))?;
    if !bytes.is_empty() {
        bail!("{} trailing bytes after vk", bytes.len());
    }
    Ok((pp, vk))
}

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().collect();
    let degree = parse_u64_flag(&args, "--degree", 4)? as usize;
    let u = F::from(parse_u64_flag(&args, "--point", 5)?);
    let fake = F::from(parse_u64_flag(&args, "--fake", 999)?);
    let seed = match parse_flag(&args, "--seed") {
        Some(s) => Some(s.parse::<u64>().context("--seed expects an unsigned integer")?),
        None => None,
    };
    let hiding = parse_flag(&args, "--hiding").map(|s| parse_bool(&s)).unwrap_or(false);

    if degree == 0 {
        bail!("--degree must be at least 1");
    }

    let f = Polynomial::from_u64(&(1..=degree as u64 + 1).rev().collect::<Vec<_>>());
    let v = f.evaluate(u);
    println!("f has {} coefficients; f(u) = {}", f.len(), v);

    // --- Honest ceremony: α never leaves setup ---
    let mut rng = make_rng(seed);
    let (pp, vk) = kzg_pcs::setup(degree, &mut rng)?;
    println!("pp digest: {}", hex(&pp.digest()));
    println!("vk digest: {}", hex(&vk.digest()));

    let com_f = commit(&pp, f.coefficients())?;
    let opening = open(&pp, &f, u)?;
    println!("honest proof, claim v = {}: {}", v, verify_opening(&com_f, &opening, &vk));
    let wrong = v + F::from(1u64);
    println!(
        "honest proof, claim v = {}: {}",
        wrong,
        verify(&com_f, &opening.proof, u, wrong, &vk)
    );

    if hiding {
        let (pp_h, vk_h, hp) = setup_hiding(degree, &mut rng)?;
        let r1 = Polynomial::random(degree, &mut rng);
        let r2 = Polynomial::random(degree, &mut rng);
        let c1 = commit_hiding(&pp_h, f.coefficients(), &hp, r1.coefficients())?;
        let c2 = commit_hiding(&pp_h, f.coefficients(), &hp, r2.coefficients())?;
        println!("hiding commitments to the same f differ: {}", c1 != c2);
        let o1 = open_hiding(&pp_h, &f, &hp, &r1, u)?;
        println!("hiding proof verifies: {}", verify_hiding_opening(&c1, &o1, hp.h(), &vk_h));
    }

    // --- Compromised ceremony: α is kept ---
    let (pp_bad, vk_bad, trapdoor) = adversarial::setup(degree, &mut rng)?;
    let com_bad = commit(&pp_bad, f.coefficients())?;
    let forged = adversarial::prove(&pp_bad, f.coefficients(), u, &trapdoor, fake)?;
    println!(
        "forged proof, claim v' = {} (true value {}): {}",
        fake,
        v,
        verify(&com_bad, &forged, u, fake, &vk_bad)
    );

    if let Some(p) = parse_flag(&args, "--export") {
        let bytes = export_params(&pp, &vk)?;
        fs::write(Path::new(&p), &bytes).with_context(|| format!("writing {p}"))?;
        println!("Wrote parameters to {} ({} bytes)", p, bytes.len());

        let reread = fs::read(Path::new(&p)).with_context(|| format!("reading {p}"))?;
        let (pp2, vk2) = import_params(&reread)?;
        if pp2.digest() != pp.digest() || vk2.digest() != vk.digest() {
            bail!("reloaded parameters differ from the exported ones");
        }
        println!("reloaded proof verifies: {}", verify_opening(&com_f, &opening, &vk2));
    }

    Ok(())
}
