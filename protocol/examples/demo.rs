//! Terminal walkthrough of the SELLO toolkit lifecycle.
//!
//! Generates a key pair, signs a small release tree as a checksum
//! manifest, verifies it, then tampers with a file and shows the per-file
//! report catching it while the manifest signature itself stays valid.
//!
//! Run with:
//!   cargo run --example demo

use std::fs;
use std::path::PathBuf;

use sello_protocol::sign::{generate_keypair, sign_files};
use sello_protocol::trust::Candidate;
use sello_protocol::verify::verify_files;
use sello_protocol::HashAlgorithm;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("release");
    fs::create_dir_all(&root)?;
    fs::write(root.join("app.bin"), b"binary contents")?;
    fs::write(root.join("README"), b"read me first")?;

    println!("{BOLD}{BLUE}== 1. key pair =={RESET}");
    let (public, secret) = generate_keypair("demo", None, 0)?;
    println!("key number: {}", public.keynum());

    println!("\n{BOLD}{BLUE}== 2. sign the release tree =={RESET}");
    let files = [PathBuf::from("app.bin"), PathBuf::from("README")];
    let artifact = sign_files(&secret, None, HashAlgorithm::Sha256, &files, &root, None)?;
    println!("artifact: {} bytes", artifact.len());

    println!("\n{BOLD}{BLUE}== 3. verify, pristine tree =={RESET}");
    let candidates = [Candidate::new(public, "demo.pub")];
    let (verified, outcomes) = verify_files(&candidates, &artifact, &root)?;
    println!("signature: {GREEN}valid{RESET} (key {})", verified.keynum);
    for (path, outcome) in &outcomes {
        println!("  {}: {GREEN}{outcome}{RESET}", path.display());
    }

    println!("\n{BOLD}{BLUE}== 4. tamper with app.bin =={RESET}");
    fs::write(root.join("app.bin"), b"EVIL contents")?;
    let (verified, outcomes) = verify_files(&candidates, &artifact, &root)?;
    println!(
        "signature: {GREEN}still valid{RESET} (key {}) — the listing is authentic",
        verified.keynum
    );
    for (path, outcome) in &outcomes {
        let color = if outcome.is_match() { GREEN } else { RED };
        println!("  {}: {color}{outcome}{RESET}", path.display());
    }

    Ok(())
}
