use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

pub fn verify_detached_signature_hex(
    payload: &[u8],
    public_key_hex: &str,
    signature_hex: &str,
) -> Result<bool> {
    let key_bytes: [u8; 32] = decode_exact(public_key_hex, "signing key")?;
    let signature_bytes: [u8; 64] = decode_exact(signature_hex, "signature")?;

    let verifying_key =
        VerifyingKey::from_bytes(&key_bytes).context("invalid Ed25519 signing key bytes")?;
    let signature = Signature::from_bytes(&signature_bytes);

    Ok(verifying_key.verify(payload, &signature).is_ok())
}

pub fn verify_file_signature(
    path: &Path,
    signature_path: &Path,
    public_key_hex: &str,
) -> Result<bool> {
    let payload = fs::read(path)
        .with_context(|| format!("failed to read signed file: {}", path.display()))?;
    let signature_hex = fs::read_to_string(signature_path).with_context(|| {
        format!(
            "failed to read signature sidecar: {}",
            signature_path.display()
        )
    })?;
    verify_detached_signature_hex(&payload, public_key_hex, signature_hex.trim())
}

fn decode_exact<const N: usize>(hex_input: &str, what: &str) -> Result<[u8; N]> {
    let bytes =
        hex::decode(hex_input.trim()).with_context(|| format!("failed to decode {what} hex"))?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| anyhow!("invalid {what} length: expected {N} bytes, got {actual}"))
}
