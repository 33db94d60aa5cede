//! Hashing and Ed25519 signing of claim bodies.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

use crate::error::ClaimError;

type Blake2b256 = Blake2b<U32>;

/// Compute the claim id: a 256-bit Blake2b hash of the encoded claim body.
pub fn claim_id(body: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(body);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Derive a signing key from a 32-byte seed (deterministic).
pub fn signing_key_from_seed(seed: &[u8; 32]) -> SigningKey {
    SigningKey::from_bytes(seed)
}

pub(crate) fn sign_body(body: &[u8], key: &SigningKey) -> ([u8; 32], Vec<u8>) {
    let signature = key.sign(body);
    (key.verifying_key().to_bytes(), signature.to_bytes().to_vec())
}

pub(crate) fn verify_body(
    body: &[u8],
    public_key: &[u8; 32],
    signature: &[u8],
) -> Result<(), ClaimError> {
    let verifying_key =
        VerifyingKey::from_bytes(public_key).map_err(|_| ClaimError::InvalidPublicKey)?;
    let signature =
        Signature::from_slice(signature).map_err(|_| ClaimError::InvalidSignature)?;
    verifying_key
        .verify(body, &signature)
        .map_err(|_| ClaimError::InvalidSignature)
}
