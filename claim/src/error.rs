use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("claim has no issuer")]
    MissingIssuer,

    #[error("claim has no subject")]
    MissingSubject,

    #[error("claim serialization failed")]
    Serialization(#[from] bincode::Error),

    #[error("claim id does not match its contents")]
    IdMismatch,

    #[error("invalid public key in claim proof")]
    InvalidPublicKey,

    #[error("invalid claim signature")]
    InvalidSignature,
}
