//! The claim type, its builder, and its binary transaction form.

use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tessera_types::{Entity, EntityId, Timestamp};

use crate::error::ClaimError;
use crate::signing::{claim_id, sign_body, verify_body};

/// Key/value data asserted by a claim. Ordered so the encoded body, and
/// therefore the claim id, is deterministic.
pub type ClaimData = BTreeMap<String, String>;

/// Something that can be submitted to a chain as a transaction payload.
pub trait ClaimPayload {
    /// Serialize to the bytes broadcast to the network.
    fn to_binary(&self) -> Result<Vec<u8>, ClaimError>;
}

/// Ed25519 proof that the holder of `public_key` made the claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimProof {
    pub public_key: [u8; 32],
    pub signature: Vec<u8>,
}

/// A signed assertion made by an issuer about a subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    id: [u8; 32],
    data: ClaimData,
    issuer: EntityId,
    subject: EntityId,
    issued: Timestamp,
    proof: Option<ClaimProof>,
}

/// The part of a claim covered by its id and signature.
#[derive(Serialize)]
struct ClaimBody<'a> {
    data: &'a ClaimData,
    issuer: &'a EntityId,
    subject: &'a EntityId,
    issued: Timestamp,
}

impl Claim {
    pub fn builder<'k>() -> ClaimBuilder<'k> {
        ClaimBuilder::default()
    }

    pub fn id(&self) -> &[u8; 32] {
        &self.id
    }

    pub fn id_hex(&self) -> String {
        hex::encode(self.id)
    }

    pub fn data(&self) -> &ClaimData {
        &self.data
    }

    pub fn issuer(&self) -> &EntityId {
        &self.issuer
    }

    pub fn subject(&self) -> &EntityId {
        &self.subject
    }

    pub fn issued(&self) -> Timestamp {
        self.issued
    }

    pub fn proof(&self) -> Option<&ClaimProof> {
        self.proof.as_ref()
    }

    pub fn is_signed(&self) -> bool {
        self.proof.is_some()
    }

    /// Check that the id matches the body and, if signed, that the
    /// signature is valid.
    pub fn verify(&self) -> Result<(), ClaimError> {
        let body = self.encode_body()?;
        if claim_id(&body) != self.id {
            return Err(ClaimError::IdMismatch);
        }
        if let Some(proof) = &self.proof {
            verify_body(&body, &proof.public_key, &proof.signature)?;
        }
        Ok(())
    }

    /// Decode a claim from its binary transaction form and verify it.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, ClaimError> {
        let claim: Claim = bincode::deserialize(bytes)?;
        claim.verify()?;
        Ok(claim)
    }

    fn encode_body(&self) -> Result<Vec<u8>, ClaimError> {
        encode_body(&self.data, &self.issuer, &self.subject, self.issued)
    }
}

impl ClaimPayload for Claim {
    fn to_binary(&self) -> Result<Vec<u8>, ClaimError> {
        Ok(bincode::serialize(self)?)
    }
}

fn encode_body(
    data: &ClaimData,
    issuer: &EntityId,
    subject: &EntityId,
    issued: Timestamp,
) -> Result<Vec<u8>, ClaimError> {
    let body = ClaimBody {
        data,
        issuer,
        subject,
        issued,
    };
    Ok(bincode::serialize(&body)?)
}

/// Builds a [`Claim`]. Issuer and subject are required; data may be empty.
#[derive(Default)]
pub struct ClaimBuilder<'k> {
    data: ClaimData,
    issuer: Option<EntityId>,
    subject: Option<EntityId>,
    issued: Option<Timestamp>,
    signer: Option<&'k SigningKey>,
}

impl<'k> ClaimBuilder<'k> {
    /// Replace the whole data map.
    pub fn data(mut self, data: ClaimData) -> Self {
        self.data = data;
        self
    }

    /// Add one data entry.
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn issuer<E: Entity + ?Sized>(mut self, issuer: &E) -> Self {
        self.issuer = Some(issuer.id());
        self
    }

    pub fn subject<E: Entity + ?Sized>(mut self, subject: &E) -> Self {
        self.subject = Some(subject.id());
        self
    }

    /// Fix the issuance time. Defaults to now.
    pub fn issued_at(mut self, issued: Timestamp) -> Self {
        self.issued = Some(issued);
        self
    }

    pub fn sign_with(mut self, key: &'k SigningKey) -> Self {
        self.signer = Some(key);
        self
    }

    pub fn build(self) -> Result<Claim, ClaimError> {
        let issuer = self.issuer.ok_or(ClaimError::MissingIssuer)?;
        let subject = self.subject.ok_or(ClaimError::MissingSubject)?;
        let issued = self.issued.unwrap_or_else(Timestamp::now);

        let body = encode_body(&self.data, &issuer, &subject, issued)?;
        let id = claim_id(&body);
        let proof = self.signer.map(|key| {
            let (public_key, signature) = sign_body(&body, key);
            ClaimProof {
                public_key,
                signature,
            }
        });

        Ok(Claim {
            id,
            data: self.data,
            issuer,
            subject,
            issued,
            proof,
        })
    }
}
