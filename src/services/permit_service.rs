use ethers::signers::{LocalWallet, Signer};
use ethers::types::Signature;
use serde::{Deserialize, Serialize};

use crate::chain::TokenMetadata;
use crate::eip712::{approval_digest, Eip712Domain, PermitPayload};
use crate::error::{Error, Result};
use crate::models::types::{Address, Hash, U256};

/// `(v, r, s)` as `permit` takes them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitSignature {
    pub v: u8,
    pub r: Hash,
    pub s: Hash,
}

impl PermitSignature {
    fn from_signature(signature: &Signature) -> Result<Self> {
        let v = u8::try_from(signature.v)
            .map_err(|_| Error::InvalidSignature(format!("v = {}", signature.v)))?;
        Ok(PermitSignature {
            v,
            r: u256_to_hash(signature.r),
            s: u256_to_hash(signature.s),
        })
    }

    fn to_signature(self) -> Signature {
        Signature {
            r: U256::from_big_endian(self.r.as_bytes()),
            s: U256::from_big_endian(self.s.as_bytes()),
            v: u64::from(self.v),
        }
    }
}

fn u256_to_hash(value: U256) -> Hash {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    Hash::from(bytes)
}

/// Approval digest for `token`, with the domain name read from the token
/// itself.
pub async fn token_approval_digest(
    meta: &(impl TokenMetadata + ?Sized),
    token: Address,
    chain_id: u64,
    permit: &PermitPayload,
) -> Result<Hash> {
    let name = meta.name(token).await.map_err(Error::collaborator("name()"))?;
    log::debug!("permit domain for {:?}: name {:?}, chain {}", token, name, chain_id);

    let domain = Eip712Domain::new(name, chain_id, token);
    Ok(approval_digest(&domain, permit))
}

/// Signs the raw typed-data digest with the owner's key.
pub fn sign_permit(
    wallet: &LocalWallet,
    domain: &Eip712Domain,
    permit: &PermitPayload,
) -> Result<PermitSignature> {
    if wallet.address() != permit.owner {
        return Err(Error::SignerMismatch {
            owner: permit.owner,
            signer: wallet.address(),
        });
    }

    let digest = approval_digest(domain, permit);
    let signature = wallet
        .sign_hash(digest)
        .map_err(|e| Error::InvalidSignature(e.to_string()))?;
    PermitSignature::from_signature(&signature)
}

/// Address that produced `signature` over this permit.
pub fn recover_permit_signer(
    domain: &Eip712Domain,
    permit: &PermitPayload,
    signature: &PermitSignature,
) -> Result<Address> {
    let digest = approval_digest(domain, permit);
    signature
        .to_signature()
        .recover(digest)
        .map_err(|e| Error::InvalidSignature(e.to_string()))
}
