use ethers::types::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::types::Hash;
use crate::services::hashing::keccak256;

/// The parts of a Hardhat compilation artifact the fixtures need.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub abi: serde_json::Value,
    /// Creation bytecode, constructor arguments not included.
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: Artifact =
            serde_json::from_str(json).map_err(|e| Error::Artifact(e.to_string()))?;
        if artifact.bytecode.is_empty() {
            return Err(Error::Artifact(format!(
                "{} has no creation bytecode (abstract contract or interface?)",
                artifact.contract_name
            )));
        }
        Ok(artifact)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Artifact(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// `keccak256(bytecode)`, what a factory's CREATE2 commits to.
    pub fn init_code_hash(&self) -> Hash {
        keccak256(&self.bytecode)
    }
}

/// Contracts the pair fixtures deploy.
#[derive(Debug, Clone)]
pub struct FixtureArtifacts {
    pub factory: Artifact,
    pub pair: Artifact,
    pub erc20: Artifact,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIR_JSON: &str = r#"{
        "_format": "hh-sol-artifact-1",
        "contractName": "PegasysPair",
        "sourceName": "contracts/pegasys-core/PegasysPair.sol",
        "abi": [],
        "bytecode": "0x6080604052348015600f57600080fd5b50",
        "deployedBytecode": "0x6080"
    }"#;

    #[test]
    fn parses_hardhat_artifact() {
        let artifact = Artifact::from_json(PAIR_JSON).unwrap();
        assert_eq!(artifact.contract_name, "PegasysPair");
        assert_eq!(artifact.bytecode.len(), 17);
        assert_eq!(
            format!("{:?}", artifact.init_code_hash()),
            "0x9782e38b2927e497dbec51c468bc9da14d403478b2bb602f2236aa3d61a26e68"
        );
    }

    #[test]
    fn rejects_empty_bytecode() {
        let json = r#"{ "contractName": "IPegasysPair", "abi": [], "bytecode": "0x" }"#;
        assert!(matches!(Artifact::from_json(json), Err(Error::Artifact(_))));
        assert!(matches!(Artifact::from_json("{"), Err(Error::Artifact(_))));
    }
}
