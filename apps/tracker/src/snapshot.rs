//! Commitment snapshot read from disk.

use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use serde::Deserialize;

use commitpool_core::activities::Activity;
use commitpool_core::chain::ChainCommitmentRecord;

/// A contract record together with the activity it refers to, as exported
/// by a chain reader.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentSnapshot {
    pub account: String,
    pub activity: Activity,
    pub record: ChainCommitmentRecord,
}

impl CommitmentSnapshot {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read commitment file {}", path.display()))?;
        let snapshot: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed commitment file {}", path.display()))?;

        if !snapshot.record.exists {
            return Err(anyhow!("No commitment recorded for {}", snapshot.account));
        }
        if snapshot.record.activity_key != snapshot.activity.key {
            return Err(anyhow!(
                "Commitment activity {} does not match {}",
                snapshot.record.activity_key,
                snapshot.activity.key
            ));
        }
        Ok(snapshot)
    }
}
