/// On-chain distances are stored as hundredths of a unit.
pub const GOAL_SCALE: f64 = 100.0;

/// Fixed-point decimals of the stake token (DAI).
pub const STAKE_TOKEN_DECIMALS: u32 = 18;

/// Distance unit used for chain-sourced commitments
pub const DISTANCE_UNIT: &str = "mi";

/// Stakes at or above this amount get a "big commitment" warning
pub const HIGH_STAKE_THRESHOLD: u32 = 100;

/// Gas limit for depositAndCommit
pub const DEPOSIT_GAS_LIMIT: u64 = 5_000_000;

/// Gas limit for requestActivityDistance
pub const PROGRESS_REQUEST_GAS_LIMIT: u64 = 500_000;

/// Oracle job id used for activity distance requests
pub const DEFAULT_ORACLE_JOB_ID: &str = "692ce2ecba234a3f9a0c579f8bf7a4cb";

/// Upper bound on registry probes when loading the activity catalog
pub const MAX_CATALOG_ENTRIES: u32 = 256;

/// Access tokens expiring within this many seconds are refreshed first
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;
