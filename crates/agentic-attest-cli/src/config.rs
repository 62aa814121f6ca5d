//! Ledger location and router settings.

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use agentic_attest::ContractConfig;

pub const LEDGER_ENV: &str = "AGENTIC_ATTEST_LEDGER";
pub const DEMO_ENV: &str = "AGENTIC_ATTEST_DEMO";

fn agentic_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").map_err(|_| anyhow!("HOME not set"))?;
    Ok(PathBuf::from(home).join(".agentic"))
}

/// `--ledger`, else `$AGENTIC_ATTEST_LEDGER`, else
/// `~/.agentic/attest/ledger.json`.
pub fn ledger_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(LEDGER_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    Ok(agentic_dir()?.join("attest").join("ledger.json"))
}

/// Demo seeding is on with `--demo` or `AGENTIC_ATTEST_DEMO=1`.
pub fn contract_config(demo_flag: bool) -> ContractConfig {
    let demo_env = std::env::var(DEMO_ENV)
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);
    ContractConfig {
        demo_seed: demo_flag || demo_env,
    }
}
