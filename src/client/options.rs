use serde::{Deserialize, Serialize};

use crate::util::{Result, Status};

/// Emulator-wide limits and tuning.
///
/// Every field has a default matching the real service's documented limits,
/// so a partial JSON document only needs to name what it changes:
///
/// ```ignore
/// let options = EmulatorOptions::from_json(r#"{ "max_value_size": 1024 }"#)?;
/// let client = Client::with_options("test-project", options)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorOptions {
    /// Longest accepted row key, in bytes
    /// Default: 4KB
    pub max_row_key_size: usize,

    /// Largest accepted cell value, in bytes
    /// Default: 100MB
    pub max_value_size: usize,

    /// Most mutations accepted for one row in one request
    /// Default: 100,000
    pub max_mutations_per_row: usize,

    /// Number of per-row commit lock stripes per table
    /// Default: 64
    pub row_lock_stripes: usize,
}

impl Default for EmulatorOptions {
    fn default() -> Self {
        EmulatorOptions {
            max_row_key_size: 4 * 1024,           // 4KB
            max_value_size: 100 * 1024 * 1024,    // 100MB
            max_mutations_per_row: 100_000,
            row_lock_stripes: 64,
        }
    }
}

impl EmulatorOptions {
    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: EmulatorOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_row_key_size == 0 {
            return Err(Status::invalid_argument("max_row_key_size must be positive"));
        }
        if self.max_mutations_per_row == 0 {
            return Err(Status::invalid_argument(
                "max_mutations_per_row must be positive",
            ));
        }
        if self.row_lock_stripes == 0 {
            return Err(Status::invalid_argument("row_lock_stripes must be positive"));
        }
        Ok(())
    }
}
