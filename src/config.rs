//! Platform configuration.

use serde::{Deserialize, Serialize};

/// Points granted to every newly registered account.
const DEFAULT_STARTING_BALANCE: u32 = 200;

/// Tunable platform parameters.
///
/// Deserialisable with defaults so a host can load overrides from JSON:
///
/// ```
/// use asar::config::PlatformConfig;
///
/// let config: PlatformConfig = serde_json::from_str("{}").expect("valid config");
/// assert_eq!(config.starting_balance, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Points balance granted on registration.
    #[serde(default = "default_starting_balance")]
    pub starting_balance: u32,

    /// Whether first-run seeding also creates demonstration tasks.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            seed_demo_data: true,
        }
    }
}

const fn default_starting_balance() -> u32 {
    DEFAULT_STARTING_BALANCE
}

const fn default_seed_demo_data() -> bool {
    true
}
