//! Application configuration management.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Session and inactivity countdown configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Loan processing configuration.
    #[serde(default)]
    pub loan: LoanConfig,
    /// Demo data configuration.
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Inactivity countdown length in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Countdown tick interval in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

fn default_timeout_secs() -> u64 {
    300 // 5 minutes
}

fn default_tick_millis() -> u64 {
    1000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl SessionConfig {
    /// Returns the inactivity timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the tick interval as a `Duration`.
    #[must_use]
    pub const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

/// Loan configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoanConfig {
    /// Delay between approval and crediting, in milliseconds.
    #[serde(default = "default_credit_delay_millis")]
    pub credit_delay_millis: u64,
}

fn default_credit_delay_millis() -> u64 {
    3000
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self {
            credit_delay_millis: default_credit_delay_millis(),
        }
    }
}

impl LoanConfig {
    /// Returns the credit delay as a `Duration`.
    #[must_use]
    pub const fn credit_delay(&self) -> Duration {
        Duration::from_millis(self.credit_delay_millis)
    }
}

/// Demo data configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Whether to load the built-in demo accounts at startup.
    #[serde(default = "default_seed_accounts")]
    pub seed_accounts: bool,
}

fn default_seed_accounts() -> bool {
    true
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed_accounts: default_seed_accounts(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a source cannot be read or a value is
    /// out of range.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("BANKIST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot drive a countdown.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first offending key.
    pub fn validate(&self) -> AppResult<()> {
        if self.session.timeout_secs == 0 {
            return Err(AppError::Config(
                "session.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.session.tick_millis == 0 {
            return Err(AppError::Config(
                "session.tick_millis must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
