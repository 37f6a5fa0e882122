//! Configuration data model.
//!
//! Only `hostname` is required. Every other field has a default so a minimal
//! file is just a hostname and a nick list.

use serde::{Deserialize, Serialize};

/// Root bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Hostname or IP address of the IRC server.
    pub hostname: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub tls: bool,
    /// Nicknames to claim, in order.
    #[serde(default)]
    pub nicklist: Vec<String>,
    /// Channels to join, with or without the leading `#`.
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default = "default_quit_message")]
    pub quit_message: String,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fields of the `USER` registration line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_realname")]
    pub realname: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            realname: default_realname(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long each nickname is held before moving to the next one.
    #[serde(default = "default_nick_interval")]
    pub nick_interval_secs: u64,
    /// Delay between connecting and joining channels.
    #[serde(default = "default_join_delay")]
    pub join_delay_secs: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            nick_interval_secs: default_nick_interval(),
            join_delay_secs: default_join_delay(),
        }
    }
}

/// Diagnostic output settings. `RUST_LOG` overrides `level` when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            show_target: false,
        }
    }
}

fn default_port() -> u16 {
    6667
}
fn default_quit_message() -> String {
    "Finished".to_string()
}
fn default_username() -> String {
    "_".to_string()
}
fn default_realname() -> String {
    "Go".to_string()
}
fn default_nick_interval() -> u64 {
    30
}
fn default_join_delay() -> u64 {
    5
}
fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
impl BotConfig {
    pub fn for_test(nicklist: &[&str], channels: &[&str]) -> Self {
        Self {
            hostname: "irc.test".to_string(),
            port: default_port(),
            tls: false,
            nicklist: nicklist.iter().map(|s| s.to_string()).collect(),
            channels: channels.iter().map(|s| s.to_string()).collect(),
            quit_message: default_quit_message(),
            identity: IdentityConfig::default(),
            timing: TimingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
