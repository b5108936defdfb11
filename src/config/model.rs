//! Configuration data model.
//!
//! All structs derive `Deserialize` for TOML loading. Every field has a
//! default matching the deployed bot, so the relay runs without a config file.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub irc: IrcConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

/// IRC network identity and connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrcConfig {
    #[serde(default = "default_nickname")]
    pub nickname: String,
    /// Hostname or IP address of the IRC server.
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub tls: bool,
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub realname: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub nick_password: Option<String>,
    #[serde(default)]
    pub accept_invalid_certs: bool,
    #[serde(default = "default_reconnect_delay")]
    pub reconnect_delay_secs: u64,
}

impl Default for IrcConfig {
    fn default() -> Self {
        Self {
            nickname: default_nickname(),
            server: default_server(),
            port: default_port(),
            tls: true,
            channels: default_channels(),
            username: None,
            realname: None,
            password: None,
            nick_password: None,
            accept_invalid_certs: false,
            reconnect_delay_secs: default_reconnect_delay(),
        }
    }
}

impl IrcConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}

/// Downstream display endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_display_host")]
    pub host: String,
    #[serde(default = "default_display_port")]
    pub port: u16,
    /// Read phase ends once the display stays silent this long.
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
    /// Hard cap on the read phase, measured from the write.
    #[serde(default = "default_max_wait_ms")]
    pub max_wait_ms: u64,
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            host: default_display_host(),
            port: default_display_port(),
            idle_timeout_ms: default_idle_timeout_ms(),
            max_wait_ms: default_max_wait_ms(),
            max_response_bytes: default_max_response_bytes(),
        }
    }
}

impl DisplayConfig {
    /// `host:port` string suitable for address resolution.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
}

/// Message handling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Channel messages are only relayed when they contain this word
    /// (case-insensitive).
    #[serde(default = "default_keyword")]
    pub keyword: String,
    /// Reply text used when the display cannot be reached.
    #[serde(default)]
    pub failure_reply: String,
    /// Replies longer than this many bytes are truncated.
    #[serde(default = "default_max_reply_len")]
    pub max_reply_len: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            keyword: default_keyword(),
            failure_reply: String::new(),
            max_reply_len: default_max_reply_len(),
        }
    }
}

fn default_nickname() -> String {
    "FallblattAnzeige".to_string()
}
fn default_server() -> String {
    "irc.us.hackint.eu".to_string()
}
fn default_port() -> u16 {
    6697
}
fn default_true() -> bool {
    true
}
fn default_channels() -> Vec<String> {
    vec!["#chaos-darmstadt".to_string()]
}
fn default_reconnect_delay() -> u64 {
    10
}
fn default_display_host() -> String {
    "mpd".to_string()
}
fn default_display_port() -> u16 {
    1337
}
fn default_idle_timeout_ms() -> u64 {
    1000
}
fn default_max_wait_ms() -> u64 {
    5000
}
fn default_max_response_bytes() -> usize {
    4096
}
fn default_keyword() -> String {
    "fallblatt".to_string()
}
fn default_max_reply_len() -> usize {
    // Leaves room for the `:nick!user@host PRIVMSG #target :` prefix in a
    // 512 byte IRC line.
    400
}
