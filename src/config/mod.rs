use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ClientError;

pub const CONFIG_FILE: &str = "client.toml";

fn config_paths(filename: &str) -> Vec<PathBuf> {
	let mut paths = Vec::new();

	if let Some(config_dir) = dirs::config_dir() {
		paths.push(config_dir.join("patta").join(filename));
	}

	paths.push(PathBuf::from("config").join(filename));

	paths
}

fn find_config(filename: &str) -> Option<PathBuf> {
	config_paths(filename).into_iter().find(|p| p.exists())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
	#[serde(default = "default_server_url")]
	pub server_url: String,
	#[serde(default = "default_poll_interval")]
	pub poll_interval_secs: u64,
	#[serde(default = "default_log_dir")]
	pub log_dir: PathBuf,
}

fn default_server_url() -> String {
	"ws://127.0.0.1:8081/ws/game/patta".to_string()
}

fn default_poll_interval() -> u64 {
	5
}

fn default_log_dir() -> PathBuf {
	PathBuf::from("logs")
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			server_url: default_server_url(),
			poll_interval_secs: default_poll_interval(),
			log_dir: default_log_dir(),
		}
	}
}

impl ClientConfig {
	/// Socket address for one game session.
	pub fn endpoint(&self, session_name: &str) -> String {
		format!("{}/{}/", self.server_url.trim_end_matches('/'), session_name)
	}

	pub fn poll_interval(&self) -> Duration {
		Duration::from_secs(self.poll_interval_secs.max(1))
	}
}

pub fn parse_config(content: &str) -> Result<ClientConfig, ClientError> {
	toml::from_str(content)
		.map_err(|e| ClientError::Config(format!("Failed to parse client config: {}", e)))
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ClientConfig, ClientError> {
	let content = fs::read_to_string(&path).map_err(|e| {
		ClientError::Config(format!("Failed to read {}: {}", path.as_ref().display(), e))
	})?;

	parse_config(&content)
}

/// Loads the first `client.toml` found on the search path, or the defaults
/// when there is none.
pub fn load_config_auto() -> Result<ClientConfig, ClientError> {
	match find_config(CONFIG_FILE) {
		Some(path) => load_config(&path),
		None => Ok(ClientConfig::default()),
	}
}
