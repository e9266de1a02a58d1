//! Client-side context management.
//!
//! Reads/writes `~/.plantlab/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use plantlab_core::Error;

/// A single context — connection to one PlantLab API server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    /// Context name (e.g. "lab-main").
    pub name: String,

    /// API base URL including the `/api` prefix
    /// (e.g. "http://localhost:3001/api").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Bearer token (set by `plantlab login`, cleared by `logout`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

/// Client configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Name of the currently active context.
    #[serde(rename = "current-context", default)]
    pub current_context: String,

    /// List of configured contexts.
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl ClientConfig {
    /// Default config file path: ~/.plantlab/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let config: ClientConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("bad config {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("cannot create {}: {}", parent.display(), e)))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("cannot serialize config: {e}")))?;
        std::fs::write(path, content)
            .map_err(|e| Error::Config(format!("cannot write {}: {}", path.display(), e)))?;
        Ok(())
    }

    /// The currently active context, if any.
    pub fn current(&self) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == self.current_context)
    }

    /// Active context or a descriptive error naming the fix.
    pub fn require_current(&self) -> Result<&Context, Error> {
        self.current().ok_or_else(|| {
            Error::Config("no current context. Run `plantlab use context <name>`.".to_string())
        })
    }

    /// Mutable reference to a context by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    /// Add or update a context.
    pub fn upsert_context(&mut self, ctx: Context) {
        if let Some(existing) = self.get_mut(&ctx.name) {
            *existing = ctx;
        } else {
            self.contexts.push(ctx);
        }
    }

    /// Remove a context by name. Returns true if it was found.
    pub fn remove_context(&mut self, name: &str) -> bool {
        let len = self.contexts.len();
        self.contexts.retain(|c| c.name != name);
        if self.current_context == name {
            self.current_context = String::new();
        }
        self.contexts.len() < len
    }
}

/// Return the PlantLab config directory (~/.plantlab).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".plantlab")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.current_context.is_empty());
        assert!(config.contexts.is_empty());
        assert!(config.current().is_none());
        assert!(config.require_current().is_err());
    }

    #[test]
    fn test_roundtrip() {
        let mut config = ClientConfig::default();
        config.current_context = "lab".to_string();
        config.contexts.push(Context {
            name: "lab".to_string(),
            server: "http://localhost:3001/api".to_string(),
            token: String::new(),
        });

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.current_context, "lab");
        assert_eq!(back.contexts.len(), 1);
        assert_eq!(back.contexts[0].server, "http://localhost:3001/api");
        assert_eq!(back.current().unwrap().name, "lab");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = ClientConfig::default();
        config.upsert_context(Context {
            name: "lab".to_string(),
            server: "http://localhost:3001/api".to_string(),
            token: "tok".to_string(),
        });
        config.current_context = "lab".to_string();
        config.save(&path).unwrap();

        let back = ClientConfig::load(&path).unwrap();
        assert_eq!(back.current().unwrap().token, "tok");

        // Missing file loads as default.
        let missing = ClientConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert!(missing.contexts.is_empty());
    }

    #[test]
    fn test_remove_context_clears_current() {
        let mut config = ClientConfig::default();
        config.upsert_context(Context {
            name: "lab".to_string(),
            server: String::new(),
            token: String::new(),
        });
        config.current_context = "lab".to_string();
        assert!(config.remove_context("lab"));
        assert!(config.current_context.is_empty());
        assert!(!config.remove_context("lab"));
    }
}
