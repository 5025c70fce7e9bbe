use anyhow::{Context, Result};
use kinship::config::CONFIG_FILE_NAME;
use kinship::{ApiClient, ClientConfig, FileSessionStore, HttpTransport, SessionStore};
use std::path::{Path, PathBuf};

/// Everything a command needs: resolved config, the session file and a ready client.
pub struct AppContext {
    pub config: ClientConfig,
    pub store: FileSessionStore,
    pub client: ApiClient<HttpTransport>,
}

impl AppContext {
    /// Loads config from `explicit`, or the nearest `kinship.toml` up from the current directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let current_dir = std::env::current_dir().context("Failed to get current directory")?;
                find_config_file(&current_dir)
            }
        };
        log::debug!("using config file {config_path:?}");

        let config = ClientConfig::load(config_path.as_deref())?;
        let store = FileSessionStore::new(config.session_path.clone());
        let session = store
            .load()
            .with_context(|| format!("Failed to load session from {}", store.path().display()))?;
        let transport = HttpTransport::from_config(&config)?;

        Ok(Self {
            config,
            store,
            client: ApiClient::new(transport, session),
        })
    }

    /// Persists the client's current session.
    pub fn save_session(&self) -> Result<()> {
        self.store.save(self.client.session())?;
        Ok(())
    }

    /// Id of the logged-in user, if any.
    pub fn viewer_id(&self) -> Option<String> {
        self.client.session().user_id().ok()
    }
}

/// Walks from `start` up to the filesystem root looking for `kinship.toml`.
fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_in_ancestor() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(CONFIG_FILE_NAME), "[api]\nurl = \"http://example.test\"\n").unwrap();

        assert_eq!(find_config_file(&nested), Some(root.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_missing_config_is_none() {
        let root = tempfile::tempdir().unwrap();
        let found = find_config_file(root.path());
        assert!(found.is_none_or(|path| !path.starts_with(root.path())));
    }
}
