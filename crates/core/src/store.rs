//! Config persistence: load/save of the workspace JSON plus manual
//! import/export.
//!
//! Loading is deliberately infallible: a missing or corrupt config file is
//! treated as "no config" and replaced by the defaults. Saving is
//! best-effort; the caller logs failures and carries on.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Workspace;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("config root must be a JSON array of tabs")]
    InvalidRoot,
}

/// Owns the config file path. Constructed once by the application and
/// passed to the controller; nothing here is process-global.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the workspace, falling back to [`Workspace::default`] when
    /// the file is missing or unparseable. Never returns an error.
    pub fn load(&self) -> Workspace {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "no config file, using defaults");
                return Workspace::default();
            }
        };
        match serde_json::from_str::<Workspace>(&contents) {
            Ok(mut workspace) => {
                workspace.normalize();
                workspace
            }
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "unreadable config, using defaults");
                Workspace::default()
            }
        }
    }

    /// Writes the workspace to the config path, creating parent
    /// directories as needed.
    pub fn save(&self, workspace: &Workspace) -> Result<(), StoreError> {
        write_json(&self.path, workspace)
    }

    /// Parses a user-chosen file as a replacement workspace. The root must
    /// be a JSON array; anything else is rejected and the current
    /// workspace stays untouched (the caller only swaps on `Ok`).
    pub fn import(&self, path: &Path) -> Result<Workspace, StoreError> {
        let contents = fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&contents)?;
        if !value.is_array() {
            return Err(StoreError::InvalidRoot);
        }
        let mut workspace: Workspace = serde_json::from_value(value)?;
        workspace.normalize();
        Ok(workspace)
    }

    /// Writes the workspace to a user-chosen file.
    pub fn export(&self, path: &Path, workspace: &Workspace) -> Result<(), StoreError> {
        write_json(path, workspace)
    }
}

fn write_json(path: &Path, workspace: &Workspace) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(workspace)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActionKind, ButtonDescriptor, SLOT_COUNT};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("workspace.json"))
    }

    fn sample_workspace() -> Workspace {
        let mut ws = Workspace::default();
        ws.set_slot(
            0,
            0,
            Some(ButtonDescriptor {
                title: "Docs".to_string(),
                kind: ActionKind::Url,
                value: "docs.example.com".to_string(),
            }),
        );
        ws.set_slot(
            3,
            9,
            Some(ButtonDescriptor {
                title: "Snippet".to_string(),
                kind: ActionKind::Clipboard,
                value: "line one\nline two".to_string(),
            }),
        );
        ws.rename_tab(1, "Renamed");
        ws
    }

    #[test]
    fn load_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let ws = store_in(&dir).load();
        assert_eq!(ws.tabs.len(), 10);
        for tab in &ws.tabs {
            assert_eq!(tab.buttons.len(), SLOT_COUNT);
            assert!(tab.buttons.iter().all(|b| b.is_none()));
        }
    }

    #[test]
    fn load_malformed_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.load(), Workspace::default());
    }

    #[test]
    fn load_wrong_shape_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"tabs": []}"#).unwrap();
        assert_eq!(store.load(), Workspace::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let ws = sample_workspace();
        store.save(&ws).unwrap();
        assert_eq!(store.load(), ws);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("nested/deeper/workspace.json"));
        store.save(&Workspace::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn export_then_import_is_deep_equal() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let ws = sample_workspace();

        let exported = dir.path().join("exported.json");
        store.export(&exported, &ws).unwrap();
        let imported = store.import(&exported).unwrap();

        assert_eq!(imported, ws);
    }

    #[test]
    fn import_rejects_non_array_root() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"name": "not a list"}"#).unwrap();

        assert!(matches!(store.import(&path), Err(StoreError::InvalidRoot)));
    }

    #[test]
    fn import_rejects_unparseable_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let path = dir.path().join("bad.json");
        fs::write(&path, "][").unwrap();

        assert!(matches!(store.import(&path), Err(StoreError::Serde(_))));
    }

    #[test]
    fn import_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let path = dir.path().join("nope.json");

        assert!(matches!(store.import(&path), Err(StoreError::Io(_))));
    }

    #[test]
    fn import_normalizes_legacy_shapes() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let path = dir.path().join("legacy.json");
        fs::write(&path, r#"[{"name": "Short", "buttons": [null, null]}]"#).unwrap();

        let ws = store.import(&path).unwrap();
        assert_eq!(ws.tabs.len(), 1);
        assert_eq!(ws.tabs[0].buttons.len(), SLOT_COUNT);
    }
}
