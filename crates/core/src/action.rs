//! Action dispatch: runs the side effect a button descriptor describes.
//!
//! OS access goes through [`SystemBridge`], so dispatch logic (URL scheme
//! prefixing, path existence checks, error mapping) is testable with a
//! fake bridge. The app crate provides the real implementation on top of
//! the `open` crate and `arboard`.

use std::path::{Path, PathBuf};

use crate::model::{ActionKind, ButtonDescriptor};

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("path does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
    #[error("failed to open {target}: {reason}")]
    OpenFailed { target: String, reason: String },
}

/// What a successful dispatch did, so the UI can pick the right
/// acknowledgement (clipboard copies get a transient toast, opens get
/// nothing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Opened,
    Copied,
}

/// Seam to the host OS: default-handler launches and clipboard writes.
pub trait SystemBridge {
    /// Hands a URL or filesystem path to the OS default handler.
    fn open_target(&mut self, target: &str) -> Result<(), String>;

    /// Writes text verbatim to the system clipboard.
    fn copy_text(&mut self, text: &str) -> Result<(), String>;
}

/// Ensures a URL value carries an explicit scheme, defaulting to plain
/// `http://` like the legacy config format expects.
pub fn normalize_url(value: &str) -> String {
    if value.starts_with("http://") || value.starts_with("https://") {
        value.to_string()
    } else {
        format!("http://{value}")
    }
}

/// Performs the descriptor's side effect through `bridge`.
///
/// Folder/file targets are checked for existence first; the bridge is not
/// invoked for a missing path.
pub fn dispatch(
    descriptor: &ButtonDescriptor,
    bridge: &mut dyn SystemBridge,
) -> Result<Dispatched, ActionError> {
    match descriptor.kind {
        ActionKind::Url => {
            let url = normalize_url(&descriptor.value);
            bridge
                .open_target(&url)
                .map_err(|reason| ActionError::OpenFailed {
                    target: url,
                    reason,
                })?;
            Ok(Dispatched::Opened)
        }
        ActionKind::Folder | ActionKind::File => {
            let path = Path::new(&descriptor.value);
            if !path.exists() {
                return Err(ActionError::NotFound(path.to_path_buf()));
            }
            bridge
                .open_target(&descriptor.value)
                .map_err(|reason| ActionError::OpenFailed {
                    target: descriptor.value.clone(),
                    reason,
                })?;
            Ok(Dispatched::Opened)
        }
        ActionKind::Clipboard => {
            bridge
                .copy_text(&descriptor.value)
                .map_err(ActionError::ClipboardUnavailable)?;
            Ok(Dispatched::Copied)
        }
    }
}
