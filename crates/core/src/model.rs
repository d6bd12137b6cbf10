//! Launcher data model: an ordered list of tabs, each holding a fixed grid
//! of optional button descriptors.
//!
//! The JSON shape is kept compatible with the legacy config format: the
//! document root is a bare array of tabs, the action kind is stored under
//! the `"type"` key in lowercase, and empty slots are explicit `null`s.

use serde::{Deserialize, Deserializer, Serialize};

/// Number of button slots per tab. Tabs always hold exactly this many
/// entries after normalization; shorter arrays from old config files are
/// padded with empty slots.
pub const SLOT_COUNT: usize = 10;

/// Tab names used when no config exists yet.
pub const DEFAULT_TAB_NAMES: [&str; 10] = [
    "Daily", "Projects", "Writing", "Review", "Reading", "Health", "Family", "Finance", "Tools",
    "Settings",
];

/// What a button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Open a URL in the default browser.
    Url,
    /// Open a directory in the file manager.
    Folder,
    /// Open a file with its default application.
    File,
    /// Copy stored text to the system clipboard.
    Clipboard,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Url => "Web link",
            ActionKind::Folder => "Folder",
            ActionKind::File => "File",
            ActionKind::Clipboard => "Copy text",
        }
    }
}

/// One configured button: a display title, an action kind, and the value
/// the action operates on (URL, path, or clipboard text).
///
/// Descriptors are created and replaced whole by the editor dialog; there
/// are no partial field updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonDescriptor {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub value: String,
}

/// A named page of [`SLOT_COUNT`] button slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub name: String,
    #[serde(default = "empty_slots", deserialize_with = "deserialize_slots")]
    pub buttons: Vec<Option<ButtonDescriptor>>,
}

impl Tab {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buttons: empty_slots(),
        }
    }
}

fn empty_slots() -> Vec<Option<ButtonDescriptor>> {
    vec![None; SLOT_COUNT]
}

/// Accepts legacy configs whose `buttons` array is shorter (or longer)
/// than [`SLOT_COUNT`] and normalizes to exactly [`SLOT_COUNT`] entries.
fn deserialize_slots<'de, D>(deserializer: D) -> Result<Vec<Option<ButtonDescriptor>>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut slots: Vec<Option<ButtonDescriptor>> = Vec::deserialize(deserializer)?;
    slots.resize(SLOT_COUNT, None);
    Ok(slots)
}

/// The whole launcher state: an ordered sequence of tabs.
///
/// Serialized transparently, so the JSON document root is the tab array
/// itself (legacy format). This is the single source of truth, owned by
/// the application controller; rendering code never mutates it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Workspace {
    pub tabs: Vec<Tab>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            tabs: DEFAULT_TAB_NAMES.iter().copied().map(Tab::empty).collect(),
        }
    }
}

impl Workspace {
    /// Enforces the structural invariants: at least one tab, and exactly
    /// [`SLOT_COUNT`] slots per tab. Called after every load/import.
    pub fn normalize(&mut self) {
        if self.tabs.is_empty() {
            self.tabs.push(Tab::empty("Tab 1"));
        }
        for tab in &mut self.tabs {
            tab.buttons.resize(SLOT_COUNT, None);
        }
    }

    pub fn slot(&self, tab: usize, slot: usize) -> Option<&ButtonDescriptor> {
        self.tabs.get(tab)?.buttons.get(slot)?.as_ref()
    }

    /// Replaces a slot wholesale. `None` clears it.
    pub fn set_slot(&mut self, tab: usize, slot: usize, descriptor: Option<ButtonDescriptor>) {
        if let Some(tab) = self.tabs.get_mut(tab) {
            if let Some(entry) = tab.buttons.get_mut(slot) {
                *entry = descriptor;
            }
        }
    }

    /// Exchanges two slots within one tab, including empty values. No
    /// other slot or tab is touched.
    pub fn swap_slots(&mut self, tab: usize, a: usize, b: usize) {
        if let Some(tab) = self.tabs.get_mut(tab) {
            if a < tab.buttons.len() && b < tab.buttons.len() {
                tab.buttons.swap(a, b);
            }
        }
    }

    pub fn rename_tab(&mut self, tab: usize, name: impl Into<String>) {
        if let Some(tab) = self.tabs.get_mut(tab) {
            tab.name = name.into();
        }
    }
}
