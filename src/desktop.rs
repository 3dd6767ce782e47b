//! `.desktop` entry model and parser.
//!
//! Only the keys needed to decide autostart eligibility and to launch the entry are
//! recognized. Everything else (localized keys, other groups) is skipped silently.

// -- std imports
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

// -- crate imports
use serde::Serialize;
use thiserror::Error;

// -- module imports
use crate::error::{DesktopEntryError, Result};

const DESKTOP_ENTRY_GROUP: &str = "[Desktop Entry]";
const DESKTOP_ACTION_PREFIX: &str = "[Desktop Action ";

/// Characters trimmed next to the `=` separator.
const SEPARATOR_SPACE: &[char] = &['\t', '\n', '\x0b', '\x0c', '\r', ' '];

/// One parsed `.desktop` file.
///
/// Built in a single pass by [`DesktopEntry::parse`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesktopEntry {
    /// Path the entry was read from, used in error messages and for `%k`.
    pub filename: PathBuf,

    pub name: String,
    pub icon: String,
    pub exec: String,

    /// True only for a literal `Hidden=true`.
    pub hidden: bool,

    /// `None` means no restriction; `Some(vec![])` matches no desktop.
    pub only_show_in: Option<Vec<String>>,
    pub not_shown_in: Option<Vec<String>>,

    /// `X-GNOME-Autostart-enabled`, true unless the key is present with a value other than
    /// `true`.
    pub gnome_autostart_enabled: bool,

    /// Actions keyed by identifier.
    pub actions: HashMap<String, Action>,
}

/// One `[Desktop Action X]` group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Action {
    pub name: String,
    pub icon: String,
    pub exec: String,
}

/// Why an entry does not autostart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("Hidden=true")]
    Hidden,

    #[error("X-GNOME-Autostart-enabled=false on GNOME")]
    GnomeAutostartDisabled,

    #[error("OnlyShowIn does not include the current desktop")]
    NotInOnlyShowIn,

    /// `desktop` is the first current desktop listed in `NotShownIn`.
    #[error("NotShownIn includes {desktop:?}")]
    InNotShownIn { desktop: String },
}

/// Which group the parser is currently inside.
enum Group {
    Unknown,
    Entry,
    Action(String),
}

/// Split a `;`-separated list, dropping empty fields.
fn split_string_list(value: &str) -> Vec<String> {
    value
        .split(';')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_one_of_in(of: &[String], other: &[String]) -> bool {
    of.iter().any(|one| other.contains(one))
}

impl DesktopEntry {
    /// Create an empty entry for `filename`.
    ///
    /// `gnome_autostart_enabled` starts out true so files without the key count as enabled.
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            name: String::new(),
            icon: String::new(),
            exec: String::new(),
            hidden: false,
            only_show_in: None,
            not_shown_in: None,
            gnome_autostart_enabled: true,
            actions: HashMap::new(),
        }
    }

    /// Open and parse the `.desktop` file at `path`.
    ///
    /// # Errors
    /// - [`DesktopEntryError::Io`] if the file cannot be opened or read.
    /// - Any structural error returned by [`DesktopEntry::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::parse(path, BufReader::new(file))
    }

    /// Parse an entry from an already opened reader.
    ///
    /// `filename` is only used for diagnostics and `%k`. Action groups must come after the
    /// `Actions=` key of `[Desktop Entry]`; a file without a `[Desktop Entry]` group yields a
    /// default entry.
    ///
    /// # Errors
    /// - [`DesktopEntryError::DuplicateEntryGroup`] on a second `[Desktop Entry]`.
    /// - [`DesktopEntryError::UnknownAction`] for an action group not listed in `Actions=`.
    /// - [`DesktopEntryError::DuplicateActionGroup`] for a repeated action group.
    /// - [`DesktopEntryError::BadlyFormed`] for a line without `=`.
    /// - [`DesktopEntryError::Io`] if reading fails. Invalid UTF-8 is decoded lossily.
    pub fn parse(filename: impl Into<PathBuf>, mut reader: impl BufRead) -> Result<Self> {
        let mut de = Self::new(filename);
        let mut group = Group::Unknown;
        let mut seen_entry_group = false;
        let mut declared_actions: Vec<String> = Vec::new();

        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            // Invalid UTF-8 (e.g. a Latin-1 translation) is replaced, not rejected.
            let raw = String::from_utf8_lossy(&buf);
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                group = if line == DESKTOP_ENTRY_GROUP {
                    if seen_entry_group {
                        return Err(DesktopEntryError::DuplicateEntryGroup {
                            filename: de.filename,
                        });
                    }
                    seen_entry_group = true;
                    Group::Entry
                } else if let Some(action) = line
                    .strip_prefix(DESKTOP_ACTION_PREFIX)
                    .and_then(|rest| rest.strip_suffix(']'))
                {
                    if !declared_actions.iter().any(|a| a == action) {
                        return Err(DesktopEntryError::UnknownAction {
                            filename: de.filename,
                            action: action.to_string(),
                        });
                    }
                    if de.actions.contains_key(action) {
                        return Err(DesktopEntryError::DuplicateActionGroup {
                            filename: de.filename,
                            group: line.to_string(),
                        });
                    }
                    if de.actions.is_empty() {
                        de.actions.reserve(declared_actions.len());
                    }
                    de.actions.insert(action.to_string(), Action::default());
                    Group::Action(action.to_string())
                } else {
                    Group::Unknown
                };
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(DesktopEntryError::BadlyFormed {
                    filename: de.filename,
                    line: line_no,
                });
            };
            let key = key.trim_end_matches(SEPARATOR_SPACE);
            let value = value.trim_start_matches(SEPARATOR_SPACE);

            match &group {
                Group::Entry => match key {
                    "Name" => de.name = value.to_string(),
                    "Icon" => de.icon = value.to_string(),
                    "Exec" => de.exec = value.to_string(),
                    "Hidden" => de.hidden = value == "true",
                    "OnlyShowIn" => de.only_show_in = Some(split_string_list(value)),
                    "NotShownIn" => de.not_shown_in = Some(split_string_list(value)),
                    "X-GNOME-Autostart-enabled" => de.gnome_autostart_enabled = value == "true",
                    "Actions" => declared_actions = split_string_list(value),
                    _ => {}
                },
                Group::Action(id) => {
                    if let Some(action) = de.actions.get_mut(id) {
                        match key {
                            "Name" => action.name = value.to_string(),
                            "Icon" => action.icon = value.to_string(),
                            "Exec" => action.exec = value.to_string(),
                            _ => {}
                        }
                    }
                }
                Group::Unknown => {}
            }
        }

        Ok(de)
    }

    /// Returns true if this entry should autostart on the given desktop.
    ///
    /// `current_desktop` is `$XDG_CURRENT_DESKTOP` split on `:`.
    pub fn should_autostart(&self, current_desktop: &[String]) -> bool {
        self.autostart_verdict(current_desktop).is_ok()
    }

    /// Decide autostart eligibility and name the first rule that rejects the entry.
    ///
    /// Rules are checked in order: `Hidden`, `X-GNOME-Autostart-enabled` (on GNOME only),
    /// `OnlyShowIn`, `NotShownIn`. See the freedesktop.org Autostart specification.
    pub fn autostart_verdict(
        &self,
        current_desktop: &[String],
    ) -> std::result::Result<(), SkipReason> {
        if self.hidden {
            return Err(SkipReason::Hidden);
        }
        // GNOME specific extension honoured by gnome-session only.
        if !self.gnome_autostart_enabled && current_desktop.iter().any(|d| d == "GNOME") {
            return Err(SkipReason::GnomeAutostartDisabled);
        }
        if let Some(only) = &self.only_show_in {
            if !is_one_of_in(current_desktop, only) {
                return Err(SkipReason::NotInOnlyShowIn);
            }
        }
        if let Some(not) = &self.not_shown_in {
            if let Some(desktop) = current_desktop.iter().find(|d| not.contains(*d)) {
                return Err(SkipReason::InNotShownIn {
                    desktop: desktop.clone(),
                });
            }
        }
        Ok(())
    }

    /// Expand the main `Exec` line into an argument vector.
    ///
    /// # Errors
    /// - [`DesktopEntryError::MissingExec`] if `Exec` is empty.
    /// - Any expansion error, see [`crate::exec::expand_exec`].
    pub fn expand_exec(&self, uris: &[String]) -> Result<Vec<String>> {
        if self.exec.is_empty() {
            return Err(DesktopEntryError::MissingExec {
                filename: self.filename.clone(),
            });
        }
        crate::exec::expand_exec(self, &self.exec, uris)
    }

    /// Expand the `Exec` line of the named action.
    ///
    /// # Errors
    /// - [`DesktopEntryError::MissingAction`] if no such action group was parsed.
    /// - [`DesktopEntryError::MissingActionExec`] if the action has an empty `Exec`.
    pub fn expand_action_exec(&self, action: &str, uris: &[String]) -> Result<Vec<String>> {
        let Some(act) = self.actions.get(action) else {
            return Err(DesktopEntryError::MissingAction {
                filename: self.filename.clone(),
                action: action.to_string(),
            });
        };
        if act.exec.is_empty() {
            return Err(DesktopEntryError::MissingActionExec {
                filename: self.filename.clone(),
                action: action.to_string(),
            });
        }
        crate::exec::expand_exec(self, &act.exec, uris)
    }
}
