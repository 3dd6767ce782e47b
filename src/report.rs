//! Data structures for reporting scan outcomes.
//!
//! These types serialize to JSON for `--json` and drive the human-readable listing in
//! `main`.

// -- std imports
use std::path::PathBuf;

// -- crate imports
use desktop_autostart::DesktopEntry;
use serde::Serialize;

/// Result for a single autostart `.desktop` file.
#[derive(Debug, Serialize)]
pub struct Finding {
    /// Full path to the `.desktop` file inspected.
    pub desktop_file: PathBuf,

    /// The parsed entry, if the file parsed.
    pub entry: Option<DesktopEntry>,

    /// Raw `Exec=` line that was expanded (the action's line with `--action`).
    pub exec: Option<String>,

    pub status: Status,
}

/// Outcome of inspecting an autostart entry.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Status {
    /// The entry autostarts on this desktop with the given command.
    Autostart {
        /// Expanded argument vector, program first.
        argv: Vec<String>,
    },

    /// The entry does not autostart on this desktop.
    Skipped { reason: String },

    /// The file could not be parsed or its Exec line could not be expanded.
    Broken { reason: String },
}

impl Finding {
    pub fn broken(desktop_file: PathBuf, reason: String) -> Self {
        Self {
            desktop_file,
            entry: None,
            exec: None,
            status: Status::Broken { reason },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_embeds_parsed_entry() {
        let entry = DesktopEntry::parse(
            "/etc/xdg/autostart/a.desktop",
            &b"[Desktop Entry]\nName=A\nExec=a %U\nNotShownIn=KDE;\n"[..],
        )
        .unwrap();
        let finding = Finding {
            desktop_file: entry.filename.clone(),
            exec: Some(entry.exec.clone()),
            entry: Some(entry),
            status: Status::Autostart {
                argv: vec!["a".to_string()],
            },
        };

        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["entry"]["name"], "A");
        assert_eq!(json["entry"]["not_shown_in"], serde_json::json!(["KDE"]));
        assert_eq!(json["entry"]["only_show_in"], serde_json::Value::Null);
        assert_eq!(json["entry"]["gnome_autostart_enabled"], true);
        assert_eq!(json["status"]["kind"], "autostart");
        assert_eq!(json["status"]["argv"], serde_json::json!(["a"]));

        let broken = serde_json::to_value(Finding::broken("x".into(), "bad".into())).unwrap();
        assert_eq!(broken["entry"], serde_json::Value::Null);
        assert_eq!(broken["status"]["kind"], "broken");
    }
}
