//! Parsing of XDG `.desktop` entries for autostart handling.
//!
//! [`DesktopEntry`] answers two questions about a parsed file: whether it should
//! autostart on the current desktop ([`DesktopEntry::should_autostart`]) and which argument
//! vector launches it ([`DesktopEntry::expand_exec`], [`DesktopEntry::expand_action_exec`]).
//!
//! ```
//! use desktop_autostart::DesktopEntry;
//!
//! let content = "[Desktop Entry]\nName=Viewer\nExec=viewer %F\nNotShownIn=KDE;\n";
//! let entry = DesktopEntry::parse("viewer.desktop", content.as_bytes()).unwrap();
//!
//! assert!(entry.should_autostart(&["GNOME".to_string()]));
//! assert!(!entry.should_autostart(&["KDE".to_string()]));
//! assert_eq!(
//!     entry.expand_exec(&["file:///tmp/a.png".to_string()]).unwrap(),
//!     vec!["viewer", "/tmp/a.png"]
//! );
//! ```

pub mod desktop;
pub mod error;
pub mod exec;

pub use desktop::{Action, DesktopEntry, SkipReason};
pub use error::{DesktopEntryError, Result};
