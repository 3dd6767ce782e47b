use desktop_autostart::{DesktopEntry, DesktopEntryError};

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_load_browser() {
    let path = fixture("browser.desktop");
    let entry = DesktopEntry::load(&path).unwrap();

    assert_eq!(entry.filename.to_str(), Some(path.as_str()));
    assert_eq!(entry.name, "Web Browser");
    assert_eq!(entry.icon, "web-browser");
    assert_eq!(entry.exec, r#"browser --class "Web Browser" %U"#);
    assert!(!entry.hidden);
    assert_eq!(entry.only_show_in, Some(strings(&["GNOME", "KDE"])));
    assert_eq!(entry.not_shown_in, None);
    assert!(entry.gnome_autostart_enabled);

    assert_eq!(entry.actions.len(), 2);
    assert_eq!(entry.actions["new-window"].name, "New Window");
    assert_eq!(entry.actions["private"].icon, "web-browser-private");
}

#[test]
fn test_browser_autostart_and_exec() {
    let entry = DesktopEntry::load(fixture("browser.desktop")).unwrap();

    assert!(entry.should_autostart(&strings(&["KDE"])));
    assert!(!entry.should_autostart(&strings(&["XFCE"])));

    let uris = strings(&["https://a.example", "file:///tmp/b.html"]);
    assert_eq!(
        entry.expand_exec(&uris).unwrap(),
        strings(&[
            "browser",
            "--class",
            "Web Browser",
            "https://a.example",
            "file:///tmp/b.html"
        ])
    );
    assert_eq!(
        entry.expand_action_exec("new-window", &uris).unwrap(),
        strings(&["browser", "--new-window", "https://a.example"])
    );
    assert_eq!(
        entry.expand_action_exec("private", &[]).unwrap(),
        strings(&["browser", "--private-window"])
    );
    assert!(matches!(
        entry.expand_action_exec("close", &[]),
        Err(DesktopEntryError::MissingAction { .. })
    ));
}

#[test]
fn test_gnome_disabled_only_on_gnome() {
    let entry = DesktopEntry::load(fixture("gnome-disabled.desktop")).unwrap();
    assert!(!entry.gnome_autostart_enabled);
    assert!(!entry.should_autostart(&strings(&["ubuntu", "GNOME"])));
    assert!(entry.should_autostart(&strings(&["KDE"])));
}

#[test]
fn test_hidden_never_autostarts() {
    let entry = DesktopEntry::load(fixture("hidden.desktop")).unwrap();
    assert!(!entry.should_autostart(&strings(&["GNOME"])));
    assert!(!entry.should_autostart(&[]));
}

#[test]
fn test_structural_errors() {
    assert!(matches!(
        DesktopEntry::load(fixture("duplicate-entry.desktop")),
        Err(DesktopEntryError::DuplicateEntryGroup { .. })
    ));
    assert!(matches!(
        DesktopEntry::load(fixture("unknown-action.desktop")),
        Err(DesktopEntryError::UnknownAction { ref action, .. }) if action == "close"
    ));
    assert!(matches!(
        DesktopEntry::load(fixture("badly-formed.desktop")),
        Err(DesktopEntryError::BadlyFormed { line: 3, .. })
    ));
}

#[test]
fn test_error_messages_name_the_file() {
    let path = fixture("unknown-action.desktop");
    let err = DesktopEntry::load(&path).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("desktop file {path} contains unknown action \"close\"")
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let err = DesktopEntry::load(fixture("does-not-exist.desktop")).unwrap_err();
    match err {
        DesktopEntryError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_is_deterministic() {
    let a = DesktopEntry::load(fixture("browser.desktop")).unwrap();
    let b = DesktopEntry::load(fixture("browser.desktop")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_latin1_bytes_in_ignored_key() {
    let entry = DesktopEntry::load(fixture("latin1-translation.desktop")).unwrap();
    assert_eq!(entry.name, "Editor");
    assert_eq!(
        entry.expand_exec(&strings(&["notes:v2.txt"])).unwrap(),
        strings(&["editor", "notes:v2.txt"])
    );
}
