use std::fs;
use std::path::Path;

use persona_vault::{
    build_note_index, scan_vault, validate_segment, VaultError,
};

fn write_note(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "note body\n").unwrap();
}

fn fixture_vault() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let vault = dir.path().join("persona_002").join("obsidian");
    write_note(&vault, "Home.md");
    write_note(&vault, "Shopping List.md");
    write_note(&vault, "Daily Notes/2026-01-30.md");
    write_note(&vault, "Daily Notes/2026-01-31.md");
    write_note(&vault, "Recipes/Focaccia.md");
    // Ignored: wrong extension, and a nested directory two levels down.
    write_note(&vault, "notes.txt");
    fs::write(vault.join("attachment.png"), [0u8; 4]).unwrap();
    write_note(&vault, "Recipes/drafts/Sourdough.md");
    dir
}

#[test]
fn scan_inventories_root_and_folder_notes() {
    let dir = fixture_vault();
    let vault = scan_vault(dir.path(), "persona_002").unwrap();

    let mut root_names: Vec<&str> = vault.root_notes.iter().map(|n| n.name.as_str()).collect();
    root_names.sort();
    assert_eq!(root_names, vec!["Home", "Shopping List"]);

    for note in &vault.root_notes {
        assert_eq!(note.relative_path, note.name);
        assert!(note.folder.is_none());
    }

    let daily = vault.folders.get("Daily Notes").unwrap();
    assert_eq!(daily.len(), 2);
    for note in daily {
        assert_eq!(note.relative_path, format!("Daily Notes/{}", note.name));
        assert_eq!(note.folder.as_deref(), Some("Daily Notes"));
    }

    // Second-level nesting is not discovered.
    let recipes = vault.folders.get("Recipes").unwrap();
    let recipe_names: Vec<&str> = recipes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(recipe_names, vec!["Focaccia"]);
    // ...but the nested directory itself does not appear as a folder.
    assert!(!vault.folders.contains_key("drafts"));
}

#[test]
fn scanned_paths_resolve_back_to_files() {
    let dir = fixture_vault();
    let vault = scan_vault(dir.path(), "persona_002").unwrap();
    let vault_root = dir.path().join("persona_002").join("obsidian");
    for note in vault
        .root_notes
        .iter()
        .chain(vault.folders.values().flatten())
    {
        let file = vault_root.join(format!("{}.md", note.relative_path));
        assert!(file.is_file(), "missing {}", file.display());
    }
}

#[test]
fn scan_then_index_round_trip() {
    let dir = fixture_vault();
    let vault = scan_vault(dir.path(), "persona_002").unwrap();
    let index = build_note_index(&vault);
    assert_eq!(index.len(), vault.note_count());
    assert_eq!(
        index.get("Focaccia").map(String::as_str),
        Some("Recipes/Focaccia")
    );
}

#[test]
fn missing_vault_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    match scan_vault(dir.path(), "persona_404") {
        Err(VaultError::NotFound(_)) => {}
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn traversal_segments_are_rejected() {
    let dir = fixture_vault();
    for bad in ["..", "a/b", "a\\b", "", "."] {
        match scan_vault(dir.path(), bad) {
            Err(VaultError::InvalidSegment(_)) => {}
            other => panic!("expected InvalidSegment for {:?}, got {:?}", bad, other),
        }
    }
    assert!(validate_segment("persona_002").is_ok());
}
