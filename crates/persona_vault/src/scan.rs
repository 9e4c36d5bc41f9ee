//! Vault directory scanner.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{VaultError, VaultNote, VaultStructure, NOTE_EXTENSION};

/// Reject a user-navigable path segment before it touches the filesystem.
///
/// Persona ids and folder/note names arrive from URLs; anything that could
/// escape the data root (separators, `..`, absolute markers, NUL) fails
/// here with `InvalidSegment`.
pub fn validate_segment(segment: &str) -> Result<(), VaultError> {
    let bad = segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains('/')
        || segment.contains('\\')
        || segment.contains('\0')
        || Path::new(segment).is_absolute();
    if bad {
        return Err(VaultError::InvalidSegment(segment.to_string()));
    }
    Ok(())
}

/// Scan `<data_root>/<persona_id>/obsidian` into a [`VaultStructure`].
///
/// Root `.md` files become root notes; each first-level directory is listed
/// one level deep (never recursively) for folder notes. Non-note files and
/// deeper nesting are ignored silently. A missing or unreadable vault root
/// is an error; treating that as "persona has no vault" is the caller's
/// policy, not the scanner's.
pub fn scan_vault(data_root: &Path, persona_id: &str) -> Result<VaultStructure, VaultError> {
    validate_segment(persona_id)?;
    let vault_dir = data_root.join(persona_id).join("obsidian");

    let entries = read_dir_mapped(&vault_dir)?;
    let mut vault = VaultStructure::default();

    for entry in entries {
        let (path, name, is_dir) = entry;
        if !is_dir {
            if let Some(stem) = note_stem(&name) {
                vault.root_notes.push(VaultNote {
                    name: stem.to_string(),
                    relative_path: stem.to_string(),
                    folder: None,
                });
            }
            continue;
        }

        let mut notes = Vec::new();
        for (_, sub_name, sub_is_dir) in read_dir_mapped(&path)? {
            if sub_is_dir {
                continue;
            }
            if let Some(stem) = note_stem(&sub_name) {
                notes.push(VaultNote {
                    name: stem.to_string(),
                    relative_path: format!("{}/{}", name, stem),
                    folder: Some(name.clone()),
                });
            }
        }
        vault.folders.insert(name, notes);
    }

    Ok(vault)
}

fn note_stem(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(NOTE_EXTENSION).filter(|s| !s.is_empty())
}

fn read_dir_mapped(dir: &Path) -> Result<Vec<(PathBuf, String, bool)>, VaultError> {
    let entries = fs::read_dir(dir).map_err(|err| map_io(dir, err))?;
    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| map_io(dir, err))?;
        let file_type = entry.file_type().map_err(|err| map_io(dir, err))?;
        let name = entry.file_name().to_string_lossy().to_string();
        out.push((entry.path(), name, file_type.is_dir()));
    }
    Ok(out)
}

fn map_io(dir: &Path, err: io::Error) -> VaultError {
    let detail = format!("{}: {}", dir.display(), err);
    if err.kind() == io::ErrorKind::NotFound {
        VaultError::NotFound(detail)
    } else {
        VaultError::Io(detail)
    }
}
