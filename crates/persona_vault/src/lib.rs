//! Note vault resolution for persona Obsidian vaults.
//!
//! A vault is a flat directory of markdown notes plus at most one level of
//! subfolders. This crate inventories it, flattens it into a name→path
//! index, strips trailing tag lines, and rewrites `[[wiki links]]` into
//! plain markdown links against that index. Everything except the scanner
//! is a pure function over strings; the scanner is a plain directory read
//! with no caching between calls.

use std::collections::BTreeMap;
use std::fmt;

mod scan;

pub use scan::{scan_vault, validate_segment};

pub const NOTE_EXTENSION: &str = ".md";

/// How many lines from the end of a note the `Tags:` line may sit on and
/// still be recognized. Lines above that window are left alone on purpose.
const TAG_SCAN_WINDOW: usize = 5;

#[derive(Debug)]
pub enum VaultError {
    NotFound(String),
    Io(String),
    InvalidSegment(String),
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::NotFound(err) => write!(f, "vault not found: {}", err),
            VaultError::Io(err) => write!(f, "io error: {}", err),
            VaultError::InvalidSegment(seg) => write!(f, "invalid path segment: {:?}", seg),
        }
    }
}

impl std::error::Error for VaultError {}

/// One note file. Identity is `relative_path`; `name` is the filename with
/// the extension removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultNote {
    pub name: String,
    pub relative_path: String,
    pub folder: Option<String>,
}

/// Snapshot of one vault scan. Per-folder note order follows the directory
/// listing; callers that need a stable order sort explicitly (see
/// [`sorted_root_notes`] / [`sorted_folders`]).
#[derive(Debug, Clone, Default)]
pub struct VaultStructure {
    pub root_notes: Vec<VaultNote>,
    pub folders: BTreeMap<String, Vec<VaultNote>>,
}

impl VaultStructure {
    pub fn note_count(&self) -> usize {
        self.root_notes.len() + self.folders.values().map(|n| n.len()).sum::<usize>()
    }
}

/// Bare note name → relative path.
pub type NoteIndex = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTags {
    pub clean_content: String,
    pub tags: Vec<String>,
}

/// Flatten a vault structure into the link-resolution index.
///
/// Root notes are indexed first, then each folder in map order. Two notes
/// sharing a bare name silently overwrite: the last write wins, and links
/// resolve to whichever path was indexed last. Known, accepted looseness.
pub fn build_note_index(vault: &VaultStructure) -> NoteIndex {
    let mut index = NoteIndex::new();
    for note in &vault.root_notes {
        index.insert(note.name.clone(), note.relative_path.clone());
    }
    for notes in vault.folders.values() {
        for note in notes {
            index.insert(note.name.clone(), note.relative_path.clone());
        }
    }
    index
}

/// Split a trailing `Tags: #a #b` metadata line off a note body.
///
/// Only the last five lines are scanned; a tag line buried in the middle of
/// a document is body text, not metadata. When no tag line is found the
/// content comes back untouched.
pub fn extract_tags(content: &str) -> ExtractedTags {
    let lines: Vec<&str> = content.split('\n').collect();
    let window_start = lines.len().saturating_sub(TAG_SCAN_WINDOW);

    let mut tag_line_index = None;
    let mut tags = Vec::new();
    for (idx, line) in lines.iter().enumerate().skip(window_start) {
        if line.starts_with("Tags:") {
            tag_line_index = Some(idx);
            tags = parse_hash_tags(line);
            break;
        }
    }

    match tag_line_index {
        Some(idx) => {
            let mut kept = lines;
            kept.remove(idx);
            ExtractedTags {
                clean_content: kept.join("\n"),
                tags,
            }
        }
        None => ExtractedTags {
            clean_content: content.to_string(),
            tags,
        },
    }
}

/// Collect `#token` occurrences from a line, `#` stripped, document order,
/// duplicates preserved. Token characters are word characters and hyphens.
fn parse_hash_tags(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '#' {
            continue;
        }
        let mut tag = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' || next == '-' {
                tag.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if !tag.is_empty() {
            out.push(tag);
        }
    }
    out
}

/// Rewrite every `[[target]]` / `[[target|display]]` occurrence into a
/// markdown link under `/personas/<persona_id>/obsidian/`, or bold inert
/// text when the target is not in the index. Non-link text passes through
/// untouched; each occurrence is handled independently, so the output
/// (which contains no `[[` sequences) is a fixed point.
pub fn convert_wiki_links(content: &str, persona_id: &str, index: &NoteIndex) -> String {
    let bytes = content.as_bytes();
    let mut out = String::with_capacity(content.len());
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'[' && i + 1 < bytes.len() && bytes[i + 1] == b'[' {
            let inner_start = i + 2;
            let mut j = inner_start;
            while j < bytes.len() && bytes[j] != b']' {
                j += 1;
            }
            let closed = j > inner_start && j + 1 < bytes.len() && bytes[j + 1] == b']';
            if closed {
                render_wiki_link(&content[inner_start..j], persona_id, index, &mut out);
                i = j + 2;
                continue;
            }
        }
        let ch = content[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

fn render_wiki_link(inner: &str, persona_id: &str, index: &NoteIndex, out: &mut String) {
    let (target, display) = match inner.split_once('|') {
        Some((raw_target, rest)) => (raw_target.trim(), rest.trim().to_string()),
        None => {
            let target = inner.trim();
            // Folder-qualified targets display only the note name.
            let display = match target.rsplit_once('/') {
                Some((_, last)) => last.to_string(),
                None => target.to_string(),
            };
            (target, display)
        }
    };

    let resolved = if target.contains('/') {
        // Folder-qualified: the bare name must exist, but the path used is
        // the one as written, not the indexed one.
        let note_name = target.rsplit('/').next().unwrap_or(target);
        if index.contains_key(note_name) {
            Some(target.to_string())
        } else {
            None
        }
    } else {
        index.get(target).cloned()
    };

    match resolved {
        Some(path) => {
            let encoded = encode_note_path(&path);
            out.push('[');
            out.push_str(&display);
            out.push_str("](/personas/");
            out.push_str(persona_id);
            out.push_str("/obsidian/");
            out.push_str(&encoded);
            out.push(')');
        }
        None => {
            // Missing note: show the intended label, link nothing.
            out.push_str("**");
            out.push_str(&display);
            out.push_str("**");
        }
    }
}

/// Percent-encode each `/`-separated segment of a note path independently.
pub fn encode_note_path(path: &str) -> String {
    path.split('/')
        .map(|seg| urlencoding::encode(seg).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Root notes for display: `Home` pinned first, the rest by name.
pub fn sorted_root_notes(vault: &VaultStructure) -> Vec<VaultNote> {
    let mut notes = vault.root_notes.clone();
    notes.sort_by(|a, b| {
        let a_home = a.name == "Home";
        let b_home = b.name == "Home";
        b_home.cmp(&a_home).then_with(|| a.name.cmp(&b.name))
    });
    notes
}

/// Folders for display: empty folders dropped, order by folder name, notes
/// within each folder by name.
pub fn sorted_folders(vault: &VaultStructure) -> Vec<(String, Vec<VaultNote>)> {
    let mut out: Vec<(String, Vec<VaultNote>)> = vault
        .folders
        .iter()
        .filter(|(_, notes)| !notes.is_empty())
        .map(|(name, notes)| {
            let mut notes = notes.clone();
            notes.sort_by(|a, b| a.name.cmp(&b.name));
            (name.clone(), notes)
        })
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}
