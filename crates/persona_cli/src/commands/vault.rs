use persona_data::{load_profile, read_note};
use persona_vault::{build_note_index, extract_tags, scan_vault, sorted_folders, sorted_root_notes};

use crate::{VaultNoteArgs, VaultScanArgs};

use super::emit;

pub fn run_scan(args: VaultScanArgs) -> Result<(), String> {
    let data_root = args.common.resolve_data_root();
    let vault = scan_vault(&data_root, &args.persona).map_err(|e| e.to_string())?;
    let index = build_note_index(&vault);

    let root_notes: Vec<&str> = vault.root_notes.iter().map(|n| n.name.as_str()).collect();
    let folders: Vec<serde_json::Value> = vault
        .folders
        .iter()
        .map(|(name, notes)| {
            serde_json::json!({
                "name": name,
                "notes": notes.iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();
    let payload = serde_json::json!({
        "command": "vault scan",
        "persona": &args.persona,
        "note_count": vault.note_count(),
        "root_notes": root_notes,
        "folders": folders,
        "index": index,
    });

    emit(args.common.json, &payload, || {
        let mut lines: Vec<String> = Vec::new();
        for note in sorted_root_notes(&vault) {
            lines.push(format!("note path={:?}", note.relative_path));
        }
        for (folder, notes) in sorted_folders(&vault) {
            for note in notes {
                lines.push(format!(
                    "note folder={:?} path={:?}",
                    folder, note.relative_path
                ));
            }
        }
        lines.push(format!(
            "vault_scan persona={} notes={} folders={}",
            args.persona,
            vault.note_count(),
            vault.folders.len()
        ));
        lines.join("\n") + "\n"
    })
}

pub fn run_note(args: VaultNoteArgs) -> Result<(), String> {
    let data_root = args.common.resolve_data_root();
    let profile = load_profile(&data_root, &args.persona).map_err(|e| e.to_string())?;
    let vault = scan_vault(&data_root, &args.persona).map_err(|e| e.to_string())?;
    let index = build_note_index(&vault);
    // Read failures fall through to the not-found page body.
    let raw = read_note(&data_root, &args.persona, &args.note_path).ok();

    if args.common.json {
        let payload = match raw.as_deref() {
            Some(raw) => {
                let extracted = extract_tags(raw);
                let converted = persona_vault::convert_wiki_links(
                    &extracted.clean_content,
                    &args.persona,
                    &index,
                );
                serde_json::json!({
                    "command": "vault note",
                    "persona": args.persona,
                    "note_path": args.note_path,
                    "found": true,
                    "tags": extracted.tags,
                    "content": converted,
                })
            }
            None => serde_json::json!({
                "command": "vault note",
                "persona": args.persona,
                "note_path": args.note_path,
                "found": false,
            }),
        };
        return emit(true, &payload, String::new);
    }

    let page = persona_book::render_note_page(
        &args.persona,
        &profile.name,
        &args.note_path,
        raw.as_deref(),
        &index,
    );
    print!("{}", page);
    Ok(())
}
