use persona_data::validate::{validate_store_counts, ValidationReport};
use persona_data::load_index;

use crate::ValidateArgs;

use super::emit;

pub fn run(args: ValidateArgs) -> Result<(), String> {
    let data_root = args.common.resolve_data_root();

    let persona_ids: Vec<String> = match args.persona.as_ref() {
        Some(id) => vec![id.clone()],
        None => load_index(&data_root)
            .map_err(|e| e.to_string())?
            .personas
            .iter()
            .map(|p| p.id.clone())
            .collect(),
    };

    let mut combined = ValidationReport::default();
    for persona_id in &persona_ids {
        let report = validate_store_counts(&data_root, &args.servers_root, persona_id)
            .map_err(|e| e.to_string())?;
        combined.stores_checked += report.stores_checked;
        combined.issues.extend(report.issues);
        combined.checksums.extend(report.checksums);
    }

    let payload = serde_json::json!({
        "command": "validate",
        "data_root": data_root.to_string_lossy(),
        "servers_root": args.servers_root.to_string_lossy(),
        "personas": &persona_ids,
        "stores_checked": combined.stores_checked,
        "issues": &combined.issues,
        "checksums": &combined.checksums,
    });

    let issue_count = combined.issues.len();
    emit(args.common.json, &payload, || {
        let mut lines: Vec<String> = Vec::new();
        for issue in &combined.issues {
            lines.push(format!(
                "mismatch persona={} store={} expected={} found={}",
                issue.persona_id, issue.store_id, issue.expected, issue.found
            ));
        }
        lines.push(format!(
            "validate personas={} stores_checked={} issues={}",
            persona_ids.len(),
            combined.stores_checked,
            issue_count
        ));
        lines.join("\n") + "\n"
    })?;

    if issue_count > 0 {
        Err(format!("{} count mismatch(es) found", issue_count))
    } else {
        Ok(())
    }
}
