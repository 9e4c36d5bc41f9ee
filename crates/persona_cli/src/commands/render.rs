use persona_book::render_site;

use crate::RenderArgs;

use super::emit;

pub fn run(args: RenderArgs) -> Result<(), String> {
    let data_root = args.common.resolve_data_root();
    let report = render_site(&data_root, &args.out).map_err(|e| e.to_string())?;

    for warning in &report.warnings {
        eprintln!("Warning: {}: {}", warning.persona_id, warning.message);
    }

    let payload = serde_json::json!({
        "command": "render",
        "data_root": data_root.to_string_lossy(),
        "out": args.out.to_string_lossy(),
        "pages": report.pages_written,
        "warnings": &report.warnings,
    });

    emit(args.common.json, &payload, || {
        format!(
            "render pages={} warnings={} out={}\n",
            report.pages_written,
            report.warnings.len(),
            args.out.display()
        )
    })
}
