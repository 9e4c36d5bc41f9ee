use persona_data::routes::enumerate_routes;

use crate::RoutesArgs;

use super::emit;

pub fn run(args: RoutesArgs) -> Result<(), String> {
    let data_root = args.common.resolve_data_root();
    let set = enumerate_routes(&data_root).map_err(|e| e.to_string())?;

    for warning in &set.warnings {
        eprintln!("Warning: {}: {}", warning.persona_id, warning.message);
    }

    let hrefs: Vec<String> = set.routes.iter().map(|r| r.href()).collect();
    let payload = serde_json::json!({
        "command": "routes",
        "data_root": data_root.to_string_lossy(),
        "count": hrefs.len(),
        "routes": &set.routes,
        "hrefs": &hrefs,
        "warnings": &set.warnings,
    });

    emit(args.common.json, &payload, || {
        let mut lines = hrefs.clone();
        lines.push(format!(
            "routes count={} warnings={}",
            hrefs.len(),
            set.warnings.len()
        ));
        lines.join("\n") + "\n"
    })
}
