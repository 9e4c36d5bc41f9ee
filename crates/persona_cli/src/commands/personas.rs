use persona_data::load_index;

use crate::PersonasArgs;

use super::emit;

pub fn run(args: PersonasArgs) -> Result<(), String> {
    let data_root = args.common.resolve_data_root();
    let index = load_index(&data_root).map_err(|e| e.to_string())?;

    let payload = serde_json::json!({
        "command": "personas",
        "data_root": data_root.to_string_lossy(),
        "stats": &index.stats,
        "generated_at": &index.generated_at,
        "personas": &index.personas,
    });

    emit(args.common.json, &payload, || {
        let mut lines: Vec<String> = Vec::new();
        for p in &index.personas {
            lines.push(format!(
                "persona id={} name={:?} profession={:?} city={:?} orders={} spent={:.2}",
                p.id, p.name, p.profession, p.city, p.total_orders, p.total_spent
            ));
        }
        lines.push(format!(
            "personas total={} orders={} stores={}",
            index.stats.total_personas, index.stats.total_orders, index.stats.total_stores
        ));
        lines.join("\n") + "\n"
    })
}
