use persona_data::{load_tool_servers, matches_query};

use crate::ToolsArgs;

use super::emit;

pub fn run(args: ToolsArgs) -> Result<(), String> {
    let data_root = args.common.resolve_data_root();
    let servers = load_tool_servers(&data_root, &args.category).map_err(|e| e.to_string())?;
    let query = args.query.as_deref().unwrap_or("");

    let mut matched: Vec<serde_json::Value> = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    let mut total = 0usize;
    for server in &servers {
        for tool in &server.tools {
            total += 1;
            let title = tool.title.as_deref().unwrap_or("");
            if !matches_query(&[&tool.name, title, &tool.description], query) {
                continue;
            }
            matched.push(serde_json::json!({
                "server": server.name,
                "name": tool.name,
                "title": tool.title,
                "description": tool.description,
                "input_schema": tool.input_schema,
            }));
            lines.push(format!(
                "tool server={} name={} description={:?}",
                server.name, tool.name, tool.description
            ));
        }
    }

    let matched_count = matched.len();
    let payload = serde_json::json!({
        "command": "tools",
        "category": &args.category,
        "query": query,
        "servers": servers.len(),
        "tools_total": total,
        "tools_matched": matched_count,
        "tools": matched,
    });
    emit(args.common.json, &payload, || {
        lines.push(format!(
            "tools category={} matched={}/{} servers={}",
            args.category,
            matched_count,
            total,
            servers.len()
        ));
        lines.join("\n") + "\n"
    })
}
