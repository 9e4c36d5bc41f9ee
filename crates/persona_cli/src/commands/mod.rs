pub mod personas;
pub mod render;
pub mod routes;
pub mod tools;
pub mod validate;
pub mod vault;

/// Print a payload as pretty JSON (the stable contract) or hand it to the
/// caller's line formatter.
pub(crate) fn emit(
    json: bool,
    payload: &serde_json::Value,
    text: impl FnOnce() -> String,
) -> Result<(), String> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(payload).map_err(|e| format!("json encode: {}", e))?
        );
    } else {
        print!("{}", text());
    }
    Ok(())
}
