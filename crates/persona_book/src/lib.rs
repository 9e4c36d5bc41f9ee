//! Static-site emission: render every enumerated route to a markdown file
//! under an output directory.
//!
//! Rendering re-reads the datasets for each page instead of caching across
//! pages. The trees are small and static, and a fresh read per page keeps
//! the pipeline identical to serving a single page on demand.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use persona_data::routes::{enumerate_routes, Route, RouteWarning};
use persona_data::{
    load_healthcare_index, load_index, load_order, load_profile, load_store_index, read_note,
    DataError,
};
use persona_vault::{build_note_index, scan_vault, VaultError};

mod model;
mod render;

pub use model::{fmt_currency, fmt_number, fmt_price, render_breadcrumb, render_table, Crumb};
pub use render::{
    render_healthcare_page, render_note_page, render_order_page, render_persona_page,
    render_personas_page, render_store_page, render_vault_page,
};

#[derive(Debug)]
pub enum RenderError {
    Data(DataError),
    Vault(VaultError),
    Io(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Data(err) => write!(f, "data error: {}", err),
            RenderError::Vault(err) => write!(f, "vault error: {}", err),
            RenderError::Io(err) => write!(f, "io error: {}", err),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<DataError> for RenderError {
    fn from(err: DataError) -> Self {
        RenderError::Data(err)
    }
}

impl From<VaultError> for RenderError {
    fn from(err: VaultError) -> Self {
        RenderError::Vault(err)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SiteReport {
    pub pages_written: u64,
    pub warnings: Vec<RouteWarning>,
}

/// Output file for a route: the route's href relative to the output root,
/// with `.md` appended.
pub fn route_file_path(route: &Route) -> PathBuf {
    let href = route.href();
    let rel = href.trim_start_matches('/');
    PathBuf::from(format!("{}.md", rel))
}

/// Render the whole site under `out_dir`. Returns page counts plus the
/// warnings accumulated while enumerating (missing profiles and the like).
pub fn render_site(data_root: &Path, out_dir: &Path) -> Result<SiteReport, RenderError> {
    let index = load_index(data_root)?;
    let set = enumerate_routes(data_root)?;

    let mut report = SiteReport {
        pages_written: 0,
        warnings: set.warnings.clone(),
    };

    for route in &set.routes {
        let content = render_route(data_root, route)?;
        let path = out_dir.join(route_file_path(route));
        write_page(&path, &content)?;
        report.pages_written += 1;
    }

    // Site front page: aggregate stats plus a render stamp.
    let mut front = String::new();
    front.push_str("# Persona Data Browser\n\n");
    front.push_str(&format!(
        "- Personas: {}\n- Orders: {}\n- Stores: {}\n- Pages: {}\n- Data generated: {}\n- Rendered: {}\n",
        fmt_number(index.stats.total_personas),
        fmt_number(index.stats.total_orders),
        fmt_number(index.stats.total_stores),
        fmt_number(report.pages_written),
        index.generated_at,
        now_utc_rfc3339()
    ));
    if !report.warnings.is_empty() {
        front.push_str("\n## Warnings\n\n");
        for warning in &report.warnings {
            front.push_str(&format!("- {}: {}\n", warning.persona_id, warning.message));
        }
    }
    front.push_str("\n[Personas](/personas)\n");
    write_page(&out_dir.join("index.md"), &front)?;
    report.pages_written += 1;

    Ok(report)
}

fn render_route(data_root: &Path, route: &Route) -> Result<String, RenderError> {
    match route {
        Route::PersonaIndex => {
            let index = load_index(data_root)?;
            Ok(render_personas_page(&index))
        }
        Route::Persona { persona_id } => {
            let profile = load_profile(data_root, persona_id)?;
            Ok(render_persona_page(&profile))
        }
        Route::Store {
            persona_id,
            store_id,
        } => {
            let profile = load_profile(data_root, persona_id)?;
            let store = load_store_index(data_root, persona_id, store_id)?;
            Ok(render_store_page(&store, &profile.name))
        }
        Route::Order {
            persona_id,
            store_id,
            order_id,
        } => {
            let profile = load_profile(data_root, persona_id)?;
            let order = load_order(data_root, persona_id, store_id, order_id)?;
            let store_name = profile
                .stores
                .iter()
                .find(|s| &s.id == store_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| store_id.clone());
            Ok(render_order_page(&order, &profile.name, &store_name))
        }
        Route::HealthcareServer {
            persona_id,
            server_id,
        } => {
            let profile = load_profile(data_root, persona_id)?;
            let server = load_healthcare_index(data_root, persona_id, server_id)?;
            Ok(render_healthcare_page(&server, &profile.name))
        }
        Route::VaultIndex { persona_id } => {
            let profile = load_profile(data_root, persona_id)?;
            let vault = scan_vault(data_root, persona_id)?;
            Ok(render_vault_page(persona_id, &profile.name, &vault))
        }
        Route::VaultNote {
            persona_id,
            note_path,
        } => {
            let profile = load_profile(data_root, persona_id)?;
            let vault = scan_vault(data_root, persona_id)?;
            let index = build_note_index(&vault);
            // A note that vanished between enumeration and render gets the
            // not-found body, never a failed render.
            let raw = read_note(data_root, persona_id, note_path).ok();
            Ok(render_note_page(
                persona_id,
                &profile.name,
                note_path,
                raw.as_deref(),
                &index,
            ))
        }
    }
}

fn write_page(path: &Path, content: &str) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| RenderError::Io(format!("mkdir {}: {}", parent.display(), err)))?;
    }
    fs::write(path, content)
        .map_err(|err| RenderError::Io(format!("write {}: {}", path.display(), err)))
}

fn now_utc_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
