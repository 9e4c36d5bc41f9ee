//! Route enumeration: every page address the static site can render.
//!
//! Personas with a missing or undecodable profile are skipped with a
//! warning record; everything else enumerates from the datasets as they
//! exist on disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use persona_vault::{encode_note_path, scan_vault};

use crate::{load_index, load_profile, load_store_index, DataError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    PersonaIndex,
    Persona {
        persona_id: String,
    },
    Store {
        persona_id: String,
        store_id: String,
    },
    Order {
        persona_id: String,
        store_id: String,
        order_id: String,
    },
    HealthcareServer {
        persona_id: String,
        server_id: String,
    },
    VaultIndex {
        persona_id: String,
    },
    VaultNote {
        persona_id: String,
        /// Note path relative to the vault, not yet percent-encoded.
        note_path: String,
    },
}

impl Route {
    /// Site-absolute address for the page, note segments percent-encoded.
    pub fn href(&self) -> String {
        match self {
            Route::PersonaIndex => "/personas".to_string(),
            Route::Persona { persona_id } => format!("/personas/{}", persona_id),
            Route::Store {
                persona_id,
                store_id,
            } => format!("/personas/{}/store/{}", persona_id, store_id),
            Route::Order {
                persona_id,
                store_id,
                order_id,
            } => format!(
                "/personas/{}/store/{}/order/{}",
                persona_id, store_id, order_id
            ),
            Route::HealthcareServer {
                persona_id,
                server_id,
            } => format!("/personas/{}/healthcare/{}", persona_id, server_id),
            Route::VaultIndex { persona_id } => format!("/personas/{}/obsidian", persona_id),
            Route::VaultNote {
                persona_id,
                note_path,
            } => format!(
                "/personas/{}/obsidian/{}",
                persona_id,
                encode_note_path(note_path)
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteWarning {
    pub persona_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct RouteSet {
    pub routes: Vec<Route>,
    pub warnings: Vec<RouteWarning>,
}

/// Enumerate every renderable route under the data root.
pub fn enumerate_routes(data_root: &Path) -> Result<RouteSet, DataError> {
    let index = load_index(data_root)?;
    let mut set = RouteSet::default();
    set.routes.push(Route::PersonaIndex);

    for persona in &index.personas {
        let profile = match load_profile(data_root, &persona.id) {
            Ok(p) => p,
            Err(err) => {
                set.warnings.push(RouteWarning {
                    persona_id: persona.id.clone(),
                    message: err.to_string(),
                });
                continue;
            }
        };

        set.routes.push(Route::Persona {
            persona_id: persona.id.clone(),
        });

        for store in &profile.stores {
            set.routes.push(Route::Store {
                persona_id: persona.id.clone(),
                store_id: store.id.clone(),
            });
            match load_store_index(data_root, &persona.id, &store.id) {
                Ok(store_index) => {
                    for order_id in order_ids(&store_index) {
                        set.routes.push(Route::Order {
                            persona_id: persona.id.clone(),
                            store_id: store.id.clone(),
                            order_id,
                        });
                    }
                }
                Err(err) => set.warnings.push(RouteWarning {
                    persona_id: persona.id.clone(),
                    message: format!("store {}: {}", store.id, err),
                }),
            }
        }

        if let Some(healthcare) = profile.healthcare.as_ref() {
            for server in &healthcare.servers {
                set.routes.push(Route::HealthcareServer {
                    persona_id: persona.id.clone(),
                    server_id: server.id.clone(),
                });
            }
        }

        if profile.has_vault() {
            match scan_vault(data_root, &persona.id) {
                Ok(vault) => {
                    set.routes.push(Route::VaultIndex {
                        persona_id: persona.id.clone(),
                    });
                    for note in vault
                        .root_notes
                        .iter()
                        .chain(vault.folders.values().flatten())
                    {
                        set.routes.push(Route::VaultNote {
                            persona_id: persona.id.clone(),
                            note_path: note.relative_path.clone(),
                        });
                    }
                }
                Err(err) => set.warnings.push(RouteWarning {
                    persona_id: persona.id.clone(),
                    message: format!("vault: {}", err),
                }),
            }
        }
    }

    Ok(set)
}

/// Order ids for a store, deduplicated across the flat list and the
/// per-category lists (single-category stores repeat them).
fn order_ids(index: &persona_model::StoreIndex) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut out = Vec::new();
    let flat = index.items.iter();
    let per_category = index.categories.iter().flat_map(|c| c.items.iter());
    for item in flat.chain(per_category) {
        if seen.insert(item.order_id.clone()) {
            out.push(item.order_id.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hrefs_encode_note_segments() {
        let route = Route::VaultNote {
            persona_id: "alice".to_string(),
            note_path: "Daily Notes/2026-01-30".to_string(),
        };
        assert_eq!(
            route.href(),
            "/personas/alice/obsidian/Daily%20Notes/2026-01-30"
        );
        assert_eq!(Route::PersonaIndex.href(), "/personas");
    }
}
