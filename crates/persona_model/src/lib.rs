//! Typed model for the generator's JSON output tree.
//!
//! Every shape the browser consumes is a concrete struct here; the generator
//! owns the files and this crate never writes them. Unknown fields are
//! ignored on decode so the generator can grow without breaking us.

use serde::{Deserialize, Serialize};
use serde_json::Value;

mod health;
mod store;
mod tools;

pub use health::*;
pub use store::*;
pub use tools::*;

// ---------------------------------------------------------------------------
// Top-level index (index.json)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaSummary {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub profession: String,
    pub industry: String,
    pub city: String,
    pub region: String,
    pub age_group: String,
    pub total_orders: u64,
    pub total_spent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_personas: u64,
    pub total_orders: u64,
    pub total_stores: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexData {
    pub personas: Vec<PersonaSummary>,
    pub stats: IndexStats,
    pub generated_at: String,
}

// ---------------------------------------------------------------------------
// Persona profile (profile.json)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demographics {
    pub age_group: String,
    pub gender: String,
    pub ethnicity: String,
    pub marital_status: String,
    pub family_role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Professional {
    pub profession: String,
    pub industry: String,
    pub experience_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub region: String,
    pub country: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileStats {
    pub total_orders: u64,
    pub total_spent: f64,
    pub stores_count: u64,
}

/// Vault summary embedded in the profile. The authoritative listing comes
/// from scanning the vault directory; this is what the generator counted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObsidianSummary {
    pub total_notes: u64,
    pub folders: Vec<ObsidianFolder>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObsidianFolder {
    pub name: String,
    pub note_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub demographics: Demographics,
    pub professional: Professional,
    pub location: Location,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    pub summary: String,
    #[serde(default)]
    pub stores: Vec<StoreSummary>,
    pub stats: ProfileStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_profile: Option<HealthProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthcare: Option<HealthcareData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obsidian: Option<ObsidianSummary>,
}

impl PersonaProfile {
    /// True when the profile advertises a non-empty note vault.
    pub fn has_vault(&self) -> bool {
        self.obsidian
            .as_ref()
            .map(|o| o.total_notes > 0)
            .unwrap_or(false)
    }
}

// ---------------------------------------------------------------------------
// Healthcare browsing (healthcare/<server>/index.json)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareCategory {
    pub id: String,
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareServer {
    pub id: String,
    pub name: String,
    pub item_count: u64,
    pub category_count: u64,
    pub primary_category: String,
    #[serde(default)]
    pub categories: Vec<HealthcareCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareStats {
    pub total_items: u64,
    pub servers_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareData {
    pub servers: Vec<HealthcareServer>,
    pub stats: HealthcareStats,
}

/// One record inside a healthcare category. The categories are open-ended
/// (appointments, lab results, immunizations, ...), so beyond the common
/// `id`/`date` core the fields are kept as an ordered key/value list and the
/// table renderer displays whatever columns the category carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl HealthcareItem {
    /// Extra columns in document order, rendered as display strings.
    pub fn extra_columns(&self) -> Vec<(String, String)> {
        self.extra
            .iter()
            .map(|(k, v)| (k.clone(), display_value(v)))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareCategoryDetail {
    pub id: String,
    pub name: String,
    pub item_count: u64,
    #[serde(default)]
    pub items: Vec<HealthcareItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareServerSummary {
    pub total_items: u64,
    pub category_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareServerIndex {
    pub persona_id: String,
    pub server_id: String,
    pub server_name: String,
    pub summary: HealthcareServerSummary,
    #[serde(default)]
    pub categories: Vec<HealthcareCategoryDetail>,
}

/// Render a JSON scalar (or small composite) as a single table cell.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_decodes_without_optional_sections() {
        let raw = serde_json::json!({
            "id": "persona_002",
            "name": "Avery Quinn",
            "initials": "AQ",
            "demographics": {
                "age_group": "30-39",
                "gender": "nonbinary",
                "ethnicity": "white",
                "marital_status": "single",
                "family_role": "adult"
            },
            "professional": {
                "profession": "Data Analyst",
                "industry": "Finance",
                "experience_level": "mid"
            },
            "location": {
                "city": "Leeds",
                "region": "Yorkshire",
                "country": "UK",
                "address": "12 Harbour Row"
            },
            "summary": "Synthetic persona.",
            "stats": {"total_orders": 4, "total_spent": 120.5, "stores_count": 2}
        });
        let profile: PersonaProfile = serde_json::from_value(raw).unwrap();
        assert!(profile.healthcare.is_none());
        assert!(profile.obsidian.is_none());
        assert!(!profile.has_vault());
        assert!(profile.stores.is_empty());
    }

    #[test]
    fn has_vault_requires_nonzero_notes() {
        let raw = serde_json::json!({
            "total_notes": 0,
            "folders": []
        });
        let obsidian: ObsidianSummary = serde_json::from_value(raw).unwrap();
        let mut profile = minimal_profile();
        profile.obsidian = Some(obsidian);
        assert!(!profile.has_vault());
        profile.obsidian.as_mut().unwrap().total_notes = 3;
        assert!(profile.has_vault());
    }

    #[test]
    fn healthcare_item_keeps_extra_fields_in_order() {
        let raw = r#"{"id":"apt-1","date":"2026-01-05","provider":"Dr. Ito","status":"completed","copay":25}"#;
        let item: HealthcareItem = serde_json::from_str(raw).unwrap();
        let cols = item.extra_columns();
        assert_eq!(
            cols,
            vec![
                ("provider".to_string(), "Dr. Ito".to_string()),
                ("status".to_string(), "completed".to_string()),
                ("copay".to_string(), "25".to_string()),
            ]
        );
    }

    fn minimal_profile() -> PersonaProfile {
        serde_json::from_value(serde_json::json!({
            "id": "p",
            "name": "P",
            "initials": "P",
            "demographics": {
                "age_group": "", "gender": "", "ethnicity": "",
                "marital_status": "", "family_role": ""
            },
            "professional": {"profession": "", "industry": "", "experience_level": ""},
            "location": {"city": "", "region": "", "country": "", "address": ""},
            "summary": "",
            "stats": {"total_orders": 0, "total_spent": 0.0, "stores_count": 0}
        }))
        .unwrap()
    }
}
