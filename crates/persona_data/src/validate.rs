//! Cross-check generated store JSON against the mock-server CSV sources.
//!
//! The generator distills per-user CSV records into each store's
//! `index.json`; this module re-counts both sides and reports every store
//! where they disagree. Checksums of the CSV inputs ride along so drift can
//! be traced to a regenerated source file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::csv::read_csv_file;
use crate::{load_store_index, DataError};

/// Store id → CSV files holding its records, as the generator consumes
/// them. `user_id` is the per-user key column in every file.
const STORE_DATA_FILES: &[(&str, &[&str])] = &[
    ("amazon", &["orders.csv"]),
    ("walmart", &["orders.csv"]),
    ("bakery", &["purchases.csv", "preorders.csv"]),
    ("bookstore", &["purchases.csv"]),
    ("coffee_roaster", &["purchases.csv", "user_subscriptions.csv"]),
    ("florist", &["orders.csv", "subscriptions.csv"]),
    ("grocery", &["orders.csv"]),
    ("movie_theater", &["bookings.csv"]),
    (
        "pet_store",
        &["purchases.csv", "grooming_appointments.csv", "pet_profiles.csv"],
    ),
    ("pharmacy", &["purchases.csv"]),
    ("zillow", &["scheduled_tours.csv", "saved_properties.csv"]),
    ("car_deals", &["inquiries.csv", "test_drive_bookings.csv"]),
    ("pc_parts", &["orders.csv"]),
    ("electronics_store", &["orders.csv"]),
    ("fashion", &["orders.csv"]),
    ("sephora", &["orders.csv"]),
    ("perfume_shop", &["orders.csv"]),
    ("jewelry", &["orders.csv"]),
    ("sporting_goods", &["orders.csv"]),
    ("toy_store", &["orders.csv", "wishlists.csv"]),
    ("furniture_store", &["orders.csv"]),
    ("jewelry_store", &["orders.csv"]),
];

const USER_ID_FIELD: &str = "user_id";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub persona_id: String,
    pub store_id: String,
    pub expected: u64,
    pub found: u64,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceChecksum {
    pub store_id: String,
    pub file: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    pub checksums: Vec<SourceChecksum>,
    pub stores_checked: u64,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Count CSV records per user id. A missing file counts as zero records
/// (stores don't all exist for every server layout).
pub fn count_csv_records(path: &Path) -> Result<BTreeMap<String, u64>, DataError> {
    let mut counts = BTreeMap::new();
    if !path.exists() {
        return Ok(counts);
    }
    let table = read_csv_file(path)?;
    let Some(user_col) = table.column(USER_ID_FIELD) else {
        return Ok(counts);
    };
    for row in &table.rows {
        let user_id = row.get(user_col).map(String::as_str).unwrap_or("");
        if !user_id.is_empty() {
            *counts.entry(user_id.to_string()).or_insert(0) += 1;
        }
    }
    Ok(counts)
}

/// Total item count a store's index.json reports (categories preferred,
/// flat list as the single-category fallback).
fn counted_json_items(
    data_root: &Path,
    persona_id: &str,
    store_id: &str,
) -> Result<u64, DataError> {
    let index = load_store_index(data_root, persona_id, store_id)?;
    if !index.categories.is_empty() {
        return Ok(index
            .categories
            .iter()
            .map(|c| c.items.len() as u64)
            .sum());
    }
    Ok(index.items.len() as u64)
}

/// Validate one persona's stores against the mock-server CSV tree.
///
/// `servers_root` is the directory holding `<store_id>/data/<file>.csv`;
/// `user_id` is the persona's id in those CSVs (the generator maps persona
/// ids onto server user ids one-to-one).
pub fn validate_store_counts(
    data_root: &Path,
    servers_root: &Path,
    persona_id: &str,
) -> Result<ValidationReport, DataError> {
    let mut report = ValidationReport::default();

    for (store_id, files) in STORE_DATA_FILES {
        let mut expected = 0u64;
        let mut any_source = false;
        for file in *files {
            let csv_path = servers_root.join(store_id).join("data").join(file);
            if csv_path.exists() {
                any_source = true;
                let counts = count_csv_records(&csv_path)?;
                expected += counts.get(persona_id).copied().unwrap_or(0);
                report.checksums.push(SourceChecksum {
                    store_id: store_id.to_string(),
                    file: file.to_string(),
                    sha256: sha256_hex(&crate::read_bytes(&csv_path)?),
                });
            }
        }
        if !any_source {
            continue;
        }
        report.stores_checked += 1;

        let found = match counted_json_items(data_root, persona_id, store_id) {
            Ok(n) => n,
            Err(err) if err.is_not_found() => 0,
            Err(err) => return Err(err),
        };

        if expected != found {
            report.issues.push(ValidationIssue {
                persona_id: persona_id.to_string(),
                store_id: store_id.to_string(),
                expected,
                found,
                detail: format!(
                    "csv records={} json items={} (files: {})",
                    expected,
                    found,
                    files.join(", ")
                ),
            });
        }
    }

    Ok(report)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn csv_counts_group_by_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(
            &path,
            "order_id,user_id,total\nO1,u1,5\nO2,u1,7\nO3,u2,1\nO4,,9\n",
        )
        .unwrap();
        let counts = count_csv_records(&path).unwrap();
        assert_eq!(counts.get("u1"), Some(&2));
        assert_eq!(counts.get("u2"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn missing_csv_counts_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let counts = count_csv_records(&dir.path().join("absent.csv")).unwrap();
        assert!(counts.is_empty());
    }
}
