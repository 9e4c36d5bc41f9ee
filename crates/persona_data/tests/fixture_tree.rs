//! End-to-end loader tests over a small generated-tree fixture.

use std::fs;
use std::path::Path;

use persona_data::routes::{enumerate_routes, Route};
use persona_data::validate::validate_store_counts;
use persona_data::{
    load_index, load_order, load_profile, load_store_index, load_tool_servers, read_note,
};

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn build_fixture(root: &Path) {
    write(
        &root.join("index.json"),
        r#"{
            "personas": [
                {"id": "persona_002", "name": "Avery Quinn", "initials": "AQ",
                 "profession": "Data Analyst", "industry": "Finance",
                 "city": "Leeds", "region": "Yorkshire", "age_group": "30-39",
                 "total_orders": 2, "total_spent": 31.98},
                {"id": "persona_404", "name": "Missing Profile", "initials": "MP",
                 "profession": "", "industry": "", "city": "", "region": "",
                 "age_group": "", "total_orders": 0, "total_spent": 0}
            ],
            "stats": {"total_personas": 2, "total_orders": 2, "total_stores": 1},
            "generated_at": "2026-02-01T00:00:00Z"
        }"#,
    );
    write(
        &root.join("persona_002/profile.json"),
        r#"{
            "id": "persona_002", "name": "Avery Quinn", "initials": "AQ",
            "demographics": {"age_group": "30-39", "gender": "nonbinary",
                "ethnicity": "white", "marital_status": "single", "family_role": "adult"},
            "professional": {"profession": "Data Analyst", "industry": "Finance",
                "experience_level": "mid"},
            "location": {"city": "Leeds", "region": "Yorkshire", "country": "UK",
                "address": "12 Harbour Row"},
            "summary": "Synthetic persona.",
            "stores": [{"id": "bookstore", "name": "Bookstore", "item_count": 2,
                "total_spent": 31.98, "transaction_type": "purchase",
                "transaction_label": "Purchases", "has_cost": true}],
            "stats": {"total_orders": 2, "total_spent": 31.98, "stores_count": 1},
            "healthcare": {
                "servers": [{"id": "clinic", "name": "Clinic", "item_count": 1,
                    "category_count": 1, "primary_category": "appointments",
                    "categories": [{"id": "appointments", "name": "Appointments", "count": 1}]}],
                "stats": {"total_items": 1, "servers_count": 1}
            },
            "obsidian": {"total_notes": 2, "folders": [{"name": "Daily Notes", "note_count": 1}]}
        }"#,
    );
    write(
        &root.join("persona_002/stores/bookstore/index.json"),
        r#"{
            "persona_id": "persona_002", "store_id": "bookstore",
            "store_name": "Bookstore", "transaction_type": "purchase",
            "transaction_label": "Purchases", "has_cost": true,
            "summary": {"total_count": 2, "total_spent": 31.98,
                "first_date": "2026-01-01", "last_date": "2026-01-15"},
            "items": [
                {"order_id": "ORD-1", "status": "delivered", "total": 9.99,
                 "item_count": 1, "created_at": "2026-01-01"},
                {"order_id": "ORD-2", "status": "shipped", "total": 21.99,
                 "item_count": 1, "created_at": "2026-01-15"}
            ],
            "categories": []
        }"#,
    );
    write(
        &root.join("persona_002/stores/bookstore/orders/ORD-1.json"),
        r#"{
            "order_id": "ORD-1", "persona_id": "persona_002", "store_id": "bookstore",
            "status": "delivered", "created_at": "2026-01-01",
            "items": [{"product_id": "BK-1", "name": "A Field Guide",
                "quantity": 1, "price": 9.99, "subtotal": 9.99}],
            "total": 9.99, "currency": "USD"
        }"#,
    );
    write(
        &root.join("persona_002/obsidian/Home.md"),
        "Welcome. See [[Daily Notes/2026-01-30]].\n\nTags: #home\n",
    );
    write(
        &root.join("persona_002/obsidian/Daily Notes/2026-01-30.md"),
        "Quiet day.\n",
    );
    write(
        &root.join("tools/shopping/amazon.json"),
        r#"{
            "filename": "amazon.json", "name": "amazon",
            "tools": [{"name": "search_orders", "description": "Search orders",
                "inputSchema": {"type": "object"}}],
            "dataFiles": ["orders.csv"]
        }"#,
    );
}

#[test]
fn loaders_decode_the_fixture_tree() {
    let dir = tempfile::tempdir().unwrap();
    build_fixture(dir.path());

    let index = load_index(dir.path()).unwrap();
    assert_eq!(index.personas.len(), 2);

    let profile = load_profile(dir.path(), "persona_002").unwrap();
    assert!(profile.has_vault());
    assert_eq!(profile.stores.len(), 1);

    let store = load_store_index(dir.path(), "persona_002", "bookstore").unwrap();
    assert_eq!(store.items.len(), 2);

    let order = load_order(dir.path(), "persona_002", "bookstore", "ORD-1").unwrap();
    assert_eq!(order.items[0].name, "A Field Guide");

    let servers = load_tool_servers(dir.path(), "shopping").unwrap();
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].all_data_files(), vec!["orders.csv".to_string()]);

    let note = read_note(dir.path(), "persona_002", "Daily Notes/2026-01-30").unwrap();
    assert_eq!(note, "Quiet day.\n");
}

#[test]
fn routes_cover_every_page_and_warn_on_missing_profiles() {
    let dir = tempfile::tempdir().unwrap();
    build_fixture(dir.path());

    let set = enumerate_routes(dir.path()).unwrap();
    assert_eq!(set.warnings.len(), 1);
    assert_eq!(set.warnings[0].persona_id, "persona_404");

    let expect = [
        Route::PersonaIndex,
        Route::Persona {
            persona_id: "persona_002".to_string(),
        },
        Route::Store {
            persona_id: "persona_002".to_string(),
            store_id: "bookstore".to_string(),
        },
        Route::Order {
            persona_id: "persona_002".to_string(),
            store_id: "bookstore".to_string(),
            order_id: "ORD-1".to_string(),
        },
        Route::Order {
            persona_id: "persona_002".to_string(),
            store_id: "bookstore".to_string(),
            order_id: "ORD-2".to_string(),
        },
        Route::HealthcareServer {
            persona_id: "persona_002".to_string(),
            server_id: "clinic".to_string(),
        },
        Route::VaultIndex {
            persona_id: "persona_002".to_string(),
        },
        Route::VaultNote {
            persona_id: "persona_002".to_string(),
            note_path: "Home".to_string(),
        },
        Route::VaultNote {
            persona_id: "persona_002".to_string(),
            note_path: "Daily Notes/2026-01-30".to_string(),
        },
    ];
    for route in &expect {
        assert!(set.routes.contains(route), "missing route {:?}", route);
    }
    assert_eq!(set.routes.len(), expect.len());
}

#[test]
fn validation_flags_count_mismatches() {
    let dir = tempfile::tempdir().unwrap();
    build_fixture(dir.path());

    let servers = tempfile::tempdir().unwrap();
    // Three CSV purchases for this persona, but the generated JSON carries
    // only two items.
    write(
        &servers.path().join("bookstore/data/purchases.csv"),
        "purchase_id,user_id\nP1,persona_002\nP2,persona_002\nP3,persona_002\nP4,other\n",
    );

    let report = validate_store_counts(dir.path(), servers.path(), "persona_002").unwrap();
    assert_eq!(report.stores_checked, 1);
    assert!(!report.is_clean());
    assert_eq!(report.issues.len(), 1);
    let issue = &report.issues[0];
    assert_eq!(issue.store_id, "bookstore");
    assert_eq!(issue.expected, 3);
    assert_eq!(issue.found, 2);
    assert_eq!(report.checksums.len(), 1);
    assert_eq!(report.checksums[0].sha256.len(), 64);
}
