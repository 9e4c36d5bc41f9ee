//! Page bodies, one function per page type.
//!
//! Output is plain markdown: a breadcrumb line, a title, stat lines, and
//! pipe tables. The vault note page is where the resolver pipeline runs
//! (extract tags, then rewrite wiki-links against a fresh index).

use persona_model::{
    HealthcareServerIndex, IndexData, ItemSummary, OrderDetail, PersonaProfile, StoreIndex,
};
use persona_vault::{
    convert_wiki_links, extract_tags, sorted_folders, sorted_root_notes, NoteIndex, VaultStructure,
};

use crate::model::{
    fmt_currency, fmt_number, fmt_price, render_breadcrumb, render_table, Crumb,
};

pub fn render_personas_page(index: &IndexData) -> String {
    let mut out = String::new();
    out.push_str(&render_breadcrumb(&[
        Crumb::link("Home", "/"),
        Crumb::current("Personas"),
    ]));
    out.push_str("\n\n# Personas\n\n");
    out.push_str(&format!(
        "- Personas: {}\n- Total orders: {}\n- Stores: {}\n\n",
        fmt_number(index.stats.total_personas),
        fmt_number(index.stats.total_orders),
        fmt_number(index.stats.total_stores)
    ));

    let rows: Vec<Vec<String>> = index
        .personas
        .iter()
        .map(|p| {
            vec![
                format!("[{}](/personas/{})", p.name, p.id),
                p.profession.clone(),
                p.industry.clone(),
                format!("{}, {}", p.city, p.region),
                p.age_group.clone(),
                fmt_number(p.total_orders),
                fmt_currency(p.total_spent),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["Persona", "Profession", "Industry", "Location", "Age", "Orders", "Spent"],
        &rows,
    ));
    out
}

pub fn render_persona_page(profile: &PersonaProfile) -> String {
    let mut out = String::new();
    out.push_str(&render_breadcrumb(&[
        Crumb::link("Home", "/"),
        Crumb::link("Personas", "/personas"),
        Crumb::current(&profile.name),
    ]));
    out.push_str(&format!("\n\n# {} ({})\n\n", profile.name, profile.initials));
    out.push_str(profile.summary.trim());
    out.push_str("\n\n## Profile\n\n");
    out.push_str(&format!(
        "- Profession: {} ({}, {})\n",
        profile.professional.profession,
        profile.professional.industry,
        profile.professional.experience_level
    ));
    out.push_str(&format!(
        "- Location: {}, {}, {}\n",
        profile.location.city, profile.location.region, profile.location.country
    ));
    out.push_str(&format!(
        "- Demographics: {}, {}, {}\n",
        profile.demographics.age_group,
        profile.demographics.gender,
        profile.demographics.marital_status
    ));
    if !profile.interests.is_empty() {
        out.push_str(&format!("- Interests: {}\n", profile.interests.join(", ")));
    }
    if !profile.personality_traits.is_empty() {
        out.push_str(&format!(
            "- Traits: {}\n",
            profile.personality_traits.join(", ")
        ));
    }
    out.push('\n');

    if !profile.stores.is_empty() {
        out.push_str("## Stores\n\n");
        let rows: Vec<Vec<String>> = profile
            .stores
            .iter()
            .map(|s| {
                vec![
                    format!("[{}](/personas/{}/store/{})", s.name, profile.id, s.id),
                    s.transaction_label.clone(),
                    fmt_number(s.item_count),
                    if s.has_cost {
                        fmt_currency(s.total_spent)
                    } else {
                        "—".to_string()
                    },
                ]
            })
            .collect();
        out.push_str(&render_table(&["Store", "Type", "Items", "Spent"], &rows));
        out.push('\n');
    }

    if let Some(healthcare) = profile.healthcare.as_ref() {
        out.push_str("## Healthcare\n\n");
        let rows: Vec<Vec<String>> = healthcare
            .servers
            .iter()
            .map(|s| {
                vec![
                    format!("[{}](/personas/{}/healthcare/{})", s.name, profile.id, s.id),
                    s.primary_category.clone(),
                    fmt_number(s.item_count),
                    fmt_number(s.category_count),
                ]
            })
            .collect();
        out.push_str(&render_table(
            &["Server", "Primary category", "Items", "Categories"],
            &rows,
        ));
        out.push('\n');
    }

    if let Some(obsidian) = profile.obsidian.as_ref() {
        if obsidian.total_notes > 0 {
            out.push_str("## Notes\n\n");
            out.push_str(&format!(
                "- [Obsidian vault](/personas/{}/obsidian): {} notes, {} folders\n\n",
                profile.id,
                fmt_number(obsidian.total_notes),
                fmt_number(obsidian.folders.len() as u64)
            ));
        }
    }

    out
}

fn item_rows(items: &[ItemSummary], persona_id: &str, store_id: &str) -> Vec<Vec<String>> {
    items
        .iter()
        .map(|item| {
            let label = item
                .display_name
                .clone()
                .unwrap_or_else(|| item.order_id.clone());
            let mut detail = item.description.clone().unwrap_or_default();
            if let Some(preview) = item.item_preview.as_ref() {
                if detail.is_empty() {
                    detail = preview.clone();
                }
            }
            vec![
                format!(
                    "[{}](/personas/{}/store/{}/order/{})",
                    label, persona_id, store_id, item.order_id
                ),
                detail,
                item.status.clone(),
                fmt_number(item.item_count),
                fmt_price(item.total),
                item.created_at.clone(),
            ]
        })
        .collect()
}

pub fn render_store_page(index: &StoreIndex, persona_name: &str) -> String {
    let mut out = String::new();
    out.push_str(&render_breadcrumb(&[
        Crumb::link("Home", "/"),
        Crumb::link("Personas", "/personas"),
        Crumb::link(persona_name, &format!("/personas/{}", index.persona_id)),
        Crumb::current(&index.store_name),
    ]));
    out.push_str(&format!("\n\n# {}\n\n", index.store_name));
    out.push_str(&format!(
        "- {}: {}\n- Total: {}\n- First: {}\n- Last: {}\n\n",
        index.transaction_label,
        fmt_number(index.summary.total_count),
        if index.has_cost {
            fmt_currency(index.summary.total_spent)
        } else {
            "—".to_string()
        },
        index.summary.first_date,
        index.summary.last_date
    ));

    let headers = ["Order", "Detail", "Status", "Items", "Total", "Date"];
    if index.categories.is_empty() {
        out.push_str(&render_table(
            &headers,
            &item_rows(&index.items, &index.persona_id, &index.store_id),
        ));
        return out;
    }

    for category in &index.categories {
        out.push_str(&format!(
            "## {} ({})\n\n",
            category.label,
            fmt_number(category.summary.total_count)
        ));
        out.push_str(&render_table(
            &headers,
            &item_rows(&category.items, &index.persona_id, &index.store_id),
        ));
        out.push('\n');
    }
    out
}

pub fn render_order_page(order: &OrderDetail, persona_name: &str, store_name: &str) -> String {
    let mut out = String::new();
    out.push_str(&render_breadcrumb(&[
        Crumb::link("Home", "/"),
        Crumb::link("Personas", "/personas"),
        Crumb::link(persona_name, &format!("/personas/{}", order.persona_id)),
        Crumb::link(
            store_name,
            &format!("/personas/{}/store/{}", order.persona_id, order.store_id),
        ),
        Crumb::current(&order.order_id),
    ]));
    out.push_str(&format!("\n\n# Order {}\n\n", order.order_id));
    out.push_str(&format!("- Status: {}\n", order.status));
    out.push_str(&format!("- Placed: {}\n", order.created_at));
    if let Some(shipped) = order.shipped_at.as_ref() {
        out.push_str(&format!("- Shipped: {}\n", shipped));
    }
    if let Some(delivered) = order.delivered_at.as_ref() {
        out.push_str(&format!("- Delivered: {}\n", delivered));
    }
    if let Some(address) = order.shipping_address.as_ref() {
        out.push_str(&format!("- Ship to: {}\n", address));
    }
    if let Some(code) = order.confirmation_code.as_ref() {
        out.push_str(&format!("- Confirmation: {}\n", code));
    }
    if let Some(date) = order.appointment_date.as_ref() {
        let time = order.appointment_time.as_deref().unwrap_or("");
        out.push_str(&format!("- Appointment: {} {}\n", date, time));
    }
    if let Some(date) = order.pickup_date.as_ref() {
        let time = order.pickup_time.as_deref().unwrap_or("");
        out.push_str(&format!("- Pickup: {} {}\n", date, time));
    }
    if let Some(instructions) = order.special_instructions.as_ref() {
        out.push_str(&format!("- Instructions: {}\n", instructions));
    }
    out.push_str(&format!(
        "- Total: {} {}\n\n",
        fmt_price(order.total),
        order.currency
    ));

    let rows: Vec<Vec<String>> = order
        .items
        .iter()
        .map(|item| {
            let mut notes: Vec<String> = Vec::new();
            for (label, value) in [
                ("seats", item.seats.as_ref()),
                ("showtime", item.showtime.as_ref()),
                ("theater", item.theater.as_ref()),
                ("recipient", item.recipient.as_ref()),
                ("frequency", item.frequency.as_ref()),
                ("next delivery", item.next_delivery.as_ref()),
                ("pet", item.pet_name.as_ref()),
                ("breed", item.pet_breed.as_ref()),
                ("child", item.child_name.as_ref()),
                ("occasion", item.occasion.as_ref()),
                ("address", item.address.as_ref()),
                ("beds", item.bedrooms.as_ref()),
                ("baths", item.bathrooms.as_ref()),
                ("sqft", item.sqft.as_ref()),
            ] {
                if let Some(v) = value {
                    notes.push(format!("{}: {}", label, v));
                }
            }
            vec![
                item.name.clone(),
                item.category.clone().unwrap_or_default(),
                format!("{}", item.quantity),
                fmt_price(item.price),
                fmt_price(item.subtotal),
                notes.join("; "),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["Item", "Category", "Qty", "Price", "Subtotal", "Details"],
        &rows,
    ));
    out
}

pub fn render_healthcare_page(index: &HealthcareServerIndex, persona_name: &str) -> String {
    let mut out = String::new();
    out.push_str(&render_breadcrumb(&[
        Crumb::link("Home", "/"),
        Crumb::link("Personas", "/personas"),
        Crumb::link(persona_name, &format!("/personas/{}", index.persona_id)),
        Crumb::current(&index.server_name),
    ]));
    out.push_str(&format!("\n\n# {}\n\n", index.server_name));
    out.push_str(&format!(
        "- Records: {}\n- Categories: {}\n\n",
        fmt_number(index.summary.total_items),
        fmt_number(index.summary.category_count)
    ));

    for category in &index.categories {
        out.push_str(&format!(
            "## {} ({})\n\n",
            category.name,
            fmt_number(category.item_count)
        ));
        if category.items.is_empty() {
            out.push_str("No records.\n\n");
            continue;
        }

        // Columns are whatever the first record carries; the categories are
        // open-ended and each one is internally uniform.
        let first = &category.items[0];
        let extra_headers: Vec<String> =
            first.extra_columns().into_iter().map(|(k, _)| k).collect();
        let mut headers: Vec<&str> = vec!["id", "date"];
        headers.extend(extra_headers.iter().map(String::as_str));

        let rows: Vec<Vec<String>> = category
            .items
            .iter()
            .map(|item| {
                let mut row = vec![
                    item.id.clone(),
                    item.date.clone().unwrap_or_default(),
                ];
                for key in &extra_headers {
                    let cell = item
                        .extra
                        .get(key)
                        .map(persona_model::display_value)
                        .unwrap_or_default();
                    row.push(cell);
                }
                row
            })
            .collect();
        out.push_str(&render_table(&headers, &rows));
        out.push('\n');
    }
    out
}

pub fn render_vault_page(
    persona_id: &str,
    persona_name: &str,
    vault: &VaultStructure,
) -> String {
    let mut out = String::new();
    out.push_str(&render_breadcrumb(&[
        Crumb::link("Home", "/"),
        Crumb::link("Personas", "/personas"),
        Crumb::link(persona_name, &format!("/personas/{}", persona_id)),
        Crumb::current("Obsidian Vault"),
    ]));
    let folders = sorted_folders(vault);
    out.push_str("\n\n# Obsidian Vault\n\n");
    out.push_str(&format!(
        "- Notes: {}\n- Folders: {}\n\n",
        fmt_number(vault.note_count() as u64),
        fmt_number(folders.len() as u64)
    ));

    for note in sorted_root_notes(vault) {
        out.push_str(&format!(
            "- [{}](/personas/{}/obsidian/{})\n",
            note.name,
            persona_id,
            persona_vault::encode_note_path(&note.relative_path)
        ));
    }
    for (folder, notes) in &folders {
        out.push_str(&format!("- {}/\n", folder));
        for note in notes {
            out.push_str(&format!(
                "  - [{}](/personas/{}/obsidian/{})\n",
                note.name,
                persona_id,
                persona_vault::encode_note_path(&note.relative_path)
            ));
        }
    }
    out
}

/// The vault note page. `raw_content` is `None` when the file read failed;
/// the page renders the not-found body instead of erroring (the vault may
/// have changed since the route was enumerated).
pub fn render_note_page(
    persona_id: &str,
    persona_name: &str,
    note_path: &str,
    raw_content: Option<&str>,
    index: &NoteIndex,
) -> String {
    let note_name = note_path.rsplit('/').next().unwrap_or(note_path);
    let folder = note_path.rsplit_once('/').map(|(f, _)| f);

    let mut crumbs = vec![
        Crumb::link("Home", "/"),
        Crumb::link("Personas", "/personas"),
        Crumb::link(persona_name, &format!("/personas/{}", persona_id)),
        Crumb::link("Vault", &format!("/personas/{}/obsidian", persona_id)),
    ];
    if let Some(folder) = folder {
        crumbs.push(Crumb::current(folder));
    }
    crumbs.push(Crumb::current(note_name));

    let mut out = String::new();
    out.push_str(&render_breadcrumb(&crumbs));
    out.push_str("\n\n");

    let Some(raw) = raw_content else {
        out.push_str("Note not found.\n");
        return out;
    };

    let extracted = extract_tags(raw);
    let body = convert_wiki_links(&extracted.clean_content, persona_id, index);
    out.push_str(body.trim_end());
    out.push('\n');

    if !extracted.tags.is_empty() {
        out.push('\n');
        let tags: Vec<String> = extracted.tags.iter().map(|t| format!("`#{}`", t)).collect();
        out.push_str(&format!("Tags: {}\n", tags.join(" ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_vault::VaultNote;

    fn sample_index() -> NoteIndex {
        let mut index = NoteIndex::new();
        index.insert("Home".to_string(), "Home".to_string());
        index.insert(
            "2026-01-30".to_string(),
            "Daily Notes/2026-01-30".to_string(),
        );
        index
    }

    #[test]
    fn note_page_resolves_links_and_lists_tags() {
        let raw = "See [[Daily Notes/2026-01-30|yesterday]] and [[Gone]].\n\nTags: #daily #log";
        let page = render_note_page("p1", "Avery", "Home", Some(raw), &sample_index());
        assert!(page.contains("[yesterday](/personas/p1/obsidian/Daily%20Notes/2026-01-30)"));
        assert!(page.contains("**Gone**"));
        assert!(page.contains("Tags: `#daily` `#log`"));
        assert!(!page.contains("Tags: #daily #log"));
    }

    #[test]
    fn note_page_missing_note_fallback() {
        let page = render_note_page("p1", "Avery", "Nope", None, &NoteIndex::new());
        assert!(page.contains("Note not found."));
        assert!(page.contains("[Vault](/personas/p1/obsidian)"));
    }

    #[test]
    fn note_page_breadcrumb_includes_folder() {
        let page = render_note_page(
            "p1",
            "Avery",
            "Daily Notes/2026-01-30",
            Some("body"),
            &sample_index(),
        );
        assert!(page.contains("**Daily Notes** / **2026-01-30**"));
    }

    #[test]
    fn vault_page_lists_home_first() {
        let mut vault = VaultStructure::default();
        for name in ["Reading", "Home"] {
            vault.root_notes.push(VaultNote {
                name: name.to_string(),
                relative_path: name.to_string(),
                folder: None,
            });
        }
        let page = render_vault_page("p1", "Avery", &vault);
        let home = page.find("[Home](").unwrap();
        let reading = page.find("[Reading](").unwrap();
        assert!(home < reading);
    }
}
