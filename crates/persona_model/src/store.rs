//! Store order browsing shapes (stores/<store>/index.json and order files).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub item_count: u64,
    pub total_spent: f64,
    pub has_cost: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSummary {
    pub id: String,
    pub name: String,
    pub item_count: u64,
    pub total_spent: f64,
    pub transaction_type: String,
    pub transaction_label: String,
    pub has_cost: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategorySummary>>,
}

/// One row in a store's order table. `display_name`/`description` cover the
/// non-order categories (pet profiles, saved properties) where the generator
/// substitutes a friendlier label than an order id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSummary {
    pub order_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_preview: Option<String>,
    pub status: String,
    pub total: f64,
    pub item_count: u64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub total_count: u64,
    pub total_spent: f64,
    pub first_date: String,
    pub last_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCategory {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub has_cost: bool,
    pub summary: CategoryTotals,
    #[serde(default)]
    pub items: Vec<ItemSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreIndex {
    pub persona_id: String,
    pub store_id: String,
    pub store_name: String,
    pub transaction_type: String,
    pub transaction_label: String,
    pub has_cost: bool,
    pub summary: CategoryTotals,
    // Flat item list kept for single-category stores; `categories` is the
    // full browsing structure.
    #[serde(default)]
    pub items: Vec<ItemSummary>,
    #[serde(default)]
    pub categories: Vec<StoreCategory>,
}

/// Line item on an order. Common purchase core plus the typed optional
/// fields each store category can attach (bookings, subscriptions,
/// grooming, pet profiles, wishlists, property tours).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub quantity: f64,
    pub price: f64,
    pub subtotal: f64,

    // Bookings (movie theater).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seats: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theater: Option<String>,

    // Subscriptions (florist, coffee roaster).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_delivery: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bean_preference: Option<String>,

    // Grooming / pet profiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_years: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_lbs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    // Wishlists (toy store).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    // Properties (zillow).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqft: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order_id: String,
    pub persona_id: String,
    pub store_id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub status: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipped_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_item_core_plus_booking_fields() {
        let raw = serde_json::json!({
            "product_id": "TCK-1",
            "name": "Evening screening",
            "quantity": 2,
            "price": 11.0,
            "subtotal": 22.0,
            "seats": "F4, F5",
            "showtime": "19:30",
            "theater": "Screen 2"
        });
        let item: OrderItem = serde_json::from_value(raw).unwrap();
        assert_eq!(item.seats.as_deref(), Some("F4, F5"));
        assert!(item.pet_name.is_none());
    }

    #[test]
    fn store_index_tolerates_missing_categories() {
        let raw = serde_json::json!({
            "persona_id": "p1",
            "store_id": "bookstore",
            "store_name": "Bookstore",
            "transaction_type": "purchase",
            "transaction_label": "Purchases",
            "has_cost": true,
            "summary": {
                "total_count": 1,
                "total_spent": 9.99,
                "first_date": "2026-01-01",
                "last_date": "2026-01-01"
            },
            "items": [{
                "order_id": "ORD-1",
                "status": "delivered",
                "total": 9.99,
                "item_count": 1,
                "created_at": "2026-01-01"
            }]
        });
        let index: StoreIndex = serde_json::from_value(raw).unwrap();
        assert!(index.categories.is_empty());
        assert_eq!(index.items.len(), 1);
    }
}
