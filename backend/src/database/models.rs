//! Rust structs that represent the stored documents.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the document store, one struct per collection. Wire names follow the
//! store's JSON convention: camelCase fields and the identifier under `_id`.
//! API responses that must not expose every field use their own views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::queries::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub hash_password: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_image: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Category {
    const COLLECTION: &'static str = "categories";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub img: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user_id: Uuid,
    pub review: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub price: f64,
    pub quantity: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<f64>,
    #[serde(default)]
    pub product_images: Vec<ProductImage>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub category: Uuid,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> Uuid {
        self.id
    }
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Cart {
    const COLLECTION: &'static str = "carts";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Home,
    Work,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub mobile_number: String,
    pub pin_code: String,
    pub locality: String,
    pub address: String,
    pub city_district_town: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_phone: Option<String>,
    pub address_type: AddressType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAddress {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    #[serde(default)]
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for UserAddress {
    const COLLECTION: &'static str = "useraddresses";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Cancelled,
    Refund,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Cod,
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Ordered,
    Packed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Every stage an order goes through, in order.
    pub const TIMELINE: [OrderStatus; 4] = [
        OrderStatus::Ordered,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product: Uuid,
    pub payable_price: f64,
    pub purchased_qty: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    pub address: Uuid,
    pub total_amount: f64,
    pub items: Vec<OrderItem>,
    pub payment_status: PaymentStatus,
    pub payment_type: PaymentType,
    pub reference_number: String,
    pub order_status: Vec<StatusEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cart_item_quantity_defaults_to_one() {
        let item: CartItem = serde_json::from_value(json!({"product": Uuid::nil()})).unwrap();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_order_status_wire_names() {
        let entry = StatusEntry {
            status: OrderStatus::Shipped,
            date: None,
            is_completed: false,
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"status": "shipped", "isCompleted": false})
        );
    }

    #[test]
    fn test_category_serializes_with_mongo_style_keys() {
        let now = Utc::now();
        let category = Category {
            id: Uuid::nil(),
            name: "Phones".into(),
            slug: "phones".into(),
            parent_id: None,
            category_image: None,
            created_by: Uuid::nil(),
            created_at: now,
            updated_at: now,
        };
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["_id"], json!(Uuid::nil()));
        assert!(value.get("parentId").is_none());
        assert!(value.get("createdBy").is_some());
    }
}
