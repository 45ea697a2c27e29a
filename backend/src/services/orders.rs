//! Order placement, status tracking and the populated order views.
//!
//! New orders get a short reference number and a timeline holding every
//! [`OrderStatus`] stage, with only `ordered` completed. Placing an order
//! empties the caller's cart.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::database::models::{
    Order, OrderItem, OrderStatus, PaymentStatus, PaymentType, ProductImage, Role, StatusEntry,
};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::utils::reference_number;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(alias = "address")]
    pub address_id: Uuid,
    pub total_amount: f64,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_type: PaymentType,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductSummary {
    #[serde(rename = "_id")]
    id: Uuid,
    name: String,
    product_images: Vec<ProductImage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserSummary {
    #[serde(rename = "_id")]
    id: Uuid,
    first_name: String,
    last_name: String,
}

/// The four-stage timeline of a freshly placed order.
pub fn seed_timeline(now: DateTime<Utc>) -> Vec<StatusEntry> {
    OrderStatus::TIMELINE
        .into_iter()
        .map(|status| {
            let placed = status == OrderStatus::Ordered;
            StatusEntry {
                status,
                date: placed.then_some(now),
                is_completed: placed,
            }
        })
        .collect()
}

/// Marks `status` completed at `now`. Returns `false` when the timeline has no
/// such stage.
pub fn complete_stage(timeline: &mut [StatusEntry], status: OrderStatus, now: DateTime<Utc>) -> bool {
    match timeline.iter_mut().find(|entry| entry.status == status) {
        Some(entry) => {
            *entry = StatusEntry {
                status,
                date: Some(now),
                is_completed: true,
            };
            true
        }
        None => false,
    }
}

fn validate(input: &NewOrder) -> Result<(), AppError> {
    if input.items.is_empty() {
        return Err(AppError::Validation("Order must contain at least one item".into()));
    }
    if input.items.iter().any(|item| item.purchased_qty == 0) {
        return Err(AppError::Validation("purchasedQty must be at least 1".into()));
    }
    if !(input.total_amount.is_finite() && input.total_amount >= 0.0) {
        return Err(AppError::Validation("totalAmount must not be negative".into()));
    }
    Ok(())
}

pub async fn place_order(db: &Database, user: Uuid, input: NewOrder) -> AppResult<Order> {
    validate(&input)?;

    let now = Utc::now();
    let order = Order {
        id: Uuid::new_v4(),
        user,
        address: input.address_id,
        total_amount: input.total_amount,
        items: input.items,
        payment_status: input.payment_status.unwrap_or(PaymentStatus::Pending),
        payment_type: input.payment_type,
        reference_number: reference_number(),
        order_status: seed_timeline(now),
        created_at: now,
        updated_at: now,
    };
    db.orders.insert(&order).await?;
    db.carts.delete(json!({ "user": user })).await?;

    info!("Order {} placed by {}", order.reference_number, user);
    Ok(order)
}

pub async fn update_status(db: &Database, order_id: Uuid, status: OrderStatus) -> AppResult<Order> {
    let mut order = db
        .orders
        .get(order_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".into()))?;

    let now = Utc::now();
    if complete_stage(&mut order.order_status, status, now) {
        order.updated_at = now;
        db.orders.replace(&order).await?;
        info!("Order {} is now {:?}", order.reference_number, status);
    }
    Ok(order)
}

/// Serializes orders with `items[].product` replaced by a product summary,
/// and `user` by a user summary when `with_user` is set. References that no
/// longer resolve become `null`.
pub async fn populate(db: &Database, orders: &[Order], with_user: bool) -> AppResult<Vec<Value>> {
    let mut products: HashMap<Uuid, Value> = HashMap::new();
    let mut users: HashMap<Uuid, Value> = HashMap::new();
    let mut populated = Vec::with_capacity(orders.len());

    for order in orders {
        let mut value = serde_json::to_value(order)?;

        for (index, item) in order.items.iter().enumerate() {
            if !products.contains_key(&item.product) {
                let summary = match db.products.get(item.product).await? {
                    Some(product) => serde_json::to_value(ProductSummary {
                        id: product.id,
                        name: product.name,
                        product_images: product.product_images,
                    })?,
                    None => Value::Null,
                };
                products.insert(item.product, summary);
            }
            if let Some(slot) = value.pointer_mut(&format!("/items/{index}/product")) {
                *slot = products[&item.product].clone();
            }
        }

        if with_user {
            if !users.contains_key(&order.user) {
                let summary = match db.users.get(order.user).await? {
                    Some(user) => serde_json::to_value(UserSummary {
                        id: user.id,
                        first_name: user.first_name,
                        last_name: user.last_name,
                    })?,
                    None => Value::Null,
                };
                users.insert(order.user, summary);
            }
            value["user"] = users[&order.user].clone();
        }

        populated.push(value);
    }
    Ok(populated)
}

pub async fn user_orders(db: &Database, user: Uuid) -> AppResult<Vec<Value>> {
    let orders = db.orders.find(json!({ "user": user })).await?;
    populate(db, &orders, false).await
}

pub async fn all_orders(db: &Database) -> AppResult<Vec<Value>> {
    let orders = db.orders.all().await?;
    populate(db, &orders, true).await
}

/// A single order as `viewer` may see it, with its address id swapped for the
/// owner's saved address when one matches. Only admins see other users' orders.
pub async fn order_detail(
    db: &Database,
    viewer: Uuid,
    role: Role,
    order_id: Uuid,
) -> AppResult<Option<Value>> {
    let Some(order) = db.orders.get(order_id).await? else {
        return Ok(None);
    };
    if order.user != viewer && role != Role::Admin {
        return Ok(None);
    }
    let mut value = populate(db, std::slice::from_ref(&order), false)
        .await?
        .into_iter()
        .next()
        .unwrap_or(Value::Null);

    if let Some(book) = db.addresses.find_one(json!({ "user": order.user })).await? {
        if let Some(address) = book.addresses.into_iter().find(|a| a.id == order.address) {
            value["address"] = serde_json::to_value(address)?;
        }
    }
    Ok(Some(value))
}
