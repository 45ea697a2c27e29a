//! Shopping cart logic: one cart document per user.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use adapters::StoreError;

use crate::database::models::{Cart, CartItem};
use crate::database::{Database, Document};
use crate::errors::{AppError, AppResult};
use crate::utils::keyed_id;

const CART_WRITE_ATTEMPTS: usize = 3;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
}

/// A cart line joined with its product, keyed by product id in responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub img: String,
    pub price: f64,
    pub qty: u32,
}

/// Replaces the quantity of lines already in the cart and appends new ones.
pub fn merge_items(items: &mut Vec<CartItem>, incoming: Vec<CartItem>) {
    for item in incoming {
        match items.iter_mut().find(|line| line.product == item.product) {
            Some(line) => line.quantity = item.quantity,
            None => items.push(item),
        }
    }
}

pub async fn add_to_cart(db: &Database, user: Uuid, input: AddToCart) -> AppResult<Cart> {
    if input.cart_items.is_empty() {
        return Err(AppError::Validation("cartItems must not be empty".into()));
    }
    for item in &input.cart_items {
        if item.quantity == 0 {
            return Err(AppError::Validation("Quantity must be at least 1".into()));
        }
        if db.products.get(item.product).await?.is_none() {
            return Err(AppError::NotFound(format!("Product {} not found", item.product)));
        }
    }

    // Carts are keyed on their owner, so a second concurrent insert collides
    // and falls back to merging into the cart that won.
    let id = keyed_id(Cart::COLLECTION, &user.to_string());
    for _ in 0..CART_WRITE_ATTEMPTS {
        let now = Utc::now();
        match db.carts.get(id).await? {
            Some(mut cart) => {
                merge_items(&mut cart.cart_items, input.cart_items.clone());
                cart.updated_at = now;
                if db.carts.replace(&cart).await? {
                    return Ok(cart);
                }
            }
            None => {
                let mut cart = Cart {
                    id,
                    user,
                    cart_items: Vec::new(),
                    created_at: now,
                    updated_at: now,
                };
                merge_items(&mut cart.cart_items, input.cart_items.clone());
                match db.carts.insert(&cart).await {
                    Ok(()) => return Ok(cart),
                    Err(StoreError::Duplicate { .. }) => debug!("Cart for {user} created concurrently"),
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }
    Err(AppError::Internal(format!("Cart for {user} kept changing")))
}

pub async fn cart_lines(db: &Database, user: Uuid) -> AppResult<BTreeMap<Uuid, CartLine>> {
    let mut lines = BTreeMap::new();
    let Some(cart) = db.carts.find_one(json!({ "user": user })).await? else {
        return Ok(lines);
    };

    for item in cart.cart_items {
        if let Some(product) = db.products.get(item.product).await? {
            lines.insert(
                product.id,
                CartLine {
                    id: product.id,
                    name: product.name,
                    img: product
                        .product_images
                        .into_iter()
                        .next()
                        .map(|image| image.img)
                        .unwrap_or_default(),
                    price: product.price,
                    qty: item.quantity,
                },
            );
        }
    }
    Ok(lines)
}

pub async fn remove_item(db: &Database, user: Uuid, product: Uuid) -> AppResult<Cart> {
    let mut cart = db
        .carts
        .find_one(json!({ "user": user }))
        .await?
        .ok_or_else(|| AppError::NotFound("Cart not found".into()))?;

    cart.cart_items.retain(|line| line.product != product);
    cart.updated_at = Utc::now();
    db.carts.replace(&cart).await?;
    Ok(cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Product;
    use adapters::MemoryStore;
    use std::sync::Arc;

    fn item(product: Uuid, quantity: u32) -> CartItem {
        CartItem { product, quantity }
    }

    #[test]
    fn test_merge_replaces_existing_quantity_and_appends_new() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let mut items = vec![item(a, 1)];

        merge_items(&mut items, vec![item(a, 3), item(b, 2)]);
        assert_eq!(items, vec![item(a, 3), item(b, 2)]);
    }

    #[test]
    fn test_merge_last_duplicate_wins() {
        let a = Uuid::new_v4();
        let mut items = Vec::new();

        merge_items(&mut items, vec![item(a, 1), item(a, 5)]);
        assert_eq!(items, vec![item(a, 5)]);
    }

    async fn stocked_product(db: &Database) -> Uuid {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: "Phone".into(),
            slug: "phone".into(),
            price: 9_999.0,
            quantity: 5,
            description: String::new(),
            offer: None,
            product_images: Vec::new(),
            reviews: Vec::new(),
            category: Uuid::nil(),
            created_by: Uuid::nil(),
            created_at: now,
            updated_at: now,
        };
        db.products.insert(&product).await.unwrap();
        product.id
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_share_one_cart() {
        let db = Database::new(Arc::new(MemoryStore::new()));
        let product = stocked_product(&db).await;
        let user = Uuid::new_v4();

        let attempts: Vec<_> = (1..=6)
            .map(|quantity| {
                let db = db.clone();
                tokio::spawn(async move {
                    let input = AddToCart {
                        cart_items: vec![item(product, quantity)],
                    };
                    add_to_cart(&db, user, input).await
                })
            })
            .collect();
        for attempt in attempts {
            attempt.await.unwrap().unwrap();
        }

        let carts = db.carts.find(json!({ "user": user })).await.unwrap();
        assert_eq!(carts.len(), 1);
        assert_eq!(carts[0].cart_items.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_added() {
        let db = Database::new(Arc::new(MemoryStore::new()));
        let input = AddToCart {
            cart_items: vec![item(Uuid::new_v4(), 1)],
        };
        let err = add_to_cart(&db, Uuid::new_v4(), input).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
