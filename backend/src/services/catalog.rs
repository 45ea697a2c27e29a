//! Category and product catalog logic.
//!
//! Categories are stored flat with an optional parent and served as a forest;
//! products are listed per category slug together with fixed price buckets.

use std::collections::{BTreeMap, HashSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use adapters::StoreError;

use crate::database::models::{Category, Product, ProductImage};
use crate::database::{Database, Document};
use crate::errors::{AppError, AppResult};
use crate::utils::{keyed_id, slugify};

/// Upper bound of each price bucket; a bucket holds prices above the previous
/// bound up to and including its own.
pub const PRICE_RANGES: [(&str, f64); 5] = [
    ("under5k", 5_000.0),
    ("under10k", 10_000.0),
    ("under15k", 15_000.0),
    ("under20k", 20_000.0),
    ("under30k", 30_000.0),
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    #[serde(default)]
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub category_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_image: Option<String>,
    pub children: Vec<CategoryNode>,
}

/// Arranges flat categories into a forest, keeping their relative order.
/// Categories whose parent no longer exists become roots.
pub fn build_category_tree(categories: &[Category]) -> Vec<CategoryNode> {
    let known: HashSet<Uuid> = categories.iter().map(|c| c.id).collect();
    categories
        .iter()
        .filter(|c| c.parent_id.map_or(true, |parent| !known.contains(&parent)))
        .map(|root| category_node(root, categories))
        .collect()
}

fn category_node(category: &Category, all: &[Category]) -> CategoryNode {
    CategoryNode {
        id: category.id,
        name: category.name.clone(),
        slug: category.slug.clone(),
        parent_id: category.parent_id,
        category_image: category.category_image.clone(),
        children: all
            .iter()
            .filter(|child| child.parent_id == Some(category.id))
            .map(|child| category_node(child, all))
            .collect(),
    }
}

pub async fn create_category(db: &Database, input: NewCategory, created_by: Uuid) -> AppResult<Category> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Category name is required".into()));
    }
    let slug = slugify(name);
    if db.categories.find_one(json!({ "slug": slug })).await?.is_some() {
        return Err(AppError::BadRequest(format!("Category {slug} already exists")));
    }
    if let Some(parent) = input.parent_id {
        if db.categories.get(parent).await?.is_none() {
            return Err(AppError::BadRequest("Invalid parent category".into()));
        }
    }

    let now = Utc::now();
    let category = Category {
        id: keyed_id(Category::COLLECTION, &slug),
        name: name.to_string(),
        slug,
        parent_id: input.parent_id,
        category_image: input.category_image.filter(|img| !img.is_empty()),
        created_by,
        created_at: now,
        updated_at: now,
    };
    match db.categories.insert(&category).await {
        Ok(()) => {}
        Err(StoreError::Duplicate { .. }) => {
            return Err(AppError::BadRequest(format!("Category {} already exists", category.slug)))
        }
        Err(e) => return Err(e.into()),
    }
    info!("Created category {} ({})", category.slug, category.id);
    Ok(category)
}

pub async fn category_tree(db: &Database) -> AppResult<Vec<CategoryNode>> {
    Ok(build_category_tree(&db.categories.all().await?))
}

pub async fn delete_categories(db: &Database, ids: &[Uuid]) -> AppResult<u64> {
    let mut deleted = 0;
    for id in ids {
        if db.categories.delete_by_id(*id).await? {
            deleted += 1;
        }
    }
    Ok(deleted)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[serde(default)]
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
    pub offer: Option<f64>,
    #[serde(default)]
    pub product_images: Vec<String>,
    pub category: Uuid,
}

pub async fn create_product(db: &Database, input: NewProduct, created_by: Uuid) -> AppResult<Product> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Product name is required".into()));
    }
    if !(input.price.is_finite() && input.price > 0.0) {
        return Err(AppError::Validation("Price must be greater than zero".into()));
    }
    if db.categories.get(input.category).await?.is_none() {
        return Err(AppError::BadRequest("Invalid category".into()));
    }

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: slugify(name),
        price: input.price,
        quantity: input.quantity,
        description: input.description,
        offer: input.offer,
        product_images: input
            .product_images
            .into_iter()
            .filter(|img| !img.is_empty())
            .map(|img| ProductImage { img })
            .collect(),
        reviews: Vec::new(),
        category: input.category,
        created_by,
        created_at: now,
        updated_at: now,
    };
    db.products.insert(&product).await?;
    info!("Created product {} ({})", product.slug, product.id);
    Ok(product)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProducts {
    pub products: Vec<Product>,
    pub price_range: BTreeMap<&'static str, f64>,
    pub products_by_price: BTreeMap<&'static str, Vec<Product>>,
}

/// Splits products into the [`PRICE_RANGES`] buckets.
pub fn group_by_price(products: Vec<Product>) -> CategoryProducts {
    let mut products_by_price: BTreeMap<&'static str, Vec<Product>> =
        PRICE_RANGES.iter().map(|(name, _)| (*name, Vec::new())).collect();

    for product in &products {
        let mut lower = f64::NEG_INFINITY;
        for (name, upper) in PRICE_RANGES {
            if product.price > lower && product.price <= upper {
                if let Some(bucket) = products_by_price.get_mut(name) {
                    bucket.push(product.clone());
                }
                break;
            }
            lower = upper;
        }
    }

    CategoryProducts {
        products,
        price_range: PRICE_RANGES.into_iter().collect(),
        products_by_price,
    }
}

pub async fn products_by_category_slug(db: &Database, slug: &str) -> AppResult<CategoryProducts> {
    let category = db
        .categories
        .find_one(json!({ "slug": slug }))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category {slug} not found")))?;
    let products = db.products.find(json!({ "category": category.id })).await?;
    Ok(group_by_price(products))
}
