//! Saved delivery addresses, kept as one document per user.

use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::models::{Address, AddressType, UserAddress};
use crate::database::Database;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[serde(rename = "_id")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub pin_code: String,
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city_district_town: String,
    #[serde(default)]
    pub state: String,
    pub landmark: Option<String>,
    pub alternate_phone: Option<String>,
    pub address_type: AddressType,
}

#[derive(Debug, Deserialize)]
pub struct SaveAddress {
    pub address: AddressInput,
}

impl AddressInput {
    fn into_address(self, id: Uuid) -> Result<Address, AppError> {
        let required = [
            ("name", &self.name),
            ("mobileNumber", &self.mobile_number),
            ("pinCode", &self.pin_code),
            ("locality", &self.locality),
            ("address", &self.address),
            ("cityDistrictTown", &self.city_district_town),
            ("state", &self.state),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(AppError::Validation(format!("{field} is required")));
        }

        Ok(Address {
            id,
            name: self.name,
            mobile_number: self.mobile_number,
            pin_code: self.pin_code,
            locality: self.locality,
            address: self.address,
            city_district_town: self.city_district_town,
            state: self.state,
            landmark: self.landmark,
            alternate_phone: self.alternate_phone,
            address_type: self.address_type,
        })
    }
}

/// Updates the address carrying the given `_id`, or appends a new one.
pub async fn save_address(db: &Database, user: Uuid, input: AddressInput) -> AppResult<UserAddress> {
    let now = Utc::now();
    let existing = db.addresses.find_one(json!({ "user": user })).await?;

    match input.id {
        Some(id) => {
            let mut book = existing.ok_or_else(|| AppError::NotFound("Address not found".into()))?;
            let slot = book
                .addresses
                .iter_mut()
                .find(|address| address.id == id)
                .ok_or_else(|| AppError::NotFound("Address not found".into()))?;
            *slot = input.into_address(id)?;
            book.updated_at = now;
            db.addresses.replace(&book).await?;
            Ok(book)
        }
        None => {
            let address = input.into_address(Uuid::new_v4())?;
            match existing {
                Some(mut book) => {
                    book.addresses.push(address);
                    book.updated_at = now;
                    db.addresses.replace(&book).await?;
                    Ok(book)
                }
                None => {
                    let book = UserAddress {
                        id: Uuid::new_v4(),
                        user,
                        addresses: vec![address],
                        created_at: now,
                        updated_at: now,
                    };
                    db.addresses.insert(&book).await?;
                    Ok(book)
                }
            }
        }
    }
}

/// The caller's stored address book, or an empty one that is not persisted.
pub async fn address_book(db: &Database, user: Uuid) -> AppResult<Value> {
    match db.addresses.find_one(json!({ "user": user })).await? {
        Some(book) => Ok(serde_json::to_value(book)?),
        None => Ok(json!({ "user": user, "addresses": [] })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapters::MemoryStore;
    use std::sync::Arc;

    fn input(id: Option<Uuid>, name: &str) -> AddressInput {
        AddressInput {
            id,
            name: name.into(),
            mobile_number: "9999999999".into(),
            pin_code: "560001".into(),
            locality: "MG Road".into(),
            address: "12 Brigade Rd".into(),
            city_district_town: "Bengaluru".into(),
            state: "Karnataka".into(),
            landmark: None,
            alternate_phone: None,
            address_type: AddressType::Home,
        }
    }

    #[tokio::test]
    async fn test_new_addresses_append_and_known_ids_update() {
        let db = Database::new(Arc::new(MemoryStore::new()));
        let user = Uuid::new_v4();

        let book = save_address(&db, user, input(None, "Home")).await.unwrap();
        let first = book.addresses[0].id;
        save_address(&db, user, input(None, "Office")).await.unwrap();
        let book = save_address(&db, user, input(Some(first), "Parents")).await.unwrap();

        let names: Vec<_> = book.addresses.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Parents", "Office"]);
        let stored = address_book(&db, user).await.unwrap();
        assert_eq!(stored["_id"], json!(book.id));
        assert_eq!(stored["user"], json!(user));
        assert_eq!(stored["addresses"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_address_book_has_document_shape() {
        let db = Database::new(Arc::new(MemoryStore::new()));
        let user = Uuid::new_v4();

        let empty = address_book(&db, user).await.unwrap();
        assert_eq!(empty, json!({ "user": user, "addresses": [] }));
    }

    #[tokio::test]
    async fn test_unknown_address_id_is_not_found() {
        let db = Database::new(Arc::new(MemoryStore::new()));
        let err = save_address(&db, Uuid::new_v4(), input(Some(Uuid::new_v4()), "x"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Address not found");
    }

    #[tokio::test]
    async fn test_missing_fields_are_reported() {
        let db = Database::new(Arc::new(MemoryStore::new()));
        let mut bad = input(None, "Home");
        bad.pin_code = " ".into();

        let err = save_address(&db, Uuid::new_v4(), bad).await.unwrap_err();
        assert_eq!(err.to_string(), "pinCode is required");
    }
}
