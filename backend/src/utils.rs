//! Small helpers shared by the services and handlers.

use uuid::Uuid;

use crate::errors::AppError;

/// Length of an order reference number.
pub const REFERENCE_LENGTH: usize = 7;

/// Lower-cases `input` and joins its alphanumeric runs with `-`.
pub fn slugify(input: &str) -> String {
    input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Random upper-case hex code used to reference orders, e.g. `4F0A9C2`.
pub fn reference_number() -> String {
    Uuid::new_v4().simple().to_string()[..REFERENCE_LENGTH].to_uppercase()
}

/// Identifier derived from a collection's natural key, so that two documents
/// with the same key collide on insert.
pub fn keyed_id(collection: &str, key: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{collection}:{key}").as_bytes())
}

/// Parses a path or body identifier, naming the entity in the error.
pub fn parse_id(raw: &str, entity: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidId(entity))
}

/// Loose `local@domain.tld` check.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && tld.len() >= 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Mobiles & Tablets"), "mobiles-tablets");
        assert_eq!(slugify("  Samsung  Galaxy S21 "), "samsung-galaxy-s21");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_reference_number_shape() {
        let reference = reference_number();
        assert_eq!(reference.len(), REFERENCE_LENGTH);
        assert!(reference
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn test_keyed_id_is_stable_per_collection() {
        assert_eq!(keyed_id("users", "a@b.io"), keyed_id("users", "a@b.io"));
        assert_ne!(keyed_id("users", "a@b.io"), keyed_id("carts", "a@b.io"));
        assert_ne!(keyed_id("users", "a@b.io"), keyed_id("users", "c@b.io"));
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "order").unwrap(), id);
        let err = parse_id("123", "order").unwrap_err();
        assert_eq!(err.to_string(), "Invalid order Id");
    }

    #[test]
    fn test_is_email() {
        assert!(is_email("jane@shop.io"));
        assert!(!is_email("jane.shop.io"));
        assert!(!is_email("@shop.io"));
        assert!(!is_email("jane@shop"));
        assert!(!is_email("jane@a@b.io"));
    }
}
