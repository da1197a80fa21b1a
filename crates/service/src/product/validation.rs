use chrono::{Datelike, NaiveDate};
use models::Product;

use crate::errors::ServiceError;

/// `MM/DD/YYYY`
const EXPIRATION_FORMAT: &str = "%m/%d/%Y";

/// Field-level checks run before every write. The first failure wins.
///
/// Code value uniqueness is not checked here; it needs the stored
/// collection and is enforced by the repository under its write lock.
pub fn validate_product(product: &Product) -> Result<(), ServiceError> {
    if product.name.is_empty() {
        return Err(ServiceError::field_required("name"));
    }
    if product.quantity == 0 {
        return Err(ServiceError::field_required("quantity"));
    }
    if product.price < 0.0 || product.price.is_nan() {
        return Err(ServiceError::type_mismatch("price"));
    }

    let expiration = parse_expiration(&product.expiration)
        .ok_or_else(|| ServiceError::date_format("expiration"))?;

    if expiration.year() < 0 {
        return Err(ServiceError::field_invalid("expirationYear"));
    }
    if !(1..=12).contains(&expiration.month()) {
        return Err(ServiceError::field_invalid("expirationMonth"));
    }
    if !(1..=31).contains(&expiration.day()) {
        return Err(ServiceError::field_invalid("expirationDay"));
    }
    Ok(())
}

/// Strict parse: two-digit month and day, four-digit year, calendar-valid.
/// chrono alone would accept unpadded fields such as `1/2/2024`.
pub fn parse_expiration(raw: &str) -> Option<NaiveDate> {
    let b = raw.as_bytes();
    let shape_ok = b.len() == 10
        && b[2] == b'/'
        && b[5] == b'/'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 2 || i == 5 || c.is_ascii_digit());
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(raw, EXPIRATION_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn valid() -> Product {
        Product {
            id: 0,
            name: "Coke".into(),
            quantity: 10,
            code_value: "C1".into(),
            is_published: false,
            expiration: "01/02/2024".into(),
            price: 2.5,
        }
    }

    fn check(p: Product) -> Result<(), (ErrorKind, &'static str)> {
        validate_product(&p).map_err(|e| (e.kind(), e.field()))
    }

    #[test]
    fn accepts_valid_product() {
        assert_eq!(check(valid()), Ok(()));
        assert_eq!(check(Product { price: 0.0, quantity: -3, ..valid() }), Ok(()));
    }

    #[test]
    fn required_fields() {
        assert_eq!(check(Product { name: String::new(), ..valid() }), Err((ErrorKind::FieldRequired, "name")));
        assert_eq!(check(Product { quantity: 0, ..valid() }), Err((ErrorKind::FieldRequired, "quantity")));
    }

    #[test]
    fn negative_price_is_type_mismatch() {
        assert_eq!(check(Product { price: -1.0, ..valid() }), Err((ErrorKind::FieldTypeMismatch, "price")));
        assert_eq!(check(Product { price: f64::NAN, ..valid() }), Err((ErrorKind::FieldTypeMismatch, "price")));
    }

    #[test]
    fn first_failure_short_circuits() {
        let p = Product { name: String::new(), quantity: 0, price: -1.0, expiration: "bad".into(), ..valid() };
        assert_eq!(check(p), Err((ErrorKind::FieldRequired, "name")));
        let p = Product { price: -1.0, expiration: "bad".into(), ..valid() };
        assert_eq!(check(p), Err((ErrorKind::FieldTypeMismatch, "price")));
    }

    #[test]
    fn empty_code_value_is_allowed_here() {
        assert_eq!(check(Product { code_value: String::new(), ..valid() }), Ok(()));
    }

    #[test]
    fn expiration_must_be_strict_mm_dd_yyyy() {
        for bad in ["13/01/2024", "00/10/2024", "02/30/2024", "1/02/2024", "01/2/2024", "01-02-2024", "2024/01/02", "01/02/24", "", "ab/cd/efgh", " 01/02/2024"] {
            assert_eq!(
                check(Product { expiration: bad.into(), ..valid() }),
                Err((ErrorKind::DateFormat, "expiration")),
                "{bad:?} should be rejected"
            );
        }
        for good in ["12/31/1999", "02/29/2024", "07/04/0000"] {
            assert_eq!(check(Product { expiration: good.into(), ..valid() }), Ok(()), "{good:?}");
        }
    }

    #[test]
    fn parse_expiration_reads_components() {
        let d = parse_expiration("03/15/2025").unwrap();
        assert_eq!((d.month(), d.day(), d.year()), (3, 15, 2025));
    }
}
