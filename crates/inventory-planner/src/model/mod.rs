//! Pure data structures exchanged with the inventory service.
//!
//! Every type serializes with camelCase field names, matching the JSON the
//! service speaks. Quantities and prices are [`Decimal`]s, sent as JSON
//! numbers.

pub mod planning;
pub mod product;
pub mod raw_material;

pub use planning::*;
pub use product::*;
pub use raw_material::*;
pub use rust_decimal::Decimal;

#[cfg(test)]
mod tests {
    use super::Decimal;

    #[test]
    fn test_json_numbers_keep_their_digits() {
        let parsed: Decimal = serde_json::from_str("0.00015").unwrap();
        assert_eq!(parsed, "0.00015".parse::<Decimal>().unwrap());

        let whole: Decimal = serde_json::from_str("40").unwrap();
        assert_eq!(whole, Decimal::from(40));
        assert_eq!(serde_json::to_string(&Decimal::new(25, 1)).unwrap(), "2.5");
    }

    #[test]
    fn test_large_whole_quantities_do_not_overflow() {
        let large = Decimal::from(i64::MAX / 1000);
        assert_eq!(large.to_string(), (i64::MAX / 1000).to_string());
    }
}
