use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const NAME_LEN: std::ops::RangeInclusive<usize> = 3..=40;
pub const DESCRIPTION_LEN: std::ops::RangeInclusive<usize> = 3..=500;

pub const DEFAULT_LIMIT: i64 = 10;

/// Row in the `products` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
}

/// Client-supplied product fields, used for both create and full replace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,
    pub description: String,
    pub price: i64,
}

impl ProductData {
    /// Checks length and positivity constraints. Lengths count characters,
    /// not bytes.
    pub fn validate(&self) -> Result<(), AppError> {
        check_len("name", &self.name, NAME_LEN)?;
        check_len("description", &self.description, DESCRIPTION_LEN)?;
        if self.price <= 0 {
            return Err(AppError::Validation(
                "price must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_len(
    field: &str,
    value: &str,
    range: std::ops::RangeInclusive<usize>,
) -> Result<(), AppError> {
    let len = value.chars().count();
    if range.contains(&len) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must be between {} and {} characters",
            range.start(),
            range.end()
        )))
    }
}

/// Product ids are positive; anything else is rejected before the store
/// is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(i64);

impl ProductId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ProductId {
    type Error = AppError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        if id > 0 {
            Ok(ProductId(id))
        } else {
            Err(AppError::Validation(
                "product id must be greater than 0".to_string(),
            ))
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.skip < 0 || self.limit < 0 {
            return Err(AppError::Validation(
                "skip and limit must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> ProductData {
        ProductData {
            name: "Pen".to_string(),
            description: "Blue ink pen".to_string(),
            price: 5,
        }
    }

    #[test]
    fn accepts_valid_product() {
        assert!(pen().validate().is_ok());
    }

    #[test]
    fn rejects_short_name() {
        let data = ProductData {
            name: "Pe".to_string(),
            ..pen()
        };
        assert!(matches!(data.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn name_bounds_are_inclusive() {
        let forty = ProductData {
            name: "n".repeat(40),
            ..pen()
        };
        assert!(forty.validate().is_ok());

        let forty_one = ProductData {
            name: "n".repeat(41),
            ..pen()
        };
        assert!(forty_one.validate().is_err());
    }

    #[test]
    fn description_bounds() {
        let too_short = ProductData {
            description: "ab".to_string(),
            ..pen()
        };
        assert!(too_short.validate().is_err());

        let max = ProductData {
            description: "d".repeat(500),
            ..pen()
        };
        assert!(max.validate().is_ok());

        let too_long = ProductData {
            description: "d".repeat(501),
            ..pen()
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn lengths_count_characters() {
        // three characters, six bytes
        let data = ProductData {
            name: "äöü".to_string(),
            ..pen()
        };
        assert!(data.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_price() {
        for price in [0, -1] {
            let data = ProductData { price, ..pen() };
            assert!(matches!(data.validate(), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn product_id_must_be_positive() {
        assert!(ProductId::try_from(0).is_err());
        assert!(ProductId::try_from(-7).is_err());
        assert_eq!(ProductId::try_from(3).unwrap().get(), 3);
    }

    #[test]
    fn pagination_rejects_negative_values() {
        assert!(Pagination::default().validate().is_ok());
        assert!(Pagination { skip: -1, limit: 10 }.validate().is_err());
        assert!(Pagination { skip: 0, limit: -1 }.validate().is_err());
    }
}
