//! Agency ratings.

use crate::db::{Entity, SqlValue};
use crate::models::empty_as_none;
use crate::validation::{Validate, ValidationErrors};
use serde::Deserialize;
use sqlx::FromRow;

/// Moody's, S&P and Fitch ratings with a display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, FromRow)]
#[serde(default, rename_all = "camelCase")]
pub struct Rating {
    #[serde(deserialize_with = "empty_as_none")]
    pub id: Option<i32>,
    #[serde(deserialize_with = "empty_as_none")]
    pub moodys_rating: Option<i32>,
    #[serde(deserialize_with = "empty_as_none")]
    pub sand_p_rating: Option<i32>,
    #[serde(deserialize_with = "empty_as_none")]
    pub fitch_rating: Option<i32>,
    #[serde(deserialize_with = "empty_as_none")]
    pub order_number: Option<i32>,
}

impl Validate for Rating {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let fields = [
            ("moodysRating", &self.moodys_rating, "Moodys rating"),
            ("sandPRating", &self.sand_p_rating, "Sand rating"),
            ("fitchRating", &self.fitch_rating, "Fitch rating"),
            ("orderNumber", &self.order_number, "Order number"),
        ];
        for (field, value, label) in fields {
            errors.required(field, value, &format!("{} is mandatory", label));
            errors.positive_or_zero(field, value, &format!("{} must be positive.", label));
        }
        errors.into_result()
    }
}

impl Entity for Rating {
    const TABLE: &'static str = "rating";
    const COLUMNS: &'static [&'static str] =
        &["moodys_rating", "sand_p_rating", "fitch_rating", "order_number"];

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int(self.moodys_rating),
            SqlValue::Int(self.sand_p_rating),
            SqlValue::Int(self.fitch_rating),
            SqlValue::Int(self.order_number),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_four_mandatory_messages() {
        let errors = Rating::default().validate().unwrap_err();
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        assert_eq!(
            messages,
            vec![
                "Moodys rating is mandatory",
                "Sand rating is mandatory",
                "Fitch rating is mandatory",
                "Order number is mandatory",
            ]
        );
    }

    #[test]
    fn test_negative_order_number() {
        let rating = Rating {
            moodys_rating: Some(1),
            sand_p_rating: Some(1),
            fitch_rating: Some(1),
            order_number: Some(-3),
            ..Rating::default()
        };
        let errors = rating.validate().unwrap_err();
        assert_eq!(
            errors.messages_for("orderNumber").collect::<Vec<_>>(),
            vec!["Order number must be positive."]
        );
    }

    #[test]
    fn test_binds_sand_p_field_name() {
        let rating: Rating = serde_urlencoded::from_str(
            "moodysRating=1&sandPRating=2&fitchRating=3&orderNumber=4",
        )
        .unwrap();
        assert_eq!(rating.sand_p_rating, Some(2));
        assert!(rating.validate().is_ok());
    }
}
