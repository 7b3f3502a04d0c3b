//! Curve points.

use crate::db::{Entity, SqlValue};
use crate::models::{empty_as_none, optional_datetime};
use crate::validation::{Validate, ValidationErrors};
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

/// A (term, value) point on a curve.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, FromRow)]
#[serde(default, rename_all = "camelCase")]
pub struct CurvePoint {
    #[serde(deserialize_with = "empty_as_none")]
    pub id: Option<i32>,
    #[serde(deserialize_with = "empty_as_none")]
    pub curve_id: Option<i32>,
    #[serde(deserialize_with = "optional_datetime")]
    pub as_of_date: Option<NaiveDateTime>,
    #[serde(deserialize_with = "empty_as_none")]
    pub term: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub value: Option<f64>,
    #[serde(deserialize_with = "optional_datetime")]
    pub creation_date: Option<NaiveDateTime>,
}

impl Validate for CurvePoint {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("term", &self.term, "Term is mandatory");
        errors.positive_or_zero("term", &self.term, "Term should be a positive.");
        errors.required("value", &self.value, "Value is mandatory");
        errors.positive_or_zero("value", &self.value, "Value should be a positive.");
        errors.into_result()
    }
}

impl Entity for CurvePoint {
    const TABLE: &'static str = "curve_point";
    const COLUMNS: &'static [&'static str] =
        &["curve_id", "as_of_date", "term", "value", "creation_date"];

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Int(self.curve_id),
            SqlValue::Timestamp(self.as_of_date),
            SqlValue::Float(self.term),
            SqlValue::Float(self.value),
            SqlValue::Timestamp(self.creation_date),
        ]
    }
}
