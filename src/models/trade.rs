//! Trades.

use crate::db::{Entity, SqlValue};
use crate::models::{empty_as_none, optional_datetime};
use crate::validation::{Validate, ValidationErrors};
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

/// An executed trade on an account.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, FromRow)]
#[serde(default, rename_all = "camelCase")]
pub struct Trade {
    #[serde(deserialize_with = "empty_as_none")]
    pub id: Option<i32>,
    pub account: String,
    /// Trade type.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub trade_type: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub buy_quantity: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub sell_quantity: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub buy_price: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub sell_price: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub benchmark: Option<String>,
    #[serde(deserialize_with = "optional_datetime")]
    pub trade_date: Option<NaiveDateTime>,
    #[serde(deserialize_with = "empty_as_none")]
    pub security: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub status: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub trader: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub book: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub creation_name: Option<String>,
    #[serde(deserialize_with = "optional_datetime")]
    pub creation_date: Option<NaiveDateTime>,
    #[serde(deserialize_with = "empty_as_none")]
    pub revision_name: Option<String>,
    #[serde(deserialize_with = "optional_datetime")]
    pub revision_date: Option<NaiveDateTime>,
    #[serde(deserialize_with = "empty_as_none")]
    pub deal_name: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub deal_type: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub source_list_id: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub side: Option<String>,
}

impl Validate for Trade {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.not_blank("account", &self.account, "Account is mandatory");
        errors.not_blank("type", &self.trade_type, "Type is mandatory");
        errors.required("buyQuantity", &self.buy_quantity, "Buy Quantity is mandatory");
        errors.positive_or_zero("buyQuantity", &self.buy_quantity, "Buy Quantity should be positive.");
        errors.positive_or_zero("sellQuantity", &self.sell_quantity, "Sell Quantity should be positive.");
        errors.positive_or_zero("buyPrice", &self.buy_price, "Buy Price should be positive.");
        errors.positive_or_zero("sellPrice", &self.sell_price, "Sell Price should be positive.");

        errors.max_length("account", &self.account, 30, "Account");
        errors.max_length("type", &self.trade_type, 30, "Type");
        errors.max_length_opt("status", &self.status, 10, "Status");
        let text = [
            ("benchmark", &self.benchmark, "Benchmark"),
            ("security", &self.security, "Security"),
            ("trader", &self.trader, "Trader"),
            ("book", &self.book, "Book"),
            ("creationName", &self.creation_name, "Creation name"),
            ("revisionName", &self.revision_name, "Revision name"),
            ("dealName", &self.deal_name, "Deal name"),
            ("dealType", &self.deal_type, "Deal type"),
            ("sourceListId", &self.source_list_id, "Source list id"),
            ("side", &self.side, "Side"),
        ];
        for (field, value, label) in text {
            errors.max_length_opt(field, value, 125, label);
        }
        errors.into_result()
    }
}

impl Entity for Trade {
    const TABLE: &'static str = "trade";
    const COLUMNS: &'static [&'static str] = &[
        "account",
        "type",
        "buy_quantity",
        "sell_quantity",
        "buy_price",
        "sell_price",
        "benchmark",
        "trade_date",
        "security",
        "status",
        "trader",
        "book",
        "creation_name",
        "creation_date",
        "revision_name",
        "revision_date",
        "deal_name",
        "deal_type",
        "source_list_id",
        "side",
    ];

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(Some(self.account.clone())),
            SqlValue::Text(Some(self.trade_type.clone())),
            SqlValue::Float(self.buy_quantity),
            SqlValue::Float(self.sell_quantity),
            SqlValue::Float(self.buy_price),
            SqlValue::Float(self.sell_price),
            SqlValue::Text(self.benchmark.clone()),
            SqlValue::Timestamp(self.trade_date),
            SqlValue::Text(self.security.clone()),
            SqlValue::Text(self.status.clone()),
            SqlValue::Text(self.trader.clone()),
            SqlValue::Text(self.book.clone()),
            SqlValue::Text(self.creation_name.clone()),
            SqlValue::Timestamp(self.creation_date),
            SqlValue::Text(self.revision_name.clone()),
            SqlValue::Timestamp(self.revision_date),
            SqlValue::Text(self.deal_name.clone()),
            SqlValue::Text(self.deal_type.clone()),
            SqlValue::Text(self.source_list_id.clone()),
            SqlValue::Text(self.side.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_trade() {
        let errors = Trade::default().validate().unwrap_err();
        let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Account is mandatory",
                "Type is mandatory",
                "Buy Quantity is mandatory"
            ]
        );
    }

    #[test]
    fn test_long_type_and_nan_price_rejected() {
        let trade = Trade {
            account: "Account".to_string(),
            trade_type: "T".repeat(31),
            buy_quantity: Some(1.0),
            buy_price: Some(f64::NAN),
            ..Trade::default()
        };
        let errors = trade.validate().unwrap_err();
        assert_eq!(
            errors.messages_for("type").collect::<Vec<_>>(),
            vec!["Type must be at most 30 characters"]
        );
        assert_eq!(
            errors.messages_for("buyPrice").collect::<Vec<_>>(),
            vec!["Buy Price should be positive."]
        );
    }

    #[test]
    fn test_valid_trade() {
        let trade = Trade {
            account: "Account Test".to_string(),
            trade_type: "Type Test".to_string(),
            buy_quantity: Some(100.0),
            ..Trade::default()
        };
        assert!(trade.validate().is_ok());
        assert_eq!(trade.values().len(), Trade::COLUMNS.len());
    }
}
