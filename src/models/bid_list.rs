//! Bid list entries.

use crate::db::{Entity, SqlValue};
use crate::models::{empty_as_none, optional_datetime};
use crate::validation::{Validate, ValidationErrors};
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::FromRow;

/// A bid on an account, with its quantities, prices and audit trail.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, FromRow)]
#[serde(default, rename_all = "camelCase")]
pub struct BidList {
    /// Store-assigned identifier.
    #[serde(deserialize_with = "empty_as_none")]
    pub id: Option<i32>,
    pub account: String,
    /// Bid type.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub bid_type: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub bid_quantity: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub ask_quantity: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub bid: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub ask: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub benchmark: Option<String>,
    #[serde(deserialize_with = "optional_datetime")]
    pub bid_list_date: Option<NaiveDateTime>,
    #[serde(deserialize_with = "empty_as_none")]
    pub commentary: Option<String>,
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

impl Validate for BidList {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.not_blank("account", &self.account, "Account is mandatory.");
        errors.not_blank("type", &self.bid_type, "Type is mandatory.");
        errors.positive_or_zero("bidQuantity", &self.bid_quantity, "bidQuantity should be positive.");
        errors.positive_or_zero("askQuantity", &self.ask_quantity, "askQuantity should be positive.");
        errors.positive_or_zero("bid", &self.bid, "bid should be a positive.");
        errors.positive_or_zero("ask", &self.ask, "ask should be a positive.");

        errors.max_length("account", &self.account, 30, "Account");
        errors.max_length("type", &self.bid_type, 30, "Type");
        errors.max_length_opt("status", &self.status, 10, "Status");
        let text = [
            ("benchmark", &self.benchmark, "Benchmark"),
            ("commentary", &self.commentary, "Commentary"),
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

impl Entity for BidList {
    const TABLE: &'static str = "bid_list";
    const COLUMNS: &'static [&'static str] = &[
        "account",
        "type",
        "bid_quantity",
        "ask_quantity",
        "bid",
        "ask",
        "benchmark",
        "bid_list_date",
        "commentary",
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
            SqlValue::Text(Some(self.bid_type.clone())),
            SqlValue::Float(self.bid_quantity),
            SqlValue::Float(self.ask_quantity),
            SqlValue::Float(self.bid),
            SqlValue::Float(self.ask),
            SqlValue::Text(self.benchmark.clone()),
            SqlValue::Timestamp(self.bid_list_date),
            SqlValue::Text(self.commentary.clone()),
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
