//! Rule definitions.

use crate::db::{Entity, SqlValue};
use crate::models::empty_as_none;
use crate::validation::{Validate, ValidationErrors};
use serde::Deserialize;
use sqlx::FromRow;

/// A named rule with its JSON, template and SQL fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, FromRow)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleName {
    #[serde(deserialize_with = "empty_as_none")]
    pub id: Option<i32>,
    pub name: String,
    pub description: String,
    pub json: String,
    pub template: String,
    pub sql_str: String,
    pub sql_part: String,
}

impl Validate for RuleName {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.not_blank("name", &self.name, "Name is mandatory");
        errors.not_blank("description", &self.description, "Description is mandatory");
        errors.not_blank("json", &self.json, "Json is mandatory");
        errors.not_blank("template", &self.template, "Template is mandatory");
        errors.not_blank("sqlStr", &self.sql_str, "SQL string is mandatory");
        errors.not_blank("sqlPart", &self.sql_part, "SQL part is mandatory");

        errors.max_length("name", &self.name, 125, "Name");
        errors.max_length("description", &self.description, 125, "Description");
        errors.max_length("json", &self.json, 125, "Json");
        errors.max_length("template", &self.template, 512, "Template");
        errors.max_length("sqlStr", &self.sql_str, 125, "SQL string");
        errors.max_length("sqlPart", &self.sql_part, 125, "SQL part");
        errors.into_result()
    }
}

impl Entity for RuleName {
    const TABLE: &'static str = "rule_name";
    const COLUMNS: &'static [&'static str] =
        &["name", "description", "json", "template", "sql_str", "sql_part"];

    fn id(&self) -> Option<i32> {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    fn values(&self) -> Vec<SqlValue> {
        [
            &self.name,
            &self.description,
            &self.json,
            &self.template,
            &self.sql_str,
            &self.sql_part,
        ]
        .into_iter()
        .map(|v| SqlValue::Text(Some(v.clone())))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_mandatory() {
        let errors = RuleName::default().validate().unwrap_err();
        assert_eq!(errors.len(), 6);
        assert_eq!(
            errors.messages_for("sqlStr").collect::<Vec<_>>(),
            vec!["SQL string is mandatory"]
        );
    }

    #[test]
    fn test_template_may_exceed_other_columns() {
        let rule = RuleName {
            id: None,
            name: "Rule".to_string(),
            description: "D".repeat(126),
            json: "{}".to_string(),
            template: "T".repeat(512),
            sql_str: "SELECT 1".to_string(),
            sql_part: "WHERE 1 = 1".to_string(),
        };
        let errors = rule.validate().unwrap_err();
        assert_eq!(
            errors.messages_for("description").collect::<Vec<_>>(),
            vec!["Description must be at most 125 characters"]
        );
        assert!(!errors.has_field("template"));
    }

    #[test]
    fn test_valid_rule() {
        let rule = RuleName {
            id: None,
            name: "Rule".to_string(),
            description: "Description".to_string(),
            json: "{}".to_string(),
            template: "Template".to_string(),
            sql_str: "SELECT 1".to_string(),
            sql_part: "WHERE 1 = 1".to_string(),
        };
        assert!(rule.validate().is_ok());
        assert_eq!(rule.values().len(), RuleName::COLUMNS.len());
    }
}
