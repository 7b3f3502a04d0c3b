//! Form layouts of the business records served by the generic controller.

use crate::api::crud::Resource;
use crate::api::views::{FormField, InputKind};
use crate::models::{BidList, CurvePoint, Rating, RuleName, Trade, display_datetime, display_opt};
use crate::service::CrudService;
use crate::state::AppState;

use InputKind::{DateTime, Integer, Number, Text};

impl Resource for BidList {
    const PATH: &'static str = "bidList";
    const TITLE: &'static str = "Bid List";
    const FIELDS: &'static [FormField] = &[
        FormField::listed("account", "Account", Text),
        FormField::listed("type", "Type", Text),
        FormField::listed("bidQuantity", "Bid Quantity", Number),
        FormField::form_only("askQuantity", "Ask Quantity", Number),
        FormField::form_only("bid", "Bid", Number),
        FormField::form_only("ask", "Ask", Number),
        FormField::form_only("benchmark", "Benchmark", Text),
        FormField::form_only("bidListDate", "Bid List Date", DateTime),
        FormField::form_only("commentary", "Commentary", Text),
        FormField::form_only("security", "Security", Text),
        FormField::form_only("status", "Status", Text),
        FormField::form_only("trader", "Trader", Text),
        FormField::form_only("book", "Book", Text),
        FormField::form_only("creationName", "Creation Name", Text),
        FormField::form_only("creationDate", "Creation Date", DateTime),
        FormField::form_only("revisionName", "Revision Name", Text),
        FormField::form_only("revisionDate", "Revision Date", DateTime),
        FormField::form_only("dealName", "Deal Name", Text),
        FormField::form_only("dealType", "Deal Type", Text),
        FormField::form_only("sourceListId", "Source List Id", Text),
        FormField::form_only("side", "Side", Text),
    ];

    fn form_values(&self) -> Vec<String> {
        vec![
            self.account.clone(),
            self.bid_type.clone(),
            display_opt(&self.bid_quantity),
            display_opt(&self.ask_quantity),
            display_opt(&self.bid),
            display_opt(&self.ask),
            display_opt(&self.benchmark),
            display_datetime(&self.bid_list_date),
            display_opt(&self.commentary),
            display_opt(&self.security),
            display_opt(&self.status),
            display_opt(&self.trader),
            display_opt(&self.book),
            display_opt(&self.creation_name),
            display_datetime(&self.creation_date),
            display_opt(&self.revision_name),
            display_datetime(&self.revision_date),
            display_opt(&self.deal_name),
            display_opt(&self.deal_type),
            display_opt(&self.source_list_id),
            display_opt(&self.side),
        ]
    }

    fn service(state: &AppState) -> &CrudService<Self> {
        &state.bid_lists
    }
}

impl Resource for CurvePoint {
    const PATH: &'static str = "curvePoint";
    const TITLE: &'static str = "Curve Point";
    const FIELDS: &'static [FormField] = &[
        FormField::listed("curveId", "Curve Point Id", Integer),
        FormField::form_only("asOfDate", "As Of Date", DateTime),
        FormField::listed("term", "Term", Number),
        FormField::listed("value", "Value", Number),
        FormField::form_only("creationDate", "Creation Date", DateTime),
    ];

    fn form_values(&self) -> Vec<String> {
        vec![
            display_opt(&self.curve_id),
            display_datetime(&self.as_of_date),
            display_opt(&self.term),
            display_opt(&self.value),
            display_datetime(&self.creation_date),
        ]
    }

    fn service(state: &AppState) -> &CrudService<Self> {
        &state.curve_points
    }
}

impl Resource for Rating {
    const PATH: &'static str = "rating";
    const TITLE: &'static str = "Rating";
    const FIELDS: &'static [FormField] = &[
        FormField::listed("moodysRating", "Moodys Rating", Integer),
        FormField::listed("sandPRating", "Sand PRating", Integer),
        FormField::listed("fitchRating", "Fitch Rating", Integer),
        FormField::listed("orderNumber", "Order Number", Integer),
    ];

    fn form_values(&self) -> Vec<String> {
        vec![
            display_opt(&self.moodys_rating),
            display_opt(&self.sand_p_rating),
            display_opt(&self.fitch_rating),
            display_opt(&self.order_number),
        ]
    }

    fn service(state: &AppState) -> &CrudService<Self> {
        &state.ratings
    }
}

impl Resource for RuleName {
    const PATH: &'static str = "ruleName";
    const TITLE: &'static str = "Rule Name";
    const FIELDS: &'static [FormField] = &[
        FormField::listed("name", "Name", Text),
        FormField::listed("description", "Description", Text),
        FormField::listed("json", "Json", Text),
        FormField::listed("template", "Template", Text),
        FormField::listed("sqlStr", "SQL", Text),
        FormField::listed("sqlPart", "SQL Part", Text),
    ];

    fn form_values(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone(),
            self.json.clone(),
            self.template.clone(),
            self.sql_str.clone(),
            self.sql_part.clone(),
        ]
    }

    fn service(state: &AppState) -> &CrudService<Self> {
        &state.rule_names
    }
}

impl Resource for Trade {
    const PATH: &'static str = "trade";
    const TITLE: &'static str = "Trade";
    const FIELDS: &'static [FormField] = &[
        FormField::listed("account", "Account", Text),
        FormField::listed("type", "Type", Text),
        FormField::listed("buyQuantity", "Buy Quantity", Number),
        FormField::form_only("sellQuantity", "Sell Quantity", Number),
        FormField::form_only("buyPrice", "Buy Price", Number),
        FormField::form_only("sellPrice", "Sell Price", Number),
        FormField::form_only("benchmark", "Benchmark", Text),
        FormField::form_only("tradeDate", "Trade Date", DateTime),
        FormField::form_only("security", "Security", Text),
        FormField::form_only("status", "Status", Text),
        FormField::form_only("trader", "Trader", Text),
        FormField::form_only("book", "Book", Text),
        FormField::form_only("creationName", "Creation Name", Text),
        FormField::form_only("creationDate", "Creation Date", DateTime),
        FormField::form_only("revisionName", "Revision Name", Text),
        FormField::form_only("revisionDate", "Revision Date", DateTime),
        FormField::form_only("dealName", "Deal Name", Text),
        FormField::form_only("dealType", "Deal Type", Text),
        FormField::form_only("sourceListId", "Source List Id", Text),
        FormField::form_only("side", "Side", Text),
    ];

    fn form_values(&self) -> Vec<String> {
        vec![
            self.account.clone(),
            self.trade_type.clone(),
            display_opt(&self.buy_quantity),
            display_opt(&self.sell_quantity),
            display_opt(&self.buy_price),
            display_opt(&self.sell_price),
            display_opt(&self.benchmark),
            display_datetime(&self.trade_date),
            display_opt(&self.security),
            display_opt(&self.status),
            display_opt(&self.trader),
            display_opt(&self.book),
            display_opt(&self.creation_name),
            display_datetime(&self.creation_date),
            display_opt(&self.revision_name),
            display_datetime(&self.revision_date),
            display_opt(&self.deal_name),
            display_opt(&self.deal_type),
            display_opt(&self.source_list_id),
            display_opt(&self.side),
        ]
    }

    fn service(state: &AppState) -> &CrudService<Self> {
        &state.trades
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Entity;

    fn assert_aligned<T: Resource>() {
        assert_eq!(T::default().form_values().len(), T::FIELDS.len(), "{}", T::PATH);
        assert_eq!(T::FIELDS.len(), T::COLUMNS.len(), "{}", T::PATH);
    }

    #[test]
    fn test_form_values_align_with_fields() {
        assert_aligned::<BidList>();
        assert_aligned::<CurvePoint>();
        assert_aligned::<Rating>();
        assert_aligned::<RuleName>();
        assert_aligned::<Trade>();
    }

    #[test]
    fn test_bid_list_form_values() {
        let bid = BidList {
            account: "Account #1".to_string(),
            bid_type: "Type #1".to_string(),
            bid_quantity: Some(5.2),
            ..BidList::default()
        };
        let values = bid.form_values();
        assert_eq!(values[0], "Account #1");
        assert_eq!(values[1], "Type #1");
        assert_eq!(values[2], "5.2");
        assert_eq!(values[3], "");
    }
}
