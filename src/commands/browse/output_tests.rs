//! Output formatting tests for browse command.

#[cfg(test)]
mod tests {
    use super::super::execute::BrowseResult;
    use crate::types::{Event, NodeRecord};
    use rstest::{fixture, rstest};

    const MINIMAL_TABLE: &str = "\
Browsed: checkout.jsonl
7 nodes, 7 visible at exit, 0 actions";

    const ZOOMED_TABLE: &str = "\
Browsed: checkout.jsonl
4 nodes, 2 visible at exit, 5 actions
Zoom depth at exit: 1
Selected: Shop::Cart#total (app/models/cart.rb:30)";

    #[fixture]
    fn minimal_result() -> BrowseResult {
        BrowseResult {
            source: "checkout.jsonl".to_string(),
            nodes: 7,
            actions: 0,
            visible: 7,
            zoom_depth: 0,
            selected: None,
        }
    }

    #[fixture]
    fn zoomed_result() -> BrowseResult {
        BrowseResult {
            source: "checkout.jsonl".to_string(),
            nodes: 4,
            actions: 5,
            visible: 2,
            zoom_depth: 1,
            selected: Some(NodeRecord {
                event: Event::Call,
                name: "total".to_string(),
                depth: 0,
                parameters: vec![],
                return_value: None,
                scope: Some("Shop::Cart".to_string()),
                file: Some("app/models/cart.rb".to_string()),
                line: Some(30),
                duration: Some(0.625),
            }),
        }
    }

    crate::output_table_test! {
        test_name: test_to_table_minimal,
        fixture: minimal_result,
        fixture_type: BrowseResult,
        expected: MINIMAL_TABLE,
    }

    crate::output_table_test! {
        test_name: test_to_table_zoomed,
        fixture: zoomed_result,
        fixture_type: BrowseResult,
        expected: ZOOMED_TABLE,
    }

    crate::output_json_test! {
        test_name: test_format_json,
        fixture: zoomed_result,
        fixture_type: BrowseResult,
        assertions: {
            "actions": 5,
            "zoom_depth": 1,
            "selected"["name"]: "total",
            "selected"["event"]: "call",
        },
    }

    crate::output_json_test! {
        test_name: test_format_json_without_selection,
        fixture: minimal_result,
        fixture_type: BrowseResult,
        assertions: {
            "selected": serde_json::Value::Null,
        },
    }

    crate::output_toon_test! {
        test_name: test_format_toon,
        fixture: minimal_result,
        fixture_type: BrowseResult,
        contains: ["source: checkout.jsonl", "actions: 0"],
    }
}
