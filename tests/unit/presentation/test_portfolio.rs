use crate::common::*;
use degiroasync::model::utils::{dict_from_attr_list, update_section_rows};
use degiroasync::presentation::portfolio::position_row_kind;
use degiroasync::prelude::*;
use serde_json::json;

fn total_portfolio_json() -> Value {
    let attrs = attr_row("totalPortfolio", &[
        ("degiroCash", json!(250.5)),
        ("flatexCash", json!(0)),
        ("totalCash", json!(250.5)),
        ("totalDepositWithdrawal", json!(1500)),
        ("todayDepositWithdrawal", json!(0)),
        ("cashFundCompensationCurrency", json!("EUR")),
        ("freeSpaceNew", json!({"EUR": 1455.5})),
        ("reportMargin", json!(1455.5)),
        ("reportCreationTime", json!("09:15:02")),
        ("reportPortfValue", json!(1205.0)),
        ("reportCashBal", json!(250.5)),
        ("reportNetliq", json!(1455.5)),
        ("marginCallStatus", json!("NO_MARGIN_CALL")),
    ]);
    json!({"totalPortfolio": {"isAdded": true, "name": "totalPortfolio", "value": attrs["value"]}})
}

#[test]
fn test_position_from_row() {
    let rows = update_section_rows("Position", &portfolio_json(), "portfolio").unwrap();
    let (id, kind) = position_row_kind(&rows[0]).unwrap();
    assert_eq!(id, "96008");
    assert_eq!(kind, PositionType::Product);

    let position = Position::from_row(&rows[0], airbus()).unwrap();
    assert_eq!(position.size, 10.0);
    assert_eq!(position.price, 120.5);
    assert_eq!(position.value(), 1205.0);
    assert_eq!(position.break_even_price, Some(110.0));
    assert_eq!(position.pl_base.as_ref().unwrap()["EUR"], -1100.0);

    // Same row, same position
    assert_eq!(Position::from_row(&rows[0], airbus()).unwrap(), position);
}

#[test]
fn test_cash_row() {
    let rows = update_section_rows("Position", &portfolio_json(), "portfolio").unwrap();
    assert_eq!(position_row_kind(&rows[1]).unwrap().1, PositionType::Cash);
    let cash = CashBalance::from_row(&rows[1]).unwrap();
    assert_eq!(cash.currency, "EUR");
    assert_eq!(cash.size, 250.5);
}

#[test]
fn test_position_missing_field_is_named() {
    let row = attr_row("96008", &[("id", json!("96008")), ("size", json!(10))]);
    let attrs = dict_from_attr_list("Position", row["value"].as_array().unwrap()).unwrap();
    let err = Position::from_row(&attrs, airbus()).unwrap_err();
    assert_eq!(err.entity, "Position");
    assert_eq!(err.field, "price");
    assert_eq!(err.found, "missing");
}

#[test]
fn test_unknown_position_type_fails() {
    let row = attr_row("X", &[("id", json!("X")), ("positionType", json!("FUTURE"))]);
    let attrs = dict_from_attr_list("Position", row["value"].as_array().unwrap()).unwrap();
    let err = position_row_kind(&attrs).unwrap_err();
    assert_eq!(err.field, "positionType");
    assert_eq!(err.found, "FUTURE");
}

#[test]
fn test_portfolio_helpers_and_display() {
    let rows = update_section_rows("Position", &portfolio_json(), "portfolio").unwrap();
    let portfolio = Portfolio {
        positions: vec![Position::from_row(&rows[0], airbus()).unwrap()],
        cash: vec![CashBalance::from_row(&rows[1]).unwrap()],
    };
    assert_eq!(portfolio.positions_value(), 1205.0);
    assert!(portfolio.position("AIR").is_some());
    assert!(portfolio.position("AAPL").is_none());

    let table = portfolio.to_string();
    assert!(table.contains("AIRBUS"));
    assert!(table.contains("1205.00"));
    assert!(table.contains("CASH"));
}

#[test]
fn test_total_portfolio_from_json() {
    let total = TotalPortfolio::from_json(&total_portfolio_json()).unwrap();
    assert_eq!(total.degiro_cash, 250.5);
    assert_eq!(total.flatex_cash, Some(0.0));
    assert_eq!(total.free_space_new["EUR"], 1455.5);
    assert_eq!(total.report_portf_value, 1205.0);
    assert_eq!(total.margin_call_status.as_deref(), Some("NO_MARGIN_CALL"));
    assert_eq!(total.report_deficit, None);
}

#[test]
fn test_total_portfolio_bad_amount() {
    let mut value = total_portfolio_json();
    value["totalPortfolio"]["value"][6]["value"] = json!({"EUR": "lots"});
    let err = TotalPortfolio::from_json(&value).unwrap_err();
    assert_eq!(err.field, "freeSpaceNew.EUR");
    assert_eq!(err.found, "string");
}
