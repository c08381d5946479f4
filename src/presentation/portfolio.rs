use crate::error::ValidationError;
use crate::model::utils::dict_from_attr_list;
use crate::model::validation::JsonFields;
use crate::presentation::product::Product;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of a portfolio row
#[derive(Debug, Clone, Copy, DisplaySimple, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PositionType {
    /// Position on a product
    #[default]
    Product,
    /// Cash balance
    Cash,
}

impl PositionType {
    fn parse(entity: &str, raw: &str) -> Result<Self, ValidationError> {
        match raw {
            "PRODUCT" => Ok(PositionType::Product),
            "CASH" => Ok(PositionType::Cash),
            other => Err(ValidationError::new(
                entity,
                "positionType",
                "\"PRODUCT\" or \"CASH\"",
                other,
            )),
        }
    }
}

/// Identifier and kind of a raw portfolio row, used to split rows before
/// product information is fetched
pub fn position_row_kind(
    row: &Map<String, Value>,
) -> Result<(String, PositionType), ValidationError> {
    let fields = JsonFields::from_map("Position", row);
    let id = fields.id("id")?;
    let kind = PositionType::parse("Position", &fields.str("positionType")?)?;
    Ok((id, kind))
}

/// A held quantity of a product
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Product held
    pub product: Product,
    /// Number of units, negative for short positions
    pub size: f64,
    /// Last price, in the product currency
    pub price: f64,
    /// Average exchange rate paid when the position was built
    pub average_fx_rate: f64,
    /// Price at which the position breaks even
    pub break_even_price: Option<f64>,
    /// Realised profit and loss on the product
    pub realized_product_pl: Option<f64>,
    /// Unrealised profit and loss per base currency
    pub pl_base: Option<BTreeMap<String, f64>>,
    /// Today's profit and loss per base currency
    pub today_pl_base: Option<BTreeMap<String, f64>>,
}

impl Position {
    /// Builds a position from a flattened portfolio row and its product
    pub fn from_row(row: &Map<String, Value>, product: Product) -> Result<Self, ValidationError> {
        let fields = JsonFields::from_map("Position", row);
        Ok(Self {
            product,
            size: fields.f64("size")?,
            price: fields.f64("price")?,
            average_fx_rate: fields.f64("averageFxRate")?,
            break_even_price: fields.opt_f64("breakEvenPrice")?,
            realized_product_pl: fields.opt_f64("realizedProductPl")?,
            pl_base: fields.opt_amounts("plBase")?,
            today_pl_base: fields.opt_amounts("todayPlBase")?,
        })
    }

    /// Market value, `price * size`
    #[must_use]
    pub fn value(&self) -> f64 {
        self.price * self.size
    }
}

/// Cash held in one currency
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashBalance {
    /// Row identifier, e.g. `EUR` or `FLATEX_EUR`
    pub currency: String,
    /// Amount held
    pub size: f64,
    /// Value in the account base currency
    pub value: Option<f64>,
}

impl CashBalance {
    /// Builds a cash balance from a flattened portfolio row
    pub fn from_row(row: &Map<String, Value>) -> Result<Self, ValidationError> {
        let fields = JsonFields::from_map("CashBalance", row);
        Ok(Self {
            currency: fields.id("id")?,
            size: fields.f64("size")?,
            value: fields.opt_f64("value")?,
        })
    }
}

/// Positions and cash balances of the account
#[derive(DebugPretty, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Portfolio {
    /// Positions on products
    pub positions: Vec<Position>,
    /// Cash balances
    pub cash: Vec<CashBalance>,
}

impl Portfolio {
    /// Sum of the position values, regardless of currency
    #[must_use]
    pub fn positions_value(&self) -> f64 {
        self.positions.iter().map(Position::value).sum()
    }

    /// Position on the product with `symbol`, if held
    #[must_use]
    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.product.symbol == symbol)
    }
}

impl fmt::Display for Portfolio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use prettytable::format;
        use prettytable::{Cell, Row, Table};

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.add_row(Row::new(vec![
            Cell::new("SYMBOL"),
            Cell::new("NAME"),
            Cell::new("SIZE"),
            Cell::new("PRICE"),
            Cell::new("VALUE"),
            Cell::new("CURRENCY"),
        ]));

        let mut sorted = self.positions.clone();
        sorted.sort_by(|a, b| a.product.symbol.cmp(&b.product.symbol));
        for position in &sorted {
            let name = if position.product.name.chars().count() > 30 {
                let short: String = position.product.name.chars().take(27).collect();
                format!("{short}...")
            } else {
                position.product.name.clone()
            };
            table.add_row(Row::new(vec![
                Cell::new(&position.product.symbol),
                Cell::new(&name),
                Cell::new(&format!("{}", position.size)),
                Cell::new(&format!("{:.2}", position.price)),
                Cell::new(&format!("{:.2}", position.value())),
                Cell::new(&position.product.currency),
            ]));
        }
        for cash in &self.cash {
            table.add_row(Row::new(vec![
                Cell::new("CASH"),
                Cell::new(&cash.currency),
                Cell::new(&format!("{:.2}", cash.size)),
                Cell::new("-"),
                Cell::new(
                    &cash
                        .value
                        .map(|v| format!("{v:.2}"))
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::new("-"),
            ]));
        }

        write!(f, "{table}")
    }
}

/// Account totals
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalPortfolio {
    /// Cash held at the broker
    pub degiro_cash: f64,
    /// Cash held at the partner bank
    pub flatex_cash: Option<f64>,
    /// Total cash
    pub total_cash: f64,
    /// Sum of deposits minus withdrawals
    pub total_deposit_withdrawal: Option<f64>,
    /// Deposits minus withdrawals of the day
    pub today_deposit_withdrawal: Option<f64>,
    /// Currency of the cash fund compensation
    pub cash_fund_compensation_currency: Option<String>,
    /// Cash fund compensation
    pub cash_fund_compensation: Option<f64>,
    /// Cash fund compensation withdrawn
    pub cash_fund_compensation_withdrawn: Option<f64>,
    /// Fees not linked to a product, today
    pub today_non_product_fees: Option<f64>,
    /// Fees not linked to a product, all time
    pub total_non_product_fees: Option<f64>,
    /// Free space per currency
    pub free_space_new: BTreeMap<String, f64>,
    /// Margin
    pub report_margin: Option<f64>,
    /// Time of the report, `HH:MM:SS`
    pub report_creation_time: Option<String>,
    /// Portfolio value
    pub report_portf_value: f64,
    /// Cash balance
    pub report_cash_bal: f64,
    /// Net liquidation value
    pub report_netliq: Option<f64>,
    /// Overall margin
    pub report_overall_margin: Option<f64>,
    /// Total long value
    pub report_total_long_val: Option<f64>,
    /// Deficit
    pub report_deficit: Option<f64>,
    /// Margin call status, e.g. `NO_MARGIN_CALL`
    pub margin_call_status: Option<String>,
}

impl TotalPortfolio {
    /// Builds the totals from a `totalPortfolio` trading update
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let root = JsonFields::new("TotalPortfolio", value)?;
        let section = JsonFields::from_map("TotalPortfolio", root.object("totalPortfolio")?);
        let attrs = dict_from_attr_list("TotalPortfolio", section.array("value")?)?;
        Self::from_attrs(&attrs)
    }

    /// Builds the totals from the flattened `totalPortfolio` attributes
    pub fn from_attrs(attrs: &Map<String, Value>) -> Result<Self, ValidationError> {
        let f = JsonFields::from_map("TotalPortfolio", attrs);
        Ok(Self {
            degiro_cash: f.f64("degiroCash")?,
            flatex_cash: f.opt_f64("flatexCash")?,
            total_cash: f.f64("totalCash")?,
            total_deposit_withdrawal: f.opt_f64("totalDepositWithdrawal")?,
            today_deposit_withdrawal: f.opt_f64("todayDepositWithdrawal")?,
            cash_fund_compensation_currency: f.opt_str("cashFundCompensationCurrency")?,
            cash_fund_compensation: f.opt_f64("cashFundCompensation")?,
            cash_fund_compensation_withdrawn: f.opt_f64("cashFundCompensationWithdrawn")?,
            today_non_product_fees: f.opt_f64("todayNonProductFees")?,
            total_non_product_fees: f.opt_f64("totalNonProductFees")?,
            free_space_new: f.amounts("freeSpaceNew")?,
            report_margin: f.opt_f64("reportMargin")?,
            report_creation_time: f.opt_str("reportCreationTime")?,
            report_portf_value: f.f64("reportPortfValue")?,
            report_cash_bal: f.f64("reportCashBal")?,
            report_netliq: f.opt_f64("reportNetliq")?,
            report_overall_margin: f.opt_f64("reportOverallMargin")?,
            report_total_long_val: f.opt_f64("reportTotalLongVal")?,
            report_deficit: f.opt_f64("reportDeficit")?,
            margin_call_status: f.opt_str("marginCallStatus")?,
        })
    }
}
