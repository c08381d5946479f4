use crate::error::ValidationError;
use crate::model::validation::JsonFields;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Order direction
#[derive(Debug, Clone, Copy, DisplaySimple, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Buy
    #[default]
    Buy,
    /// Sell
    Sell,
}

impl Action {
    /// Value sent in order payloads
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
        }
    }

    /// Parses both the long (`BUY`) and the short (`B`) form used by reports
    fn parse(entity: &str, field: &str, raw: &str) -> Result<Self, ValidationError> {
        match raw {
            "B" | "BUY" => Ok(Action::Buy),
            "S" | "SELL" => Ok(Action::Sell),
            other => Err(ValidationError::new(
                entity,
                field,
                "\"B\", \"S\", \"BUY\" or \"SELL\"",
                other,
            )),
        }
    }
}

/// Order type, as numbered by the trading endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "i64", into = "i64")]
pub enum OrderType {
    /// Limit order
    #[default]
    Limited,
    /// Stop limit order
    StopLimited,
    /// Market order
    Market,
    /// Stop loss order
    StopLoss,
}

impl OrderType {
    /// Numeric identifier
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            OrderType::Limited => 0,
            OrderType::StopLimited => 1,
            OrderType::Market => 2,
            OrderType::StopLoss => 3,
        }
    }

    /// True if the order needs a limit price
    #[must_use]
    pub fn needs_price(self) -> bool {
        matches!(self, OrderType::Limited | OrderType::StopLimited)
    }

    /// True if the order needs a stop price
    #[must_use]
    pub fn needs_stop_price(self) -> bool {
        matches!(self, OrderType::StopLimited | OrderType::StopLoss)
    }
}

impl TryFrom<i64> for OrderType {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(OrderType::Limited),
            1 => Ok(OrderType::StopLimited),
            2 => Ok(OrderType::Market),
            3 => Ok(OrderType::StopLoss),
            other => Err(format!("unknown order type {other}")),
        }
    }
}

impl From<OrderType> for i64 {
    fn from(t: OrderType) -> Self {
        t.code()
    }
}

/// Order validity, as numbered by the trading endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "i64", into = "i64")]
pub enum TimeType {
    /// Valid for the trading day
    #[default]
    Day,
    /// Valid until cancelled
    Permanent,
}

impl TimeType {
    /// Numeric identifier
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            TimeType::Day => 1,
            TimeType::Permanent => 3,
        }
    }
}

impl TryFrom<i64> for TimeType {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(TimeType::Day),
            3 => Ok(TimeType::Permanent),
            other => Err(format!("unknown time type {other}")),
        }
    }
}

impl From<TimeType> for i64 {
    fn from(t: TimeType) -> Self {
        t.code()
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderType::Limited => "LIMITED",
            OrderType::StopLimited => "STOP_LIMITED",
            OrderType::Market => "MARKET",
            OrderType::StopLoss => "STOP_LOSS",
        };
        f.write_str(name)
    }
}

impl fmt::Display for TimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeType::Day => "DAY",
            TimeType::Permanent => "PERMANENT",
        })
    }
}

fn order_type(fields: &JsonFields<'_>, field: &str) -> Result<OrderType, ValidationError> {
    let code = fields.i64(field)?;
    OrderType::try_from(code).map_err(|_| {
        ValidationError::new(
            fields.entity(),
            field,
            "order type 0, 1, 2 or 3",
            code.to_string(),
        )
    })
}

fn time_type(fields: &JsonFields<'_>, field: &str) -> Result<TimeType, ValidationError> {
    let code = fields.i64(field)?;
    TimeType::try_from(code).map_err(|_| {
        ValidationError::new(fields.entity(), field, "time type 1 or 3", code.to_string())
    })
}

/// An order, active or historical
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier
    pub id: String,
    /// Product the order is on
    pub product_id: String,
    /// Direction
    pub action: Action,
    /// Order type
    pub order_type: OrderType,
    /// Validity
    pub time_type: TimeType,
    /// Requested size
    pub size: f64,
    /// Limit price, 0 for market orders
    pub price: f64,
    /// Stop price
    pub stop_price: Option<f64>,
    /// Creation or last update time, as sent by the server
    pub created: Option<String>,
    /// Status, e.g. `CONFIRMED`
    pub status: Option<String>,
    /// Event type in the history, e.g. `CREATE` or `DELETE`
    pub event_type: Option<String>,
    /// Whether the order is still working
    pub is_active: Option<bool>,
    /// Size executed by the last event
    pub current_traded_size: Option<f64>,
    /// Total size executed
    pub total_traded_size: Option<f64>,
}

impl Order {
    /// Builds an order from an entry of the order history report
    pub fn from_history_json(value: &Value) -> Result<Self, ValidationError> {
        let f = JsonFields::new("Order", value)?;
        Ok(Self {
            id: f.id("orderId")?,
            product_id: f.id("productId")?,
            action: Action::parse("Order", "buysell", &f.str("buysell")?)?,
            order_type: order_type(&f, "orderTypeId")?,
            time_type: time_type(&f, "orderTimeTypeId")?,
            size: f.f64("size")?,
            price: f.f64("price")?,
            stop_price: f.opt_f64("stopPrice")?,
            created: f.opt_str("created")?,
            status: f.opt_str("status")?,
            event_type: f.opt_str("type")?,
            is_active: f.opt_bool("isActive")?,
            current_traded_size: f.opt_f64("currentTradedSize")?,
            total_traded_size: f.opt_f64("totalTradedSize")?,
        })
    }

    /// Builds an active order from a flattened `orders` row of the trading update
    pub fn from_update_row(row: &Map<String, Value>) -> Result<Self, ValidationError> {
        let f = JsonFields::from_map("Order", row);
        Ok(Self {
            id: f.id("id")?,
            product_id: f.id("productId")?,
            action: Action::parse("Order", "buysell", &f.str("buysell")?)?,
            order_type: order_type(&f, "orderTypeId")?,
            time_type: time_type(&f, "orderTimeTypeId")?,
            size: f.f64("size")?,
            price: f.f64("price")?,
            stop_price: f.opt_f64("stopPrice")?,
            created: f.opt_str("date")?,
            status: None,
            event_type: None,
            is_active: Some(true),
            current_traded_size: None,
            total_traded_size: f.opt_f64("totalTradedSize")?,
        })
    }
}

/// An executed trade
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction identifier
    pub id: String,
    /// Product traded
    pub product_id: String,
    /// Execution time, as sent by the server
    pub date: String,
    /// Direction
    pub action: Action,
    /// Execution price
    pub price: f64,
    /// Quantity, negative for sells
    pub quantity: f64,
    /// Total in product currency
    pub total: Option<f64>,
    /// Exchange rate applied
    pub fx_rate: Option<f64>,
    /// Total in the account base currency
    pub total_in_base_currency: Option<f64>,
    /// Fees in the account base currency
    pub fee_in_base_currency: Option<f64>,
    /// Order type of the originating order
    pub order_type_id: Option<i64>,
    /// Transaction type
    pub transaction_type_id: Option<i64>,
    /// Venue MIC, e.g. `XPAR`
    pub trading_venue: Option<String>,
}

impl Transaction {
    /// Builds a transaction from an entry of the transactions report
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let f = JsonFields::new("Transaction", value)?;
        Ok(Self {
            id: f.id("id")?,
            product_id: f.id("productId")?,
            date: f.str("date")?,
            action: Action::parse("Transaction", "buysell", &f.str("buysell")?)?,
            price: f.f64("price")?,
            quantity: f.f64("quantity")?,
            total: f.opt_f64("total")?,
            fx_rate: f.opt_f64("fxRate")?,
            total_in_base_currency: f.opt_f64("totalInBaseCurrency")?,
            fee_in_base_currency: f.opt_f64("feeInBaseCurrency")?,
            order_type_id: f.opt_i64("orderTypeId")?,
            transaction_type_id: f.opt_i64("transactionTypeId")?,
            trading_venue: f.opt_str("tradingVenue")?,
        })
    }
}

/// Fee announced when checking an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFee {
    /// Fee identifier
    pub id: Option<String>,
    /// Amount
    pub amount: f64,
    /// Currency of the amount
    pub currency: String,
}

/// Result of an order check, needed to confirm the order
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCheck {
    /// Token to pass to the confirmation call
    pub confirmation_id: String,
    /// Free space left once the order executes
    pub free_space_new: Option<f64>,
    /// Fees the order would incur
    pub transaction_fees: Vec<TransactionFee>,
}

impl OrderCheck {
    /// Builds the check result from the `checkOrder` response
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let root = JsonFields::new("OrderCheck", value)?;
        let data = JsonFields::from_map("OrderCheck", root.object("data")?);

        let mut transaction_fees = Vec::new();
        if let Some(fees) = data.opt_array("transactionFees")? {
            for fee in fees {
                let f = JsonFields::new("TransactionFee", fee)?;
                transaction_fees.push(TransactionFee {
                    id: f.opt_id("id")?,
                    amount: f.f64("amount")?,
                    currency: f.str("currency")?,
                });
            }
        }

        Ok(Self {
            confirmation_id: data.str("confirmationId")?,
            free_space_new: data.opt_f64("freeSpaceNew")?,
            transaction_fees,
        })
    }
}

/// Result of an order confirmation
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Identifier of the created order
    pub order_id: String,
}

impl OrderConfirmation {
    /// Builds the confirmation from the order endpoint response
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let root = JsonFields::new("OrderConfirmation", value)?;
        let data = JsonFields::from_map("OrderConfirmation", root.object("data")?);
        Ok(Self {
            order_id: data.id("orderId")?,
        })
    }
}

/// Maps the order history report, `{"data": [order, ...]}`
pub fn orders_from_history(value: &Value) -> Result<Vec<Order>, ValidationError> {
    let root = JsonFields::new("OrderHistory", value)?;
    root.array("data")?.iter().map(Order::from_history_json).collect()
}

/// Maps the transactions report, `{"data": [transaction, ...]}`
pub fn transactions_from_report(value: &Value) -> Result<Vec<Transaction>, ValidationError> {
    let root = JsonFields::new("Transactions", value)?;
    root.array("data")?.iter().map(Transaction::from_json).collect()
}
