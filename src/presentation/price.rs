//! Price series returned by the charting service.
//!
//! The service answers with a compact encoding: each series carries a
//! `times` field such as `2022-01-20T00:00:00/PT1M` giving the start and the
//! step, and rows whose first element is an offset counted in steps.

use crate::error::ValidationError;
use crate::model::validation::{JsonFields, shape_of};
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, TimeDelta};
use once_cell::sync::Lazy;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

static SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:(\d+)([YMWD]))?(?:T(\d+)([HMS]))?$").expect("span pattern is valid")
});

/// Unit of a [`TimeSpan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Seconds
    Second,
    /// Minutes
    Minute,
    /// Hours
    Hour,
    /// Days
    Day,
    /// Weeks
    Week,
    /// Calendar months
    Month,
    /// Calendar years
    Year,
}

/// Single-unit ISO-8601 duration such as `PT1M`, `P1D` or `P50Y`
///
/// Used both as a resolution (step between points) and as a period (how far
/// back a series goes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSpan {
    /// Number of units
    pub count: u32,
    /// Unit
    pub unit: TimeUnit,
}

/// Step between two points of a series
pub type Resolution = TimeSpan;
/// Length of history requested
pub type Period = TimeSpan;

impl TimeSpan {
    /// One minute
    pub const PT1M: TimeSpan = TimeSpan::new(1, TimeUnit::Minute);
    /// Five minutes
    pub const PT5M: TimeSpan = TimeSpan::new(5, TimeUnit::Minute);
    /// Fifteen minutes
    pub const PT15M: TimeSpan = TimeSpan::new(15, TimeUnit::Minute);
    /// One hour
    pub const PT1H: TimeSpan = TimeSpan::new(1, TimeUnit::Hour);
    /// One day
    pub const P1D: TimeSpan = TimeSpan::new(1, TimeUnit::Day);
    /// One week
    pub const P1W: TimeSpan = TimeSpan::new(1, TimeUnit::Week);
    /// One month
    pub const P1M: TimeSpan = TimeSpan::new(1, TimeUnit::Month);
    /// Three months
    pub const P3M: TimeSpan = TimeSpan::new(3, TimeUnit::Month);
    /// Six months
    pub const P6M: TimeSpan = TimeSpan::new(6, TimeUnit::Month);
    /// One year
    pub const P1Y: TimeSpan = TimeSpan::new(1, TimeUnit::Year);
    /// Fifty years, the longest history the service offers
    pub const P50Y: TimeSpan = TimeSpan::new(50, TimeUnit::Year);

    /// Creates a span
    #[must_use]
    pub const fn new(count: u32, unit: TimeUnit) -> Self {
        Self { count, unit }
    }

    /// Moves `start` forward by `steps` spans
    ///
    /// Months and years use calendar arithmetic, clamping to the end of the
    /// month. Returns `None` on overflow.
    #[must_use]
    pub fn advance(&self, start: NaiveDateTime, steps: i64) -> Option<NaiveDateTime> {
        let units = steps.checked_mul(i64::from(self.count))?;
        let seconds_per_unit = match self.unit {
            TimeUnit::Second => 1,
            TimeUnit::Minute => 60,
            TimeUnit::Hour => 3_600,
            TimeUnit::Day => 86_400,
            TimeUnit::Week => 604_800,
            TimeUnit::Month => return add_months(start, units),
            TimeUnit::Year => return add_months(start, units.checked_mul(12)?),
        };
        let delta = TimeDelta::try_seconds(units.checked_mul(seconds_per_unit)?)?;
        start.checked_add_signed(delta)
    }
}

fn add_months(start: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        start.checked_add_months(magnitude)
    } else {
        start.checked_sub_months(magnitude)
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.count;
        match self.unit {
            TimeUnit::Second => write!(f, "PT{n}S"),
            TimeUnit::Minute => write!(f, "PT{n}M"),
            TimeUnit::Hour => write!(f, "PT{n}H"),
            TimeUnit::Day => write!(f, "P{n}D"),
            TimeUnit::Week => write!(f, "P{n}W"),
            TimeUnit::Month => write!(f, "P{n}M"),
            TimeUnit::Year => write!(f, "P{n}Y"),
        }
    }
}

impl FromStr for TimeSpan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = SPAN_RE
            .captures(s.trim())
            .ok_or_else(|| format!("not an ISO-8601 duration: {s}"))?;
        let parts = match (caps.get(1), caps.get(2), caps.get(3), caps.get(4)) {
            (Some(n), Some(u), None, None) => (n.as_str(), u.as_str(), false),
            (None, None, Some(n), Some(u)) => (n.as_str(), u.as_str(), true),
            _ => return Err(format!("expected a single-unit duration: {s}")),
        };
        let count: u32 = parts
            .0
            .parse()
            .map_err(|_| format!("duration count out of range: {s}"))?;
        let unit = match (parts.1, parts.2) {
            ("Y", false) => TimeUnit::Year,
            ("M", false) => TimeUnit::Month,
            ("W", false) => TimeUnit::Week,
            ("D", false) => TimeUnit::Day,
            ("H", true) => TimeUnit::Hour,
            ("M", true) => TimeUnit::Minute,
            ("S", true) => TimeUnit::Second,
            _ => return Err(format!("unsupported duration unit: {s}")),
        };
        Ok(TimeSpan::new(count, unit))
    }
}

impl TryFrom<String> for TimeSpan {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSpan> for String {
    fn from(span: TimeSpan) -> Self {
        span.to_string()
    }
}

/// Kind of series requested from the charting service
#[derive(Debug, Clone, Copy, DisplaySimple, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    /// One price per step
    #[default]
    Price,
    /// Open, high, low and close per step
    Ohlc,
}

impl PriceType {
    /// Value used in the charting `series` parameter
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PriceType::Price => "price",
            PriceType::Ohlc => "ohlc",
        }
    }
}

/// Open, high, low and close of one step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
}

/// One observation of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Start of the step
    pub date: NaiveDateTime,
    /// Price, the close for OHLC series
    pub price: f64,
    /// Full candle for OHLC series
    pub ohlc: Option<Ohlc>,
}

/// Resolution-tagged sequence of prices
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Kind of series
    pub price_type: PriceType,
    /// Resolution the service actually used, which may differ from the one requested
    pub resolution: Resolution,
    /// Period requested, the service does not echo it back
    pub period: Period,
    /// Start of the window covered
    pub start: Option<NaiveDateTime>,
    /// End of the window covered
    pub end: Option<NaiveDateTime>,
    /// Expiry of the data, as sent by the service
    pub expires: Option<String>,
    /// Quote currency, when the service sends product metadata
    pub currency: Option<String>,
    /// Observations in chronological order
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from a charting response to a request over `period`
    ///
    /// The first `time` or `ohlc` series of the response is used. The
    /// currency is taken from the `object` series when present.
    pub fn from_json(value: &Value, period: Period) -> Result<Self, ValidationError> {
        let envelope = JsonFields::new("PriceSeries", value)?;
        let series = envelope.array("series")?;

        let reported_resolution = envelope
            .opt_str("resolution")?
            .map(|raw| parse_span("PriceSeries", "resolution", &raw))
            .transpose()?;
        let start = envelope
            .opt_str("start")?
            .map(|raw| parse_timestamp("PriceSeries", "start", &raw))
            .transpose()?;
        let end = envelope
            .opt_str("end")?
            .map(|raw| parse_timestamp("PriceSeries", "end", &raw))
            .transpose()?;

        let mut currency = None;
        let mut selected = None;
        for (index, item) in series.iter().enumerate() {
            let fields = JsonFields::new("PriceSeries.series", item)?;
            match fields.str("type")?.as_str() {
                "object" => {
                    if let Some(data) = fields.opt_object("data")? {
                        currency = JsonFields::from_map("PriceSeries.series.data", data)
                            .opt_str("currency")?;
                    }
                }
                "time" if selected.is_none() => selected = Some((index, PriceType::Price, fields)),
                "ohlc" if selected.is_none() => selected = Some((index, PriceType::Ohlc, fields)),
                _ => {}
            }
        }

        let Some((index, price_type, fields)) = selected else {
            return Err(ValidationError::new(
                "PriceSeries",
                "series",
                "a `time` or `ohlc` series",
                "none",
            ));
        };

        let times = fields.str("times")?;
        let (origin, step) = parse_times(&times)?;
        let resolution = reported_resolution.or(step).ok_or_else(|| {
            ValidationError::new("PriceSeries", "resolution", "ISO-8601 duration", "missing")
        })?;
        let step = step.unwrap_or(resolution);

        let rows = fields.array("data")?;
        let mut points = Vec::with_capacity(rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let field = format!("series[{index}].data[{row_index}]");
            points.push(parse_row(&field, row, price_type, origin, step)?);
        }

        Ok(Self {
            price_type,
            resolution,
            period,
            start,
            end,
            expires: fields.opt_str("expires")?,
            currency,
            points,
        })
    }

    /// Number of observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series holds no observation
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Timestamps of the observations
    pub fn dates(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.points.iter().map(|p| p.date)
    }

    /// Prices of the observations, the close for OHLC series
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// Most recent observation
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

fn parse_span(entity: &str, field: &str, raw: &str) -> Result<TimeSpan, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::new(entity, field, "ISO-8601 duration", raw))
}

/// Parses `2022-01-20T00:00:00`, `2022-01-20T00:00:00+01:00` or `2023-06-29`
fn parse_timestamp(entity: &str, field: &str, raw: &str) -> Result<NaiveDateTime, ValidationError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ValidationError::new(entity, field, "ISO-8601 date or timestamp", raw))
}

fn parse_times(times: &str) -> Result<(NaiveDateTime, Option<TimeSpan>), ValidationError> {
    match times.split_once('/') {
        Some((start, span)) => Ok((
            parse_timestamp("PriceSeries", "times", start)?,
            Some(parse_span("PriceSeries", "times", span)?),
        )),
        None => Ok((parse_timestamp("PriceSeries", "times", times)?, None)),
    }
}

fn parse_row(
    field: &str,
    row: &Value,
    price_type: PriceType,
    origin: NaiveDateTime,
    step: TimeSpan,
) -> Result<PricePoint, ValidationError> {
    let expected = match price_type {
        PriceType::Price => "[offset, price]",
        PriceType::Ohlc => "[offset, open, high, low, close]",
    };
    let width = match price_type {
        PriceType::Price => 2,
        PriceType::Ohlc => 5,
    };
    let numbers: Vec<f64> = match row.as_array() {
        Some(items) if items.len() >= width => items
            .iter()
            .take(width)
            .map(Value::as_f64)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                ValidationError::new("PriceSeries", field, expected, "non-numeric entry")
            })?,
        Some(items) => {
            return Err(ValidationError::new(
                "PriceSeries",
                field,
                expected,
                format!("array of {}", items.len()),
            ));
        }
        None => return Err(ValidationError::new("PriceSeries", field, expected, shape_of(row))),
    };

    let offset = numbers[0];
    if offset.fract() != 0.0 {
        return Err(ValidationError::new(
            "PriceSeries",
            field,
            "integer offset",
            offset.to_string(),
        ));
    }
    let date = step
        .advance(origin, offset as i64)
        .ok_or_else(|| {
            ValidationError::new(
                "PriceSeries",
                field,
                "offset within range",
                offset.to_string(),
            )
        })?;

    Ok(match price_type {
        PriceType::Price => PricePoint {
            date,
            price: numbers[1],
            ohlc: None,
        },
        PriceType::Ohlc => PricePoint {
            date,
            price: numbers[4],
            ohlc: Some(Ohlc {
                open: numbers[1],
                high: numbers[2],
                low: numbers[3],
                close: numbers[4],
            }),
        },
    })
}
