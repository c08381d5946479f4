use degiroasync::prelude::*;
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ohlc_json() -> Value {
    json!({
        "requestid": "1",
        "resolution": "P1D",
        "start": "2023-06-29T00:00:00",
        "end": "2023-07-06T00:00:00",
        "series": [
            {
                "type": "object",
                "id": "issueid:360114899",
                "data": {"currency": "EUR", "name": "AIRBUS"}
            },
            {
                "type": "ohlc",
                "id": "ohlc:issueid:360114899",
                "times": "2023-06-29T00:00:00/P1D",
                "expires": "2023-07-06T17:40:00+02:00",
                "data": [
                    [0, 129.84, 131.0, 129.1, 130.8],
                    [1, 131.0, 132.74, 130.72, 132.36],
                    [4, 132.0, 132.98, 131.3, 131.64],
                    [5, 131.9, 132.4, 131.12, 131.7],
                    [6, 131.4, 131.56, 128.5, 128.8]
                ]
            }
        ]
    })
}

#[test]
fn test_ohlc_offsets_are_steps_from_origin() {
    let series = PriceSeries::from_json(&ohlc_json(), TimeSpan::P1W).unwrap();
    assert_eq!(series.price_type, PriceType::Ohlc);
    assert_eq!(series.resolution, TimeSpan::P1D);
    assert_eq!(series.period, TimeSpan::P1W);
    assert_eq!(series.currency.as_deref(), Some("EUR"));
    assert_eq!(series.len(), 5);

    let dates: Vec<NaiveDate> = series.dates().map(|d| d.date()).collect();
    assert_eq!(
        dates,
        [
            date(2023, 6, 29),
            date(2023, 6, 30),
            date(2023, 7, 3),
            date(2023, 7, 4),
            date(2023, 7, 5)
        ]
    );

    let last = series.last().unwrap();
    assert_eq!(last.price, 128.8);
    let ohlc = last.ohlc.unwrap();
    assert_eq!(ohlc.open, 131.4);
    assert_eq!(ohlc.high, 131.56);
    assert_eq!(ohlc.low, 128.5);
    assert_eq!(ohlc.close, 128.8);
}

#[test]
fn test_price_series_intraday() {
    let value = json!({
        "resolution": "PT1M",
        "series": [{
            "type": "time",
            "times": "2022-01-20T00:00:00/PT1M",
            "data": [[540, 112.3], [541, 112.5], [600, 112.4]]
        }]
    });
    let series = PriceSeries::from_json(&value, TimeSpan::P1D).unwrap();
    assert_eq!(series.price_type, PriceType::Price);
    let times: Vec<String> = series.dates().map(|d| d.format("%H:%M").to_string()).collect();
    assert_eq!(times, ["09:00", "09:01", "10:00"]);
    assert_eq!(series.prices().collect::<Vec<_>>(), [112.3, 112.5, 112.4]);
    assert!(series.last().unwrap().ohlc.is_none());
}

#[test]
fn test_price_series_reports_actual_resolution() {
    // Asked for minutes over a long period, the service falls back to days
    let value = json!({
        "series": [{
            "type": "time",
            "times": "2023-06-29T00:00:00/P1D",
            "data": [[0, 1.0], [1, 2.0]]
        }]
    });
    let series = PriceSeries::from_json(&value, TimeSpan::P50Y).unwrap();
    assert_ne!(series.resolution, TimeSpan::PT1M);
    assert_eq!(series.resolution, TimeSpan::P1D);
    assert_eq!(series.period, TimeSpan::P50Y);
}

#[test]
fn test_price_series_empty_data() {
    let value = json!({
        "resolution": "P1D",
        "series": [{"type": "time", "times": "2023-06-29T00:00:00/P1D", "data": []}]
    });
    let series = PriceSeries::from_json(&value, TimeSpan::P1M).unwrap();
    assert!(series.is_empty());
    assert!(series.last().is_none());
}

#[test]
fn test_price_series_without_data_series() {
    let value = json!({"series": [{"type": "object", "data": {}}]});
    let err = PriceSeries::from_json(&value, TimeSpan::P1M).unwrap_err();
    assert_eq!(err.field, "series");
}

#[test]
fn test_price_series_bad_row_is_named() {
    let value = json!({
        "series": [{
            "type": "ohlc",
            "times": "2023-06-29T00:00:00/P1D",
            "data": [[0, 1.0, 2.0, 0.5, 1.5], [1, 1.0, 2.0]]
        }]
    });
    let err = PriceSeries::from_json(&value, TimeSpan::P1M).unwrap_err();
    assert_eq!(err.field, "series[0].data[1]");
    assert_eq!(err.found, "array of 3");

    let value = json!({
        "series": [{"type": "time", "times": "yesterday/P1D", "data": []}]
    });
    let err = PriceSeries::from_json(&value, TimeSpan::P1M).unwrap_err();
    assert_eq!(err.field, "times");
}

#[test]
fn test_time_span_serde() {
    let span: TimeSpan = serde_json::from_value(json!("P3M")).unwrap();
    assert_eq!(span, TimeSpan::P3M);
    assert_eq!(serde_json::to_value(TimeSpan::PT15M).unwrap(), json!("PT15M"));
    assert!(serde_json::from_value::<TimeSpan>(json!("3 months")).is_err());
}
