use crate::constants::REPORTING_DATE_FORMAT;
use crate::error::ValidationError;
use crate::model::validation::{JsonFields, shape_of};
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Joins URL sections with exactly one `/` between them
///
/// Unlike `Url::join`, a section starting with `/` does not replace the path
/// of the previous one:
///
/// ```
/// use degiroasync::model::utils::join_url;
/// assert_eq!(
///     join_url(&["https://foo.bar/product/", "/rest/of/url"]),
///     "https://foo.bar/product/rest/of/url"
/// );
/// ```
#[must_use]
pub fn join_url(sections: &[&str]) -> String {
    sections
        .iter()
        .map(|s| s.trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Appends the `;jsessionid=` path parameter some trading endpoints require
#[must_use]
pub fn with_jsessionid(url: &str, jsessionid: &str) -> String {
    format!("{url};jsessionid={jsessionid}")
}

/// URL without its query string and `;jsessionid=` parameter
///
/// Both carry the session identifier, which must stay out of logs and errors.
#[must_use]
pub fn redact_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.split_once(";jsessionid=") {
        Some((head, rest)) => match rest.find('/') {
            Some(slash) => format!("{head}{}", &rest[slash..]),
            None => head.to_string(),
        },
        None => path.to_string(),
    }
}

/// Flattens an attribute list as returned by the trading update endpoint
///
/// The server sends rows as
/// `[{"name": "size", "value": 10, "isAdded": true}, ...]`. Entries without a
/// `value` are skipped; an entry without a string `name` is rejected.
pub fn dict_from_attr_list(
    entity: &str,
    attributes: &[Value],
) -> Result<Map<String, Value>, ValidationError> {
    let mut map = Map::with_capacity(attributes.len());
    for (index, attribute) in attributes.iter().enumerate() {
        let Value::Object(entry) = attribute else {
            return Err(ValidationError::new(
                entity,
                format!("[{index}]"),
                "object",
                shape_of(attribute),
            ));
        };
        let name = match entry.get("name") {
            Some(Value::String(name)) => name,
            Some(other) => {
                return Err(ValidationError::new(
                    entity,
                    format!("[{index}].name"),
                    "string",
                    shape_of(other),
                ));
            }
            None => {
                return Err(ValidationError::new(
                    entity,
                    format!("[{index}].name"),
                    "string",
                    "missing",
                ));
            }
        };
        if let Some(value) = entry.get("value") {
            map.insert(name.clone(), value.clone());
        }
    }
    Ok(map)
}

/// Extracts the rows of a trading update section, e.g. `portfolio` or `orders`
///
/// Each section looks like
/// `{"name": "portfolio", "value": [{"id": ..., "value": [attrs]}]}`.
/// A section absent from the response yields no rows.
pub fn update_section_rows(
    entity: &str,
    response: &Value,
    section: &str,
) -> Result<Vec<Map<String, Value>>, ValidationError> {
    let root = JsonFields::new(entity, response)?;
    let Some(section_map) = root.opt_object(section)? else {
        return Ok(Vec::new());
    };
    let section_fields = JsonFields::from_map(entity, section_map);
    let Some(rows) = section_fields.opt_array("value")? else {
        return Ok(Vec::new());
    };

    let mut flattened = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let row_fields = JsonFields::new(entity, row)?;
        let attributes = row_fields.array("value").map_err(|e| ValidationError {
            field: format!("{section}.value[{index}].{}", e.field),
            ..e
        })?;
        flattened.push(dict_from_attr_list(entity, attributes)?);
    }
    Ok(flattened)
}

/// Formats a date the way the reporting endpoints expect (`dd/mm/YYYY`)
#[must_use]
pub fn format_reporting_date(date: NaiveDate) -> String {
    date.format(REPORTING_DATE_FORMAT).to_string()
}
