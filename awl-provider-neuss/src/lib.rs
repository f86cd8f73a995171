//! Provider implementation for Neuss using the AWL Bürgerportal calendar API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use awl_core::{
    de::{string_list, string_or_number},
    model::{
        Address, CollectionDay, MonthGroup, MonthKey, Schedule, ScheduleQuery, ScheduleSpan,
        StreetEntry,
    },
    ports::{PortError, SchedulePort, StreetDirectoryPort},
    provider::{Provider, ProviderMeta},
};

/// Default base URL of the calendar API.
pub const BASE_URL: &str = "https://buergerportal.awl-neuss.de/api/v1/calendar";

const STREETS_PATH: &str = "/townarea-streets";
const STREETS_TIMEOUT: Duration = Duration::from_secs(10);
// The API wants "Mon YYYY", e.g. "Apr 2024".
const START_MONTH_FORMAT: &str = "%b %Y";

/// Street as returned by /townarea-streets
#[derive(Debug, Deserialize)]
struct StreetRecord {
    #[serde(rename = "strasseNummer", deserialize_with = "string_or_number")]
    code: String,
    #[serde(rename = "strasseBezeichnung")]
    name: String,
    #[serde(
        rename = "blockedHomeNumbers",
        default,
        deserialize_with = "string_list"
    )]
    blocked_house_numbers: Vec<String>,
}

impl From<StreetRecord> for StreetEntry {
    fn from(record: StreetRecord) -> Self {
        Self {
            code: record.code,
            name: record.name,
            blocked_house_numbers: record.blocked_house_numbers,
        }
    }
}

/// Street directory implementation for Neuss.
pub struct NeussStreetPort {
    client: Client,
    base_url: String,
}

impl NeussStreetPort {
    /// Create a new street port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl StreetDirectoryPort for NeussStreetPort {
    async fn streets(&self) -> Result<Vec<StreetEntry>, PortError> {
        let url = format!("{}{STREETS_PATH}", self.base_url);
        tracing::debug!(%url, "fetching town streets");

        let req = self.client.get(url).timeout(STREETS_TIMEOUT);
        let records = fetch_json::<Vec<StreetRecord>>(req).await?;

        tracing::debug!(count = records.len(), "received town streets");
        Ok(records.into_iter().map(StreetEntry::from).collect())
    }
}

/// Collection schedule implementation for Neuss.
pub struct NeussSchedulePort {
    client: Client,
    base_url: String,
}

impl NeussSchedulePort {
    /// Create a new schedule port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl SchedulePort for NeussSchedulePort {
    async fn schedule(
        &self,
        address: &Address,
        query: &ScheduleQuery,
    ) -> Result<Option<Schedule>, PortError> {
        let params = schedule_params(address, query);
        tracing::debug!(url = %self.base_url, ?params, "fetching schedule");

        // No timeout here; the directory request is the only bounded one.
        let req = self.client.get(&self.base_url).query(&params);
        let body = fetch_json::<Value>(req).await?;

        decode_schedule(body)
    }
}

/// Build the provider bundle for Neuss against [`BASE_URL`].
#[must_use]
pub fn plugin(client: Client) -> Provider {
    plugin_with_base_url(client, BASE_URL)
}

/// Build the provider bundle for Neuss against a custom base URL.
#[must_use]
pub fn plugin_with_base_url(client: Client, base_url: &str) -> Provider {
    let street_port = Arc::new(NeussStreetPort::new(client.clone(), base_url));
    let schedule_port = Arc::new(NeussSchedulePort::new(client, base_url));

    Provider {
        meta: provider_meta(base_url),
        street_port,
        schedule_port,
    }
}

fn provider_meta(base_url: &str) -> ProviderMeta {
    ProviderMeta {
        id: String::from("neuss"),
        name: String::from("AWL Neuss"),
        base_url: base_url.to_owned(),
    }
}

/// Query parameters of a schedule request, in the order the portal sends them.
#[must_use]
pub fn schedule_params(address: &Address, query: &ScheduleQuery) -> Vec<(&'static str, String)> {
    let full_year = query.span == ScheduleSpan::FullYear;

    let mut params = vec![
        ("streetNum", address.street_code.clone()),
        ("homeNumber", address.house_number.clone()),
        (
            "startMonth",
            query.start_month.format(START_MONTH_FORMAT).to_string(),
        ),
        ("isYear", full_year.to_string()),
        // The three month range overrides isYear on the server.
        ("isTreeMonthRange", (!full_year).to_string()),
    ];

    // The server ignores this filter, it is sent for completeness.
    if let Some(bin) = query.bin {
        params.push(("tonne", bin.code().to_owned()));
    }

    params
}

/// Decode a schedule response body.
///
/// The body maps `"<zero-based month>-<year>"` keys to objects mapping the day
/// of month to a list of bin codes. Empty bodies (`null`, `{}`, `[]`, `false`,
/// `0`, `""`) decode to `None`.
///
/// # Errors
///
/// Returns [`PortError::UnexpectedResponse`] for bodies of any other shape and
/// [`PortError::InvalidCalendar`] for keys or days that do not form a date.
pub fn decode_schedule(body: Value) -> Result<Option<Schedule>, PortError> {
    if is_empty_document(&body) {
        return Ok(None);
    }
    let groups = match body {
        Value::Object(groups) => groups,
        other => {
            return Err(PortError::UnexpectedResponse(format!(
                "expected an object of month groups, got {other}"
            )));
        }
    };

    let months = groups
        .into_iter()
        .map(|(key, days)| decode_month_group(&key, days))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(Schedule { months }))
}

fn decode_month_group(raw_key: &str, days: Value) -> Result<MonthGroup, PortError> {
    let key = raw_key
        .parse::<MonthKey>()
        .map_err(|err| PortError::InvalidCalendar(err.to_string()))?;

    let days = match days {
        Value::Object(days) => days,
        // PHP style empty maps arrive as empty lists.
        Value::Array(list) if list.is_empty() => Map::new(),
        Value::Null => Map::new(),
        other => {
            return Err(PortError::UnexpectedResponse(format!(
                "expected an object of days for {raw_key}, got {other}"
            )));
        }
    };

    let days = days
        .into_iter()
        .map(|(day, bins)| decode_day(key, &day, bins))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MonthGroup { key, days })
}

fn decode_day(key: MonthKey, raw_day: &str, bins: Value) -> Result<CollectionDay, PortError> {
    let date = raw_day
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|day| key.date(day))
        .ok_or_else(|| {
            PortError::InvalidCalendar(format!(
                "day {raw_day} does not exist in month {} of {}",
                key.month(),
                key.year
            ))
        })?;

    let bins = serde_json::from_value::<Vec<String>>(bins).map_err(|err| {
        PortError::UnexpectedResponse(format!("bins of {date}: {err}"))
    })?;

    Ok(CollectionDay { date, bins })
}

fn is_empty_document(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => {
            number.as_u64() == Some(0) || number.as_i64() == Some(0) || number.as_f64() == Some(0.0)
        }
        Value::String(text) => text.is_empty(),
        Value::Array(list) => list.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}
