//! aviationstack flight status client.
//!
//! Queries `GET {api_url}?access_key=...&flight_icao=CODE` (or `flight_iata`
//! for IATA-style codes) and converts the first returned flight into a
//! [`FlightStatusRecord`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use boardgo_core::{normalize_flight_code, Settings};
use boardgo_models::{FlightStatus, FlightStatusRecord};

use crate::error::FlightLookupError;
use crate::http::{build_http_client, extract_error_message};
use crate::traits::FlightStatusSource;

/// Result type for flight lookups.
pub type Result<T> = std::result::Result<T, FlightLookupError>;

/// aviationstack error codes that mean "slow down".
const RATE_LIMIT_CODES: &[&str] = &["rate_limit_reached", "usage_limit_reached"];

/// aviationstack API client.
#[derive(Clone)]
pub struct AviationStackClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl AviationStackClient {
    /// Create a new client.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = build_http_client(timeout)
            .map_err(|e| FlightLookupError::Configuration(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Create a client from settings.
    ///
    /// Requires `AVIATION_STACK_API_KEY`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.aviation.require_key()?;
        Self::new(&settings.aviation.api_url, api_key, settings.api_timeout)
    }

    /// Fetch the status of a flight.
    pub async fn fetch(&self, flight_code: &str) -> Result<FlightStatusRecord> {
        let code = normalize_flight_code(flight_code)
            .ok_or_else(|| FlightLookupError::InvalidFlightCode(flight_code.to_string()))?;

        info!(flight_code = %code, "Fetching flight data");

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("access_key", self.api_key.as_str()),
                (flight_query_param(&code), code.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FlightLookupError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| FlightLookupError::Request(e.to_string()))?;

        if status.as_u16() == 429 {
            warn!(flight_code = %code, "aviationstack rate limit exceeded");
            return Err(FlightLookupError::RateLimited);
        }
        if !status.is_success() {
            let message = extract_error_message(&text).unwrap_or(text);
            warn!(flight_code = %code, status = status.as_u16(), "aviationstack request failed");
            return Err(FlightLookupError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: AviationResponse =
            serde_json::from_str(&text).map_err(|e| FlightLookupError::Parse(e.to_string()))?;
        debug!(flight_code = %code, flights = body.data.as_ref().map_or(0, Vec::len), "Received aviationstack response");

        into_record(&code, body, status.as_u16())
    }
}

#[async_trait]
impl FlightStatusSource for AviationStackClient {
    fn name(&self) -> &str {
        "aviationstack"
    }

    async fn fetch_status(&self, flight_code: &str) -> Result<FlightStatusRecord> {
        self.fetch(flight_code).await
    }
}

/// Top-level aviationstack response.
#[derive(Debug, Clone, Deserialize)]
pub struct AviationResponse {
    /// Matching flights, most relevant first.
    #[serde(default)]
    pub data: Option<Vec<AviationFlight>>,

    /// Present when the request was refused.
    #[serde(default)]
    pub error: Option<AviationError>,
}

/// Error object in an aviationstack response.
#[derive(Debug, Clone, Deserialize)]
pub struct AviationError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One flight in an aviationstack response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AviationFlight {
    #[serde(default)]
    pub flight_status: Option<String>,
    #[serde(default)]
    pub departure: Option<AviationEndpoint>,
    #[serde(default)]
    pub arrival: Option<AviationEndpoint>,
    #[serde(default)]
    pub airline: Option<AviationAirline>,
}

/// Departure or arrival block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AviationEndpoint {
    #[serde(default)]
    pub airport: Option<String>,
    #[serde(default)]
    pub terminal: Option<String>,
    #[serde(default)]
    pub gate: Option<String>,
    #[serde(default)]
    pub delay: Option<f64>,
    #[serde(default)]
    pub scheduled: Option<String>,
    #[serde(default)]
    pub actual: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AviationAirline {
    #[serde(default)]
    pub name: Option<String>,
}

/// Query parameter for a normalized flight code.
///
/// ICAO designators (three-letter airline prefix, e.g. `RJA3813`) go in
/// `flight_icao`; everything else is treated as IATA (`RJ3813`, `U21234`).
pub fn flight_query_param(code: &str) -> &'static str {
    let bytes = code.as_bytes();
    let icao = bytes.len() > 3
        && bytes[..3].iter().all(u8::is_ascii_alphabetic)
        && bytes[3].is_ascii_digit();
    if icao {
        "flight_icao"
    } else {
        "flight_iata"
    }
}

/// Converts a parsed response into a record for `flight_code`.
pub fn into_record(
    flight_code: &str,
    response: AviationResponse,
    http_status: u16,
) -> Result<FlightStatusRecord> {
    if let Some(error) = response.error {
        let code = error.code.unwrap_or_default();
        if RATE_LIMIT_CODES.contains(&code.as_str()) {
            return Err(FlightLookupError::RateLimited);
        }
        return Err(FlightLookupError::Upstream {
            status: http_status,
            message: error.message.unwrap_or(code),
        });
    }

    let flight = response
        .data
        .and_then(|flights| flights.into_iter().next())
        .ok_or_else(|| {
            warn!(flight_code = %flight_code, "No flights found");
            FlightLookupError::NotFound(flight_code.to_string())
        })?;

    let departure = flight.departure.unwrap_or_default();
    let arrival = flight.arrival.unwrap_or_default();

    let mut record = FlightStatusRecord::new(
        flight_code,
        flight
            .flight_status
            .as_deref()
            .map(FlightStatus::parse)
            .unwrap_or_default(),
    );
    record.airline = flight.airline.and_then(|a| a.name);
    record.departure_airport = departure.airport.clone();
    record.arrival_airport = arrival.airport.clone();
    record.scheduled_departure = parse_datetime(departure.scheduled.as_deref());
    record.actual_departure = parse_datetime(departure.actual.as_deref());
    record.scheduled_arrival = parse_datetime(arrival.scheduled.as_deref());
    record.actual_arrival = parse_datetime(arrival.actual.as_deref());
    record.terminal = departure.terminal.clone();
    record.gate = departure.gate.clone();
    record.delay_minutes = departure
        .delay
        .or(arrival.delay)
        .filter(|d| d.is_finite())
        .map(|d| d.round() as i64);

    Ok(record)
}

/// Parses an RFC 3339 timestamp; anything unparsable is dropped.
fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
