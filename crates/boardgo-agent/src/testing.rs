//! In-memory providers for tests.
//!
//! Enabled for this crate's own tests and for dependents through the
//! `testing` feature.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use boardgo_models::{DispatchStatus, FlightStatusRecord, NotificationResult};
use boardgo_providers::{DispatchError, FlightLookupError, FlightStatusSource, SmsGateway};

/// How a [`MockFlightSource`] answers.
#[derive(Debug, Clone)]
pub enum SourceBehavior {
    /// Return this record (with the requested flight code).
    Found(FlightStatusRecord),
    /// Fail with `NotFound`.
    NotFound,
    /// Fail with `RateLimited`.
    RateLimited,
    /// Fail with `Request` (network failure).
    Unreachable,
}

/// Flight source that answers from a fixed behavior and counts calls.
pub struct MockFlightSource {
    behavior: SourceBehavior,
    calls: AtomicUsize,
}

impl MockFlightSource {
    pub fn new(behavior: SourceBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Source that always returns `record`.
    pub fn found(record: FlightStatusRecord) -> Self {
        Self::new(SourceBehavior::Found(record))
    }

    /// Number of lookups made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FlightStatusSource for MockFlightSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_status(&self, flight_code: &str) -> Result<FlightStatusRecord, FlightLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            SourceBehavior::Found(record) => {
                let mut record = record.clone();
                record.flight_code = flight_code.to_string();
                Ok(record)
            }
            SourceBehavior::NotFound => Err(FlightLookupError::NotFound(flight_code.to_string())),
            SourceBehavior::RateLimited => Err(FlightLookupError::RateLimited),
            SourceBehavior::Unreachable => {
                Err(FlightLookupError::Request("connection refused".to_string()))
            }
        }
    }
}

/// SMS gateway that records what it was asked to send.
pub struct MockSmsGateway {
    reject_with: Option<(u16, String)>,
    sent: Mutex<Vec<(String, String)>>,
}

impl MockSmsGateway {
    /// Gateway that accepts every message.
    pub fn accepting() -> Self {
        Self {
            reject_with: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Gateway that rejects every message with `status` and `message`.
    pub fn rejecting(status: u16, message: impl Into<String>) -> Self {
        Self {
            reject_with: Some((status, message.into())),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Number of send attempts that reached the gateway.
    pub fn calls(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or_default()
    }

    /// `(recipient, body)` pairs the gateway was asked to send.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send_sms(
        &self,
        recipient_number: &str,
        body: &str,
    ) -> Result<NotificationResult, DispatchError> {
        let attempt = {
            let mut sent = self
                .sent
                .lock()
                .map_err(|e| DispatchError::Request(e.to_string()))?;
            sent.push((recipient_number.to_string(), body.to_string()));
            sent.len()
        };

        match &self.reject_with {
            Some((status, message)) => Err(DispatchError::Rejected {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(NotificationResult::new(
                recipient_number,
                body,
                format!("SM{:04}", attempt),
                DispatchStatus::Sent,
            )),
        }
    }
}
