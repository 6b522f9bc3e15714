//! Core data models for the BoardAndGo flight notifier.
//!
//! This crate provides the data types shared by every other crate:
//! flight status snapshots, notification categories, provider results
//! and the envelope returned by a notification run.

pub mod flight;
pub mod notification;

pub use flight::{FlightStatus, FlightStatusRecord};
pub use notification::{
    DispatchStatus, MessageCategory, NotificationEnvelope, NotificationResult, TranscriptEntry,
    TranscriptRole,
};
