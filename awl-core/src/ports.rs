//! Traits describing provider capabilities and the errors they raise.

use async_trait::async_trait;
use reqwest::Error as ReqwestError;

use crate::model::{Address, Schedule, ScheduleQuery, StreetEntry};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to the provider backend.
pub enum PortError {
    /// Network layer failed or the server answered with an error status.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// Response body was not shaped like the endpoint's documented format.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
    /// Calendar response contained a key or date that does not exist.
    #[error("Invalid calendar data: {0}")]
    InvalidCalendar(String),
}

#[async_trait]
/// Trait for backends listing the streets of the service area.
pub trait StreetDirectoryPort: Send + Sync {
    /// Fetch the complete street directory.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the body cannot be decoded.
    async fn streets(&self) -> Result<Vec<StreetEntry>, PortError>;
}

#[async_trait]
/// Trait for backends serving collection schedules.
pub trait SchedulePort: Send + Sync {
    /// Fetch the collection schedule of `address`.
    ///
    /// Returns `Ok(None)` when the backend answers with an empty document.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the body cannot be decoded.
    async fn schedule(
        &self,
        address: &Address,
        query: &ScheduleQuery,
    ) -> Result<Option<Schedule>, PortError>;
}
