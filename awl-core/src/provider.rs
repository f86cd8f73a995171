//! Provider bundle handed to the service.

use std::sync::Arc;

use crate::ports::{SchedulePort, StreetDirectoryPort};

#[derive(Debug, Clone)]
/// Static metadata describing a provider.
pub struct ProviderMeta {
    /// Short identifier, used in logs.
    pub id: String,
    /// Human-friendly name of the waste management authority.
    pub name: String,
    /// Base URL the ports talk to.
    pub base_url: String,
}

/// Collection of ports implementing one provider.
pub struct Provider {
    /// Static metadata describing the provider.
    pub meta: ProviderMeta,
    /// Implementation for listing streets.
    pub street_port: Arc<dyn StreetDirectoryPort>,
    /// Implementation for fetching schedules.
    pub schedule_port: Arc<dyn SchedulePort>,
}
