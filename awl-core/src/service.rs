//! High-level service facade combining the provider ports.

use chrono::{Datelike, NaiveDate};

use crate::config::{Config, StreetRef};
use crate::model::{
    Address, BinType, Pickup, Schedule, ScheduleQuery, ScheduleSpan, StreetEntry, UnknownBinType,
    first_of_month,
};
use crate::ports::PortError;
use crate::provider::{Provider, ProviderMeta};
use crate::resolver;

#[derive(thiserror::Error, Debug)]
/// Errors surfaced by [`AwlService`].
pub enum ServiceError {
    /// Provider request failed.
    #[error(transparent)]
    Port(#[from] PortError),
    /// Requested bin filter is not a known bin type.
    #[error("{0} is not a valid bin type")]
    InvalidBinType(String),
    /// No directory entry carries the configured street name.
    #[error("Street {0:?} not found in the street directory")]
    StreetNotFound(String),
    /// Several directory entries serve the configured street and house number.
    #[error("Street {name:?} matches several street codes ({}), configure StrasseNummer", codes.join(", "))]
    AmbiguousStreet {
        /// Configured street name.
        name: String,
        /// Codes of all matching entries.
        codes: Vec<String>,
    },
}

impl From<UnknownBinType> for ServiceError {
    fn from(err: UnknownBinType) -> Self {
        Self::InvalidBinType(err.0)
    }
}

/// Public entry point for street lookups, schedules, and next pickups.
pub struct AwlService {
    provider: Provider,
}

impl AwlService {
    /// Create a new service bound to the provided ports.
    #[must_use]
    pub fn new(provider: Provider) -> Self {
        Self { provider }
    }

    /// Metadata of the provider behind this service.
    #[must_use]
    pub fn provider(&self) -> &ProviderMeta {
        &self.provider.meta
    }

    /// List directory entries whose name contains `pattern`.
    ///
    /// The match is a case-sensitive substring match; without a pattern all
    /// streets are returned.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the directory request fails.
    pub async fn search_streets(
        &self,
        pattern: Option<&str>,
    ) -> Result<Vec<StreetEntry>, PortError> {
        let streets = self.provider.street_port.streets().await?;
        let Some(pattern) = pattern.filter(|pattern| !pattern.is_empty()) else {
            return Ok(streets);
        };
        Ok(streets
            .into_iter()
            .filter(|street| street.name.contains(pattern))
            .collect())
    }

    /// Turn a configuration into an address usable for schedule requests.
    ///
    /// A configured street code is used as is. A street name is looked up in
    /// the directory by exact name, skipping codes that exclude the house number.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the directory request fails or the name
    /// matches no or several street codes.
    pub async fn resolve_address(&self, config: &Config) -> Result<Address, ServiceError> {
        let house_number = config.house_number();
        let name = match config.street() {
            StreetRef::Code(code) => return Ok(Address::new(code, house_number)),
            StreetRef::Name(name) => name,
        };

        let codes: Vec<String> = self
            .provider
            .street_port
            .streets()
            .await?
            .into_iter()
            .filter(|street| street.name == name && !street.is_blocked(house_number))
            .map(|street| street.code)
            .collect();

        match <[String; 1]>::try_from(codes) {
            Ok([code]) => {
                tracing::info!(street = name, code = %code, "resolved street name");
                Ok(Address::new(code, house_number))
            }
            Err(codes) if codes.is_empty() => Err(ServiceError::StreetNotFound(name.to_owned())),
            Err(codes) => Err(ServiceError::AmbiguousStreet {
                name: name.to_owned(),
                codes,
            }),
        }
    }

    /// Fetch the schedule of `address`.
    ///
    /// `month` selects the start month (1-12) of the current year and defaults
    /// to the current month. An invalid month yields `Ok(None)` without a
    /// request. An unknown `bin` is dropped from the request.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] if the provider request fails.
    pub async fn schedule(
        &self,
        address: &Address,
        month: Option<&str>,
        bin: Option<&str>,
        span: ScheduleSpan,
        today: NaiveDate,
    ) -> Result<Option<Schedule>, ServiceError> {
        let Some(start_month) = start_month(month, today) else {
            return Ok(None);
        };

        let bin = match parse_bin_filter(bin) {
            Ok(bin) => bin,
            Err(err) => {
                tracing::warn!("{err}, fetching all bins");
                None
            }
        };

        let query = ScheduleQuery {
            start_month,
            span,
            bin,
        };
        Ok(self.provider.schedule_port.schedule(address, &query).await?)
    }

    /// Find the next collection for `address`, optionally for one bin only.
    ///
    /// Returns `Ok(None)` when the schedule is empty or holds no collection
    /// for the rest of this month or the next one.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidBinType`] for an unknown `bin` before
    /// any request is made, or a [`ServiceError`] if the provider request fails.
    pub async fn next_pickup(
        &self,
        address: &Address,
        bin: Option<&str>,
        today: NaiveDate,
    ) -> Result<Option<Pickup>, ServiceError> {
        let filter = parse_bin_filter(bin)?;

        let query = ScheduleQuery {
            start_month: first_of_month(today),
            span: ScheduleSpan::FullYear,
            bin: None,
        };
        let Some(schedule) = self.provider.schedule_port.schedule(address, &query).await? else {
            tracing::debug!(%address, "no schedule data");
            return Ok(None);
        };

        Ok(resolver::next_pickup(&schedule, filter, today))
    }
}

/// Resolve the first day of the requested start month.
///
/// No or an empty `month` means the month of `today`. Otherwise `month` must
/// be a number from 1 to 12 and names a month of the current year; anything
/// else is logged and yields `None`.
#[must_use]
pub fn start_month(month: Option<&str>, today: NaiveDate) -> Option<NaiveDate> {
    let Some(raw) = month.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Some(first_of_month(today));
    };

    let Ok(number) = raw.parse::<u32>() else {
        tracing::warn!("{raw} is not a valid number between 1 and 12");
        return None;
    };
    if !(1..=12).contains(&number) {
        tracing::warn!("{raw}, does not look like a valid month between 1 and 12");
        return None;
    }

    NaiveDate::from_ymd_opt(today.year(), number, 1)
}

/// Parse an optional bin filter; no or an empty value means no filter.
///
/// # Errors
///
/// Returns [`UnknownBinType`] for values naming no bin.
pub fn parse_bin_filter(bin: Option<&str>) -> Result<Option<BinType>, UnknownBinType> {
    bin.filter(|raw| !raw.is_empty())
        .map(str::parse::<BinType>)
        .transpose()
}
