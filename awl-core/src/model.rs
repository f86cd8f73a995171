//! Domain data structures for streets, addresses, and collection schedules.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

/// Format used when presenting a pickup date, e.g. "Saturday, 20 April 2024".
pub const PICKUP_DATE_FORMAT: &str = "%A, %d %B %Y";

/// Waste bins collected by the AWL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinType {
    /// Paper and cardboard.
    Blue,
    /// Organic waste.
    Brown,
    /// Light packaging and recyclables.
    Yellow,
    /// Residual waste.
    Gray,
    /// Residual waste on the alternate rhythm.
    Pink,
}

impl BinType {
    /// All bin types in the order the remote API lists them.
    pub const ALL: [Self; 5] = [Self::Blue, Self::Brown, Self::Yellow, Self::Gray, Self::Pink];

    /// Code used by the remote API for this bin.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Blue => "blau",
            Self::Brown => "braun",
            Self::Yellow => "gelb",
            Self::Gray => "grau",
            Self::Pink => "pink",
        }
    }

    /// Human readable name of the collected fraction.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Blue => "Papier",
            Self::Brown => "Bioabfall",
            Self::Yellow => "Wertstoffe",
            Self::Gray => "Restabfall",
            Self::Pink => "Restabfall (pink)",
        }
    }

    /// Look up a bin by its API code or its English color name.
    #[must_use]
    pub fn from_code(raw: &str) -> Option<Self> {
        match raw {
            "blau" | "blue" => Some(Self::Blue),
            "braun" | "brown" => Some(Self::Brown),
            "gelb" | "yellow" => Some(Self::Yellow),
            "grau" | "gray" => Some(Self::Gray),
            "pink" => Some(Self::Pink),
            _ => None,
        }
    }
}

impl fmt::Display for BinType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} is not a valid bin type")]
/// Raised when a string names none of the [`BinType`] variants.
pub struct UnknownBinType(pub String);

impl FromStr for BinType {
    type Err = UnknownBinType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::from_code(raw).ok_or_else(|| UnknownBinType(raw.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Street as listed in the remote street directory.
pub struct StreetEntry {
    /// Street code the schedule endpoint expects.
    pub code: String,
    /// Display name, sometimes suffixed with house number ranges.
    pub name: String,
    /// House numbers that are not served under this code.
    pub blocked_house_numbers: Vec<String>,
}

impl StreetEntry {
    /// Whether `house_number` is excluded from this street code.
    #[must_use]
    pub fn is_blocked(&self, house_number: &str) -> bool {
        self.blocked_house_numbers
            .iter()
            .any(|blocked| blocked == house_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Fully resolved address passed to every schedule request.
pub struct Address {
    /// Street code understood by the remote API.
    pub street_code: String,
    /// House number including additions such as "A".
    pub house_number: String,
}

impl Address {
    /// Construct an address from a street code and house number.
    #[must_use]
    pub fn new<S: Into<String>, H: Into<String>>(street_code: S, house_number: H) -> Self {
        Self {
            street_code: street_code.into(),
            house_number: house_number.into(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} {}", self.street_code, self.house_number)
    }
}

/// Key of a month-group in the remote calendar, e.g. `"3-2024"`.
///
/// The month index is zero-based on the wire; [`MonthKey::month`] returns the
/// calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthKey {
    /// Zero-based month index as sent by the API.
    pub month_index: u32,
    /// Calendar year.
    pub year: i32,
}

impl MonthKey {
    /// Calendar month, 1-based.
    #[must_use]
    pub fn month(self) -> u32 {
        self.month_index + 1
    }

    /// Date of `day` within this month, if it exists.
    #[must_use]
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month(), day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid month key: {0}")]
/// Raised when a month-group key is not of the form `"<index>-<year>"`.
pub struct InvalidMonthKey(pub String);

impl FromStr for MonthKey {
    type Err = InvalidMonthKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonthKey(raw.to_owned());
        let (index, year) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let month_index = index.parse::<u32>().map_err(|_err| invalid())?;
        let year = year.parse::<i32>().map_err(|_err| invalid())?;
        if month_index > 11 {
            return Err(invalid());
        }
        Ok(Self { month_index, year })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Bins collected on one day.
pub struct CollectionDay {
    /// Date of the collection.
    pub date: NaiveDate,
    /// Bin codes collected that day, in the order the API lists them.
    pub bins: Vec<String>,
}

impl CollectionDay {
    /// Whether `bin` is collected on this day.
    #[must_use]
    pub fn collects(&self, bin: BinType) -> bool {
        self.bins.iter().any(|code| code == bin.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One calendar month worth of collections.
pub struct MonthGroup {
    /// Month-group key as sent by the API.
    pub key: MonthKey,
    /// Collection days in the order the API lists them.
    pub days: Vec<CollectionDay>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Collection schedule for one address, month-groups in response order.
pub struct Schedule {
    /// Month-groups in the order the API returned them.
    pub months: Vec<MonthGroup>,
}

impl Schedule {
    /// Whether the schedule holds no collection days at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.months.iter().all(|group| group.days.is_empty())
    }

    /// Iterate over all collection days, month-group by month-group.
    pub fn days(&self) -> impl Iterator<Item = &CollectionDay> {
        self.months.iter().flat_map(|group| group.days.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How much of the calendar a schedule request covers.
pub enum ScheduleSpan {
    /// Rolling three month window starting at the start month.
    ThreeMonths,
    /// Whole year starting at the start month.
    FullYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Parameters of a single schedule request.
pub struct ScheduleQuery {
    /// First day of the first requested month.
    pub start_month: NaiveDate,
    /// Range covered by the request.
    pub span: ScheduleSpan,
    /// Bin forwarded to the API; the API currently ignores it.
    pub bin: Option<BinType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Next collection found for an address.
pub struct Pickup {
    /// Date of the collection.
    pub date: NaiveDate,
    /// Bin codes collected that day.
    pub bins: Vec<String>,
}

impl Pickup {
    /// Date rendered with [`PICKUP_DATE_FORMAT`].
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.date.format(PICKUP_DATE_FORMAT).to_string()
    }
}

/// First day of the month `date` falls in.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
