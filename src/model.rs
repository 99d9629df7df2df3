use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The entities referenced by id at the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Property,
    Booking,
    Block,
    Guest,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Property => write!(f, "property"),
            Entity::Booking => write!(f, "booking"),
            Entity::Block => write!(f, "block"),
            Entity::Guest => write!(f, "guest"),
        }
    }
}

/// Malformed or missing input. Always recoverable by resubmitting; callers
/// branch on the variant, never on the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    StartDateRequired,
    EndDateRequired,
    StartNotBeforeEnd,
    /// Update-only refinement: equal start/end has its own message there.
    StartEqualsEnd,
    GuestsRequired,
    GuestNameRequired,
    /// Removing this guest would leave the booking with none.
    LastGuest,
    MalformedId(Entity),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::StartDateRequired => write!(f, "start date is required"),
            ValidationError::EndDateRequired => write!(f, "end date is required"),
            ValidationError::StartNotBeforeEnd => {
                write!(f, "start date must be before end date")
            }
            ValidationError::StartEqualsEnd => {
                write!(f, "start date must be different than end date")
            }
            ValidationError::GuestsRequired => write!(f, "at least one guest is required"),
            ValidationError::GuestNameRequired => write!(f, "guest name is required"),
            ValidationError::LastGuest => {
                write!(f, "booking must keep at least one guest")
            }
            ValidationError::MalformedId(entity) => {
                write!(f, "{entity} id must be a valid UUID")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Which entry point a range arrives through. Create and update agree that
/// `start == end` is invalid but report it differently: update has a dedicated
/// equal-dates message, create folds it into the ordering failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeRule {
    Create,
    Update,
}

/// Raw date pair as received from the caller, before presence/order checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeInput {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRangeInput {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Presence and ordering checks. Pure; runs before any store access.
    pub fn validate(self, rule: RangeRule) -> Result<DateRange, ValidationError> {
        let start = self.start.ok_or(ValidationError::StartDateRequired)?;
        let end = self.end.ok_or(ValidationError::EndDateRequired)?;
        if start > end {
            return Err(ValidationError::StartNotBeforeEnd);
        }
        if start == end {
            return Err(match rule {
                RangeRule::Update => ValidationError::StartEqualsEnd,
                RangeRule::Create => ValidationError::StartNotBeforeEnd,
            });
        }
        Ok(DateRange { start, end })
    }
}

/// Calendar date range with `start < end` enforced at construction.
/// Immutable once validated; date-affecting updates build a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        DateRangeInput::new(start, end).validate(RangeRule::Create)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive-boundary overlap: a range ending on day X and one starting
    /// on day X occupy the same calendar (no same-day turnover). This is the
    /// single predicate behind every overlap query, for bookings and blocks
    /// alike, so the two kinds can never disagree about adjacency.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Guest as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInput {
    pub name: String,
}

impl GuestInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::GuestNameRequired);
        }
        Ok(())
    }

    pub(crate) fn into_guest(self) -> Guest {
        Guest {
            id: Uuid::new_v4(),
            name: self.name,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub property_id: Uuid,
    pub range: DateRange,
    pub status: BookingStatus,
    pub guests: Vec<Guest>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Active bookings occupy the calendar; cancelled ones are retained as an
    /// audit record but never count toward overlap.
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }
}

/// Host-created date block. No lifecycle state: present or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: Uuid,
    pub property_id: Uuid,
    pub range: DateRange,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
