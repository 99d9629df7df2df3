use crate::model::{Entity, ValidationError};

/// The cause of a calendar conflict. Booking conflicts are checked before
/// block conflicts, so a range that is both booked and blocked always reports
/// `DatesAlreadyBooked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    DatesAlreadyBooked,
    DatesAlreadyBlocked,
}

/// Illegal booking state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    AlreadyCancelled,
    NotCancelled,
}

/// Every failure the engine surfaces. All four kinds are terminal and scoped
/// to the single request; none triggers an internal retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    Validation(ValidationError),
    NotFound(Entity),
    Conflict(Conflict),
    State(Transition),
}

impl std::fmt::Display for ReservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationError::Validation(v) => write!(f, "{v}"),
            ReservationError::NotFound(entity) => write!(f, "{entity} not found"),
            ReservationError::Conflict(Conflict::DatesAlreadyBooked) => {
                write!(f, "dates already booked")
            }
            ReservationError::Conflict(Conflict::DatesAlreadyBlocked) => {
                write!(f, "dates already blocked")
            }
            ReservationError::State(Transition::AlreadyCancelled) => {
                write!(f, "booking already cancelled")
            }
            ReservationError::State(Transition::NotCancelled) => {
                write!(f, "booking not cancelled")
            }
        }
    }
}

impl std::error::Error for ReservationError {}

impl From<ValidationError> for ReservationError {
    fn from(err: ValidationError) -> Self {
        ReservationError::Validation(err)
    }
}
