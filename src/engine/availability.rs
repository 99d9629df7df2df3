use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::model::DateRange;
use crate::observability;
use crate::store::{BlockStore, BookingStore};

use super::error::{Conflict, ReservationError};

/// Single gate every date-affecting change passes before persisting. Composes
/// the two overlap queries; neither the booking flow nor the block flow knows
/// about the other kind directly.
///
/// The oracle is a pure read-then-decide step: it takes no locks itself.
/// Callers hold the property lock across the check and the subsequent write.
pub struct AvailabilityOracle {
    bookings: Arc<dyn BookingStore>,
    blocks: Arc<dyn BlockStore>,
}

impl AvailabilityOracle {
    pub fn new(bookings: Arc<dyn BookingStore>, blocks: Arc<dyn BlockStore>) -> Self {
        Self { bookings, blocks }
    }

    /// Fail unless `range` is free of both confirmed bookings and blocks for
    /// the property, ignoring the caller's own record ids.
    ///
    /// Ordering is a contract, not an implementation detail: bookings are
    /// checked first, so a range that is both booked and blocked reports
    /// `DatesAlreadyBooked`.
    pub async fn ensure_available(
        &self,
        property_id: Uuid,
        exclude_booking: Option<Uuid>,
        exclude_block: Option<Uuid>,
        range: DateRange,
    ) -> Result<(), ReservationError> {
        if self
            .bookings
            .exists_overlap(property_id, exclude_booking, range)
            .await
        {
            debug!(property = %property_id, start = %range.start(), end = %range.end(), "dates already booked");
            metrics::counter!(observability::CONFLICTS_TOTAL, "kind" => "booked").increment(1);
            return Err(ReservationError::Conflict(Conflict::DatesAlreadyBooked));
        }

        if self
            .blocks
            .exists_overlap(property_id, exclude_block, range)
            .await
        {
            debug!(property = %property_id, start = %range.start(), end = %range.end(), "dates already blocked");
            metrics::counter!(observability::CONFLICTS_TOTAL, "kind" => "blocked").increment(1);
            return Err(ReservationError::Conflict(Conflict::DatesAlreadyBlocked));
        }

        Ok(())
    }
}
