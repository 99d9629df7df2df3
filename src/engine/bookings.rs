use std::time::Instant;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::model::{
    Booking, BookingStatus, DateRangeInput, GuestInput, RangeRule, ValidationError,
};
use crate::observability;

use super::error::Transition;
use super::{Engine, ReservationError};

impl Engine {
    /// Create a booking in CONFIRMED state. The range must be valid, at least
    /// one guest must be given, and the dates must be free of both bookings
    /// and blocks for the property.
    pub async fn create_booking(
        &self,
        property_id: &str,
        range: DateRangeInput,
        guests: Vec<GuestInput>,
    ) -> Result<Booking, ReservationError> {
        let started = Instant::now();
        let range = range.validate(RangeRule::Create)?;
        if guests.is_empty() {
            return Err(ValidationError::GuestsRequired.into());
        }
        for guest in &guests {
            guest.validate()?;
        }
        let property = self.require_property(property_id).await?;

        let _guard = self.property_lock(property.id).lock_owned().await;
        self.oracle
            .ensure_available(property.id, None, None, range)
            .await?;

        let booking = Booking {
            id: Uuid::new_v4(),
            property_id: property.id,
            range,
            status: BookingStatus::Confirmed,
            guests: guests.into_iter().map(GuestInput::into_guest).collect(),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.bookings.save(booking.clone()).await;

        info!(booking = %booking.id, property = %property.id, start = %range.start(), end = %range.end(), nights = range.nights(), "booking confirmed");
        observability::record_op("create_booking", started);
        Ok(booking)
    }

    /// Cancel a CONFIRMED booking. The dates are released immediately: the
    /// overlap query never counts a cancelled booking, so an overlapping
    /// create or rebook succeeds the instant this commits.
    pub async fn cancel_booking(&self, booking_id: &str) -> Result<Booking, ReservationError> {
        let started = Instant::now();
        let (_guard, mut booking) = self.locked_booking(booking_id).await?;
        if booking.status == BookingStatus::Cancelled {
            return Err(ReservationError::State(Transition::AlreadyCancelled));
        }

        booking.status = BookingStatus::Cancelled;
        booking.updated_at = Some(Utc::now());
        self.bookings.save(booking.clone()).await;

        info!(booking = %booking.id, property = %booking.property_id, "booking cancelled");
        observability::record_op("cancel_booking", started);
        Ok(booking)
    }

    /// Re-confirm a CANCELLED booking, provided its current range is still
    /// free of other reservations. The booking's own id is excluded from the
    /// overlap query (a cancelled booking would not count anyway, but the
    /// exclusion keeps the query identical to the update path).
    pub async fn rebook_booking(&self, booking_id: &str) -> Result<Booking, ReservationError> {
        let started = Instant::now();
        let (_guard, mut booking) = self.locked_booking(booking_id).await?;
        if booking.status != BookingStatus::Cancelled {
            return Err(ReservationError::State(Transition::NotCancelled));
        }

        self.oracle
            .ensure_available(booking.property_id, Some(booking.id), None, booking.range)
            .await?;

        booking.status = BookingStatus::Confirmed;
        booking.updated_at = Some(Utc::now());
        self.bookings.save(booking.clone()).await;

        info!(booking = %booking.id, property = %booking.property_id, "booking rebooked");
        observability::record_op("rebook_booking", started);
        Ok(booking)
    }

    /// Replace a booking's date range. The booking's own prior range never
    /// counts as a conflict against itself.
    pub async fn update_booking_dates(
        &self,
        booking_id: &str,
        range: DateRangeInput,
    ) -> Result<Booking, ReservationError> {
        let started = Instant::now();
        let range = range.validate(RangeRule::Update)?;
        let (_guard, mut booking) = self.locked_booking(booking_id).await?;

        self.oracle
            .ensure_available(booking.property_id, Some(booking.id), None, range)
            .await?;

        booking.range = range;
        booking.updated_at = Some(Utc::now());
        self.bookings.save(booking.clone()).await;

        info!(booking = %booking.id, property = %booking.property_id, start = %range.start(), end = %range.end(), "booking dates updated");
        observability::record_op("update_booking_dates", started);
        Ok(booking)
    }

    /// Remove the booking record permanently, audit trail included.
    pub async fn delete_booking(&self, booking_id: &str) -> Result<(), ReservationError> {
        let started = Instant::now();
        let (_guard, booking) = self.locked_booking(booking_id).await?;
        self.bookings.delete(booking.id).await;

        info!(booking = %booking.id, property = %booking.property_id, "booking deleted");
        observability::record_op("delete_booking", started);
        Ok(())
    }
}
