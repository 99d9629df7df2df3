use std::time::Instant;

use chrono::Utc;
use tracing::info;

use crate::model::{Booking, Entity, GuestInput, ValidationError};
use crate::observability;

use super::{Engine, ReservationError, parse_id};

impl Engine {
    /// Attach a guest to a booking. Guests are metadata; availability is not
    /// consulted.
    pub async fn add_guest(
        &self,
        booking_id: &str,
        guest: GuestInput,
    ) -> Result<Booking, ReservationError> {
        let started = Instant::now();
        guest.validate()?;
        let (_guard, mut booking) = self.locked_booking(booking_id).await?;

        booking.guests.push(guest.into_guest());
        booking.updated_at = Some(Utc::now());
        self.bookings.save(booking.clone()).await;

        info!(booking = %booking.id, guests = booking.guests.len(), "guest added");
        observability::record_op("add_guest", started);
        Ok(booking)
    }

    /// Remove a guest from a booking. A removal that would leave the booking
    /// with zero guests is rejected.
    pub async fn remove_guest(
        &self,
        booking_id: &str,
        guest_id: &str,
    ) -> Result<Booking, ReservationError> {
        let started = Instant::now();
        let guest_id = parse_id(guest_id, Entity::Guest)?;
        let (_guard, mut booking) = self.locked_booking(booking_id).await?;

        let pos = booking
            .guests
            .iter()
            .position(|g| g.id == guest_id)
            .ok_or(ReservationError::NotFound(Entity::Guest))?;
        if booking.guests.len() == 1 {
            return Err(ValidationError::LastGuest.into());
        }

        booking.guests.remove(pos);
        booking.updated_at = Some(Utc::now());
        self.bookings.save(booking.clone()).await;

        info!(booking = %booking.id, guests = booking.guests.len(), "guest removed");
        observability::record_op("remove_guest", started);
        Ok(booking)
    }
}
