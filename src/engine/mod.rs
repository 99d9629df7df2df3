mod availability;
mod blocks;
mod bookings;
mod error;
mod guests;
mod queries;

pub use availability::AvailabilityOracle;
pub use error::{Conflict, ReservationError, Transition};

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::model::{Block, Booking, Entity, Property, ValidationError};
use crate::store::{
    BlockStore, BookingStore, InMemoryBlocks, InMemoryBookings, InMemoryProperties,
    PropertyDirectory,
};

/// Reservation conflict & lifecycle engine. Owns the booking state machine
/// and the block operations; every date-affecting transition passes through
/// the [`AvailabilityOracle`] before anything is persisted.
///
/// All collaborators are injected at construction — no ambient state.
pub struct Engine {
    properties: Arc<dyn PropertyDirectory>,
    bookings: Arc<dyn BookingStore>,
    blocks: Arc<dyn BlockStore>,
    oracle: AvailabilityOracle,
    /// One mutex per property, held across every check-then-write sequence.
    /// Two concurrent writes touching the same calendar serialize here;
    /// writes to different properties never contend.
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl Engine {
    pub fn new(
        properties: Arc<dyn PropertyDirectory>,
        bookings: Arc<dyn BookingStore>,
        blocks: Arc<dyn BlockStore>,
    ) -> Self {
        let oracle = AvailabilityOracle::new(bookings.clone(), blocks.clone());
        Self {
            properties,
            bookings,
            blocks,
            oracle,
            locks: DashMap::new(),
        }
    }

    /// Engine wired to fresh in-memory stores; the caller keeps the directory
    /// handle to seed properties.
    pub fn in_memory(properties: Arc<InMemoryProperties>) -> Self {
        Self::new(
            properties,
            Arc::new(InMemoryBookings::new()),
            Arc::new(InMemoryBlocks::new()),
        )
    }

    fn property_lock(&self, property_id: Uuid) -> Arc<Mutex<()>> {
        self.locks
            .entry(property_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }

    pub(super) async fn require_property(&self, id: &str) -> Result<Property, ReservationError> {
        let id = parse_id(id, Entity::Property)?;
        self.properties
            .get(id)
            .await
            .ok_or(ReservationError::NotFound(Entity::Property))
    }

    /// Resolve a booking id to its property, take the property lock, then
    /// reload the booking under the lock so a concurrent writer cannot have
    /// slipped between lookup and lock acquisition.
    pub(super) async fn locked_booking(
        &self,
        id: &str,
    ) -> Result<(OwnedMutexGuard<()>, Booking), ReservationError> {
        let id = parse_id(id, Entity::Booking)?;
        let booking = self
            .bookings
            .find(id)
            .await
            .ok_or(ReservationError::NotFound(Entity::Booking))?;
        let guard = self.property_lock(booking.property_id).lock_owned().await;
        let booking = self
            .bookings
            .find(id)
            .await
            .ok_or(ReservationError::NotFound(Entity::Booking))?;
        Ok((guard, booking))
    }

    pub(super) async fn locked_block(
        &self,
        id: &str,
    ) -> Result<(OwnedMutexGuard<()>, Block), ReservationError> {
        let id = parse_id(id, Entity::Block)?;
        let block = self
            .blocks
            .find(id)
            .await
            .ok_or(ReservationError::NotFound(Entity::Block))?;
        let guard = self.property_lock(block.property_id).lock_owned().await;
        let block = self
            .blocks
            .find(id)
            .await
            .ok_or(ReservationError::NotFound(Entity::Block))?;
        Ok((guard, block))
    }
}

/// Identifiers arrive as opaque strings; anything that does not parse as a
/// UUID is a validation failure of the entry point, not a storage miss.
pub(super) fn parse_id(id: &str, entity: Entity) -> Result<Uuid, ReservationError> {
    Uuid::parse_str(id).map_err(|_| ValidationError::MalformedId(entity).into())
}
