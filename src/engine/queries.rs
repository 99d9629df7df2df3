use crate::model::{Block, Booking, Entity};

use super::{Engine, ReservationError, parse_id};

impl Engine {
    pub async fn get_booking(&self, booking_id: &str) -> Result<Booking, ReservationError> {
        let id = parse_id(booking_id, Entity::Booking)?;
        self.bookings
            .find(id)
            .await
            .ok_or(ReservationError::NotFound(Entity::Booking))
    }

    pub async fn get_block(&self, block_id: &str) -> Result<Block, ReservationError> {
        let id = parse_id(block_id, Entity::Block)?;
        self.blocks
            .find(id)
            .await
            .ok_or(ReservationError::NotFound(Entity::Block))
    }

    /// All bookings for a property, cancelled ones included. The property is
    /// resolved first so an unknown id is NotFound rather than an empty list.
    pub async fn get_bookings(&self, property_id: &str) -> Result<Vec<Booking>, ReservationError> {
        let property = self.require_property(property_id).await?;
        Ok(self.bookings.list_by_property(property.id).await)
    }

    pub async fn get_blocks(&self, property_id: &str) -> Result<Vec<Block>, ReservationError> {
        let property = self.require_property(property_id).await?;
        Ok(self.blocks.list_by_property(property.id).await)
    }
}
