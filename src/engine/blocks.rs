use std::time::Instant;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::model::{Block, DateRangeInput, RangeRule};
use crate::observability;

use super::{Engine, ReservationError};

impl Engine {
    /// Create a host block. Same availability gate as bookings, so a block
    /// can never silently land on booked dates.
    pub async fn create_block(
        &self,
        property_id: &str,
        range: DateRangeInput,
    ) -> Result<Block, ReservationError> {
        let started = Instant::now();
        let range = range.validate(RangeRule::Create)?;
        let property = self.require_property(property_id).await?;

        let _guard = self.property_lock(property.id).lock_owned().await;
        self.oracle
            .ensure_available(property.id, None, None, range)
            .await?;

        let block = Block {
            id: Uuid::new_v4(),
            property_id: property.id,
            range,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.blocks.save(block.clone()).await;

        info!(block = %block.id, property = %property.id, start = %range.start(), end = %range.end(), "block created");
        observability::record_op("create_block", started);
        Ok(block)
    }

    /// Replace a block's date range, excluding the block's own id on the
    /// block side of the overlap check.
    pub async fn update_block_dates(
        &self,
        block_id: &str,
        range: DateRangeInput,
    ) -> Result<Block, ReservationError> {
        let started = Instant::now();
        let range = range.validate(RangeRule::Create)?;
        let (_guard, mut block) = self.locked_block(block_id).await?;

        self.oracle
            .ensure_available(block.property_id, None, Some(block.id), range)
            .await?;

        block.range = range;
        block.updated_at = Some(Utc::now());
        self.blocks.save(block.clone()).await;

        info!(block = %block.id, property = %block.property_id, start = %range.start(), end = %range.end(), "block dates updated");
        observability::record_op("update_block_dates", started);
        Ok(block)
    }

    /// Delete a block, releasing its dates.
    pub async fn delete_block(&self, block_id: &str) -> Result<(), ReservationError> {
        let started = Instant::now();
        let (_guard, block) = self.locked_block(block_id).await?;
        self.blocks.delete(block.id).await;

        info!(block = %block.id, property = %block.property_id, "block deleted");
        observability::record_op("delete_block", started);
        Ok(())
    }
}
