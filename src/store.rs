use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::model::{Block, Booking, DateRange, Property};

/// Property directory collaborator. The engine only resolves ids; property
/// CRUD lives outside the core.
#[async_trait]
pub trait PropertyDirectory: Send + Sync {
    async fn get(&self, id: Uuid) -> Option<Property>;
}

/// Persistence seam for bookings. `exists_overlap` is a pure query and must
/// ignore cancelled bookings; everything else is keyed CRUD.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// True when any active booking for `property_id`, other than `exclude`,
    /// overlaps `range` under the inclusive boundary rule.
    async fn exists_overlap(
        &self,
        property_id: Uuid,
        exclude: Option<Uuid>,
        range: DateRange,
    ) -> bool;
    async fn save(&self, booking: Booking);
    async fn find(&self, id: Uuid) -> Option<Booking>;
    async fn delete(&self, id: Uuid) -> bool;
    async fn list_by_property(&self, property_id: Uuid) -> Vec<Booking>;
}

/// Persistence seam for blocks. Blocks have no inactive state, so every block
/// counts toward overlap.
#[async_trait]
pub trait BlockStore: Send + Sync {
    async fn exists_overlap(
        &self,
        property_id: Uuid,
        exclude: Option<Uuid>,
        range: DateRange,
    ) -> bool;
    async fn save(&self, block: Block);
    async fn find(&self, id: Uuid) -> Option<Block>;
    async fn delete(&self, id: Uuid) -> bool;
    async fn list_by_property(&self, property_id: Uuid) -> Vec<Block>;
}

// ── In-memory implementations ────────────────────────────

#[derive(Default)]
pub struct InMemoryProperties {
    items: DashMap<Uuid, Property>,
}

impl InMemoryProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, name: &str) -> Property {
        let property = Property {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        self.items.insert(property.id, property.clone());
        property
    }
}

#[async_trait]
impl PropertyDirectory for InMemoryProperties {
    async fn get(&self, id: Uuid) -> Option<Property> {
        self.items.get(&id).map(|e| e.value().clone())
    }
}

/// Records keyed by id plus a per-property id index, so overlap checks and
/// listings only touch one property's records.
#[derive(Default)]
pub struct InMemoryBookings {
    items: DashMap<Uuid, Booking>,
    by_property: DashMap<Uuid, Vec<Uuid>>,
}

impl InMemoryBookings {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookings {
    async fn exists_overlap(
        &self,
        property_id: Uuid,
        exclude: Option<Uuid>,
        range: DateRange,
    ) -> bool {
        let Some(ids) = self.by_property.get(&property_id) else {
            return false;
        };
        ids.iter().any(|id| {
            if exclude == Some(*id) {
                return false;
            }
            self.items
                .get(id)
                .is_some_and(|b| b.is_active() && b.range.overlaps(&range))
        })
    }

    async fn save(&self, booking: Booking) {
        let mut ids = self.by_property.entry(booking.property_id).or_default();
        if !ids.contains(&booking.id) {
            ids.push(booking.id);
        }
        drop(ids);
        self.items.insert(booking.id, booking);
    }

    async fn find(&self, id: Uuid) -> Option<Booking> {
        self.items.get(&id).map(|e| e.value().clone())
    }

    async fn delete(&self, id: Uuid) -> bool {
        let Some((_, booking)) = self.items.remove(&id) else {
            return false;
        };
        if let Some(mut ids) = self.by_property.get_mut(&booking.property_id) {
            ids.retain(|b| *b != id);
        }
        true
    }

    async fn list_by_property(&self, property_id: Uuid) -> Vec<Booking> {
        let Some(ids) = self.by_property.get(&property_id) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|id| self.items.get(id).map(|e| e.value().clone()))
            .collect()
    }
}

#[derive(Default)]
pub struct InMemoryBlocks {
    items: DashMap<Uuid, Block>,
    by_property: DashMap<Uuid, Vec<Uuid>>,
}

impl InMemoryBlocks {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlockStore for InMemoryBlocks {
    async fn exists_overlap(
        &self,
        property_id: Uuid,
        exclude: Option<Uuid>,
        range: DateRange,
    ) -> bool {
        let Some(ids) = self.by_property.get(&property_id) else {
            return false;
        };
        ids.iter().any(|id| {
            if exclude == Some(*id) {
                return false;
            }
            self.items.get(id).is_some_and(|b| b.range.overlaps(&range))
        })
    }

    async fn save(&self, block: Block) {
        let mut ids = self.by_property.entry(block.property_id).or_default();
        if !ids.contains(&block.id) {
            ids.push(block.id);
        }
        drop(ids);
        self.items.insert(block.id, block);
    }

    async fn find(&self, id: Uuid) -> Option<Block> {
        self.items.get(&id).map(|e| e.value().clone())
    }

    async fn delete(&self, id: Uuid) -> bool {
        let Some((_, block)) = self.items.remove(&id) else {
            return false;
        };
        if let Some(mut ids) = self.by_property.get_mut(&block.property_id) {
            ids.retain(|b| *b != id);
        }
        true
    }

    async fn list_by_property(&self, property_id: Uuid) -> Vec<Block> {
        let Some(ids) = self.by_property.get(&property_id) else {
            return Vec::new();
        };
        ids.iter()
            .filter_map(|id| self.items.get(id).map(|e| e.value().clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookingStatus, GuestInput};
    use chrono::{NaiveDate, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, d).unwrap()
    }

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(day(start), day(end)).unwrap()
    }

    fn booking(property_id: Uuid, start: u32, end: u32, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            property_id,
            range: range(start, end),
            status,
            guests: vec![GuestInput::new("G").into_guest()],
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn block(property_id: Uuid, start: u32, end: u32) -> Block {
        Block {
            id: Uuid::new_v4(),
            property_id,
            range: range(start, end),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn booking_overlap_ignores_cancelled() {
        let store = InMemoryBookings::new();
        let pid = Uuid::new_v4();
        store
            .save(booking(pid, 5, 15, BookingStatus::Cancelled))
            .await;
        assert!(!store.exists_overlap(pid, None, range(10, 20)).await);

        store
            .save(booking(pid, 5, 15, BookingStatus::Confirmed))
            .await;
        assert!(store.exists_overlap(pid, None, range(10, 20)).await);
    }

    #[tokio::test]
    async fn booking_overlap_excludes_own_id() {
        let store = InMemoryBookings::new();
        let pid = Uuid::new_v4();
        let b = booking(pid, 5, 15, BookingStatus::Confirmed);
        let id = b.id;
        store.save(b).await;

        assert!(store.exists_overlap(pid, None, range(5, 15)).await);
        assert!(!store.exists_overlap(pid, Some(id), range(5, 15)).await);
    }

    #[tokio::test]
    async fn booking_overlap_scoped_to_property() {
        let store = InMemoryBookings::new();
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        store.save(booking(p1, 5, 15, BookingStatus::Confirmed)).await;
        assert!(!store.exists_overlap(p2, None, range(5, 15)).await);
    }

    #[tokio::test]
    async fn booking_save_is_upsert() {
        let store = InMemoryBookings::new();
        let pid = Uuid::new_v4();
        let mut b = booking(pid, 5, 15, BookingStatus::Confirmed);
        store.save(b.clone()).await;
        b.status = BookingStatus::Cancelled;
        store.save(b.clone()).await;

        assert_eq!(store.list_by_property(pid).await.len(), 1);
        assert_eq!(
            store.find(b.id).await.unwrap().status,
            BookingStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn booking_delete_removes_from_index() {
        let store = InMemoryBookings::new();
        let pid = Uuid::new_v4();
        let b = booking(pid, 5, 15, BookingStatus::Confirmed);
        let id = b.id;
        store.save(b).await;

        assert!(store.delete(id).await);
        assert!(!store.delete(id).await);
        assert!(store.find(id).await.is_none());
        assert!(!store.exists_overlap(pid, None, range(5, 15)).await);
        assert!(store.list_by_property(pid).await.is_empty());
    }

    #[tokio::test]
    async fn every_block_counts() {
        let store = InMemoryBlocks::new();
        let pid = Uuid::new_v4();
        let b = block(pid, 5, 15);
        let id = b.id;
        store.save(b).await;

        assert!(store.exists_overlap(pid, None, range(1, 6)).await);
        assert!(!store.exists_overlap(pid, Some(id), range(1, 6)).await);
        assert!(!store.exists_overlap(pid, None, range(16, 20)).await);
    }

    #[tokio::test]
    async fn property_directory_lookup() {
        let dir = InMemoryProperties::new();
        let p = dir.add("Seaside Cottage");
        assert_eq!(dir.get(p.id).await.unwrap().name, "Seaside Cottage");
        assert!(dir.get(Uuid::new_v4()).await.is_none());
    }
}
