//! Reservation conflict & lifecycle engine for short-term rentals.
//!
//! The engine decides whether a requested date range for a property may be
//! confirmed as a guest [`Booking`] or a host [`Block`], and guarantees that
//! no two active reservations for the same property ever occupy overlapping
//! dates. Overlap uses inclusive boundary comparison — a stay ending on day X
//! conflicts with one starting on day X.
//!
//! Persistence and the property directory are injected behind the traits in
//! [`store`]; in-memory implementations are provided for tests and embedding.
//! Check-then-act atomicity is per property: the engine holds a per-property
//! lock across every availability check and the write that follows it.

pub mod engine;
pub mod model;
pub mod observability;
pub mod store;

pub use engine::{AvailabilityOracle, Conflict, Engine, ReservationError, Transition};
pub use model::{
    Block, Booking, BookingStatus, DateRange, DateRangeInput, Entity, Guest, GuestInput,
    Property, RangeRule, ValidationError,
};
pub use store::{
    BlockStore, BookingStore, InMemoryBlocks, InMemoryBookings, InMemoryProperties,
    PropertyDirectory,
};
