//! End-to-end calendar scenarios through the public API.

use std::sync::Arc;

use chrono::NaiveDate;

use innkeep::{
    Conflict, DateRangeInput, Engine, GuestInput, InMemoryProperties, ReservationError,
};

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
}

fn range(start: u32, end: u32) -> DateRangeInput {
    DateRangeInput::new(jan(start), jan(end))
}

fn guest(name: &str) -> Vec<GuestInput> {
    vec![GuestInput::new(name)]
}

#[tokio::test]
async fn property_calendar_scenario() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let properties = Arc::new(InMemoryProperties::new());
    let p1 = properties.add("Lighthouse Loft").id.to_string();
    let engine = Engine::in_memory(properties);

    // A confirmed booking for [Jan 5, Jan 15).
    let booking = engine
        .create_booking(&p1, range(5, 15), guest("Alan Wake"))
        .await
        .unwrap();

    // A block over [Jan 10, Jan 20) collides with the booking, and the cause
    // is reported as booked, not blocked.
    let err = engine.create_block(&p1, range(10, 20)).await.unwrap_err();
    assert_eq!(err, ReservationError::Conflict(Conflict::DatesAlreadyBooked));

    // [Jan 16, Jan 20) leaves a one-day gap after checkout and succeeds.
    let second = engine
        .create_booking(&p1, range(16, 20), guest("Barry Wheeler"))
        .await
        .unwrap();

    // The host blocks [Jan 22, Jan 28); a booking clear of the second stay
    // but overlapping the block at Jan 22 fails with the blocked cause.
    engine.create_block(&p1, range(22, 28)).await.unwrap();
    let err = engine
        .create_booking(&p1, range(21, 23), guest("Rose Marigold"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ReservationError::Conflict(Conflict::DatesAlreadyBlocked)
    );

    // Cancelling the first booking releases [Jan 5, Jan 15) immediately.
    engine.cancel_booking(&booking.id.to_string()).await.unwrap();
    let third = engine
        .create_booking(&p1, range(5, 15), guest("Rose Marigold"))
        .await
        .unwrap();

    // The original booking can no longer be rebooked: its dates were taken.
    let err = engine
        .rebook_booking(&booking.id.to_string())
        .await
        .unwrap_err();
    assert_eq!(err, ReservationError::Conflict(Conflict::DatesAlreadyBooked));

    // But once the replacement moves out of the way, rebooking works again.
    engine.delete_booking(&third.id.to_string()).await.unwrap();
    let rebooked = engine
        .rebook_booking(&booking.id.to_string())
        .await
        .unwrap();
    assert!(rebooked.is_active());

    // The calendar now holds two confirmed bookings and one block.
    let bookings = engine.get_bookings(&p1).await.unwrap();
    assert_eq!(bookings.len(), 2);
    assert!(bookings.iter().all(|b| b.is_active()));
    assert_eq!(engine.get_blocks(&p1).await.unwrap().len(), 1);
    assert!(second.is_active());
}
