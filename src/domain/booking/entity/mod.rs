pub mod event_booking;
