//! JSON-file storage backend.
//!
//! One file per persisted key, mirroring the string-keyed JSON store the
//! domain layer was designed around.

pub mod booking_repository;
pub mod connection;
pub mod guestbook_repository;
pub mod rsvp_repository;

pub use booking_repository::BookingRepository;
pub use connection::JsonConnection;
pub use guestbook_repository::GuestbookRepository;
pub use rsvp_repository::RsvpRepository;
