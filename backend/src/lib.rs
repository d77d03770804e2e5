//! Booking tracker backend: slot availability and booking management for a
//! coaching practice, plus the event guestbook and RSVP stores.
//!
//! The domain layer owns all business rules and works against storage
//! traits; the JSON backend persists each store as one file under a local
//! data directory. Presentation is limited to the collaborator interfaces
//! in [`io`].

pub mod domain;
pub mod io;
pub mod storage;
