//! # Domain Module
//!
//! Contains all business logic for the booking tracker.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how appointment slots are generated, classified, selected,
//! booked and cancelled. It operates independently of any specific UI
//! or storage mechanism.
//!
//! ## Module Organization
//!
//! - **calendar**: Week generation, day filtering and slot classification
//! - **selection**: The session's single-slot selection state
//! - **booking_service**: Booking validation, submission and cancellation
//! - **guestbook_service**: Append-only guestbook messages
//! - **rsvp_service**: Event RSVPs and organizer stats
//! - **export_service**: iCalendar export of confirmed bookings
//! - **validation**: Shared email/phone validators
//!
//! ## Core Invariant
//!
//! A booked-slot key exists exactly when an active booking references that
//! (date, time) pair; every create and cancel keeps the two stores in sync.

pub mod booking_service;
pub mod calendar;
pub mod export_service;
pub mod guestbook_service;
pub mod rsvp_service;
pub mod selection;
pub mod validation;

pub use booking_service::*;
pub use calendar::*;
pub use export_service::*;
pub use guestbook_service::*;
pub use rsvp_service::*;
pub use selection::*;
