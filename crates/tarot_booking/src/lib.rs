// --- File: crates/tarot_booking/src/lib.rs ---
// Declare modules within this crate
pub mod availability;
pub mod clock;
pub mod draft;
pub mod error;
pub mod orchestrator;
#[cfg(test)]
mod orchestrator_test;
pub mod pricing;
#[cfg(test)]
mod pricing_test;
pub mod service;
pub mod slots;
#[cfg(test)]
mod slots_proptest;
pub mod ui;

pub use availability::SlotLoader;
pub use draft::{BookingDraft, BookingSummary};
pub use error::BookingError;
pub use orchestrator::{BookingFlow, BookingOrchestrator};
pub use service::RestBookingClient;
pub use slots::{generate_slots, Slot};
pub use ui::{Navigator, Notifier, ToastLevel};
