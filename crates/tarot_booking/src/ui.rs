// --- File: crates/tarot_booking/src/ui.rs ---
//! Seams to the presentation layer.

use reqwest::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

/// Sends the user somewhere else, e.g. the hosted payment page.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &Url);
}

/// Shows a short user-facing notification.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn toast(&self, level: ToastLevel, message: &str);
}
