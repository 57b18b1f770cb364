//! Outbound trip notifications.
//!
//! - [`Notifier`]: the capability the workflow calls to send
//!   "confirm your trip" messages, with its [`Recipient`] and [`NotifyError`].
//! - [`delivery`]: concrete notifiers (SMTP via `lettre`, log-only).
//! - [`NotificationDispatcher`]: runs notifier calls as detached,
//!   tracked tasks so request handlers never wait on delivery.

pub mod delivery;
pub mod dispatch;
pub mod notifier;

pub use delivery::email::{EmailConfig, SmtpNotifier, SmtpTls};
pub use delivery::log::LogNotifier;
pub use dispatch::{Notification, NotificationDispatcher};
pub use notifier::{Notifier, NotifyError, Recipient};
