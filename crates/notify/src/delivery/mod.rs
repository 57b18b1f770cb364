//! Concrete [`Notifier`](crate::Notifier) implementations.
//!
//! [`email::SmtpNotifier`] delivers over SMTP when configured;
//! [`log::LogNotifier`] only records what would have been sent.

pub mod email;
pub mod log;
