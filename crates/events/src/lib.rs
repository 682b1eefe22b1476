//! Outbound side of the Q&A backend: background jobs and email.
//!
//! - [`queue`] -- the [`JobQueue`] port and its Postgres / in-memory
//!   implementations.
//! - [`delivery`] -- the [`Mailer`] port with SMTP and log-only mailers.
//! - [`mail`] -- plain-text email templates.
//! - [`notify`] -- new-answer fan-out to question subscribers.
//! - [`digest`] -- daily digest composition and delivery.

pub mod delivery;
pub mod digest;
pub mod error;
pub mod mail;
pub mod notify;
pub mod queue;

pub use delivery::email::{EmailConfig, EmailError, LogMailer, Mailer, SmtpMailer};
pub use delivery::recording::RecordingMailer;
pub use digest::{DailyDigest, DigestReport};
pub use error::DeliveryError;
pub use mail::Email;
pub use queue::{JobQueue, PgJobQueue, QueueError, RecordingJobQueue};
