//! Mail delivery channels.
//!
//! [`email::SmtpMailer`] is used in production, [`email::LogMailer`] when
//! SMTP is not configured, and [`recording::RecordingMailer`] in tests.

pub mod email;
pub mod recording;
