//! In-memory mailer for tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::delivery::email::{EmailError, Mailer};
use crate::mail::Email;

/// Records sent emails. Sends to addresses registered with
/// [`RecordingMailer::reject`] fail with [`EmailError::Rejected`].
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Email>>,
    rejected: Mutex<HashSet<String>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future send to `address` fail.
    pub fn reject(&self, address: &str) {
        if let Ok(mut rejected) = self.rejected.lock() {
            rejected.insert(address.to_string());
        }
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &Email) -> Result<(), EmailError> {
        let rejected = self
            .rejected
            .lock()
            .map(|r| r.contains(&email.to))
            .unwrap_or(false);
        if rejected {
            return Err(EmailError::Rejected(email.to.clone()));
        }
        self.sent
            .lock()
            .map_err(|e| EmailError::Build(e.to_string()))?
            .push(email.clone());
        Ok(())
    }
}
