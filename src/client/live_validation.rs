//! Debounced live field validation.
//!
//! Every edit bumps a per-field generation counter and schedules a request
//! after the debounce window. A request is sent only if no newer edit arrived
//! in the meantime, and a response is applied only if it is still the latest
//! for its field and the validator has not been closed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use quote_core::validation::Field;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::api::{FieldValidationApi, ValidationVerdict};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Fields validated while the user types.
pub const WATCHED_FIELDS: [Field; 4] = [Field::Email, Field::Phone, Field::FirstName, Field::LastName];

#[derive(Debug, Default)]
struct Shared {
    generations: HashMap<Field, u64>,
    errors: HashMap<Field, String>,
    closed: bool,
}

impl Shared {
    fn is_current(&self, field: Field, generation: u64) -> bool {
        !self.closed && self.generations.get(&field) == Some(&generation)
    }
}

/// Per-field debounced validation against the server.
#[derive(Debug)]
pub struct LiveValidator<A> {
    api: Arc<A>,
    debounce: Duration,
    shared: Arc<Mutex<Shared>>,
}

impl<A: FieldValidationApi> LiveValidator<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_debounce(api, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(api: Arc<A>, debounce: Duration) -> Self {
        Self {
            api,
            debounce,
            shared: Arc::new(Mutex::new(Shared::default())),
        }
    }

    /// Record an edit of `field`.
    ///
    /// Returns the handle of the scheduled check, or `None` when nothing was
    /// scheduled (unwatched field, blank value, or closed validator). A blank
    /// value clears the field's error immediately.
    pub fn on_edit(&self, field: Field, value: impl Into<String>) -> Option<JoinHandle<()>> {
        if !WATCHED_FIELDS.contains(&field) {
            return None;
        }
        let value = value.into();

        let generation = {
            let mut shared = lock(&self.shared);
            if shared.closed {
                return None;
            }
            let counter = shared.generations.entry(field).or_default();
            *counter += 1;
            let generation = *counter;
            if value.trim().is_empty() {
                shared.errors.remove(&field);
                return None;
            }
            generation
        };

        let api = Arc::clone(&self.api);
        let shared = Arc::clone(&self.shared);
        let debounce = self.debounce;

        Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if !lock(&shared).is_current(field, generation) {
                return;
            }

            let result = api.validate_field(field, &value).await;

            let mut shared = lock(&shared);
            if !shared.is_current(field, generation) {
                debug!(%field, generation, "Discarding stale validation response");
                return;
            }
            match result {
                Ok(ValidationVerdict::Valid(_)) => {
                    shared.errors.remove(&field);
                }
                Ok(ValidationVerdict::Invalid(message)) => {
                    shared.errors.insert(field, message);
                }
                Err(e) => warn!(%field, error = %e, "Live validation request failed"),
            }
        }))
    }

    /// Current error for `field`, if any.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<String> {
        lock(&self.shared).errors.get(&field).cloned()
    }

    /// Snapshot of every known field error.
    #[must_use]
    pub fn errors(&self) -> HashMap<Field, String> {
        lock(&self.shared).errors.clone()
    }

    /// Stop applying responses. Pending checks finish without effect.
    pub fn close(&self) {
        lock(&self.shared).closed = true;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        lock(&self.shared).closed
    }
}

impl<A> Drop for LiveValidator<A> {
    fn drop(&mut self) {
        lock(&self.shared).closed = true;
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}
