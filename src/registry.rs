use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use tracing::error;

use crate::{error::Error, types::Subscription};

/// In-memory set of active subscriptions, keyed by endpoint.
///
/// State is volatile and process-lifetime scoped. Mutations are short
/// critical sections; a dispatch works on the snapshot returned by
/// [`SubscriptionRegistry::all`], so deliveries never hold the lock.
#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    items: Mutex<HashMap<String, Subscription>>,
}

impl SubscriptionRegistry {
    pub fn new() -> SubscriptionRegistry {
        SubscriptionRegistry::default()
    }

    /// Registers a subscription. Re-adding an endpoint is a no-op and the
    /// existing entry wins. Returns whether a new entry was inserted.
    pub fn add(&self, subscription: Subscription) -> Result<bool, Error> {
        if subscription.endpoint.trim().is_empty() {
            return Err(Error::FieldNotExist(String::from("endpoint")));
        }

        let mut items = self.lock()?;
        if items.contains_key(&subscription.endpoint) {
            return Ok(false);
        }
        items.insert(subscription.endpoint.to_owned(), subscription);
        Ok(true)
    }

    /// Removes the entry with a matching endpoint. Absent endpoints are a
    /// no-op, not an error. Returns whether an entry was removed.
    pub fn remove(&self, endpoint: &str) -> Result<bool, Error> {
        let mut items = self.lock()?;
        Ok(items.remove(endpoint).is_some())
    }

    /// Snapshot of the current subscriptions, taken under the lock.
    pub fn all(&self) -> Result<Vec<Subscription>, Error> {
        let items = self.lock()?;
        Ok(items.values().cloned().collect())
    }

    pub fn len(&self) -> usize {
        match self.lock() {
            Ok(items) => items.len(),
            Err(e) => {
                error!("{}", e);
                0
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Subscription>>, Error> {
        self.items
            .lock()
            .map_err(|_| Error::ServerError(String::from("subscription registry mutex poisoned")))
    }
}
