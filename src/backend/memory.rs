use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{BackendError, Resource, TravelBackend};

/// Backend kept in process memory. Records are stored as JSON per resource
/// path, so any `Resource` round-trips through the same serde code as over
/// HTTP. The test suites run the routes against it.
#[derive(Default)]
pub struct MemoryBackend {
    records: Mutex<HashMap<&'static str, Vec<Value>>>,
    sent_emails: Mutex<Vec<String>>,
    next_id: AtomicU64,
    offline: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` as-is, keeping whatever id it carries.
    pub fn seed<T: Resource>(&self, record: &T) -> Result<(), BackendError> {
        let value = serde_json::to_value(record)?;
        self.records().entry(T::PATH).or_default().push(value);
        Ok(())
    }

    /// While offline every call fails as if the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn sent_emails(&self) -> Vec<String> {
        self.sent_emails
            .lock()
            .map(|emails| emails.clone())
            .unwrap_or_default()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<&'static str, Vec<Value>>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_online(&self) -> Result<(), BackendError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(BackendError::StatusError {
                status: 503,
                body: "Backend unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn not_found(resource: &'static str, id: &str) -> BackendError {
        BackendError::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

fn id_of(value: &Value) -> Option<&str> {
    value.get("id").and_then(Value::as_str)
}

fn matches_query(value: &Value, query: &[(&str, &str)]) -> bool {
    query
        .iter()
        .all(|(key, expected)| value.get(*key).and_then(Value::as_str) == Some(*expected))
}

impl TravelBackend for MemoryBackend {
    async fn list<T: Resource>(&self, query: &[(&str, &str)]) -> Result<Vec<T>, BackendError> {
        self.check_online()?;
        let records = self.records();
        records
            .get(T::PATH)
            .map(|values| values.as_slice())
            .unwrap_or_default()
            .iter()
            .filter(|value| matches_query(value, query))
            .map(|value| serde_json::from_value(value.clone()).map_err(BackendError::from))
            .collect()
    }

    async fn get<T: Resource>(&self, id: &str) -> Result<T, BackendError> {
        self.check_online()?;
        let records = self.records();
        let value = records
            .get(T::PATH)
            .and_then(|values| values.iter().find(|value| id_of(value) == Some(id)))
            .ok_or_else(|| Self::not_found(T::PATH, id))?;
        Ok(serde_json::from_value(value.clone())?)
    }

    async fn create<T: Resource>(&self, record: &T) -> Result<T, BackendError> {
        self.check_online()?;
        let mut value = serde_json::to_value(record)?;
        let id = format!("{}-{}", T::PATH, self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        if let Some(object) = value.as_object_mut() {
            object.insert("id".to_string(), Value::String(id));
        }

        self.records()
            .entry(T::PATH)
            .or_default()
            .push(value.clone());
        Ok(serde_json::from_value(value)?)
    }

    async fn update<T: Resource>(&self, id: &str, record: &T) -> Result<T, BackendError> {
        self.check_online()?;
        let mut value = serde_json::to_value(record)?;
        if let Some(object) = value.as_object_mut() {
            object.insert("id".to_string(), Value::String(id.to_string()));
        }

        let mut records = self.records();
        let slot = records
            .get_mut(T::PATH)
            .and_then(|values| values.iter_mut().find(|existing| id_of(existing) == Some(id)))
            .ok_or_else(|| Self::not_found(T::PATH, id))?;
        *slot = value.clone();
        Ok(serde_json::from_value(value)?)
    }

    async fn delete<T: Resource>(&self, id: &str) -> Result<(), BackendError> {
        self.check_online()?;
        let mut records = self.records();
        let values = records
            .get_mut(T::PATH)
            .ok_or_else(|| Self::not_found(T::PATH, id))?;
        let before = values.len();
        values.retain(|value| id_of(value) != Some(id));
        if values.len() == before {
            return Err(Self::not_found(T::PATH, id));
        }
        Ok(())
    }

    async fn send_demand_email(&self, demand_id: &str) -> Result<(), BackendError> {
        self.check_online()?;
        let exists = self
            .records()
            .get("demands")
            .is_some_and(|values| values.iter().any(|value| id_of(value) == Some(demand_id)));
        if !exists {
            return Err(Self::not_found("demands", demand_id));
        }

        if let Ok(mut emails) = self.sent_emails.lock() {
            emails.push(demand_id.to_string());
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), BackendError> {
        self.check_online()
    }
}
