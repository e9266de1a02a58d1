//! Per-entity record store over the HTTP API.

use serde_json::Value;

use plantlab_core::{Error, Record, RecordStore};

use crate::api::Api;

/// Binds one entity path (e.g. `/indoor/subculturing`) to the shared
/// [`Api`] connection. This is the production [`RecordStore`] behind a
/// table controller.
#[derive(Debug, Clone)]
pub struct EntityClient {
    api: Api,
    path: String,
}

impl EntityClient {
    pub fn new(api: Api, path: impl Into<String>) -> Self {
        EntityClient { api, path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl RecordStore for EntityClient {
    fn list(&self) -> Result<Vec<Record>, Error> {
        self.api.list(&self.path)
    }

    fn create(&self, payload: &Value) -> Result<(), Error> {
        self.api.create(&self.path, payload).map(|_| ())
    }

    fn update(&self, id: i64, payload: &Value) -> Result<(), Error> {
        self.api.update(&self.path, id, payload).map(|_| ())
    }

    fn delete(&self, id: i64) -> Result<(), Error> {
        self.api.delete(&self.path, id)
    }
}
