//! Remote collaborator that persists people and assigns identifiers.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::config::ServerConfig;
use crate::person::model::Person;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    #[error("Server response: This name is already taken.")]
    NameTaken,
}

#[async_trait]
pub trait PersonApi: Send + Sync {
    /// Store `person` and return it with an assigned `id`.
    async fn create_person(&self, person: &Person) -> Result<Person, ServerError>;
}

/// In-process stand-in for the real server.
///
/// Answers after a fixed latency, refuses a configured set of first names
/// and hands out the same identifier to everyone else.
#[derive(Debug, Clone)]
pub struct SimulatedServer {
    latency: Duration,
    assigned_id: u64,
    taken_names: Vec<String>,
}

impl SimulatedServer {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            latency: config.latency(),
            assigned_id: config.assigned_id,
            taken_names: config.taken_names.clone(),
        }
    }
}

impl Default for SimulatedServer {
    fn default() -> Self {
        Self::new(&ServerConfig::default())
    }
}

#[async_trait]
impl PersonApi for SimulatedServer {
    async fn create_person(&self, person: &Person) -> Result<Person, ServerError> {
        tokio::time::sleep(self.latency).await;

        if self.taken_names.iter().any(|name| *name == person.first_name) {
            debug!(first_name = %person.first_name, "name already taken");
            return Err(ServerError::NameTaken);
        }

        debug!(id = self.assigned_id, "person created");
        Ok(Person {
            id: Some(self.assigned_id),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
        })
    }
}
