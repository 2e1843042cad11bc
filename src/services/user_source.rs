use crate::data::User;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("user source unavailable: {0}")]
    Unavailable(String),
}

/// Where the list gets its records from
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<User>, SourceError>;

    async fn fetch_by_id(&self, id: u32) -> Result<Option<User>, SourceError> {
        Ok(self.fetch_all().await?.into_iter().find(|u| u.id == id))
    }
}

/// Fixed in-memory list standing in for a backend
#[derive(Debug, Clone)]
pub struct MockUserService {
    users: Vec<User>,
}

fn user(id: u32, first: &str, last: &str, email: &str, phone: &str) -> User {
    User {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    }
}

impl MockUserService {
    pub fn new() -> Self {
        Self {
            users: vec![
                user(1, "John", "Doe", "john.doe@example.com", "+1-555-123-4567"),
                user(2, "Jane", "Smith", "jane.smith@example.com", "+1-555-987-6543"),
                user(3, "Michael", "Johnson", "michael.johnson@example.com", "+1-555-456-7890"),
                user(4, "Sarah", "Williams", "sarah.williams@example.com", "+1-555-234-5678"),
                user(5, "David", "Brown", "david.brown@example.com", "+1-555-345-6789"),
            ],
        }
    }
}

impl Default for MockUserService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserSource for MockUserService {
    async fn fetch_all(&self) -> Result<Vec<User>, SourceError> {
        tracing::debug!("Serving {} mock users", self.users.len());
        Ok(self.users.clone())
    }

    async fn fetch_by_id(&self, id: u32) -> Result<Option<User>, SourceError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }
}
