use crate::error::{ApiError, Result};

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_addr: String,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ApiError::Config("DATABASE_URL not set".into()))?;

        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
        })
    }

    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 5,
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }
}
