//! Change notifications published to the event bus

use crate::config::EventsConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use std::sync::Arc;

/// Topic carrying the serialized post-update company
pub const COMPANY_UPDATE_TOPIC: &str = "company_update";
/// Topic carrying the bare decimal id of a deleted company
pub const COMPANY_DELETE_TOPIC: &str = "company_delete";

/// Fire-and-forget publish capability. Delivery is at most once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()>;
}

/// Redis pub/sub publisher (`PUBLISH topic payload`)
#[derive(Clone)]
pub struct RedisEventPublisher {
    conn: ConnectionManager,
}

impl RedisEventPublisher {
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).map_err(|e| {
            AppError::Internal(anyhow::anyhow!("Failed to create Redis client: {}", e))
        })?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> Result<()> {
        let mut conn = self.conn.clone();
        let receivers: i64 = conn.publish(topic, payload).await?;
        tracing::debug!(topic, receivers, "Published change notification");
        Ok(())
    }
}

/// Publisher used when notifications are disabled
#[derive(Clone, Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, topic: &str, _payload: Vec<u8>) -> Result<()> {
        tracing::trace!(topic, "Notifications disabled, dropping event");
        Ok(())
    }
}

/// Type-erased publisher chosen at startup
pub type DynEventPublisher = Arc<dyn EventPublisher>;

/// Build the publisher selected by `config`
pub async fn connect(config: &EventsConfig) -> Result<DynEventPublisher> {
    if !config.enabled {
        tracing::info!("Change notifications disabled");
        return Ok(Arc::new(NoOpEventPublisher));
    }

    let publisher = RedisEventPublisher::new(&config.redis_url).await?;
    tracing::info!("Publishing change notifications to {}", config.redis_url);
    Ok(Arc::new(publisher))
}
