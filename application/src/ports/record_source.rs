//! Record source port

use super::chat_transport::TransportError;
use async_trait::async_trait;
use finder_domain::Human;

/// Source of the record listing (fetched once per view load).
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn load_humans(&self) -> Result<Vec<Human>, TransportError>;
}
