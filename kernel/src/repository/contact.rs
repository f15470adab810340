use async_trait::async_trait;

use crate::model::contact::{event::CreateContact, Contact};
use shared::error::AppResult;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, event: CreateContact) -> AppResult<()>;
    async fn find_all(&self) -> AppResult<Vec<Contact>>;
}
