use chrono::{DateTime, Utc};

use crate::model::id::ContactId;

pub mod event;

#[derive(Debug)]
pub struct Contact {
    pub contact_id: ContactId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
