use kernel::model::{contact::Contact, id::ContactId};
use sqlx::types::chrono::{DateTime, Utc};

#[derive(sqlx::FromRow)]
pub struct ContactRow {
    pub contact_id: ContactId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContactRow> for Contact {
    fn from(value: ContactRow) -> Self {
        let ContactRow {
            contact_id,
            name,
            email,
            message,
            created_at,
        } = value;
        Contact {
            contact_id,
            name,
            email,
            message,
            created_at,
        }
    }
}
