use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    contact::{event::CreateContact, Contact},
    id::ContactId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub message: String,
}

impl From<CreateContactRequest> for CreateContact {
    fn from(value: CreateContactRequest) -> Self {
        let CreateContactRequest {
            name,
            email,
            message,
        } = value;
        Self {
            name,
            email,
            message,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsResponse {
    pub items: Vec<ContactResponse>,
}

impl From<Vec<Contact>> for ContactsResponse {
    fn from(value: Vec<Contact>) -> Self {
        Self {
            items: value.into_iter().map(ContactResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub contact_id: ContactId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(value: Contact) -> Self {
        let Contact {
            contact_id,
            name,
            email,
            message,
            created_at,
        } = value;
        Self {
            contact_id,
            name,
            email,
            message,
            created_at,
        }
    }
}
