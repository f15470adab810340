use async_trait::async_trait;
use derive_new::new;

use crate::database::{model::contact::ContactRow, ConnectionPool};
use kernel::model::{
    contact::{event::CreateContact, Contact},
    id::ContactId,
};
use kernel::repository::contact::ContactRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ContactRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ContactRepository for ContactRepositoryImpl {
    async fn create(&self, event: CreateContact) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                INSERT INTO contacts (contact_id, name, email, message)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(ContactId::new())
        .bind(event.name)
        .bind(event.email)
        .bind(event.message)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no contact record has been created".into(),
            ));
        }

        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Contact>> {
        sqlx::query_as::<_, ContactRow>(
            r#"
                SELECT contact_id, name, email, message, created_at
                FROM contacts
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Contact::from).collect())
        .map_err(AppError::SpecificOperationError)
    }
}
