use async_trait::async_trait;
use derive_new::new;

use crate::database::{model::room::RoomRow, ConnectionPool};
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, DeleteRoom, UpdateRoom},
        Room,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId> {
        let room_id = RoomId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO rooms
                (room_id, room_name, room_type, price_per_period, description,
                 amenities, image_url, extra_image_urls)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(room_id)
        .bind(event.room_name)
        .bind(event.room_type)
        .bind(event.price_per_period)
        .bind(event.description)
        .bind(event.amenities)
        .bind(event.image_url)
        .bind(event.extra_image_urls)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no room record has been created".into(),
            ));
        }

        Ok(room_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT
                    room_id,
                    room_name,
                    room_type,
                    price_per_period,
                    description,
                    amenities,
                    image_url,
                    extra_image_urls,
                    available
                FROM rooms
                ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Room::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT
                    room_id,
                    room_name,
                    room_type,
                    price_per_period,
                    description,
                    amenities,
                    image_url,
                    extra_image_urls,
                    available
                FROM rooms
                WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Room::from))
    }

    async fn update(&self, event: UpdateRoom) -> AppResult<()> {
        // Admin edits never touch `available`; that flag belongs to the
        // booking ledger.
        let res = sqlx::query(
            r#"
                UPDATE rooms
                SET
                    room_name = COALESCE($2, room_name),
                    room_type = COALESCE($3, room_type),
                    price_per_period = COALESCE($4, price_per_period),
                    description = COALESCE($5, description),
                    amenities = COALESCE($6, amenities),
                    image_url = COALESCE($7, image_url),
                    extra_image_urls = COALESCE($8, extra_image_urls)
                WHERE room_id = $1
            "#,
        )
        .bind(event.room_id)
        .bind(event.room_name)
        .bind(event.room_type)
        .bind(event.price_per_period)
        .bind(event.description)
        .bind(event.amenities)
        .bind(event.image_url)
        .bind(event.extra_image_urls)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified room not found".into(),
            ));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteRoom) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM bookings
                    WHERE room_id = $1
                      AND status IN ('pending_payment', 'confirmed')
                )
            "#,
        )
        .bind(event.room_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if referenced {
            return Err(AppError::BookingConflict(format!(
                "room ({}) still has active bookings and cannot be deleted",
                event.room_id
            )));
        }

        let res = sqlx::query("DELETE FROM rooms WHERE room_id = $1")
            .bind(event.room_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(
                "specified room not found".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}
