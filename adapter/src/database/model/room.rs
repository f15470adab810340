use kernel::model::{id::RoomId, room::Room};

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub room_name: String,
    pub room_type: String,
    pub price_per_period: i64,
    pub description: String,
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
    pub extra_image_urls: Vec<String>,
    pub available: bool,
}

impl From<RoomRow> for Room {
    fn from(value: RoomRow) -> Self {
        let RoomRow {
            room_id,
            room_name,
            room_type,
            price_per_period,
            description,
            amenities,
            image_url,
            extra_image_urls,
            available,
        } = value;
        Room {
            room_id,
            room_name,
            room_type,
            price_per_period,
            description,
            amenities,
            image_url,
            extra_image_urls,
            available,
        }
    }
}
