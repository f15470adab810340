use crate::model::id::RoomId;

pub mod event;

#[derive(Debug)]
pub struct Room {
    pub room_id: RoomId,
    pub room_name: String,
    pub room_type: String,
    /// Price per billing period (one month), in the smallest currency unit.
    pub price_per_period: i64,
    pub description: String,
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
    pub extra_image_urls: Vec<String>,
    /// Cached availability flag, owned by the booking ledger. True only when
    /// no confirmed booking covers today.
    pub available: bool,
}
