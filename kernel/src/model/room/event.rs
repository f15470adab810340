use crate::model::id::{RoomId, UserId};

pub struct CreateRoom {
    pub room_name: String,
    pub room_type: String,
    pub price_per_period: i64,
    pub description: String,
    pub amenities: Vec<String>,
    pub image_url: Option<String>,
    pub extra_image_urls: Vec<String>,
}

#[derive(Debug)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub room_name: Option<String>,
    pub room_type: Option<String>,
    pub price_per_period: Option<i64>,
    pub description: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub extra_image_urls: Option<Vec<String>>,
    pub requested_user: UserId,
}

#[derive(Debug)]
pub struct DeleteRoom {
    pub room_id: RoomId,
    pub requested_user: UserId,
}
