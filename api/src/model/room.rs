use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{RoomId, UserId},
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(length(min = 1))]
    pub room_name: String,
    #[garde(length(min = 1))]
    pub room_type: String,
    #[garde(range(min = 1))]
    pub price_per_period: i64,
    #[garde(skip)]
    pub description: String,
    #[garde(skip)]
    pub amenities: Vec<String>,
    #[garde(skip)]
    pub image_url: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    pub extra_image_urls: Vec<String>,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            room_name,
            room_type,
            price_per_period,
            description,
            amenities,
            image_url,
            extra_image_urls,
        } = value;
        Self {
            room_name,
            room_type,
            price_per_period,
            description,
            amenities,
            image_url,
            extra_image_urls,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(skip)]
    pub room_name: Option<String>,
    #[garde(skip)]
    pub room_type: Option<String>,
    #[garde(inner(range(min = 1)))]
    pub price_per_period: Option<i64>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(skip)]
    pub amenities: Option<Vec<String>>,
    #[garde(skip)]
    pub image_url: Option<String>,
    #[garde(skip)]
    pub extra_image_urls: Option<Vec<String>>,
}

#[derive(new)]
pub struct UpdateRoomRequestWithIds(RoomId, UserId, UpdateRoomRequest);

impl From<UpdateRoomRequestWithIds> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithIds) -> Self {
        let UpdateRoomRequestWithIds(
            room_id,
            requested_user,
            UpdateRoomRequest {
                room_name,
                room_type,
                price_per_period,
                description,
                amenities,
                image_url,
                extra_image_urls,
            },
        ) = value;
        Self {
            room_id,
            room_name,
            room_type,
            price_per_period,
            description,
            amenities,
            image_url,
            extra_image_urls,
            requested_user,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            items: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
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

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
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
        Self {
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

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailabilityResponse {
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_room_rejects_empty_name_and_zero_price() {
        let req: CreateRoomRequest = serde_json::from_str(
            r#"{
                "roomName": "",
                "roomType": "Single",
                "pricePerPeriod": 0,
                "description": "",
                "amenities": [],
                "imageUrl": null
            }"#,
        )
        .unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn update_room_allows_partial_payload() {
        let req: UpdateRoomRequest =
            serde_json::from_str(r#"{"pricePerPeriod": 12000}"#).unwrap();
        assert!(req.validate(&()).is_ok());
        assert_eq!(req.price_per_period, Some(12000));
        assert!(req.room_name.is_none());
    }
}
