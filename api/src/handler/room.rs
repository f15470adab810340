use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;

use crate::{
    extractor::AuthorizedUser,
    model::room::{
        CreateRoomRequest, RoomAvailabilityResponse, RoomResponse, RoomsResponse,
        UpdateRoomRequest, UpdateRoomRequestWithIds,
    },
};
use kernel::model::{id::RoomId, room::event::DeleteRoom};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_room_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    registry
        .room_repository()
        .find_all()
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_room(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    let room = registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("room ({room_id}) was not found")))?;

    Ok(Json(room.into()))
}

pub async fn show_room_availability(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomAvailabilityResponse>> {
    let room = registry
        .room_repository()
        .find_by_id(room_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound(format!("room ({room_id}) was not found")))?;

    Ok(Json(RoomAvailabilityResponse {
        available: room.available,
    }))
}

pub async fn register_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    registry.room_repository().create(req.into()).await?;

    Ok(StatusCode::CREATED)
}

pub async fn update_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomRequest>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }
    req.validate(&())?;

    registry
        .room_repository()
        .update(UpdateRoomRequestWithIds::new(room_id, user.id(), req).into())
        .await?;

    Ok(StatusCode::OK)
}

pub async fn delete_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .room_repository()
        .delete(DeleteRoom {
            room_id,
            requested_user: user.id(),
        })
        .await?;

    Ok(StatusCode::OK)
}
