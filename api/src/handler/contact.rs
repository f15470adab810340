use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;

use crate::{
    extractor::AuthorizedUser,
    model::contact::{ContactsResponse, CreateContactRequest},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn create_contact(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateContactRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry.contact_repository().create(req.into()).await?;

    Ok(StatusCode::CREATED)
}

pub async fn show_contact_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ContactsResponse>> {
    if !user.is_admin() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .contact_repository()
        .find_all()
        .await
        .map(ContactsResponse::from)
        .map(Json)
}
