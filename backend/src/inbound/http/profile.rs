//! Profile self-service handlers.
//!
//! ```text
//! GET /api/v1/profile
//! PUT /api/v1/profile {"name":"Jane","currentPassword":"..","newPassword":"..","confirmPassword":".."}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, ProfileUpdate, ProfileValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;

/// Body of `PUT /api/v1/profile`. An empty or absent `newPassword` leaves
/// the password unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(default)]
    #[schema(example = "Jane Employee")]
    pub name: String,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

impl TryFrom<ProfileRequest> for ProfileUpdate {
    type Error = ProfileValidationError;

    fn try_from(value: ProfileRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.name,
            value.current_password.as_deref(),
            value.new_password.as_deref(),
            value.confirm_password.as_deref(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub profile: UserResponse,
}

fn map_profile_validation_error(err: ProfileValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Caller's profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.profile.fetch_profile(&user_id).await?;
    Ok(web::Json(ProfileResponse {
        profile: UserResponse::from(&user),
    }))
}

/// Rename the caller and optionally change their password.
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let actor = state.require_actor(&session).await?;
    let update =
        ProfileUpdate::try_from(payload.into_inner()).map_err(map_profile_validation_error)?;
    let user = state.profile_command.update_profile(&actor, update).await?;
    Ok(web::Json(ProfileResponse {
        profile: UserResponse::from(&user),
    }))
}
