use axum::{extract::State, routing::post, Json, Router};
use std::sync::Arc;

use super::commands::{login::handle as handle_login, LoginCommand, LoginResponse};
use super::store::CredentialStore;
use crate::error::ApiResult;

pub fn auth_routes() -> Router<Arc<CredentialStore>> {
    Router::new().route("/login", post(login))
}

/// Check credentials
///
/// POST /login {"email": "...", "password": "..."}
async fn login(
    State(store): State<Arc<CredentialStore>>,
    Json(command): Json<LoginCommand>,
) -> ApiResult<Json<LoginResponse>> {
    Ok(Json(handle_login(&store, command)?))
}
