use axum::{body::Bytes, extract::State, Extension, Json};
use serde_json::Value;

use crate::{
	dependencies::AppState,
	domain::{
		identity::RequestContext,
		post::{commands::CreatePost, FeedEntry, Post},
	},
	services::{
		handlers::PostHandler,
		response::{FieldErrors, ServiceError},
	},
};

pub async fn get_all(State(state): State<AppState>) -> Result<Json<Vec<FeedEntry>>, ServiceError> {
	Ok(Json(PostHandler::get_all(&state).await?))
}

pub async fn get_latest(State(state): State<AppState>) -> Result<Json<Option<Post>>, ServiceError> {
	Ok(Json(PostHandler::get_latest(&state).await?))
}

pub async fn create(
	State(state): State<AppState>,
	Extension(context): Extension<RequestContext>,
	body: Bytes,
) -> Result<Json<Post>, ServiceError> {
	// Anonymous callers are turned away before their input is looked at
	context.require_identity()?;

	let value: Value = serde_json::from_slice(&body).map_err(|err| FieldErrors::single("input", format!("Invalid JSON: {err}")))?;
	let input = CreatePost::try_from(value)?;

	Ok(Json(PostHandler::create(&state, &context, input).await?))
}
