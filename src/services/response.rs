use std::{collections::BTreeMap, sync::Arc};

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::adapters::{identity::IdentityError, repositories::RepositoryError};

/// Field name to the messages collected for it, in the order they were raised.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
	pub fn single(
		field: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		let mut errors = Self::default();
		errors.push(field, message);
		errors
	}

	pub fn push(
		&mut self,
		field: impl Into<String>,
		message: impl Into<String>,
	) {
		self.0.entry(field.into()).or_default().push(message.into());
	}

	pub fn first(
		&self,
		field: &str,
	) -> Option<&str> {
		self.0.get(field).and_then(|messages| messages.first()).map(String::as_str)
	}
}

impl From<ValidationErrors> for FieldErrors {
	fn from(value: ValidationErrors) -> Self {
		let mut errors = FieldErrors::default();
		for (field, field_errors) in value.field_errors() {
			for error in field_errors.iter() {
				let message = error.message.as_ref().map(|message| message.to_string()).unwrap_or_else(|| error.code.to_string());
				errors.push(field.to_string(), message);
			}
		}
		errors
	}
}

#[derive(Debug, Error)]
pub enum ServiceError {
	#[error("Invalid input: {0:?}")]
	Validation(FieldErrors),

	#[error("Sign in required")]
	Unauthorized,

	/// A post references an author the identity provider does not know about.
	#[error("Author {author_id} for post {post_id} not found")]
	MissingAuthor { post_id: Uuid, author_id: String },

	#[error(transparent)]
	Repository(#[from] RepositoryError),

	#[error(transparent)]
	Identity(#[from] IdentityError),

	/// A session token was presented but the provider lookup for it failed.
	#[error("Caller identity could not be resolved: {0}")]
	IdentityUnavailable(Arc<IdentityError>),
}

impl From<FieldErrors> for ServiceError {
	fn from(value: FieldErrors) -> Self {
		ServiceError::Validation(value)
	}
}

impl From<ValidationErrors> for ServiceError {
	fn from(value: ValidationErrors) -> Self {
		ServiceError::Validation(value.into())
	}
}

impl ServiceError {
	pub fn status(&self) -> StatusCode {
		match self {
			ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
			ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	pub fn code(&self) -> &'static str {
		match self {
			ServiceError::Validation(_) => "BAD_REQUEST",
			ServiceError::Unauthorized => "UNAUTHORIZED",
			_ => "INTERNAL_SERVER_ERROR",
		}
	}

	pub fn field_errors(&self) -> Option<&FieldErrors> {
		match self {
			ServiceError::Validation(errors) => Some(errors),
			_ => None,
		}
	}
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
	code: &'static str,
	message: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	field_errors: Option<&'a FieldErrors>,
}

impl IntoResponse for ServiceError {
	fn into_response(self) -> Response {
		let message = match &self {
			ServiceError::Validation(_) => "Invalid input",
			ServiceError::Unauthorized => "Sign in required",
			internal => {
				tracing::error!("Request failed: {}", internal);
				"Internal server error"
			}
		};
		let body = ErrorBody {
			code: self.code(),
			message,
			field_errors: self.field_errors(),
		};
		(self.status(), Json(json!({ "error": body }))).into_response()
	}
}
