use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{adapters::identity::IdentityError, services::response::ServiceError};

/// A user record as the identity provider returns it.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Identity {
	pub id: String,
	pub username: Option<String>,
	pub image_url: String,
}

/// Caller context resolved once at the request boundary and handed to every operation.
#[derive(Clone, Debug, Default)]
pub struct RequestContext {
	pub identity: Option<Identity>,
	/// Set when a session token was presented but the provider could not be reached.
	unresolved: Option<Arc<IdentityError>>,
}

impl RequestContext {
	pub fn anonymous() -> Self {
		Self::default()
	}

	pub fn signed_in(identity: Identity) -> Self {
		Self {
			identity: Some(identity),
			unresolved: None,
		}
	}

	/// Public operations read this context as anonymous; private ones fail with the lookup error.
	pub fn unresolved(err: IdentityError) -> Self {
		Self {
			identity: None,
			unresolved: Some(Arc::new(err)),
		}
	}

	/// Private operations go through here.
	pub fn require_identity(&self) -> Result<&Identity, ServiceError> {
		if let Some(identity) = self.identity.as_ref() {
			return Ok(identity);
		}
		match &self.unresolved {
			Some(err) => Err(ServiceError::IdentityUnavailable(err.clone())),
			None => Err(ServiceError::Unauthorized),
		}
	}
}

impl From<Option<Identity>> for RequestContext {
	fn from(identity: Option<Identity>) -> Self {
		Self { identity, unresolved: None }
	}
}

#[cfg(test)]
mod test {
	use axum::http::StatusCode;

	use super::{Identity, RequestContext};
	use crate::{adapters::identity::IdentityError, services::response::ServiceError};

	#[test]
	fn test_anonymous_context_is_unauthorized() {
		let err = RequestContext::anonymous().require_identity().unwrap_err();
		assert!(matches!(err, ServiceError::Unauthorized));
	}

	#[test]
	fn test_unresolved_context_fails_private_operations_as_internal() {
		let context = RequestContext::unresolved(IdentityError::UnexpectedStatus {
			status: 503,
			body: "upstream down".to_string(),
		});

		assert!(context.identity.is_none());
		let err = context.require_identity().unwrap_err();
		assert!(matches!(err, ServiceError::IdentityUnavailable(_)));
		assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[test]
	fn test_signed_in_context_yields_identity() {
		let context = RequestContext::signed_in(Identity {
			id: "u1".to_string(),
			..Default::default()
		});
		assert_eq!(context.require_identity().unwrap().id, "u1");
	}
}
