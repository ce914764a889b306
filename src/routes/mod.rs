mod page;
mod post;

use axum::{
	middleware,
	routing::{get, post},
	Router,
};

use crate::{common::identity::resolve_identity, dependencies::AppState};

pub fn create_routes(state: AppState) -> Router {
	Router::new()
		.route("/", get(page::feed_page).post(page::submit_post))
		.route("/api/post.getAll", get(post::get_all))
		.route("/api/post.getLatest", get(post::get_latest))
		.route("/api/post.create", post(post::create))
		.layer(middleware::from_fn_with_state(state.clone(), resolve_identity))
		.with_state(state)
}

#[cfg(test)]
mod test {
	use std::sync::Arc;

	use async_trait::async_trait;
	use axum::{
		body::Body,
		http::{header, Method, Request, StatusCode},
		Router,
	};
	use serde_json::{json, Value};
	use tower::ServiceExt;

	use super::create_routes;
	use crate::{
		adapters::{
			identity::{IdentityError, IdentityProvider, StaticDirectory},
			repositories::InMemoryPostStore,
		},
		dependencies::{AppState, PageSettings},
		domain::identity::Identity,
	};

	const TOKEN: &str = "session-u1";

	async fn set_up() -> (Router, Arc<InMemoryPostStore>) {
		let directory = Arc::new(StaticDirectory::new());
		directory
			.add_user(Identity {
				id: "u1".to_string(),
				username: Some("ada".to_string()),
				image_url: "https://img.example/u1.png".to_string(),
			})
			.await;
		directory.add_session(TOKEN, "u1").await;

		with_identities(directory)
	}

	fn with_identities(identities: Arc<dyn IdentityProvider>) -> (Router, Arc<InMemoryPostStore>) {
		let store = Arc::new(InMemoryPostStore::new());
		let state = AppState {
			posts: store.clone(),
			identities,
			pages: PageSettings::default(),
		};
		(create_routes(state), store)
	}

	/// Provider whose session lookups always fail upstream.
	struct UnavailableDirectory;

	#[async_trait]
	impl IdentityProvider for UnavailableDirectory {
		async fn current_user(
			&self,
			_session_token: &str,
		) -> Result<Option<Identity>, IdentityError> {
			Err(IdentityError::UnexpectedStatus {
				status: 503,
				body: "service unavailable".to_string(),
			})
		}

		async fn get_user_list(
			&self,
			_user_ids: &[String],
			_limit: usize,
		) -> Result<Vec<Identity>, IdentityError> {
			Ok(Vec::new())
		}
	}

	fn create_request(
		token: Option<&str>,
		body: Value,
	) -> Request<Body> {
		let mut builder = Request::builder()
			.method(Method::POST)
			.uri("/api/post.create")
			.header(header::CONTENT_TYPE, "application/json");
		if let Some(token) = token {
			builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
		}
		builder.body(Body::from(body.to_string())).unwrap()
	}

	fn get(uri: &str) -> Request<Body> {
		Request::builder().uri(uri).body(Body::empty()).unwrap()
	}

	async fn read_json(response: axum::response::Response) -> Value {
		let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
		serde_json::from_slice(&bytes).unwrap()
	}

	async fn read_text(response: axum::response::Response) -> String {
		let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
		String::from_utf8(bytes.to_vec()).unwrap()
	}

	#[tokio::test]
	async fn test_latest_of_empty_store_is_null() {
		let (app, _) = set_up().await;

		let response = app.oneshot(get("/api/post.getLatest")).await.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(read_json(response).await, Value::Null);
	}

	#[tokio::test]
	async fn test_create_and_read_back_over_http() {
		'_given: {
			let (app, _) = set_up().await;

			'_when: {
				let response = app.clone().oneshot(create_request(Some(TOKEN), json!({ "content": "🎉" }))).await.unwrap();
				assert_eq!(response.status(), StatusCode::OK);
				let created = read_json(response).await;
				assert_eq!(created["content"], "🎉");
				assert_eq!(created["authorId"], "u1");
				assert!(created["id"].is_string());
				assert!(created["createdAt"].is_string());

				let latest = read_json(app.clone().oneshot(get("/api/post.getLatest")).await.unwrap()).await;
				assert_eq!(latest, created);

				let feed = read_json(app.oneshot(get("/api/post.getAll")).await.unwrap()).await;
				assert_eq!(feed.as_array().map(Vec::len), Some(1));
				assert_eq!(feed[0]["post"], created);
				assert_eq!(feed[0]["author"], json!({ "id": "u1", "username": "ada", "imageUrl": "https://img.example/u1.png" }));
			}
		}
	}

	#[tokio::test]
	async fn test_create_without_session_is_unauthorized() {
		let (app, store) = set_up().await;

		let response = app.oneshot(create_request(None, json!({ "content": "hi" }))).await.unwrap();

		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
		assert_eq!(read_json(response).await["error"]["code"], "UNAUTHORIZED");
		assert!(store.is_empty().await);
	}

	#[tokio::test]
	async fn test_unknown_session_token_is_anonymous() {
		let (app, store) = set_up().await;

		let response = app.oneshot(create_request(Some("forged"), json!({ "content": "hi" }))).await.unwrap();

		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
		assert!(store.is_empty().await);
	}

	#[tokio::test]
	async fn test_create_with_empty_content_reports_field_error() {
		let (app, store) = set_up().await;

		let response = app.oneshot(create_request(Some(TOKEN), json!({ "content": "" }))).await.unwrap();

		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		let body = read_json(response).await;
		assert_eq!(body["error"]["code"], "BAD_REQUEST");
		assert_eq!(body["error"]["fieldErrors"]["content"][0], "String must contain at least 1 character(s)");
		assert!(store.is_empty().await);
	}

	#[tokio::test]
	async fn test_create_with_malformed_body_reports_field_error() {
		let (app, _) = set_up().await;

		let request = Request::builder()
			.method(Method::POST)
			.uri("/api/post.create")
			.header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
			.body(Body::from("{not json"))
			.unwrap();
		let response = app.oneshot(request).await.unwrap();

		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		assert!(read_json(response).await["error"]["fieldErrors"]["input"].is_array());
	}

	#[tokio::test]
	async fn test_page_for_anonymous_visitor() {
		let (app, _) = set_up().await;

		let response = app.oneshot(get("/")).await.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		let html = read_text(response).await;
		assert!(html.contains("Sign in"));
		assert!(html.contains("You have no posts yet."));
		assert!(!html.contains("<form"));
	}

	#[tokio::test]
	async fn test_form_submission_redirects_to_refreshed_page() {
		'_given: {
			let (app, store) = set_up().await;

			'_when: {
				let request = Request::builder()
					.method(Method::POST)
					.uri("/")
					.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
					.header(header::COOKIE, format!("__session={TOKEN}"))
					.body(Body::from("content=hello+guestbook"))
					.unwrap();
				let response = app.clone().oneshot(request).await.unwrap();

				assert_eq!(response.status(), StatusCode::SEE_OTHER);
				assert_eq!(response.headers()[header::LOCATION], "/");
				assert_eq!(store.len().await, 1);

				let page = app
					.oneshot(Request::builder().uri("/").header(header::COOKIE, format!("__session={TOKEN}")).body(Body::empty()).unwrap())
					.await
					.unwrap();
				let html = read_text(page).await;
				assert!(html.contains("<form"));
				assert!(html.contains("@ada"));
				assert!(html.contains("hello guestbook"));
				assert!(html.contains("Your most recent post: hello guestbook"));
			}
		}
	}

	#[tokio::test]
	async fn test_anonymous_form_submission_shows_notice() {
		let (app, store) = set_up().await;

		let request = Request::builder()
			.method(Method::POST)
			.uri("/")
			.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
			.body(Body::from("content=sneaky"))
			.unwrap();
		let response = app.oneshot(request).await.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
		assert!(read_text(response).await.contains("Failed to post! Please try again later."));
		assert!(store.is_empty().await);
	}

	#[tokio::test]
	async fn test_public_reads_survive_identity_provider_outage() {
		let (app, _) = with_identities(Arc::new(UnavailableDirectory));

		for uri in ["/api/post.getLatest", "/api/post.getAll", "/"] {
			let request = Request::builder().uri(uri).header(header::COOKIE, format!("__session={TOKEN}")).body(Body::empty()).unwrap();
			let response = app.clone().oneshot(request).await.unwrap();
			assert_eq!(response.status(), StatusCode::OK, "{uri}");
		}

		let page = app
			.oneshot(Request::builder().uri("/").header(header::AUTHORIZATION, format!("Bearer {TOKEN}")).body(Body::empty()).unwrap())
			.await
			.unwrap();
		let html = read_text(page).await;
		assert!(html.contains("Sign in"));
		assert!(!html.contains("<form"));
	}

	#[tokio::test]
	async fn test_create_fails_when_identity_provider_is_down() {
		'_given: {
			let (app, store) = with_identities(Arc::new(UnavailableDirectory));

			'_when: {
				let response = app.clone().oneshot(create_request(Some(TOKEN), json!({ "content": "hi" }))).await.unwrap();
				assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
				assert_eq!(read_json(response).await["error"]["code"], "INTERNAL_SERVER_ERROR");

				let request = Request::builder()
					.method(Method::POST)
					.uri("/")
					.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
					.header(header::COOKIE, format!("__session={TOKEN}"))
					.body(Body::from("content=hi"))
					.unwrap();
				let response = app.oneshot(request).await.unwrap();
				assert_eq!(response.status(), StatusCode::OK);
				assert!(read_text(response).await.contains("Failed to post! Please try again later."));

				assert!(store.is_empty().await);
			}
		}
	}

	#[tokio::test]
	async fn test_create_without_session_is_unauthorized_during_outage() {
		let (app, _) = with_identities(Arc::new(UnavailableDirectory));

		let response = app.oneshot(create_request(None, json!({ "content": "hi" }))).await.unwrap();

		assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
	}
}
