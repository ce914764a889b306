use axum::{
	extract::State,
	response::{Html, IntoResponse, Redirect, Response},
	Extension, Form,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{
	dependencies::AppState,
	domain::identity::RequestContext,
	services::{
		handlers::PostHandler,
		page::FeedPage,
		response::ServiceError,
		widget::{CreatePostWizard, WidgetEffect},
	},
};

#[derive(Debug, Deserialize)]
pub struct SubmitForm {
	#[serde(default)]
	pub content: String,
}

pub async fn feed_page(
	State(state): State<AppState>,
	Extension(context): Extension<RequestContext>,
) -> Result<Html<String>, ServiceError> {
	render(&state, &context, &CreatePostWizard::new(), None).await
}

pub async fn submit_post(
	State(state): State<AppState>,
	Extension(context): Extension<RequestContext>,
	Form(form): Form<SubmitForm>,
) -> Result<Response, ServiceError> {
	let mut wizard = CreatePostWizard::with_input(form.content);
	let Some(command) = wizard.submit() else {
		return Ok(render(&state, &context, &wizard, None).await?.into_response());
	};

	let result = PostHandler::create(&state, &context, command).await;
	match wizard.settle(result) {
		WidgetEffect::Refresh => Ok(Redirect::to("/").into_response()),
		WidgetEffect::Notify(message) => Ok(render(&state, &context, &wizard, Some(&message)).await?.into_response()),
	}
}

async fn render(
	state: &AppState,
	context: &RequestContext,
	wizard: &CreatePostWizard,
	notice: Option<&str>,
) -> Result<Html<String>, ServiceError> {
	let latest = PostHandler::get_latest(state).await?;
	let entries = PostHandler::get_all(state).await?;

	let page = FeedPage {
		identity: context.identity.as_ref(),
		latest: latest.as_ref(),
		entries: &entries,
		wizard,
		notice,
		settings: &state.pages,
		now: Utc::now(),
	};
	Ok(Html(page.render()))
}
