use crate::{
	common::html::escape,
	domain::{
		identity::Identity,
		post::{commands::CreatePost, Post},
	},
};

use super::response::ServiceError;

/// Shown when a failure carries no message for the `content` field.
pub const GENERIC_FAILURE: &str = "Failed to post! Please try again later.";

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum WidgetState {
	#[default]
	Idle,
	Submitting,
	Error(String),
}

/// What the page has to do once a submission settles.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum WidgetEffect {
	/// Re-run the whole feed read. Success never appends locally.
	Refresh,
	Notify(String),
}

/// The post submission form.
#[derive(Clone, Debug, Default)]
pub struct CreatePostWizard {
	input: String,
	state: WidgetState,
}

impl CreatePostWizard {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_input(input: impl Into<String>) -> Self {
		Self {
			input: input.into(),
			state: WidgetState::Idle,
		}
	}

	pub fn set_input(
		&mut self,
		input: impl Into<String>,
	) {
		self.input = input.into();
	}

	pub fn input(&self) -> &str {
		&self.input
	}

	pub fn state(&self) -> &WidgetState {
		&self.state
	}

	pub fn is_loading(&self) -> bool {
		self.state == WidgetState::Submitting
	}

	/// Starts a submission. Nothing is sent for an empty input or while one is already pending.
	pub fn submit(&mut self) -> Option<CreatePost> {
		if self.is_loading() || self.input.is_empty() {
			return None;
		}
		self.state = WidgetState::Submitting;
		Some(CreatePost::new(self.input.clone()))
	}

	pub fn settle(
		&mut self,
		result: Result<Post, ServiceError>,
	) -> WidgetEffect {
		match result {
			Ok(_) => {
				self.input.clear();
				self.state = WidgetState::Idle;
				WidgetEffect::Refresh
			}
			Err(err) => {
				tracing::error!("[CREATE_POST_ERROR] {:?}", err);
				let message = err.field_errors().and_then(|errors| errors.first("content")).unwrap_or(GENERIC_FAILURE).to_string();
				self.state = WidgetState::Error(message.clone());
				WidgetEffect::Notify(message)
			}
		}
	}

	/// Form markup for a signed-in caller. Anonymous callers get nothing.
	pub fn render(
		&self,
		identity: Option<&Identity>,
	) -> Option<String> {
		let user = identity?;
		let button = if self.is_loading() { "Submitting..." } else { "" };
		let disabled = if self.is_loading() { " disabled" } else { "" };
		Some(format!(
			r#"<form class="wizard" method="post" action="/">
  <img class="avatar" src="{avatar}" alt="Profile image" width="64" height="64">
  <input type="text" name="content" placeholder="Type some emojis!" value="{input}" autocomplete="off" required>
  <button type="submit"{disabled}>{button}</button>
</form>"#,
			avatar = escape(&user.image_url),
			input = escape(&self.input),
		))
	}
}
