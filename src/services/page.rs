use chrono::{DateTime, Utc};

use crate::{
	common::{html::escape, relative_time::from_now},
	dependencies::PageSettings,
	domain::{
		identity::Identity,
		post::{FeedEntry, Post},
	},
};

use super::widget::CreatePostWizard;

pub struct FeedPage<'a> {
	pub identity: Option<&'a Identity>,
	pub latest: Option<&'a Post>,
	pub entries: &'a [FeedEntry],
	pub wizard: &'a CreatePostWizard,
	pub notice: Option<&'a str>,
	pub settings: &'a PageSettings,
	/// Relative times are computed against this instant.
	pub now: DateTime<Utc>,
}

impl FeedPage<'_> {
	pub fn render(&self) -> String {
		let header = match self.identity {
			Some(user) => format!(
				r#"<span class="username">{}</span> <a class="sign-out" href="{}">Sign out</a>"#,
				escape(user.username.as_deref().unwrap_or_default()),
				escape(&self.settings.sign_out_url)
			),
			None => format!(r#"<a class="sign-in" href="{}">Sign in</a>"#, escape(&self.settings.sign_in_url)),
		};

		let latest = match self.latest {
			Some(post) => format!(r#"<p class="latest">Your most recent post: {}</p>"#, escape(&post.content)),
			None => r#"<p class="latest">You have no posts yet.</p>"#.to_string(),
		};

		let notice = self
			.notice
			.map(|message| format!(r#"<div class="toast" role="alert">{}</div>"#, escape(message)))
			.unwrap_or_default();

		let wizard = self.wizard.render(self.identity).unwrap_or_default();

		let feed: String = self.entries.iter().map(|entry| render_entry(entry, self.now)).collect();

		format!(
			r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Guestbook</title>
</head>
<body>
<main>
<header>{header}</header>
{latest}
{notice}
{wizard}
<ul class="feed">
{feed}</ul>
</main>
</body>
</html>
"#
		)
	}
}

fn render_entry(
	entry: &FeedEntry,
	now: DateTime<Utc>,
) -> String {
	let username = entry
		.author
		.username
		.as_deref()
		.map(|username| format!(r#"<span class="username">@{}</span>"#, escape(username)))
		.unwrap_or_default();

	format!(
		r#"<li class="entry">
  <img class="avatar" src="{avatar}" alt="Profile image" width="56" height="56">
  <div>
    <div class="meta">{username} <span class="time"> · {time}</span></div>
    <p class="content">{content}</p>
  </div>
</li>
"#,
		avatar = escape(&entry.author.image_url),
		time = from_now(entry.post.created_at, now),
		content = escape(&entry.post.content),
	)
}
