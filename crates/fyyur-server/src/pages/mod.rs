//! Server-rendered HTML.
//!
//! Each submodule renders the body of one group of pages; [`Page`] wraps a
//! body in the shared layout together with the flash messages.

pub mod artists;
pub mod errors;
pub mod shows;
pub mod venues;

mod widgets;

use axum::{
    http::{header::SET_COOKIE, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, FixedOffset};
use std::fmt::Write;

use crate::flash::{self, Flash};

/// Which search box the navigation bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Venues,
    Artists,
    Shows,
}

/// A full HTML response.
#[derive(Debug)]
pub struct Page {
    status: StatusCode,
    title: String,
    section: Section,
    body: String,
    flash: Flash,
}

impl Page {
    pub fn new(title: impl Into<String>, section: Section, body: String, flash: Flash) -> Self {
        Self {
            status: StatusCode::OK,
            title: title.into(),
            section,
            body,
            flash,
        }
    }

    /// The home page, typically after a form submission.
    pub fn home(flash: Flash) -> Self {
        Self::new("Fyyur", Section::Home, home(), flash)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn render(&self) -> String {
        layout(&self.title, self.section, self.flash.messages(), &self.body)
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        let html = self.render();
        let mut resp = (self.status, Html(html)).into_response();
        if self.flash.came_from_cookie() {
            resp.headers_mut()
                .insert(SET_COOKIE, flash::clear_cookie());
        }
        resp
    }
}

/// Escape text for use in HTML content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
    /// `Tue 05, 21, 2019 9:30PM`
    Medium,
}

pub fn format_datetime(at: &DateTime<FixedOffset>, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    at.format(pattern).to_string()
}

pub fn home() -> String {
    r#"<div class="home">
<h1>Fyyur 🤘</h1>
<p class="lead">Book talent at the best venues.</p>
<p>
  <a class="button" href="/venues/create">Post a venue</a>
  <a class="button" href="/artists/create">Post an artist</a>
  <a class="button" href="/shows/create">Post a show</a>
</p>
</div>"#
        .to_string()
}

fn layout(title: &str, section: Section, messages: &[String], body: &str) -> String {
    let search = match section {
        Section::Venues => search_box("/venues/search", "Find a venue"),
        Section::Home | Section::Artists | Section::Shows => {
            search_box("/artists/search", "Find an artist")
        }
    };

    let mut alerts = String::new();
    for m in messages {
        let _ = write!(alerts, r#"<div class="alert">{}</div>"#, escape(m));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>
  body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; color: #222; }}
  nav {{ background: #1a1a1a; padding: 12px 20px; display: flex; gap: 16px; align-items: center; }}
  nav a {{ color: #e0e0e0; text-decoration: none; }}
  nav form {{ margin-left: auto; }}
  main {{ max-width: 960px; margin: 0 auto; padding: 20px; }}
  .alert {{ background: #fff3cd; border: 1px solid #ffe69c; padding: 10px; margin-bottom: 12px; }}
  .button {{ display: inline-block; padding: 6px 12px; border: 1px solid #4a9eff; color: #4a9eff; text-decoration: none; }}
  .genre {{ display: inline-block; background: #eee; padding: 2px 8px; margin-right: 4px; }}
  .show {{ display: inline-block; width: 200px; margin: 0 12px 12px 0; vertical-align: top; }}
  .show img, .detail img {{ max-width: 100%; }}
  label {{ display: block; margin-top: 10px; }}
</style>
</head>
<body>
<nav>
  <a href="/">🔥 Fyyur</a>
  <a href="/venues">Venues</a>
  <a href="/artists">Artists</a>
  <a href="/shows">Shows</a>
  {search}
</nav>
<main>
{alerts}
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    )
}

fn search_box(action: &str, placeholder: &str) -> String {
    format!(
        r#"<form method="post" action="{action}"><input type="search" name="search_term" placeholder="{placeholder}" aria-label="Search"></form>"#
    )
}
