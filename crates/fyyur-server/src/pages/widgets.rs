use std::fmt::Write;

use fyyur_db::repo::SearchResults;

use super::escape;
use crate::forms::{GENRES, STATES};

/// Results of a name search; `base` is `/venues` or `/artists`.
pub(super) fn search_results(results: &SearchResults, term: &str, base: &str) -> String {
    let mut items = String::new();
    for r in &results.data {
        let _ = write!(
            items,
            r#"<li><a href="{base}/{id}">{name}</a> <small>{n} upcoming</small></li>"#,
            id = r.id,
            name = escape(&r.name),
            n = r.num_upcoming_shows,
        );
    }
    format!(
        r#"<h3>Number of search results for "{term}": {count}</h3><ul class="items">{items}</ul>"#,
        term = escape(term),
        count = results.count,
    )
}

pub(super) fn text_input(name: &str, label: &str, value: Option<&str>) -> String {
    format!(
        r#"<label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{}">"#,
        escape(value.unwrap_or_default())
    )
}

pub(super) fn state_select(selected: Option<&str>) -> String {
    let mut options = String::new();
    for state in STATES {
        let sel = if Some(*state) == selected { " selected" } else { "" };
        let _ = write!(options, r#"<option value="{state}"{sel}>{state}</option>"#);
    }
    format!(r#"<label for="state">State</label><select id="state" name="state">{options}</select>"#)
}

pub(super) fn genres_select<'a>(selected: impl IntoIterator<Item = &'a str>) -> String {
    let selected: Vec<&str> = selected.into_iter().collect();
    let mut options = String::new();
    for genre in GENRES {
        let sel = if selected.contains(genre) { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{g}"{sel}>{g}</option>"#,
            g = escape(genre)
        );
    }
    format!(
        r#"<label for="genres">Genres</label><select id="genres" name="genres" multiple>{options}</select>"#
    )
}

pub(super) fn checkbox(name: &str, label: &str, checked: bool) -> String {
    let checked = if checked { " checked" } else { "" };
    format!(
        r#"<label><input type="checkbox" name="{name}" value="y"{checked}> {label}</label>"#
    )
}

pub(super) fn genre_tags<'a>(genres: impl IntoIterator<Item = &'a str>) -> String {
    genres
        .into_iter()
        .map(|g| format!(r#"<span class="genre">{}</span>"#, escape(g)))
        .collect()
}

pub(super) fn image(src: Option<&str>, alt: &str) -> String {
    match src {
        Some(src) if !src.is_empty() => {
            format!(r#"<img src="{}" alt="{}">"#, escape(src), escape(alt))
        }
        _ => String::new(),
    }
}

/// Anchor for an http(s) URL. Other values, such as `javascript:` URLs,
/// render as plain text.
pub(super) fn link(href: &str, text: &str) -> String {
    if href.is_empty() {
        return String::new();
    }
    if !is_web_url(href) {
        return escape(text);
    }
    format!(
        r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
        escape(href),
        escape(text)
    )
}

fn is_web_url(href: &str) -> bool {
    url::Url::parse(href.trim()).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}
