use std::fmt::Write;

use fyyur_db::entities::artist;
use fyyur_db::repo::artists::{ArtistDetail, ArtistShow, ArtistSummary};
use fyyur_db::repo::SearchResults;

use super::widgets::{self, checkbox, genre_tags, genres_select, image, link, state_select, text_input};
use super::{escape, format_datetime, DateFormat};

pub fn list(artists: &[ArtistSummary]) -> String {
    let mut out = String::from(r#"<ul class="items">"#);
    for a in artists {
        let _ = write!(
            out,
            r#"<li><a href="/artists/{}">{}</a></li>"#,
            a.id,
            escape(&a.name)
        );
    }
    out.push_str("</ul>");
    out
}

pub fn search_results(results: &SearchResults, term: &str) -> String {
    widgets::search_results(results, term, "/artists")
}

pub fn detail(d: &ArtistDetail) -> String {
    let a = &d.artist;
    let seeking = if a.seeking_venue {
        format!(
            r#"<div class="seeking"><p><strong>Currently seeking performance venues</strong></p><p>{}</p></div>"#,
            escape(&a.seeking_description)
        )
    } else {
        r#"<p class="not-seeking">Not currently seeking performance venues</p>"#.to_string()
    };

    format!(
        r#"<div class="detail">
<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<div class="genres">{genres}</div>
<p>{city}, {state}</p>
<p>{phone}</p>
<p>{website}</p>
<p>{facebook}</p>
{seeking}
{image}
<p><a class="button" href="/artists/{id}/edit">Edit</a></p>
</div>
<h2>{upcoming_count} Upcoming Shows</h2>
<div class="shows">{upcoming}</div>
<h2>{past_count} Past Shows</h2>
<div class="shows">{past}</div>"#,
        id = a.id,
        name = escape(a.display_name()),
        genres = genre_tags(a.genres.iter()),
        city = escape(a.city.as_deref().unwrap_or_default()),
        state = escape(a.state.as_deref().unwrap_or_default()),
        phone = escape(a.phone.as_deref().unwrap_or_default()),
        website = link(&a.website, &a.website),
        facebook = link(&a.facebook_link, &a.facebook_link),
        image = image(a.image_link.as_deref(), "Artist Image"),
        upcoming_count = d.upcoming_shows_count,
        upcoming = show_cards(&d.upcoming_shows),
        past_count = d.past_shows_count,
        past = show_cards(&d.past_shows),
    )
}

fn show_cards(shows: &[ArtistShow]) -> String {
    let mut out = String::new();
    for s in shows {
        let _ = write!(
            out,
            r#"<div class="show">{img}<h5><a href="/venues/{id}">{name}</a></h5><h6>{when}</h6></div>"#,
            img = image(Some(s.venue_image_link.as_str()), "Show Venue Image"),
            id = s.venue_id,
            name = escape(&s.venue_name),
            when = format_datetime(&s.start_time, DateFormat::Full),
        );
    }
    out
}

/// New artist form, or the edit form pre-filled from `artist`.
pub fn form(artist: Option<&artist::Model>) -> String {
    let (heading, action) = match artist {
        Some(a) => (
            format!("Edit artist <em>{}</em>", escape(a.display_name())),
            format!("/artists/{}/edit", a.id),
        ),
        None => ("List a new artist".to_string(), "/artists/create".to_string()),
    };

    format!(
        r#"<form method="post" action="{action}" class="form">
<h3>{heading}</h3>
{name}
{city}
{state}
{phone}
{genres}
{facebook}
{image}
{website}
{seeking}
{description}
<p><input type="submit" value="{submit}" class="button"></p>
</form>"#,
        name = text_input("name", "Name", artist.and_then(|a| a.name.as_deref())),
        city = text_input("city", "City", artist.and_then(|a| a.city.as_deref())),
        state = state_select(artist.and_then(|a| a.state.as_deref())),
        phone = text_input("phone", "Phone", artist.and_then(|a| a.phone.as_deref())),
        genres = genres_select(artist.into_iter().flat_map(|a| a.genres.iter())),
        facebook = text_input(
            "facebook_link",
            "Facebook Link",
            artist.map(|a| a.facebook_link.as_str())
        ),
        image = text_input(
            "image_link",
            "Image Link",
            artist.and_then(|a| a.image_link.as_deref())
        ),
        website = text_input("website_link", "Website Link", artist.map(|a| a.website.as_str())),
        seeking = checkbox(
            "seeking_venue",
            "Looking for Venues",
            artist.is_some_and(|a| a.seeking_venue)
        ),
        description = text_input(
            "seeking_description",
            "Seeking Description",
            artist.map(|a| a.seeking_description.as_str())
        ),
        submit = if artist.is_some() { "Edit Artist" } else { "Create Artist" },
    )
}
