use std::fmt::Write;

use fyyur_db::entities::venue;
use fyyur_db::repo::venues::{Area, VenueDetail, VenueShow};
use fyyur_db::repo::SearchResults;

use super::widgets::{self, checkbox, genre_tags, genres_select, image, link, state_select, text_input};
use super::{escape, format_datetime, DateFormat};

pub fn areas(areas: &[Area]) -> String {
    let mut out = String::new();
    for area in areas {
        let _ = write!(
            out,
            r#"<h3>{}, {}</h3><ul class="items">"#,
            escape(&area.city),
            escape(&area.state)
        );
        for v in &area.venues {
            let _ = write!(
                out,
                r#"<li><a href="/venues/{}">{}</a> <small>{} upcoming</small></li>"#,
                v.id,
                escape(&v.name),
                v.num_upcoming_shows
            );
        }
        out.push_str("</ul>");
    }
    if areas.is_empty() {
        out.push_str(r#"<p>No venues yet. <a href="/venues/create">List one</a>.</p>"#);
    }
    out
}

pub fn search_results(results: &SearchResults, term: &str) -> String {
    widgets::search_results(results, term, "/venues")
}

pub fn detail(d: &VenueDetail) -> String {
    let v = &d.venue;
    let seeking = if v.seeking_talent {
        format!(
            r#"<div class="seeking"><p><strong>Currently seeking talent</strong></p><p>{}</p></div>"#,
            escape(&v.seeking_description)
        )
    } else {
        r#"<p class="not-seeking">Not currently seeking talent</p>"#.to_string()
    };

    format!(
        r#"<div class="detail">
<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<div class="genres">{genres}</div>
<p>{address}</p>
<p>{city}, {state}</p>
<p>{phone}</p>
<p>{website}</p>
<p>{facebook}</p>
{seeking}
{image}
<p>
  <a class="button" href="/venues/{id}/edit">Edit</a>
  <form method="post" action="/venues/{id}" style="display:inline"><button type="submit">Delete</button></form>
</p>
</div>
<h2>{upcoming_count} Upcoming Shows</h2>
<div class="shows">{upcoming}</div>
<h2>{past_count} Past Shows</h2>
<div class="shows">{past}</div>"#,
        id = v.id,
        name = escape(&v.name),
        genres = genre_tags(v.genres.iter()),
        address = escape(&v.address),
        city = escape(&v.city),
        state = escape(&v.state),
        phone = escape(&v.phone),
        website = link(&v.website, &v.website),
        facebook = link(&v.facebook_link, &v.facebook_link),
        image = image(Some(v.image_link.as_str()), "Venue Image"),
        upcoming_count = d.upcoming_shows_count,
        upcoming = show_cards(&d.upcoming_shows),
        past_count = d.past_shows_count,
        past = show_cards(&d.past_shows),
    )
}

fn show_cards(shows: &[VenueShow]) -> String {
    let mut out = String::new();
    for s in shows {
        let _ = write!(
            out,
            r#"<div class="show">{img}<h5><a href="/artists/{id}">{name}</a></h5><h6>{when}</h6></div>"#,
            img = image(s.artist_image_link.as_deref(), "Show Artist Image"),
            id = s.artist_id,
            name = escape(&s.artist_name),
            when = format_datetime(&s.start_time, DateFormat::Full),
        );
    }
    out
}

/// New venue form, or the edit form pre-filled from `venue`.
pub fn form(venue: Option<&venue::Model>) -> String {
    let (heading, action) = match venue {
        Some(v) => (
            format!("Edit venue <em>{}</em>", escape(&v.name)),
            format!("/venues/{}/edit", v.id),
        ),
        None => ("List a new venue".to_string(), "/venues/create".to_string()),
    };

    format!(
        r#"<form method="post" action="{action}" class="form">
<h3>{heading}</h3>
{name}
{city}
{state}
{address}
{phone}
{genres}
{facebook}
{image}
{website}
{seeking}
{description}
<p><input type="submit" value="{submit}" class="button"></p>
</form>"#,
        name = text_input("name", "Name", venue.map(|v| v.name.as_str())),
        city = text_input("city", "City", venue.map(|v| v.city.as_str())),
        state = state_select(venue.map(|v| v.state.as_str())),
        address = text_input("address", "Address", venue.map(|v| v.address.as_str())),
        phone = text_input("phone", "Phone", venue.map(|v| v.phone.as_str())),
        genres = genres_select(venue.into_iter().flat_map(|v| v.genres.iter())),
        facebook = text_input(
            "facebook_link",
            "Facebook Link",
            venue.map(|v| v.facebook_link.as_str())
        ),
        image = text_input("image_link", "Image Link", venue.map(|v| v.image_link.as_str())),
        website = text_input("website_link", "Website Link", venue.map(|v| v.website.as_str())),
        seeking = checkbox(
            "seeking_talent",
            "Looking for Talent",
            venue.is_some_and(|v| v.seeking_talent)
        ),
        description = text_input(
            "seeking_description",
            "Seeking Description",
            venue.map(|v| v.seeking_description.as_str())
        ),
        submit = if venue.is_some() { "Edit Venue" } else { "Create Venue" },
    )
}
