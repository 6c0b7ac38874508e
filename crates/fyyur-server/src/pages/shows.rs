use std::fmt::Write;

use fyyur_db::repo::shows::ShowListing;

use super::widgets::{image, text_input};
use super::{escape, format_datetime, DateFormat};

pub fn list(shows: &[ShowListing]) -> String {
    if shows.is_empty() {
        return r#"<p>No shows yet. <a href="/shows/create">List one</a>.</p>"#.to_string();
    }

    let mut out = String::from(r#"<div class="shows">"#);
    for s in shows {
        let _ = write!(
            out,
            r#"<div class="show">{img}<h4>{when}</h4><h5><a href="/artists/{artist_id}">{artist}</a></h5><p>playing at</p><h5><a href="/venues/{venue_id}">{venue}</a></h5></div>"#,
            img = image(s.artist_image_link.as_deref(), "Artist Image"),
            when = format_datetime(&s.start_time, DateFormat::Medium),
            artist_id = s.artist_id,
            artist = escape(&s.artist_name),
            venue_id = s.venue_id,
            venue = escape(&s.venue_name),
        );
    }
    out.push_str("</div>");
    out
}

/// New show form; `start_time` pre-fills the date field.
pub fn form(start_time: &str) -> String {
    format!(
        r#"<form method="post" action="/shows/create" class="form">
<h3>List a new show</h3>
{artist}
{venue}
{start}
<p><input type="submit" value="Create Show" class="button"></p>
</form>"#,
        artist = text_input("artist_id", "Artist ID", None),
        venue = text_input("venue_id", "Venue ID", None),
        start = text_input("start_time", "Start Time", Some(start_time)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_list_renders_medium_dates() {
        let html = list(&[ShowListing {
            id: 1,
            venue_id: 1,
            venue_name: "The Musical Hop".into(),
            artist_id: 4,
            artist_name: "Guns N Petals".into(),
            artist_image_link: Some("https://images.unsplash.com/photo-1549213783".into()),
            start_time: Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap().fixed_offset(),
        }]);
        assert!(html.contains("Tue 05, 21, 2019 9:30PM"));
        assert!(html.contains(r#"<a href="/venues/1">The Musical Hop</a>"#));
        assert!(html.contains("<img"));
    }

    #[test]
    fn test_empty_list() {
        assert!(list(&[]).contains("No shows yet"));
    }

    #[test]
    fn test_form_prefills_start_time() {
        let html = form("2035-04-01 20:00:00");
        assert!(html.contains(r#"value="2035-04-01 20:00:00""#));
        assert!(html.contains(r#"name="artist_id""#));
    }
}
