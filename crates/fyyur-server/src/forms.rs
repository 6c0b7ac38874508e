//! Decoding of submitted HTML forms into repository change sets.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use fyyur_db::repo::artists::ArtistChanges;
use fyyur_db::repo::shows::ShowChanges;
use fyyur_db::repo::venues::VenueChanges;
use thiserror::Error;

/// Genre choices offered by the venue and artist forms.
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR",
    "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("missing field: {0}")]
    Missing(&'static str),

    #[error("invalid {field}: {value:?}")]
    Invalid { field: &'static str, value: String },
}

/// An `application/x-www-form-urlencoded` body, keeping repeated keys.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(body: &[u8]) -> Self {
        Self {
            pairs: url::form_urlencoded::parse(body).into_owned().collect(),
        }
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, name: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    fn owned(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    /// Name as shown in flash messages.
    pub fn display_name(&self) -> &str {
        self.get("name").unwrap_or("None")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Create,
    Edit,
}

/// Genres: a create always stores a list, an edit without genres keeps the
/// stored ones.
fn genres(form: &FormData, submission: Submission) -> Option<Vec<String>> {
    let values = form.get_all("genres");
    match submission {
        Submission::Create => Some(values),
        Submission::Edit if values.is_empty() => None,
        Submission::Edit => Some(values),
    }
}

pub fn venue_changes(form: &FormData, submission: Submission) -> VenueChanges {
    VenueChanges {
        name: form.owned("name"),
        genres: genres(form, submission),
        address: form.owned("address"),
        city: form.owned("city"),
        state: form.owned("state"),
        phone: form.owned("phone"),
        website: form.owned("website_link"),
        seeking_talent: Some(form.has("seeking_talent")),
        seeking_description: form.owned("seeking_description"),
        image_link: form.owned("image_link"),
        facebook_link: form.owned("facebook_link"),
    }
}

pub fn artist_changes(form: &FormData, submission: Submission) -> ArtistChanges {
    ArtistChanges {
        name: form.owned("name"),
        genres: genres(form, submission),
        city: form.owned("city"),
        state: form.owned("state"),
        phone: form.owned("phone"),
        website: form.owned("website_link"),
        image_link: form.owned("image_link"),
        facebook_link: form.owned("facebook_link"),
        seeking_venue: Some(form.has("seeking_venue")),
        seeking_description: form.owned("seeking_description"),
    }
}

pub fn show_changes(form: &FormData) -> Result<ShowChanges, FormError> {
    let artist_id = parse_id(form, "artist_id")?;
    let venue_id = parse_id(form, "venue_id")?;
    let raw = form
        .get("start_time")
        .ok_or(FormError::Missing("start_time"))?;
    let start_time = parse_start_time(raw).ok_or_else(|| FormError::Invalid {
        field: "start_time",
        value: raw.to_string(),
    })?;

    Ok(ShowChanges {
        artist_id,
        venue_id,
        start_time,
    })
}

fn parse_id(form: &FormData, field: &'static str) -> Result<i32, FormError> {
    let raw = form.get(field).ok_or(FormError::Missing(field))?;
    raw.trim().parse().map_err(|_| FormError::Invalid {
        field,
        value: raw.to_string(),
    })
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, the `datetime-local` input format, or RFC 3339.
/// Times without an offset are taken as UTC.
pub fn parse_start_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Default value of the start time field: now, to the second.
pub fn default_start_time() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
