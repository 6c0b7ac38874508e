use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QueryTrait,
};
use serde::Serialize;
use std::collections::HashMap;

use super::shows::{split_by_time, upcoming_counts_by_venue, utc};
use super::{assign, name_contains, name_matches, Listed, SearchResults};
use crate::entities::{artist, show, venue, Genres};

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<Listed>,
}

/// A show on a venue's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: venue::Model,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Submitted venue fields. `None` means the field was not submitted.
#[derive(Debug, Clone, Default)]
pub struct VenueChanges {
    pub name: Option<String>,
    pub genres: Option<Vec<String>>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: Option<bool>,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
}

impl VenueChanges {
    fn apply(self, row: &mut venue::ActiveModel) {
        assign(&mut row.name, self.name);
        assign(&mut row.genres, self.genres.map(Genres::from));
        assign(&mut row.address, self.address);
        assign(&mut row.city, self.city);
        assign(&mut row.state, self.state);
        assign(&mut row.phone, self.phone);
        assign(&mut row.website, self.website);
        assign(&mut row.seeking_talent, self.seeking_talent);
        assign(&mut row.seeking_description, self.seeking_description);
        assign(&mut row.image_link, self.image_link);
        assign(&mut row.facebook_link, self.facebook_link);
    }
}

/// All venues grouped by area, with upcoming show counts.
pub async fn list_by_area<C: ConnectionTrait>(
    db: &C,
    now: DateTimeWithTimeZone,
) -> Result<Vec<Area>, DbErr> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::State)
        .order_by_asc(venue::Column::City)
        .order_by_asc(venue::Column::Name)
        .all(db)
        .await?;
    let counts = upcoming_counts_by_venue(db, now).await?;

    Ok(group_by_area(venues, &counts))
}

/// One area per distinct (city, state), in first-seen order.
pub fn group_by_area(venues: Vec<venue::Model>, upcoming: &HashMap<i32, i64>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for v in venues {
        let listed = Listed {
            id: v.id,
            name: v.name,
            num_upcoming_shows: upcoming.get(&v.id).copied().unwrap_or(0),
        };
        let key = (v.city, v.state);
        match index.get(&key) {
            Some(&i) => areas[i].venues.push(listed),
            None => {
                index.insert(key.clone(), areas.len());
                areas.push(Area {
                    city: key.0,
                    state: key.1,
                    venues: vec![listed],
                });
            }
        }
    }

    areas
}

/// Venues whose name contains `term`, ignoring case.
pub async fn search<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTimeWithTimeZone,
) -> Result<SearchResults, DbErr> {
    let venues = venue::Entity::find()
        .apply_if(
            name_contains(db.get_database_backend(), venue::Column::Name, term),
            |query, cond| query.filter(cond),
        )
        .order_by_asc(venue::Column::Name)
        .all(db)
        .await?;
    let counts = upcoming_counts_by_venue(db, now).await?;

    Ok(SearchResults::new(
        venues
            .into_iter()
            .filter(|v| name_matches(&v.name, term))
            .map(|v| Listed {
                id: v.id,
                num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
                name: v.name,
            })
            .collect(),
    ))
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<venue::Model>, DbErr> {
    venue::Entity::find_by_id(id).one(db).await
}

/// Venue with its past and upcoming shows.
pub async fn detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTimeWithTimeZone,
) -> Result<Option<VenueDetail>, DbErr> {
    let Some(venue) = find(db, id).await? else {
        return Ok(None);
    };

    let shows = venue
        .find_related(show::Entity)
        .find_also_related(artist::Entity)
        .order_by_asc(show::Column::Date)
        .all(db)
        .await?;

    let (past_shows, upcoming_shows) = split_by_time(
        shows
            .into_iter()
            .map(|(s, a)| {
                (
                    s.date,
                    VenueShow {
                        artist_id: s.artist_id,
                        artist_name: a
                            .as_ref()
                            .map(|a| a.display_name().to_string())
                            .unwrap_or_default(),
                        artist_image_link: a.and_then(|a| a.image_link),
                        start_time: s.date,
                    },
                )
            })
            .collect(),
        utc(now),
    );

    Ok(Some(VenueDetail {
        venue,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// Insert a venue. Fields left out of `changes` stay unset, so the database
/// rejects a row missing any NOT NULL column.
pub async fn create<C: ConnectionTrait>(db: &C, changes: VenueChanges) -> Result<venue::Model, DbErr> {
    let mut row = venue::ActiveModel::new();
    changes.apply(&mut row);
    let model = row.insert(db).await?;

    tracing::info!(venue_id = model.id, name = %model.name, "venue listed");
    Ok(model)
}

/// Apply submitted fields to an existing venue. `Ok(None)` if it does not exist.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    changes: VenueChanges,
) -> Result<Option<venue::Model>, DbErr> {
    let Some(existing) = find(db, id).await? else {
        return Ok(None);
    };

    let mut row: venue::ActiveModel = existing.into();
    changes.apply(&mut row);
    let model = row.update(db).await?;

    tracing::info!(venue_id = model.id, "venue edited");
    Ok(Some(model))
}

/// Delete a venue and, through the foreign key, its shows.
/// Returns the deleted row, or `Ok(None)` if it did not exist.
pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<venue::Model>, DbErr> {
    let Some(existing) = find(db, id).await? else {
        return Ok(None);
    };

    existing.clone().delete(db).await?;

    tracing::info!(venue_id = id, "venue deleted");
    Ok(Some(existing))
}

#[cfg(test)]
impl VenueChanges {
    /// Every required field populated.
    pub(crate) fn sample(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            genres: Some(vec!["Jazz".into(), "Reggae".into()]),
            address: Some("1015 Folsom Street".into()),
            city: Some("San Francisco".into()),
            state: Some("CA".into()),
            phone: Some("123-123-1234".into()),
            website: Some("https://www.themusicalhop.com".into()),
            seeking_talent: Some(true),
            seeking_description: Some("We are on the lookout for a local artist".into()),
            image_link: Some("https://images.unsplash.com/photo-1543900694".into()),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".into()),
        }
    }

    pub(crate) fn in_area(mut self, city: &str, state: &str) -> Self {
        self.city = Some(city.to_string());
        self.state = Some(state.to_string());
        self
    }
}
