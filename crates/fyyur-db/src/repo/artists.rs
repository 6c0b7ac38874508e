use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QueryTrait,
};
use serde::Serialize;

use super::shows::{split_by_time, upcoming_counts_by_artist, utc};
use super::{assign, assign_nullable, name_contains, name_matches, Listed, SearchResults};
use crate::entities::{artist, show, venue, Genres};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
}

/// A show on an artist's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: artist::Model,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Submitted artist fields. `None` means the field was not submitted.
#[derive(Debug, Clone, Default)]
pub struct ArtistChanges {
    pub name: Option<String>,
    pub genres: Option<Vec<String>>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: Option<bool>,
    pub seeking_description: Option<String>,
}

impl ArtistChanges {
    fn apply(self, row: &mut artist::ActiveModel) {
        assign_nullable(&mut row.name, self.name);
        assign(&mut row.genres, self.genres.map(Genres::from));
        assign_nullable(&mut row.city, self.city);
        assign_nullable(&mut row.state, self.state);
        assign_nullable(&mut row.phone, self.phone);
        assign(&mut row.website, self.website);
        assign_nullable(&mut row.image_link, self.image_link);
        assign(&mut row.facebook_link, self.facebook_link);
        assign(&mut row.seeking_venue, self.seeking_venue);
        assign(&mut row.seeking_description, self.seeking_description);
    }
}

/// Every artist, by name.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<ArtistSummary>, DbErr> {
    let artists = artist::Entity::find()
        .order_by_asc(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await?;

    Ok(artists
        .into_iter()
        .map(|a| ArtistSummary {
            id: a.id,
            name: a.name.unwrap_or_default(),
        })
        .collect())
}

/// Artists whose name contains `term`, ignoring case.
pub async fn search<C: ConnectionTrait>(
    db: &C,
    term: &str,
    now: DateTimeWithTimeZone,
) -> Result<SearchResults, DbErr> {
    let artists = artist::Entity::find()
        .apply_if(
            name_contains(db.get_database_backend(), artist::Column::Name, term),
            |query, cond| query.filter(cond),
        )
        .order_by_asc(artist::Column::Name)
        .all(db)
        .await?;
    let counts = upcoming_counts_by_artist(db, now).await?;

    Ok(SearchResults::new(
        artists
            .into_iter()
            .filter(|a| a.name.as_deref().is_some_and(|n| name_matches(n, term)))
            .map(|a| Listed {
                id: a.id,
                num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0),
                name: a.name.unwrap_or_default(),
            })
            .collect(),
    ))
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<artist::Model>, DbErr> {
    artist::Entity::find_by_id(id).one(db).await
}

/// Artist with the venues of their past and upcoming shows.
pub async fn detail<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTimeWithTimeZone,
) -> Result<Option<ArtistDetail>, DbErr> {
    let Some(artist) = find(db, id).await? else {
        return Ok(None);
    };

    let shows = artist
        .find_related(show::Entity)
        .find_also_related(venue::Entity)
        .order_by_asc(show::Column::Date)
        .all(db)
        .await?;

    let (past_shows, upcoming_shows) = split_by_time(
        shows
            .into_iter()
            .map(|(s, v)| {
                let (venue_name, venue_image_link) =
                    v.map(|v| (v.name, v.image_link)).unwrap_or_default();
                (
                    s.date,
                    ArtistShow {
                        venue_id: s.venue_id,
                        venue_name,
                        venue_image_link,
                        start_time: s.date,
                    },
                )
            })
            .collect(),
        utc(now),
    );

    Ok(Some(ArtistDetail {
        artist,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}

/// Insert an artist; NOT NULL columns left out of `changes` make the insert fail.
pub async fn create<C: ConnectionTrait>(db: &C, changes: ArtistChanges) -> Result<artist::Model, DbErr> {
    let mut row = artist::ActiveModel::new();
    changes.apply(&mut row);
    let model = row.insert(db).await?;

    tracing::info!(artist_id = model.id, name = model.display_name(), "artist listed");
    Ok(model)
}

/// Apply submitted fields to an existing artist. `Ok(None)` if it does not exist.
pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: i32,
    changes: ArtistChanges,
) -> Result<Option<artist::Model>, DbErr> {
    let Some(existing) = find(db, id).await? else {
        return Ok(None);
    };

    let mut row: artist::ActiveModel = existing.into();
    changes.apply(&mut row);
    let model = row.update(db).await?;

    tracing::info!(artist_id = model.id, "artist edited");
    Ok(Some(model))
}

#[cfg(test)]
impl ArtistChanges {
    pub(crate) fn sample(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            genres: Some(vec!["Rock n Roll".into()]),
            city: Some("San Francisco".into()),
            state: Some("CA".into()),
            phone: Some("326-123-5000".into()),
            website: Some("https://www.gunsnpetalsband.com".into()),
            image_link: Some("https://images.unsplash.com/photo-1549213783".into()),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
            seeking_venue: Some(true),
            seeking_description: Some("Looking for shows to perform at in the Bay Area".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::shows::{self, tests::at, ShowChanges};
    use crate::repo::venues::{self, VenueChanges};
    use crate::testing::test_db;
    use sea_orm::PaginatorTrait;

    #[tokio::test]
    async fn test_create_and_list_artists() {
        let db = test_db().await;
        create(&db, ArtistChanges::sample("The Wild Sax Band"))
            .await
            .unwrap();
        create(&db, ArtistChanges::sample("Guns N Petals"))
            .await
            .unwrap();

        let artists = list(&db).await.unwrap();
        let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Guns N Petals", "The Wild Sax Band"]);
    }

    #[tokio::test]
    async fn test_create_artist_without_optional_columns() {
        let db = test_db().await;
        let changes = ArtistChanges {
            name: None,
            city: None,
            image_link: None,
            ..ArtistChanges::sample("ignored")
        };
        let model = create(&db, changes).await.unwrap();
        assert!(model.name.is_none());
        assert!(model.city.is_none());
        assert_eq!(model.display_name(), "");
    }

    #[tokio::test]
    async fn test_create_artist_missing_website_fails() {
        let db = test_db().await;
        let changes = ArtistChanges {
            website: None,
            ..ArtistChanges::sample("Matt Quevedo")
        };
        assert!(create(&db, changes).await.is_err());
        assert_eq!(artist::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_artists() {
        let db = test_db().await;
        for name in ["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"] {
            create(&db, ArtistChanges::sample(name)).await.unwrap();
        }
        let now = at(2026, 1, 1, 0);

        let results = search(&db, "A", now).await.unwrap();
        assert_eq!(results.count, 3);

        let results = search(&db, "band", now).await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "The Wild Sax Band");

        create(&db, ArtistChanges::sample("ÉMILIE SIMON")).await.unwrap();
        let results = search(&db, "émilie", now).await.unwrap();
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "ÉMILIE SIMON");
    }

    #[tokio::test]
    async fn test_update_sets_seeking_venue() {
        let db = test_db().await;
        let original = create(&db, ArtistChanges::sample("Matt Quevedo"))
            .await
            .unwrap();
        assert!(original.seeking_venue);

        let changes = ArtistChanges {
            seeking_venue: Some(false),
            city: Some("New York".into()),
            ..Default::default()
        };
        let updated = update(&db, original.id, changes).await.unwrap().unwrap();
        assert!(!updated.seeking_venue);
        assert_eq!(updated.city.as_deref(), Some("New York"));
        assert_eq!(updated.name, original.name);
        assert_eq!(updated.genres, original.genres);
    }

    #[tokio::test]
    async fn test_detail_lists_venues() {
        let db = test_db().await;
        let artist = create(&db, ArtistChanges::sample("The Wild Sax Band"))
            .await
            .unwrap();
        let venue = venues::create(&db, VenueChanges::sample("Park Square Live Music & Coffee"))
            .await
            .unwrap();
        for start_time in [at(2019, 6, 15, 23), at(2035, 4, 15, 20)] {
            shows::create(
                &db,
                ShowChanges {
                    artist_id: artist.id,
                    venue_id: venue.id,
                    start_time,
                },
            )
            .await
            .unwrap();
        }

        let d = detail(&db, artist.id, at(2026, 1, 1, 0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(d.past_shows_count, 1);
        assert_eq!(d.upcoming_shows_count, 1);
        assert_eq!(d.upcoming_shows[0].venue_name, "Park Square Live Music & Coffee");
        assert_eq!(d.upcoming_shows[0].venue_id, venue.id);

        let counts = upcoming_counts_by_artist(&db, at(2026, 1, 1, 0)).await.unwrap();
        assert_eq!(counts.get(&artist.id), Some(&1));
    }
}
