use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::entities::{artist, show, venue};

/// A show as listed on the shows page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub id: i32,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

#[derive(Debug, Clone)]
pub struct ShowChanges {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTimeWithTimeZone,
}

/// All shows, earliest first.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>, DbErr> {
    let rows = show::Entity::find()
        .find_also_related(venue::Entity)
        .order_by_asc(show::Column::Date)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;

    let artist_ids: Vec<i32> = rows.iter().map(|(s, _)| s.artist_id).collect();
    let artists: HashMap<i32, artist::Model> = if artist_ids.is_empty() {
        HashMap::new()
    } else {
        artist::Entity::find()
            .filter(artist::Column::Id.is_in(artist_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };

    Ok(rows
        .into_iter()
        .map(|(s, v)| {
            let artist = artists.get(&s.artist_id);
            ShowListing {
                id: s.id,
                venue_id: s.venue_id,
                venue_name: v.map(|v| v.name).unwrap_or_default(),
                artist_id: s.artist_id,
                artist_name: artist
                    .map(|a| a.display_name().to_string())
                    .unwrap_or_default(),
                artist_image_link: artist.and_then(|a| a.image_link.clone()),
                start_time: s.date,
            }
        })
        .collect())
}

/// Insert a show. Unknown artist or venue ids surface as a foreign-key error.
pub async fn create<C: ConnectionTrait>(db: &C, changes: ShowChanges) -> Result<show::Model, DbErr> {
    let model = show::ActiveModel {
        date: Set(utc(changes.start_time)),
        artist_id: Set(changes.artist_id),
        venue_id: Set(changes.venue_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(
        show_id = model.id,
        artist_id = model.artist_id,
        venue_id = model.venue_id,
        "show listed"
    );
    Ok(model)
}

/// Number of shows after `now`, keyed by venue id. Venues without upcoming
/// shows are absent.
pub async fn upcoming_counts_by_venue<C: ConnectionTrait>(
    db: &C,
    now: DateTimeWithTimeZone,
) -> Result<HashMap<i32, i64>, DbErr> {
    upcoming_counts(db, show::Column::VenueId, now).await
}

/// Number of shows after `now`, keyed by artist id.
pub async fn upcoming_counts_by_artist<C: ConnectionTrait>(
    db: &C,
    now: DateTimeWithTimeZone,
) -> Result<HashMap<i32, i64>, DbErr> {
    upcoming_counts(db, show::Column::ArtistId, now).await
}

async fn upcoming_counts<C: ConnectionTrait>(
    db: &C,
    key: show::Column,
    now: DateTimeWithTimeZone,
) -> Result<HashMap<i32, i64>, DbErr> {
    let rows: Vec<(i32, i64)> = show::Entity::find()
        .select_only()
        .column(key)
        .column_as(Expr::col(show::Column::Id).count(), "upcoming")
        .filter(show::Column::Date.gt(utc(now)))
        .group_by(key)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows.into_iter().collect())
}

/// Normalize to a +00:00 offset so stored timestamps compare consistently.
pub(crate) fn utc(at: DateTimeWithTimeZone) -> DateTimeWithTimeZone {
    at.with_timezone(&Utc).fixed_offset()
}

/// Split `(start_time, item)` pairs into (past, upcoming) relative to `now`.
/// A show exactly at `now` counts as past.
pub(crate) fn split_by_time<T>(
    items: Vec<(DateTimeWithTimeZone, T)>,
    now: DateTimeWithTimeZone,
) -> (Vec<T>, Vec<T>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for (at, item) in items {
        if at > now {
            upcoming.push(item);
        } else {
            past.push(item);
        }
    }
    (past, upcoming)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::repo::artists::{self, ArtistChanges};
    use crate::repo::venues::{self, VenueChanges};
    use crate::testing::test_db;
    use chrono::{FixedOffset, TimeZone};

    pub(crate) fn at(y: i32, m: u32, d: u32, h: u32) -> DateTimeWithTimeZone {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap().fixed_offset()
    }

    async fn seed_pair(db: &sea_orm::DatabaseConnection) -> (i32, i32) {
        let venue = venues::create(db, VenueChanges::sample("The Musical Hop"))
            .await
            .unwrap();
        let artist = artists::create(db, ArtistChanges::sample("Guns N Petals"))
            .await
            .unwrap();
        (venue.id, artist.id)
    }

    #[tokio::test]
    async fn test_create_and_list_shows() {
        let db = test_db().await;
        let (venue_id, artist_id) = seed_pair(&db).await;

        for start_time in [at(2035, 4, 1, 20), at(2019, 5, 21, 21)] {
            create(
                &db,
                ShowChanges {
                    artist_id,
                    venue_id,
                    start_time,
                },
            )
            .await
            .unwrap();
        }

        let shows = list(&db).await.unwrap();
        assert_eq!(shows.len(), 2);
        assert_eq!(shows[0].start_time, at(2019, 5, 21, 21));
        assert_eq!(shows[0].venue_name, "The Musical Hop");
        assert_eq!(shows[0].artist_name, "Guns N Petals");
        assert_eq!(shows[1].start_time, at(2035, 4, 1, 20));
    }

    #[tokio::test]
    async fn test_create_show_unknown_venue_fails() {
        let db = test_db().await;
        let (_, artist_id) = seed_pair(&db).await;

        let result = create(
            &db,
            ShowChanges {
                artist_id,
                venue_id: 9999,
                start_time: at(2035, 1, 1, 20),
            },
        )
        .await;
        assert!(result.is_err());
        assert!(list(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upcoming_counts() {
        let db = test_db().await;
        let (venue_id, artist_id) = seed_pair(&db).await;
        for start_time in [at(2035, 4, 1, 20), at(2035, 4, 8, 20), at(2019, 5, 21, 21)] {
            create(
                &db,
                ShowChanges {
                    artist_id,
                    venue_id,
                    start_time,
                },
            )
            .await
            .unwrap();
        }

        let now = at(2026, 1, 1, 0);
        let by_venue = upcoming_counts_by_venue(&db, now).await.unwrap();
        assert_eq!(by_venue.get(&venue_id), Some(&2));
        let by_artist = upcoming_counts_by_artist(&db, now).await.unwrap();
        assert_eq!(by_artist.get(&artist_id), Some(&2));

        let far_future = at(2040, 1, 1, 0);
        assert!(upcoming_counts_by_venue(&db, far_future)
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_utc_normalizes_offset() {
        let paris = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = paris.with_ymd_and_hms(2035, 4, 1, 22, 0, 0).unwrap();
        let normalized = utc(local);
        assert_eq!(normalized, at(2035, 4, 1, 20));
        assert_eq!(normalized.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_split_by_time() {
        let now = at(2026, 1, 1, 0);
        let items = vec![
            (at(2019, 5, 21, 21), "past"),
            (now, "now"),
            (at(2035, 4, 1, 20), "upcoming"),
        ];
        let (past, upcoming) = split_by_time(items, now);
        assert_eq!(past, vec!["past", "now"]);
        assert_eq!(upcoming, vec!["upcoming"]);
    }
}
