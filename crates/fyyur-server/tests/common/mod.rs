// Shared test utilities for integration tests
#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Duration, Utc};
use fyyur_db::entities::{artist, venue};
use fyyur_db::repo::{self, artists::ArtistChanges, shows::ShowChanges, venues::VenueChanges};
use fyyur_db::sea_orm::{Database, DatabaseConnection};
use fyyur_db::AppState;
use fyyur_migration::{Migrator, MigratorTrait};
use std::sync::Arc;

/// AppState over a fresh, migrated in-memory SQLite database
pub async fn test_app_state() -> Arc<AppState> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations");
    Arc::new(AppState { db })
}

pub fn test_server(state: Arc<AppState>) -> TestServer {
    TestServer::new(fyyur_server::router(state)).expect("test server")
}

/// Every field the venue form submits.
pub fn venue_form(name: &str, city: &str, state: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("city", city.to_string()),
        ("state", state.to_string()),
        ("address", "1015 Folsom Street".to_string()),
        ("phone", "123-123-1234".to_string()),
        ("genres", "Jazz".to_string()),
        ("genres", "Reggae".to_string()),
        ("facebook_link", "https://www.facebook.com/TheMusicalHop".to_string()),
        ("image_link", "https://images.unsplash.com/photo-1543900694".to_string()),
        ("website_link", "https://www.themusicalhop.com".to_string()),
        ("seeking_talent", "y".to_string()),
        ("seeking_description", "Looking for a local artist".to_string()),
    ]
}

pub async fn seed_venue(db: &DatabaseConnection, name: &str, city: &str, state: &str) -> venue::Model {
    repo::venues::create(
        db,
        VenueChanges {
            name: Some(name.to_string()),
            genres: Some(vec!["Jazz".to_string()]),
            address: Some("1015 Folsom Street".to_string()),
            city: Some(city.to_string()),
            state: Some(state.to_string()),
            phone: Some("123-123-1234".to_string()),
            website: Some("https://www.themusicalhop.com".to_string()),
            seeking_talent: Some(false),
            seeking_description: Some(String::new()),
            image_link: Some("https://images.unsplash.com/photo-1543900694".to_string()),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
        },
    )
    .await
    .expect("seed venue")
}

pub async fn seed_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    repo::artists::create(
        db,
        ArtistChanges {
            name: Some(name.to_string()),
            genres: Some(vec!["Rock n Roll".to_string()]),
            city: Some("San Francisco".to_string()),
            state: Some("CA".to_string()),
            phone: Some("326-123-5000".to_string()),
            website: Some("https://www.gunsnpetalsband.com".to_string()),
            image_link: None,
            facebook_link: Some("https://www.facebook.com/GunsNPetals".to_string()),
            seeking_venue: Some(true),
            seeking_description: Some("Looking for shows in the Bay Area".to_string()),
        },
    )
    .await
    .expect("seed artist")
}

/// A show `days` from now; negative for the past.
pub async fn seed_show(db: &DatabaseConnection, artist_id: i32, venue_id: i32, days: i64) {
    repo::shows::create(
        db,
        ShowChanges {
            artist_id,
            venue_id,
            start_time: (Utc::now() + Duration::days(days)).fixed_offset(),
        },
    )
    .await
    .expect("seed show");
}
