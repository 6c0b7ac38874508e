mod common;

use axum::http::StatusCode;
use common::{seed_artist, seed_venue, test_app_state, test_server};
use fyyur_db::entities::show;
use fyyur_db::sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn test_create_show() {
    let state = test_app_state().await;
    let server = test_server(state.clone());
    let petals = seed_artist(&state.db, "Guns N Petals").await;
    let hop = seed_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let resp = server
        .post("/shows/create")
        .form(&[
            ("artist_id", petals.id.to_string()),
            ("venue_id", hop.id.to_string()),
            ("start_time", "2019-05-21 21:30:00".to_string()),
        ])
        .await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    assert!(resp.text().contains("Show was successfully listed!"));
    assert_eq!(show::Entity::find().count(&state.db).await.unwrap(), 1);

    let body = server.get("/shows").await.text();
    assert!(body.contains("Tue 05, 21, 2019 9:30PM"), "{body}");
    assert!(body.contains("Guns N Petals"));
    assert!(body.contains("The Musical Hop"));
}

#[tokio::test]
async fn test_create_show_unknown_artist_fails() {
    let state = test_app_state().await;
    let server = test_server(state.clone());
    let hop = seed_venue(&state.db, "The Musical Hop", "San Francisco", "CA").await;

    let body = server
        .post("/shows/create")
        .form(&[
            ("artist_id", "999".to_string()),
            ("venue_id", hop.id.to_string()),
            ("start_time", "2035-04-01 20:00:00".to_string()),
        ])
        .await
        .text();

    assert!(body.contains("An error occurred. Show could not be listed. because"));
    assert_eq!(show::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_show_bad_input_fails() {
    let state = test_app_state().await;
    let server = test_server(state.clone());

    let body = server
        .post("/shows/create")
        .form(&[("artist_id", "one"), ("venue_id", "1"), ("start_time", "soon")])
        .await
        .text();
    assert!(body.contains("An error occurred. Show could not be listed. because invalid artist_id"));
    assert_eq!(show::Entity::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_show_form_and_empty_list() {
    let state = test_app_state().await;
    let server = test_server(state);

    let body = server.get("/shows/create").await.text();
    assert!(body.contains(r#"name="start_time""#));

    let body = server.get("/shows").await.text();
    assert!(body.contains("No shows yet"));
}
