use axum::{
    extract::{RawForm, State},
    response::Response,
};
use fyyur_db::repo;
use fyyur_db::AppState;
use std::sync::Arc;

use super::{now, EntityId};
use crate::error::AppError;
use crate::flash::Flash;
use crate::forms::{artist_changes, FormData, Submission};
use crate::pages::{self, Page, Section};

/// GET /artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
    flash: Flash,
) -> Result<Page, AppError> {
    let artists = repo::artists::list(&state.db).await?;
    Ok(Page::new(
        "Artists",
        Section::Artists,
        pages::artists::list(&artists),
        flash,
    ))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    flash: Flash,
    RawForm(body): RawForm,
) -> Result<Page, AppError> {
    let form = FormData::parse(&body);
    let term = form.get("search_term").unwrap_or_default();
    let results = repo::artists::search(&state.db, term, now()).await?;
    Ok(Page::new(
        "Artist Search",
        Section::Artists,
        pages::artists::search_results(&results, term),
        flash,
    ))
}

/// GET /artists/{id}
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    flash: Flash,
) -> Result<Page, AppError> {
    let detail = repo::artists::detail(&state.db, id, now())
        .await?
        .ok_or(AppError::NotFound("artist"))?;
    Ok(Page::new(
        detail.artist.display_name().to_string(),
        Section::Artists,
        pages::artists::detail(&detail),
        flash,
    ))
}

/// GET /artists/create
pub async fn create_artist_form(flash: Flash) -> Page {
    Page::new("New Artist", Section::Artists, pages::artists::form(None), flash)
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<Arc<AppState>>,
    mut flash: Flash,
    RawForm(body): RawForm,
) -> Page {
    let form = FormData::parse(&body);
    let name = form.display_name();

    match repo::artists::create(&state.db, artist_changes(&form, Submission::Create)).await {
        Ok(_) => flash.push(format!("Artist {name} was successfully listed!")),
        Err(e) => {
            tracing::warn!(error = %e, name, "artist create failed");
            flash.push(format!("Artist {name} was unsuccessfully listed! because {e}"));
        }
    }

    Page::home(flash)
}

/// GET /artists/{id}/edit
pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    flash: Flash,
) -> Result<Page, AppError> {
    let artist = repo::artists::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("artist"))?;
    Ok(Page::new(
        "Edit Artist",
        Section::Artists,
        pages::artists::form(Some(&artist)),
        flash,
    ))
}

/// POST /artists/{id}/edit
pub async fn edit_artist_submission(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    mut flash: Flash,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    let existing = repo::artists::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("artist"))?;
    let form = FormData::parse(&body);
    let name = form
        .get("name")
        .unwrap_or(existing.display_name())
        .to_string();

    match repo::artists::update(&state.db, id, artist_changes(&form, Submission::Edit)).await {
        Ok(Some(_)) => flash.push(format!("Artist {name} was successfully edited!")),
        Ok(None) => return Err(AppError::NotFound("artist")),
        Err(e) => {
            tracing::warn!(error = %e, artist_id = id, "artist edit failed");
            flash.push(format!("Artist {name} was unsuccessfully edited! because {e}"));
        }
    }

    Ok(flash.redirect(&format!("/artists/{id}")))
}
