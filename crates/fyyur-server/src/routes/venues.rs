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
use crate::forms::{venue_changes, FormData, Submission};
use crate::pages::{self, Page, Section};

/// GET /venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
    flash: Flash,
) -> Result<Page, AppError> {
    let areas = repo::venues::list_by_area(&state.db, now()).await?;
    Ok(Page::new(
        "Venues",
        Section::Venues,
        pages::venues::areas(&areas),
        flash,
    ))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    flash: Flash,
    RawForm(body): RawForm,
) -> Result<Page, AppError> {
    let form = FormData::parse(&body);
    let term = form.get("search_term").unwrap_or_default();
    let results = repo::venues::search(&state.db, term, now()).await?;
    Ok(Page::new(
        "Venue Search",
        Section::Venues,
        pages::venues::search_results(&results, term),
        flash,
    ))
}

/// GET /venues/{id}
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    flash: Flash,
) -> Result<Page, AppError> {
    let detail = repo::venues::detail(&state.db, id, now())
        .await?
        .ok_or(AppError::NotFound("venue"))?;
    Ok(Page::new(
        detail.venue.name.clone(),
        Section::Venues,
        pages::venues::detail(&detail),
        flash,
    ))
}

/// GET /venues/create
pub async fn create_venue_form(flash: Flash) -> Page {
    Page::new("New Venue", Section::Venues, pages::venues::form(None), flash)
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<Arc<AppState>>,
    mut flash: Flash,
    RawForm(body): RawForm,
) -> Page {
    let form = FormData::parse(&body);
    let name = form.display_name();

    match repo::venues::create(&state.db, venue_changes(&form, Submission::Create)).await {
        Ok(_) => flash.push(format!("Venue {name} was successfully listed!")),
        Err(e) => {
            tracing::warn!(error = %e, name, "venue create failed");
            flash.push(format!("Venue {name} was unsuccessfully listed! because {e}"));
        }
    }

    Page::home(flash)
}

/// POST|DELETE /venues/{id}
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    mut flash: Flash,
) -> Result<Response, AppError> {
    let existing = repo::venues::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("venue"))?;
    let name = existing.name;

    match repo::venues::delete(&state.db, id).await {
        Ok(Some(_)) => flash.push(format!("Venue {name} was successfully deleted!")),
        Ok(None) => return Err(AppError::NotFound("venue")),
        Err(e) => {
            tracing::warn!(error = %e, venue_id = id, "venue delete failed");
            flash.push(format!("Venue {name} was unsuccessfully deleted! because {e}"));
        }
    }

    Ok(flash.no_content())
}

/// GET /venues/{id}/edit
pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    flash: Flash,
) -> Result<Page, AppError> {
    let venue = repo::venues::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("venue"))?;
    Ok(Page::new(
        "Edit Venue",
        Section::Venues,
        pages::venues::form(Some(&venue)),
        flash,
    ))
}

/// POST /venues/{id}/edit
pub async fn edit_venue_submission(
    State(state): State<Arc<AppState>>,
    EntityId(id): EntityId,
    mut flash: Flash,
    RawForm(body): RawForm,
) -> Result<Response, AppError> {
    let existing = repo::venues::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("venue"))?;
    let form = FormData::parse(&body);
    let name = form.get("name").unwrap_or(existing.name.as_str()).to_string();

    match repo::venues::update(&state.db, id, venue_changes(&form, Submission::Edit)).await {
        Ok(Some(_)) => flash.push(format!("Venue {name} was successfully edited!")),
        Ok(None) => return Err(AppError::NotFound("venue")),
        Err(e) => {
            tracing::warn!(error = %e, venue_id = id, "venue edit failed");
            flash.push(format!("Venue {name} was unsuccessfully edited! because {e}"));
        }
    }

    Ok(flash.redirect(&format!("/venues/{id}")))
}
