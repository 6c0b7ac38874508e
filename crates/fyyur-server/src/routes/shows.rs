use axum::extract::{RawForm, State};
use fyyur_db::repo;
use fyyur_db::AppState;
use std::sync::Arc;

use crate::error::AppError;
use crate::flash::Flash;
use crate::forms::{default_start_time, show_changes, FormData};
use crate::pages::{self, Page, Section};

/// GET /shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
    flash: Flash,
) -> Result<Page, AppError> {
    let shows = repo::shows::list(&state.db).await?;
    Ok(Page::new(
        "Shows",
        Section::Shows,
        pages::shows::list(&shows),
        flash,
    ))
}

/// GET /shows/create
pub async fn create_show_form(flash: Flash) -> Page {
    Page::new(
        "New Show",
        Section::Shows,
        pages::shows::form(&default_start_time()),
        flash,
    )
}

/// POST /shows/create
pub async fn create_show_submission(
    State(state): State<Arc<AppState>>,
    mut flash: Flash,
    RawForm(body): RawForm,
) -> Page {
    let form = FormData::parse(&body);

    let result = match show_changes(&form) {
        Ok(changes) => repo::shows::create(&state.db, changes)
            .await
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match result {
        Ok(_) => flash.push("Show was successfully listed!"),
        Err(e) => {
            tracing::warn!(error = %e, "show create failed");
            flash.push(format!(
                "An error occurred. Show could not be listed. because {e}"
            ));
        }
    }

    Page::home(flash)
}
