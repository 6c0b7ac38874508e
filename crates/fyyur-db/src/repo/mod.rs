//! Query and write functions behind the web handlers.
//!
//! Each function takes a connection and returns plain data; no HTTP types
//! leak in here.

pub mod artists;
pub mod shows;
pub mod venues;

use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ActiveValue, ColumnTrait, DbBackend, Set, Value};
use serde::Serialize;

/// One row in a listing or search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listed {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<Listed>,
}

impl SearchResults {
    fn new(data: Vec<Listed>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Case-insensitive substring match on `column`, pushed down to the database
/// where it can fold non-ASCII case. `None` on SQLite, whose `LOWER()` and
/// `LIKE` only fold ASCII; callers filter those rows with [`name_matches`].
///
/// LIKE wildcards in `term` match literally.
pub(crate) fn name_contains<C: ColumnTrait>(
    backend: DbBackend,
    column: C,
    term: &str,
) -> Option<SimpleExpr> {
    match backend {
        DbBackend::Postgres => {
            let pattern = format!("%{}%", escape_like(term));
            Some(Expr::col(column).ilike(LikeExpr::new(pattern).escape('\\')))
        }
        DbBackend::MySql => {
            let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
            Some(
                Expr::expr(Func::lower(Expr::col(column)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            )
        }
        DbBackend::Sqlite => None,
    }
}

/// Unicode case-insensitive substring test, the in-process side of [`name_contains`].
pub(crate) fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Overwrite `slot` only when a value was submitted.
pub(crate) fn assign<T>(slot: &mut ActiveValue<T>, value: Option<T>)
where
    T: Into<Value>,
{
    if let Some(v) = value {
        *slot = Set(v);
    }
}

/// Same as [`assign`] for nullable columns.
pub(crate) fn assign_nullable<T>(slot: &mut ActiveValue<Option<T>>, value: Option<T>)
where
    Option<T>: Into<Value>,
{
    if let Some(v) = value {
        *slot = Set(Some(v));
    }
}
