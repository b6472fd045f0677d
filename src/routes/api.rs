use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use lunchboard_menu::dates::format_date;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::routes::params::{normalize_view, resolve_date, View};
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct ApiQuery {
    pub view: Option<String>,
    pub date: Option<String>,
}

/// GET /api - the menu as JSON for programmatic consumers.
pub async fn menu(
    State(app): State<AppState>,
    Query(query): Query<ApiQuery>,
) -> Result<impl IntoResponse, AppError> {
    let view = normalize_view(query.view.as_deref());
    let anchor = resolve_date(query.date.as_deref(), &app.config.menu.timezone)?;

    let data = match view {
        View::Week => app.menu.week_menu(anchor).await?,
        View::Remainder => app.menu.remainder_of_week(anchor).await?,
        View::Today => app.menu.today(anchor).await?,
        View::Tomorrow => app.menu.tomorrow(anchor).await?,
    };

    Ok(Json(json!({
        "view": view.as_str(),
        "anchor_date": format_date(anchor),
        "data": data,
    })))
}
