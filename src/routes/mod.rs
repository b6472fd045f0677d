use axum::{routing::get, Router};
use lunchboard_menu::MenuService;

mod api;
mod health;
mod params;
mod widget;

pub use widget::{build_cards, DayCard};

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub menu: MenuService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api", get(api::menu))
        .route("/widget", get(widget::page))
        .with_state(state)
}
