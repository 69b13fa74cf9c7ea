use crate::errors::AppError;
use crate::models::{FilterCriteria, FilterForm};
use crate::pipeline::shape;
use crate::query::build;
use crate::state::{AppState, DashboardView};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(state.upstream.endpoint().as_str()))
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn get_view(State(state): State<AppState>) -> Json<DashboardView> {
    let view = state.view.lock().await;
    Json(view.clone())
}

/// Runs one fetch → normalize → summarize cycle and returns the resulting view.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(form): Query<FilterForm>,
) -> Result<Json<DashboardView>, AppError> {
    let criteria = FilterCriteria::try_from(form)?;
    let query = build(&criteria);

    // Held across the fetch so cycles never interleave.
    let mut view = state.view.lock().await;
    let outcome = state.upstream.fetch(&query).await.and_then(shape);
    let next = std::mem::take(&mut *view).render(query, outcome);
    *view = next.clone();

    Ok(Json(next))
}
