use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use rolescope_application::DashboardView;
use tower_sessions::Session;

use crate::dto::DashboardQuery;
use crate::error::ApiResult;
use crate::page::render_page;
use crate::session_selection_store::SessionSelectionStore;
use crate::state::AppState;

pub async fn dashboard_page_handler(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<(StatusCode, Html<String>)> {
    let view = render_view(&state, session, &query).await?;
    Ok((view_status(&view), Html(render_page(&view))))
}

pub async fn dashboard_json_handler(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<(StatusCode, Json<DashboardView>)> {
    let view = render_view(&state, session, &query).await?;
    Ok((view_status(&view), Json(view)))
}

async fn render_view(
    state: &AppState,
    session: Session,
    query: &DashboardQuery,
) -> ApiResult<DashboardView> {
    let selection = SessionSelectionStore::new(session);
    Ok(state
        .dashboard_service
        .render(&query.render_request(), &selection)
        .await?)
}

fn view_status(view: &DashboardView) -> StatusCode {
    if view.is_halted() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    }
}
