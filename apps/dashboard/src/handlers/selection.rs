use axum::extract::State;
use axum::response::Redirect;
use axum::{Form, Json};
use rolescope_application::SelectionStore;
use rolescope_core::{AppError, UserPrincipalName};
use tower_sessions::Session;

use crate::dto::{
    SelectRowForm, SelectUserForm, SelectionRequest, SelectionResponse, dashboard_location,
};
use crate::error::ApiResult;
use crate::session_selection_store::SessionSelectionStore;
use crate::state::AppState;

pub async fn select_user_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SelectUserForm>,
) -> ApiResult<Redirect> {
    let selection = SessionSelectionStore::new(session);
    state
        .dashboard_service
        .select_user(&selection, UserPrincipalName::new(form.upn)?)
        .await?;

    Ok(Redirect::to(&dashboard_location(
        &form.q,
        form.view.unwrap_or_default(),
    )))
}

pub async fn select_row_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SelectRowForm>,
) -> ApiResult<Redirect> {
    let selection = SessionSelectionStore::new(session);
    state
        .dashboard_service
        .select_row(&selection, form.index)
        .await?;

    Ok(Redirect::to(&dashboard_location(
        &form.q,
        form.view.unwrap_or_default(),
    )))
}

pub async fn get_selection_handler(session: Session) -> ApiResult<Json<SelectionResponse>> {
    let selection = SessionSelectionStore::new(session);
    Ok(Json(SelectionResponse {
        selected_user: selection.selected_user().await?,
    }))
}

pub async fn put_selection_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<SelectionRequest>,
) -> ApiResult<Json<SelectionResponse>> {
    let selection = SessionSelectionStore::new(session);
    let selected_user = match (payload.user_principal_name, payload.row_index) {
        (Some(user), None) => {
            let user = UserPrincipalName::new(user)?;
            state
                .dashboard_service
                .select_user(&selection, user.clone())
                .await?;
            user
        }
        (None, Some(index)) => state.dashboard_service.select_row(&selection, index).await?,
        _ => {
            return Err(AppError::Validation(
                "exactly one of user_principal_name or row_index is required".to_owned(),
            )
            .into());
        }
    };

    Ok(Json(SelectionResponse {
        selected_user: Some(selected_user),
    }))
}
