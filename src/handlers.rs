use crate::bmi;
use crate::errors::{AppError, JsonError};
use crate::models::{BmiRequest, BmiResponse, ContactForm};
use crate::state::AppState;
use crate::ui;
use crate::upload::read_goal_form;
use axum::{
    extract::{rejection::FormRejection, Multipart, Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let goals = state
        .store
        .list_goals()
        .await
        .map_err(|err| AppError::internal("Error fetching goals", err))?;
    Ok(Html(ui::render_index(&goals)))
}

pub async fn show_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let goal = state
        .store
        .get_goal(&id)
        .await
        .map_err(|err| AppError::internal("Error fetching goal", err))?
        .ok_or_else(|| AppError::not_found("Goal not found"))?;
    Ok(Html(ui::render_goal(&goal)))
}

pub async fn add_goal_form() -> Html<String> {
    Html(ui::render_add_goal())
}

pub async fn add_goal(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let form = read_goal_form(&mut multipart, &state.upload_dir).await?;
    let goal_id = state
        .store
        .insert_goal(form.into_new_goal())
        .await
        .map_err(|err| AppError::internal("Error adding goal", err))?;
    info!(goal_id, "goal created");
    Ok(Redirect::to("/"))
}

pub async fn update_goal_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let goal = state
        .store
        .get_goal(&id)
        .await
        .map_err(|err| AppError::internal("Error fetching goal", err))?
        .ok_or_else(|| AppError::not_found("Goal not found"))?;
    Ok(Html(ui::render_update_goal(&goal)))
}

/// An unknown id updates nothing and still redirects.
pub async fn update_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let form = read_goal_form(&mut multipart, &state.upload_dir).await?;
    state
        .store
        .update_goal(&id, &form.into_patch())
        .await
        .map_err(|err| AppError::internal("Error updating goal", err))?;
    Ok(Redirect::to("/"))
}

/// Leaves the goal's image file on disk.
pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state
        .store
        .delete_goal(&id)
        .await
        .map_err(|err| AppError::internal("Error deleting goal", err))?;
    Ok(Redirect::to("/"))
}

pub async fn contact_form() -> Html<String> {
    Html(ui::render_contact())
}

pub async fn submit_contact(Form(form): Form<ContactForm>) -> Redirect {
    info!(
        name = form.name.as_deref().unwrap_or_default(),
        email = form.email.as_deref().unwrap_or_default(),
        message = form.message.as_deref().unwrap_or_default(),
        "contact form submission"
    );
    Redirect::to("/")
}

pub async fn bmi_form() -> Html<String> {
    Html(ui::render_bmi())
}

/// A body that is not url-encoded carries no fields, so it reads as missing input.
pub async fn calculate_bmi(
    form: Result<Form<BmiRequest>, FormRejection>,
) -> Result<Json<BmiResponse>, JsonError> {
    let request = form.map(|Form(request)| request).unwrap_or_default();
    bmi::evaluate(&request).map(Json).map_err(JsonError::new)
}
