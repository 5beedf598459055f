use crate::handlers;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::{get, post}, Router};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub fn router(state: AppState, public_dir: &Path, upload_limit: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/goal/:id", get(handlers::show_goal))
        .route("/addGoal", get(handlers::add_goal_form).post(handlers::add_goal))
        .route(
            "/updateGoal/:id",
            get(handlers::update_goal_form).post(handlers::update_goal),
        )
        .route("/deleteGoal/:id", get(handlers::delete_goal))
        .route("/contact", get(handlers::contact_form).post(handlers::submit_contact))
        .route("/bmi", get(handlers::bmi_form))
        .route("/calculateBMI", post(handlers::calculate_bmi))
        .fallback_service(ServeDir::new(public_dir))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
