/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod authorization;
pub mod endpoints;
pub mod error;

use axum::routing::{get, post};
use axum::{Router, middleware};
use crewdesk_core::types::ServerState;
use endpoints::*;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

fn cors_layer(state: &ServerState) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    match state.cli.serve_url.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!(serve_url = %state.cli.serve_url, "Invalid serve url, CORS origin not set");
            cors
        }
    }
}

pub fn create_router(state: Arc<ServerState>) -> Router {
    let protected = Router::new()
        .route(
            "/users/me",
            get(user::get).patch(user::patch).delete(user::delete),
        )
        .route("/dashboard", get(dashboard::get))
        .route("/tasks", get(tasks::get).post(tasks::post))
        .route("/tasks/create", post(tasks::post))
        .route(
            "/tasks/{task}",
            get(tasks::get_task)
                .patch(tasks::patch_task)
                .put(tasks::put_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/{task}/claim", post(tasks::post_task_claim))
        .route("/tasks/{task}/done", post(tasks::post_task_done))
        .route("/comments", get(comments::get).post(comments::post))
        .route(
            "/comments/{comment}",
            get(comments::get_comment)
                .patch(comments::patch_comment)
                .delete(comments::delete_comment),
        )
        .route("/meetings", get(meetings::get).post(meetings::post))
        .route("/meetings/created", get(meetings::get_created))
        .route(
            "/meetings/{meeting}",
            get(meetings::get_meeting)
                .put(meetings::put_meeting)
                .delete(meetings::delete_meeting),
        )
        .route("/evaluations", get(evaluations::get).post(evaluations::post))
        .route(
            "/evaluations/{evaluation}",
            get(evaluations::get_evaluation).delete(evaluations::delete_evaluation),
        )
        .route("/teams", get(teams::get).post(teams::post))
        .route(
            "/teams/{team}",
            get(teams::get_team)
                .patch(teams::patch_team)
                .delete(teams::delete_team),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            authorization::authorize,
        ));

    let public = Router::new()
        .route("/users", post(user::post))
        .route("/token", post(auth::post_token))
        .route("/token/refresh", post(auth::post_token_refresh))
        .route("/health", get(get_health));

    Router::new()
        .nest("/api/v1", protected.merge(public))
        .fallback(handle_404)
        .layer(cors_layer(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve_web(state: Arc<ServerState>) -> std::io::Result<()> {
    let server_url = format!("{}:{}", state.cli.ip, state.cli.port);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    tracing::info!("Listening on {}", server_url);
    axum::serve(listener, app).await
}
