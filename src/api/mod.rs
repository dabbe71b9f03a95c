// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::HeaderName,
    routing::{any, delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::Principal,
    models::{CredentialsRequest, Item, ItemRequest, ListRequest, LoginResponse, TodoList, User},
    state::AppState,
};

pub mod accounts;
pub mod admin;
pub mod health;
pub mod items;
pub mod lists;
pub mod resources;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/signup", post(accounts::signup))
        .route("/login", post(accounts::login))
        .route("/verify", get(accounts::verify))
        .route(
            "/resource/lists",
            get(lists::list_lists).post(lists::create_list),
        )
        // Per-id list and item paths are resolved by the dispatcher.
        .route("/resource/lists/", any(resources::lists_resource))
        .route("/resource/lists/{*rest}", any(resources::lists_resource))
        .route("/resource/items/", any(resources::items_resource))
        .route("/resource/items/{*rest}", any(resources::items_resource))
        .route(
            "/admin/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route("/admin/users/{username}", delete(admin::delete_user))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// Registers the bearer and Basic schemes referenced by the endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        accounts::signup,
        accounts::login,
        accounts::verify,
        lists::list_lists,
        lists::create_list,
        lists::get_list,
        lists::update_list,
        lists::delete_list,
        items::list_items,
        items::create_item,
        items::get_item,
        items::update_item,
        items::toggle_item,
        items::delete_item,
        admin::list_users,
        admin::create_user,
        admin::delete_user,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            User,
            Principal,
            CredentialsRequest,
            LoginResponse,
            TodoList,
            ListRequest,
            Item,
            ItemRequest,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Accounts", description = "Signup, login and token verification"),
        (name = "Lists", description = "Owner-scoped lists"),
        (name = "Items", description = "Items inside a list"),
        (name = "Admin", description = "Credential management (HTTP Basic)"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
