use axum::{
    Router,
    routing::{get, post},
};

use cinema_auth_types::token::TokenSigner;
use cinema_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::domain::repository::Storage;
use crate::handlers::{
    actor::{create_actor, delete_actor, get_actor, get_actor_list, update_actor},
    auth::login,
    health::{healthz, readyz},
    movie::{
        create_movie, delete_movie, get_movie, get_movie_list, search_movies, update_movie,
    },
};
use crate::state::AppState;

pub fn build_router<S: Storage, T: TokenSigner>(state: AppState<S, T>) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<S, T>))
        // Auth
        .route("/auth", post(login::<S, T>))
        // Actors
        .route("/actors", post(create_actor::<S, T>).get(get_actor_list::<S, T>))
        .route(
            "/actors/{id}",
            get(get_actor::<S, T>)
                .patch(update_actor::<S, T>)
                .delete(delete_actor::<S, T>),
        )
        // Movies
        .route("/movies", post(create_movie::<S, T>).get(get_movie_list::<S, T>))
        .route("/movies/search", get(search_movies::<S, T>))
        .route(
            "/movies/{id}",
            get(get_movie::<S, T>)
                .patch(update_movie::<S, T>)
                .delete(delete_movie::<S, T>),
        )
        // Request id is set outermost so the access span can record it.
        .layer(trace_layer())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
