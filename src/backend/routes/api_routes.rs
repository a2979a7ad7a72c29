/**
 * API Route Handlers
 *
 * This module wires the REST endpoints to their handlers. Paths are relative
 * to the `/api/v1` prefix added by the router.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /register`, `POST /login`, `GET /me`
 *
 * ## Posts
 * - `GET|POST /posts`, `GET /posts/hot`
 * - `GET|PUT|DELETE /posts/{id}`
 * - `GET|POST /posts/{id}/like`, `POST /posts/{id}/favorite`
 * - `POST /posts/{id}/top`, `POST /posts/{id}/system-top`
 * - `GET /posts/{id}/comments`
 *
 * ## Comments, tags, search
 * - `POST /comments`, `DELETE /comments/{id}`
 * - `GET /my/comments`, `GET /my/post-comments`
 * - `GET /tags`, `GET /search`
 *
 * ## Notifications
 * - `GET /notifications`, `GET /notifications/unread-count`
 * - `PUT /notifications/{id}/read`, `PUT /notifications/read-all`
 *
 * ## Users
 * - `GET /users/{id}` and its `posts`, `followers`, `following`,
 *   `liked-posts`, `favorite-posts` listings
 * - `POST /users/{id}/follow`, `POST /users/{id}/unfollow`
 * - `PUT /user/profile`
 */

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::backend::auth::{get_me, login, signup};
use crate::backend::comments::handlers as comments;
use crate::backend::notifications::handlers as notifications;
use crate::backend::posts::handlers as posts;
use crate::backend::search::handlers::search;
use crate::backend::server::state::AppState;
use crate::backend::social::handlers as social;
use crate::backend::tags::handlers::list_tags;

/// Configure API routes
///
/// Whether a route needs a caller is decided by its handler's extractors:
/// `AuthUser` rejects anonymous requests with 401, `MaybeUser` accepts them.
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/register", post(signup))
        .route("/login", post(login))
        .route("/me", get(get_me))
        // Posts and feed
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/hot", get(posts::hot_posts))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/posts/{id}/like",
            get(posts::get_engagement).post(posts::toggle_like),
        )
        .route("/posts/{id}/favorite", post(posts::toggle_favorite))
        .route("/posts/{id}/top", post(posts::toggle_top))
        .route("/posts/{id}/system-top", post(posts::toggle_system_top))
        .route("/posts/{id}/comments", get(comments::get_comments))
        // Tags and search
        .route("/tags", get(list_tags))
        .route("/search", get(search))
        // Comments
        .route("/comments", post(comments::create_comment))
        .route("/comments/{id}", delete(comments::delete_comment))
        .route("/my/comments", get(comments::my_comments))
        .route("/my/post-comments", get(comments::comments_on_my_posts))
        // Notifications
        .route("/notifications", get(notifications::list_notifications))
        .route(
            "/notifications/unread-count",
            get(notifications::unread_count),
        )
        .route("/notifications/read-all", put(notifications::mark_all_read))
        .route("/notifications/{id}/read", put(notifications::mark_read))
        // Users and the follow graph
        .route("/users/{id}", get(social::get_profile))
        .route("/users/{id}/posts", get(posts::user_posts))
        .route("/users/{id}/followers", get(social::followers))
        .route("/users/{id}/following", get(social::following))
        .route("/users/{id}/liked-posts", get(posts::liked_posts))
        .route("/users/{id}/favorite-posts", get(posts::favorite_posts))
        .route("/users/{id}/follow", post(social::follow_user))
        .route("/users/{id}/unfollow", post(social::unfollow_user))
        .route("/user/profile", put(social::update_profile))
}
