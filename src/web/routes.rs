use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use maud::Markup;
use serde::Deserialize;
use tracing::{debug, warn};

use super::auth::{self, MaybeUser};
use super::pages::{self, BoardPageParams};
use super::AppState;
use crate::board::state::POST_NOT_FOUND;
use crate::board::submission::{submit_post, SubmissionError, SubmissionForm};
use crate::board::vote::cast_vote;
use crate::board::{
    BoardPage, Effect, LoadStage, PageEvent, PageState, Route, SortBy, StatusFilter, Toast,
    ToastKind, User,
};

pub const SIGN_IN_FOR_SETTINGS: &str = "Sign in to manage settings";

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/go", get(go))
        .route("/b/:slug", get(board_page))
        .route("/b/:slug/posts", post(submit))
        .route("/b/:slug/posts/:post_id", get(post_page))
        .route("/b/:slug/posts/:post_id/vote", post(vote))
        .route("/b/:slug/roadmap", get(roadmap_page))
        .route("/b/:slug/settings", get(settings_page))
        .route("/logout", post(auth::logout))
        .route("/healthz", get(health))
}

/// Toast carried across a redirect in `?toast=&toast_kind=`.
fn carried_toast(message: Option<String>, kind: Option<&str>) -> Option<Toast> {
    message.filter(|m| !m.is_empty()).map(|message| Toast {
        kind: ToastKind::parse(kind.unwrap_or_default()),
        message,
    })
}

// ========== HTML Routes ==========

#[derive(Debug, Default, Deserialize)]
pub struct HomeParams {
    toast: Option<String>,
    toast_kind: Option<String>,
}

async fn home(viewer: MaybeUser, Query(params): Query<HomeParams>) -> Response {
    let toasts: Vec<Toast> = carried_toast(params.toast, params.toast_kind.as_deref())
        .into_iter()
        .collect();

    Html(pages::render_home(viewer.user(), &toasts).into_string()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct GoParams {
    #[serde(default)]
    slug: String,
}

async fn go(Query(params): Query<GoParams>) -> Redirect {
    let slug = params.slug.trim();
    if slug.is_empty() {
        return Redirect::to(&Route::Home.href());
    }
    Redirect::to(
        &Route::Board {
            slug: slug.to_string(),
        }
        .href(),
    )
}

/// View parameters shared by the board page and its form posts.
#[derive(Debug, Default, Deserialize)]
pub struct BoardParams {
    q: Option<String>,
    status: Option<String>,
    sort: Option<String>,
    submit: Option<String>,
    toast: Option<String>,
    toast_kind: Option<String>,
}

impl BoardParams {
    fn wants_form(&self) -> bool {
        matches!(self.submit.as_deref(), Some("1" | "true"))
    }
}

/// Build the page for `slug` and run its load sequence.
async fn open_board(state: &AppState, slug: &str, params: &BoardParams) -> BoardPage {
    let mut page = BoardPage::new(
        state.backend.clone(),
        slug,
        StatusFilter::parse(params.status.as_deref()),
        SortBy::parse(params.sort.as_deref()),
    );
    page.load().await;

    if let Some(term) = params.q.as_ref().filter(|q| !q.is_empty()) {
        page.dispatch(PageEvent::SearchChanged(term.clone())).await;
    }
    if params.wants_form() {
        page.dispatch(PageEvent::SubmitFormOpened).await;
    }
    page
}

/// Carry out pending effects: navigation becomes a redirect, toasts are
/// handed to `render` along with the page state.
fn respond_with(
    mut page: BoardPage,
    render: impl FnOnce(&PageState, &[Toast]) -> Markup,
) -> Response {
    let mut toasts = Vec::new();
    let mut navigate = None;
    for effect in page.take_effects() {
        match effect {
            Effect::Toast(toast) => toasts.push(toast),
            Effect::Navigate(route) => navigate = Some(route),
            Effect::Reload => {}
        }
    }

    if let Some(route) = navigate {
        let target = match toasts.first() {
            Some(toast) => route.href_with_toast(toast),
            None => route.href(),
        };
        debug!(target = %target, "Redirecting");
        return Redirect::to(&target).into_response();
    }

    Html(render(page.state(), &toasts).into_string()).into_response()
}

fn respond(page: BoardPage, user: Option<&User>, draft: Option<&SubmissionForm>) -> Response {
    respond_with(page, |state, toasts| {
        pages::render_board_page(&BoardPageParams {
            state,
            user,
            toasts,
            draft,
        })
    })
}

/// Redirect to the board, carrying `toast`.
fn back_to_board(slug: &str, toast: &Toast) -> Response {
    let route = Route::Board {
        slug: slug.to_string(),
    };
    Redirect::to(&route.href_with_toast(toast)).into_response()
}

async fn board_page(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(slug): Path<String>,
    Query(params): Query<BoardParams>,
) -> Response {
    let mut page = open_board(&state, &slug, &params).await;
    if let Some(toast) = carried_toast(params.toast.clone(), params.toast_kind.as_deref()) {
        page.dispatch(PageEvent::Notify(toast)).await;
    }
    respond(page, viewer.user(), None)
}

async fn post_page(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path((slug, post_id)): Path<(String, String)>,
) -> Response {
    let page = open_board(&state, &slug, &BoardParams::default()).await;
    if page.state().stage != LoadStage::Ready {
        return respond(page, viewer.user(), None);
    }

    let Some(post) = page.state().post(&post_id).cloned() else {
        debug!(slug = %slug, post_id = %post_id, "Post not on this board");
        return back_to_board(&slug, &Toast::error(POST_NOT_FOUND));
    };

    respond_with(page, |state, toasts| {
        pages::render_post_page(state, &post, viewer.user(), toasts)
    })
}

async fn roadmap_page(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(slug): Path<String>,
) -> Response {
    let page = open_board(&state, &slug, &BoardParams::default()).await;
    if page.state().stage != LoadStage::Ready {
        return respond(page, viewer.user(), None);
    }

    respond_with(page, |state, toasts| {
        pages::render_roadmap_page(state, viewer.user(), toasts)
    })
}

async fn settings_page(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(slug): Path<String>,
) -> Response {
    let Some(user) = viewer.user() else {
        return back_to_board(&slug, &Toast::info(SIGN_IN_FOR_SETTINGS));
    };

    let page = open_board(&state, &slug, &BoardParams::default()).await;
    if page.state().project.is_none() {
        return respond(page, Some(user), None);
    }

    respond_with(page, |state, toasts| {
        pages::render_settings_page(state, user, toasts)
    })
}

async fn vote(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path((slug, post_id)): Path<(String, String)>,
    Query(params): Query<BoardParams>,
) -> Response {
    let mut page = open_board(&state, &slug, &params).await;

    if page.state().stage != LoadStage::Ready {
        warn!(slug = %slug, post_id = %post_id, "Vote for a board that could not be loaded");
        return respond(page, viewer.user(), None);
    }

    if !page.state().accepts_vote(&post_id) {
        warn!(slug = %slug, post_id = %post_id, "Vote for a post not listed on this board");
        page.dispatch(PageEvent::Notify(Toast::error(POST_NOT_FOUND))).await;
        return respond(page, viewer.user(), None);
    }

    if let Some(backend) = state.backend.as_deref() {
        let event = cast_vote(backend, &post_id, viewer.viewer()).await;
        page.dispatch(event).await;
    }

    respond(page, viewer.user(), None)
}

async fn submit(
    State(state): State<AppState>,
    viewer: MaybeUser,
    Path(slug): Path<String>,
    Query(params): Query<BoardParams>,
    Form(form): Form<SubmissionForm>,
) -> Response {
    let mut page = open_board(&state, &slug, &params).await;

    let (Some(backend), Some(board_id)) = (state.backend.as_deref(), page.state().board_id.clone())
    else {
        warn!(slug = %slug, "Submission for a board that could not be loaded");
        return respond(page, viewer.user(), None);
    };

    match submit_post(backend, &board_id, form.clone(), viewer.viewer()).await {
        Ok(_) => {
            page.dispatch(PageEvent::PostSubmitted).await;
            respond(page, viewer.user(), None)
        }
        Err(e) => {
            page.dispatch(PageEvent::SubmitFormOpened).await;
            page.dispatch(PageEvent::Notify(Toast::error(e.to_string()))).await;
            let mut response = respond(page, viewer.user(), Some(&form));
            if e != SubmissionError::Backend {
                *response.status_mut() = StatusCode::UNPROCESSABLE_ENTITY;
            }
            response
        }
    }
}

async fn health() -> &'static str {
    "OK"
}
