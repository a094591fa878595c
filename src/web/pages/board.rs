//! Board page: controls, submission form and post list.

use maud::{html, Markup, Render};
use url::form_urlencoded;

use crate::board::submission::{SubmissionForm, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use crate::board::{LoadStage, PageState, PostStatus, Route, SortBy, StatusFilter, Toast, User};
use crate::components::{
    Alert, BaseLayout, Button, EmptyState, Form, FormGroup, Input, PostCard, Select, TextArea,
};

/// Query string (with leading `?`) that reproduces the current view.
///
/// Default values are omitted, so the default view yields an empty string.
#[must_use]
pub fn view_query(state: &PageState, open_form: bool) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !state.search_term.is_empty() {
        query.append_pair("q", &state.search_term);
    }
    if state.status_filter != StatusFilter::All {
        query.append_pair("status", state.status_filter.as_str());
    }
    if state.sort_by != SortBy::Votes {
        query.append_pair("sort", state.sort_by.as_str());
    }
    if open_form {
        query.append_pair("submit", "1");
    }

    let query = query.finish();
    if query.is_empty() {
        query
    } else {
        format!("?{query}")
    }
}

/// Everything the board page needs to render.
#[derive(Debug)]
pub struct BoardPageParams<'a> {
    pub state: &'a PageState,
    pub user: Option<&'a User>,
    pub toasts: &'a [Toast],
    /// Values to refill the submission form with after a failed submit
    pub draft: Option<&'a SubmissionForm>,
}

#[must_use]
pub fn render_board_page(params: &BoardPageParams<'_>) -> Markup {
    let state = params.state;
    let title = state
        .project
        .as_ref()
        .map_or(state.slug.as_str(), |p| p.name.as_str());
    let board_href = Route::Board {
        slug: state.slug.clone(),
    }
    .href();

    let content = html! {
        header class="board-header" {
            h1 { (title) }
            @if state.can_submit() && !state.submit_form_open {
                (Button::primary("Submit idea").href(&format!("{board_href}{}", view_query(state, true))))
            }
        }

        @if let Some(error) = &state.error {
            (Alert::error(error).with_title("Unavailable"))
        } @else {
            (render_controls(state, &board_href))

            @if state.submit_form_open && state.can_submit() {
                (render_submission_form(state, &board_href, params.draft))
            }

            @if state.loading {
                p aria-busy="true" { "Loading posts\u{2026}" }
            } @else if state.stage == LoadStage::Ready {
                (render_post_list(state))
            }
        }
    };

    BaseLayout::new(title, params.user)
        .with_board(&state.slug)
        .with_toasts(params.toasts)
        .render(content)
}

fn render_controls(state: &PageState, board_href: &str) -> Markup {
    let mut status = Select::new("status")
        .id("status")
        .aria_label("Filter by status")
        .option("all", "All statuses")
        .selected(state.status_filter.as_str());
    for s in PostStatus::ALL {
        status = status.option(s.as_str(), s.label());
    }

    let sort = Select::new("sort")
        .id("sort")
        .aria_label("Sort posts")
        .option("votes", "Most votes")
        .option("newest", "Newest")
        .option("oldest", "Oldest")
        .selected(state.sort_by.as_str());

    let fields = html! {
        fieldset role="group" {
            (Input::search("q")
                .value(&state.search_term)
                .placeholder("Search posts")
                .autocomplete("off"))
            (status)
            (sort)
            (Button::outline("Apply").r#type("submit"))
        }
    };

    Form::get(board_href, fields).class("board-controls").render()
}

fn render_submission_form(
    state: &PageState,
    board_href: &str,
    draft: Option<&SubmissionForm>,
) -> Markup {
    let action = format!("{board_href}/posts{}", view_query(state, false));
    let cancel = format!("{board_href}{}", view_query(state, false));
    let title = draft.map_or("", |d| d.title.as_str());
    let description = draft.map_or("", |d| d.description.as_str());

    let fields = html! {
        h2 { "Submit an idea" }
        (FormGroup::new(
            "Title",
            "post-title",
            Input::text("title")
                .id("post-title")
                .value(title)
                .placeholder("Short, descriptive title")
                .max_length(MAX_TITLE_LEN)
                .required()
                .render(),
        ))
        (FormGroup::new(
            "Description",
            "post-description",
            TextArea::new("description")
                .id("post-description")
                .value(description)
                .rows(6)
                .max_length(MAX_DESCRIPTION_LEN)
                .render(),
        )
        .help("Optional. Explain the problem this would solve."))
        div class="form-actions" {
            (Button::primary("Submit").r#type("submit"))
            " "
            (Button::outline("Cancel").href(&cancel))
        }
    };

    Form::post(&action, fields).class("submit-form").id("submit-form").render()
}

fn render_post_list(state: &PageState) -> Markup {
    let visible = state.visible_posts();
    let return_query = view_query(state, false);

    html! {
        @if state.posts.is_empty() {
            (EmptyState::no_posts())
        } @else if visible.is_empty() {
            (EmptyState::no_matches())
        } @else {
            section class="post-list" {
                @for post in visible {
                    (PostCard::new(post, &state.slug).return_query(&return_query))
                }
            }
        }
    }
}
