//! Base layout components for the web UI.
//!
//! This module provides the main page layout structure including
//! the HTML skeleton, navigation, toasts and footer.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::alert::ToastStack;
use super::button::Button;
use crate::board::{Route, Toast, User};

/// Critical theme initialization script that runs in <head> to prevent flash of wrong theme.
/// Must be inline (not external) to execute before body renders.
const THEME_INIT_SCRIPT: &str = r#"(function() {
    var theme = localStorage.getItem('theme');
    if (theme) {
        document.documentElement.setAttribute('data-theme', theme);
    } else if (window.matchMedia('(prefers-color-scheme: dark)').matches) {
        document.documentElement.setAttribute('data-theme', 'dark');
    }
})();"#;

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Acme feedback" } };
/// let page = BaseLayout::new("Acme", user.as_ref())
///     .with_board("acme")
///     .with_toasts(&toasts)
///     .render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    user: Option<&'a User>,
    /// Slug of the board being viewed, enables board navigation
    board_slug: Option<&'a str>,
    toasts: &'a [Toast],
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title and user.
    ///
    /// Pass `None` for anonymous visitors.
    #[must_use]
    pub const fn new(title: &'a str, user: Option<&'a User>) -> Self {
        Self {
            title,
            user,
            board_slug: None,
            toasts: &[],
        }
    }

    #[must_use]
    pub const fn with_board(mut self, slug: &'a str) -> Self {
        self.board_slug = Some(slug);
        self
    }

    #[must_use]
    pub const fn with_toasts(mut self, toasts: &'a [Toast]) -> Self {
        self.toasts = toasts;
        self
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" data-theme="light" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    meta name="color-scheme" content="light dark";
                    title { (self.title) " - Feedback" }
                    link rel="stylesheet" href="/static/css/style.css";
                    link rel="icon" href="data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>💡</text></svg>";
                    script { (PreEscaped(THEME_INIT_SCRIPT)) }
                }
                body {
                    (self.render_header())
                    (ToastStack::new(self.toasts))
                    main class="container" {
                        (content)
                    }
                    (Self::render_footer())
                    script src="/static/js/board.js" {}
                }
            }
        }
    }

    fn render_header(&self) -> Markup {
        html! {
            header class="container" {
                nav {
                    ul {
                        li {
                            a href=(Route::Home.href()) {
                                strong class="site-logo" { "Feedback" }
                            }
                        }
                    }
                    ul {
                        @if let Some(slug) = self.board_slug {
                            li { a href=(Route::Board { slug: slug.to_string() }.href()) { "Board" } }
                            li { a href=(Route::Roadmap { slug: slug.to_string() }.href()) { "Roadmap" } }
                            @if self.user.is_some() {
                                li { a href=(Route::Settings { slug: slug.to_string() }.href()) { "Settings" } }
                            }
                        }
                        (self.render_auth_nav())
                        li {
                            button
                                id="theme-toggle"
                                class="theme-toggle"
                                title="Toggle dark mode"
                                aria-label="Toggle dark mode" { "🌓" }
                        }
                    }
                }
            }
        }
    }

    /// Signed-in users see their email and a sign-out button.
    fn render_auth_nav(&self) -> Markup {
        match self.user {
            Some(user) => html! {
                li class="user-email" { (user.email.as_deref().unwrap_or("Signed in")) }
                li {
                    form action="/logout" method="post" class="inline-form" {
                        (Button::secondary("Sign out").r#type("submit").class("signout"))
                    }
                }
            },
            None => html! {},
        }
    }

    fn render_footer() -> Markup {
        html! {
            footer class="container" {
                small { "Feedback board" }
            }
        }
    }
}
