//! Board settings for the signed-in user.

use maud::{html, Markup};

use crate::board::{PageState, Route, Toast, User};
use crate::components::{BaseLayout, Button};

#[must_use]
pub fn render_settings_page(state: &PageState, user: &User, toasts: &[Toast]) -> Markup {
    let name = state
        .project
        .as_ref()
        .map_or(state.slug.as_str(), |p| p.name.as_str());
    let board_href = Route::Board {
        slug: state.slug.clone(),
    }
    .href();

    let content = html! {
        h1 { "Settings" }
        section class="settings-board" {
            h2 { "Board" }
            dl {
                dt { "Project" }
                dd { (name) }
                dt { "Address" }
                dd { a href=(board_href) { (board_href) } }
            }
        }
        section class="settings-account" {
            h2 { "Account" }
            dl {
                dt { "Signed in as" }
                dd { (user.email.as_deref().unwrap_or(&user.id)) }
            }
            form action="/logout" method="post" {
                (Button::secondary("Sign out").r#type("submit"))
            }
        }
    };

    BaseLayout::new("Settings", Some(user))
        .with_board(&state.slug)
        .with_toasts(toasts)
        .render(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Project;

    #[test]
    fn shows_project_and_account() {
        let state = PageState {
            slug: "acme".to_string(),
            project: Some(Project {
                id: "proj".to_string(),
                name: "Acme".to_string(),
                slug: "acme".to_string(),
            }),
            ..PageState::default()
        };
        let user = User {
            id: "u1".to_string(),
            email: Some("ann@example.com".to_string()),
        };
        let html = render_settings_page(&state, &user, &[]).into_string();

        assert!(html.contains("<dd>Acme</dd>"));
        assert!(html.contains("ann@example.com"));
        assert!(html.contains("action=\"/logout\""));
    }
}
