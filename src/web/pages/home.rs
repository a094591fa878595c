//! Landing page with a jump-to-board form.

use maud::{html, Markup, Render};

use crate::board::{Toast, User};
use crate::components::{BaseLayout, Button, Form, FormGroup, Input};

#[must_use]
pub fn render_home(user: Option<&User>, toasts: &[Toast]) -> Markup {
    let fields = html! {
        (FormGroup::new(
            "Board",
            "slug",
            Input::text("slug")
                .id("slug")
                .placeholder("your-project")
                .autocomplete("off")
                .required()
                .render(),
        )
        .help("The project slug from your board's URL."))
        (Button::primary("Open board").r#type("submit"))
    };

    let content = html! {
        hgroup {
            h1 { "Feedback" }
            p { "Share ideas, vote on what matters and follow progress." }
        }
        (Form::get("/go", fields).class("jump-form").render())
    };

    BaseLayout::new("Home", user).with_toasts(toasts).render(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_has_jump_form_and_toasts() {
        let toasts = vec![Toast::error("Project not found")];
        let html = render_home(None, &toasts).into_string();
        assert!(html.contains("action=\"/go\""));
        assert!(html.contains("name=\"slug\""));
        assert!(html.contains("Project not found"));
    }
}
