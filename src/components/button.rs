//! Button component for the web UI.
//!
//! Renders as either a `<button>` or `<a>` element based on whether an href
//! is provided.

use maud::{html, Markup, Render};

/// Button style variants matching CSS classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Secondary,
}

impl ButtonVariant {
    /// Returns the CSS class(es) for this variant.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        match self {
            Self::Primary => "btn btn-primary",
            Self::Outline => "btn outline",
            Self::Secondary => "btn btn-secondary",
        }
    }
}

/// A configurable button component.
///
/// # Example
///
/// ```ignore
/// use crate::components::button::Button;
///
/// let submit = Button::primary("Submit").r#type("submit");
/// let link = Button::outline("Roadmap").href("/b/acme/roadmap");
/// ```
#[derive(Debug, Clone)]
pub struct Button<'a> {
    pub label: &'a str,
    pub variant: ButtonVariant,
    /// Renders as `<a>` when set
    pub href: Option<&'a str>,
    /// Button type attribute (for `<button>` elements)
    pub r#type: Option<&'a str>,
    pub class: Option<&'a str>,
}

impl<'a> Button<'a> {
    #[must_use]
    pub const fn new(label: &'a str, variant: ButtonVariant) -> Self {
        Self {
            label,
            variant,
            href: None,
            r#type: None,
            class: None,
        }
    }

    #[must_use]
    pub const fn primary(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Primary)
    }

    #[must_use]
    pub const fn outline(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Outline)
    }

    #[must_use]
    pub const fn secondary(label: &'a str) -> Self {
        Self::new(label, ButtonVariant::Secondary)
    }

    #[must_use]
    pub const fn href(mut self, href: &'a str) -> Self {
        self.href = Some(href);
        self
    }

    #[must_use]
    pub const fn r#type(mut self, r#type: &'a str) -> Self {
        self.r#type = Some(r#type);
        self
    }

    #[must_use]
    pub const fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    fn build_class(&self) -> String {
        match self.class {
            Some(extra) => format!("{} {extra}", self.variant.class()),
            None => self.variant.class().to_string(),
        }
    }
}

impl Render for Button<'_> {
    fn render(&self) -> Markup {
        let classes = self.build_class();

        if let Some(href) = self.href {
            html! {
                a
                    class=(classes)
                    href=(href)
                {
                    (self.label)
                }
            }
        } else {
            html! {
                button
                    class=(classes)
                    type=(self.r#type.unwrap_or("button"))
                {
                    (self.label)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_button() {
        let html = Button::primary("Submit").render().into_string();
        assert!(html.contains("btn btn-primary"));
        assert!(html.contains("type=\"button\""));
    }

    #[test]
    fn test_link_button() {
        let html = Button::outline("Roadmap")
            .href("/b/acme/roadmap")
            .render()
            .into_string();
        assert!(html.contains("<a"));
        assert!(html.contains("href=\"/b/acme/roadmap\""));
        assert!(html.contains("btn outline"));
    }

    #[test]
    fn test_extra_class_and_submit_type() {
        let html = Button::secondary("Sign out")
            .r#type("submit")
            .class("signout")
            .render()
            .into_string();
        assert!(html.contains("btn btn-secondary signout"));
        assert!(html.contains("type=\"submit\""));
    }
}
