//! Alert and toast components for page messages and notifications.

use maud::{html, Markup, Render};

use crate::board::{Toast, ToastKind};

/// Alert variant types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Success,
    Error,
    Info,
}

impl AlertVariant {
    /// Get the CSS class for the alert article element.
    #[must_use]
    pub const fn article_class(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl From<ToastKind> for AlertVariant {
    fn from(kind: ToastKind) -> Self {
        match kind {
            ToastKind::Success => Self::Success,
            ToastKind::Error => Self::Error,
            ToastKind::Info => Self::Info,
        }
    }
}

/// An alert message component.
///
/// Renders as a styled article element with success/error/info styling.
///
/// # Example
///
/// ```ignore
/// use crate::components::alert::Alert;
///
/// let alert = Alert::error("Database connection not configured")
///     .with_title("Unavailable");
/// ```
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub variant: AlertVariant,
    pub title: Option<&'a str>,
    pub message: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new alert with the given variant and message.
    #[must_use]
    pub const fn new(variant: AlertVariant, message: &'a str) -> Self {
        Self {
            variant,
            title: None,
            message,
        }
    }

    /// Create an error alert.
    #[must_use]
    pub const fn error(message: &'a str) -> Self {
        Self::new(AlertVariant::Error, message)
    }

    /// Create an info alert.
    #[must_use]
    pub const fn info(message: &'a str) -> Self {
        Self::new(AlertVariant::Info, message)
    }

    /// Add a title to the alert.
    #[must_use]
    pub const fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        let class = self.variant.article_class();

        html! {
            article class=(class) {
                @if let Some(title) = self.title {
                    strong { (title) }
                    " "
                }
                (self.message)
            }
        }
    }
}

/// Stack of transient notifications, rendered at the top of the page.
///
/// Toasts are announced politely to screen readers and dismissed by the
/// client script after a few seconds.
#[derive(Debug, Clone)]
pub struct ToastStack<'a> {
    pub toasts: &'a [Toast],
}

impl<'a> ToastStack<'a> {
    #[must_use]
    pub const fn new(toasts: &'a [Toast]) -> Self {
        Self { toasts }
    }
}

impl Render for ToastStack<'_> {
    fn render(&self) -> Markup {
        html! {
            @if !self.toasts.is_empty() {
                div class="toast-stack" role="status" aria-live="polite" {
                    @for toast in self.toasts {
                        div class={ "toast toast-" (toast.kind.as_str()) } data-toast {
                            (Alert::new(toast.kind.into(), &toast.message))
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_error_with_title() {
        let alert = Alert::error("Something went wrong").with_title("Error");
        let html = alert.render().into_string();
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("<strong>Error</strong>"));
        assert!(html.contains("Something went wrong"));
    }

    #[test]
    fn test_alert_info() {
        let alert = Alert::info("Just so you know...");
        let html = alert.render().into_string();
        assert!(html.contains("class=\"info\""));
    }

    #[test]
    fn test_toast_stack_renders_each_kind() {
        let toasts = vec![
            Toast::success("Post submitted"),
            Toast::error("Board not found"),
            Toast::info("Sign in to vote"),
        ];
        let html = ToastStack::new(&toasts).render().into_string();
        assert!(html.contains("toast toast-success"));
        assert!(html.contains("toast toast-error"));
        assert!(html.contains("toast toast-info"));
        assert!(html.contains("Board not found"));
        assert!(html.contains("aria-live=\"polite\""));
    }

    #[test]
    fn test_empty_toast_stack_renders_nothing() {
        let html = ToastStack::new(&[]).render().into_string();
        assert!(html.is_empty());
    }

    #[test]
    fn test_toast_message_is_escaped() {
        let toasts = vec![Toast::error("<script>alert(1)</script>")];
        let html = ToastStack::new(&toasts).render().into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
