//! Form components for maud templates.
//!
//! This module provides reusable form components that match the styles
//! defined in `static/css/style.css`.

use maud::{html, Markup, Render};

/// A form container element.
#[derive(Debug)]
pub struct Form<'a> {
    /// Form action URL
    pub action: &'a str,
    /// HTTP method ("get" or "post")
    pub method: &'a str,
    pub content: Markup,
    pub class: Option<&'a str>,
    pub id: Option<&'a str>,
}

impl<'a> Form<'a> {
    #[must_use]
    pub fn new(action: &'a str, method: &'a str, content: Markup) -> Self {
        Self {
            action,
            method,
            content,
            class: None,
            id: None,
        }
    }

    /// Create a POST form.
    #[must_use]
    pub fn post(action: &'a str, content: Markup) -> Self {
        Self::new(action, "post", content)
    }

    /// Create a GET form.
    #[must_use]
    pub fn get(action: &'a str, content: Markup) -> Self {
        Self::new(action, "get", content)
    }

    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }
}

impl Render for Form<'_> {
    fn render(&self) -> Markup {
        html! {
            form
                action=(self.action)
                method=(self.method)
                class=[self.class]
                id=[self.id]
            {
                (self.content)
            }
        }
    }
}

/// A text-like input element.
#[derive(Debug, Clone)]
pub struct Input<'a> {
    pub name: &'a str,
    /// Input type (text or search)
    pub r#type: &'a str,
    pub value: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub required: bool,
    pub id: Option<&'a str>,
    pub class: Option<&'a str>,
    pub autocomplete: Option<&'a str>,
    pub max_length: Option<usize>,
}

impl<'a> Input<'a> {
    #[must_use]
    pub fn new(name: &'a str, r#type: &'a str) -> Self {
        Self {
            name,
            r#type,
            value: None,
            placeholder: None,
            required: false,
            id: None,
            class: None,
            autocomplete: None,
            max_length: None,
        }
    }

    #[must_use]
    pub fn text(name: &'a str) -> Self {
        Self::new(name, "text")
    }

    #[must_use]
    pub fn search(name: &'a str) -> Self {
        Self::new(name, "search")
    }

    #[must_use]
    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    #[must_use]
    pub fn autocomplete(mut self, autocomplete: &'a str) -> Self {
        self.autocomplete = Some(autocomplete);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

impl Render for Input<'_> {
    fn render(&self) -> Markup {
        html! {
            input
                type=(self.r#type)
                name=(self.name)
                id=[self.id]
                class=[self.class]
                value=[self.value]
                placeholder=[self.placeholder]
                autocomplete=[self.autocomplete]
                maxlength=[self.max_length]
                required[self.required];
        }
    }
}

/// A multi-line text input.
#[derive(Debug, Clone)]
pub struct TextArea<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
    pub placeholder: Option<&'a str>,
    pub rows: Option<u32>,
    pub id: Option<&'a str>,
    pub max_length: Option<usize>,
}

impl<'a> TextArea<'a> {
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            value: None,
            placeholder: None,
            rows: None,
            id: None,
            max_length: None,
        }
    }

    #[must_use]
    pub fn value(mut self, value: &'a str) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    #[must_use]
    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

impl Render for TextArea<'_> {
    fn render(&self) -> Markup {
        html! {
            textarea
                name=(self.name)
                id=[self.id]
                rows=[self.rows]
                placeholder=[self.placeholder]
                maxlength=[self.max_length]
            {
                @if let Some(value) = self.value {
                    (value)
                }
            }
        }
    }
}

/// One `<option>` of a [`Select`].
#[derive(Debug, Clone, Copy)]
pub struct SelectOption<'a> {
    pub value: &'a str,
    pub label: &'a str,
}

impl<'a> SelectOption<'a> {
    #[must_use]
    pub const fn new(value: &'a str, label: &'a str) -> Self {
        Self { value, label }
    }
}

/// A dropdown select element.
#[derive(Debug, Clone)]
pub struct Select<'a> {
    pub name: &'a str,
    pub options: Vec<SelectOption<'a>>,
    /// Value of the selected option
    pub selected: Option<&'a str>,
    pub id: Option<&'a str>,
    pub aria_label: Option<&'a str>,
}

impl<'a> Select<'a> {
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self {
            name,
            options: Vec::new(),
            selected: None,
            id: None,
            aria_label: None,
        }
    }

    #[must_use]
    pub fn option(mut self, value: &'a str, label: &'a str) -> Self {
        self.options.push(SelectOption::new(value, label));
        self
    }

    #[must_use]
    pub fn selected(mut self, selected: &'a str) -> Self {
        self.selected = Some(selected);
        self
    }

    #[must_use]
    pub fn id(mut self, id: &'a str) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn aria_label(mut self, label: &'a str) -> Self {
        self.aria_label = Some(label);
        self
    }
}

impl Render for Select<'_> {
    fn render(&self) -> Markup {
        html! {
            select name=(self.name) id=[self.id] aria-label=[self.aria_label] {
                @for opt in &self.options {
                    option value=(opt.value) selected[self.selected == Some(opt.value)] {
                        (opt.label)
                    }
                }
            }
        }
    }
}

/// Label plus input, with optional help text.
#[derive(Debug)]
pub struct FormGroup<'a> {
    pub label: &'a str,
    /// ID of the labelled input
    pub id: &'a str,
    pub input: Markup,
    pub help: Option<&'a str>,
}

impl<'a> FormGroup<'a> {
    #[must_use]
    pub fn new(label: &'a str, id: &'a str, input: Markup) -> Self {
        Self {
            label,
            id,
            input,
            help: None,
        }
    }

    #[must_use]
    pub fn help(mut self, help: &'a str) -> Self {
        self.help = Some(help);
        self
    }
}

impl Render for FormGroup<'_> {
    fn render(&self) -> Markup {
        html! {
            label for=(self.id) {
                (self.label)
                (self.input)
                @if let Some(help) = self.help {
                    small { (help) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_form() {
        let html = Form::post("/b/acme/posts", html! { "x" })
            .class("submit-form")
            .render()
            .into_string();
        assert!(html.contains("action=\"/b/acme/posts\""));
        assert!(html.contains("method=\"post\""));
        assert!(html.contains("class=\"submit-form\""));
    }

    #[test]
    fn test_input_attributes() {
        let html = Input::text("title")
            .id("title")
            .required()
            .max_length(200)
            .placeholder("Short summary")
            .render()
            .into_string();
        assert!(html.contains("type=\"text\""));
        assert!(html.contains("maxlength=\"200\""));
        assert!(html.contains("required"));
        assert!(html.contains("placeholder=\"Short summary\""));
    }

    #[test]
    fn test_search_input_keeps_value() {
        let html = Input::search("q").value("dark \"mode\"").render().into_string();
        assert!(html.contains("type=\"search\""));
        assert!(html.contains("value=\"dark &quot;mode&quot;\""));
    }

    #[test]
    fn test_select_marks_selected_option() {
        let html = Select::new("sort")
            .option("votes", "Most votes")
            .option("newest", "Newest")
            .selected("newest")
            .render()
            .into_string();
        assert!(html.contains("<option value=\"newest\" selected>Newest</option>"));
        assert!(html.contains("<option value=\"votes\">Most votes</option>"));
    }

    #[test]
    fn test_textarea_value() {
        let html = TextArea::new("description")
            .rows(5)
            .value("Body")
            .render()
            .into_string();
        assert!(html.contains("rows=\"5\""));
        assert!(html.contains(">Body</textarea>"));
    }

    #[test]
    fn test_form_group_help() {
        let html = FormGroup::new("Title", "title", Input::text("title").id("title").render())
            .help("Required")
            .render()
            .into_string();
        assert!(html.contains("for=\"title\""));
        assert!(html.contains("<small>Required</small>"));
    }
}
