//! Code snippet preview pane.

/// Preview of the snippet being composed.
///
/// The rendered text and class are refreshed only on [`show`](Self::show),
/// so edits made while the pane is open appear on the next render.
#[derive(Debug, Clone, Default)]
pub struct CodePreview {
    code: String,
    language: String,
    visible: bool,
    rendered: Option<Rendered>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rendered {
    text: String,
    class: String,
}

impl CodePreview {
    /// Create a hidden preview.
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
            visible: false,
            rendered: None,
        }
    }

    /// Replace the code being composed.
    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    /// Change the language; re-renders when the pane is open.
    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
        if self.visible {
            self.show();
        }
    }

    /// Open the pane and render the current code.
    pub fn show(&mut self) {
        self.rendered = Some(Rendered {
            text: self.code.clone(),
            class: format!("language-{}", self.language),
        });
        self.visible = true;
    }

    /// Close the pane.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Open when closed, close when open.
    pub fn toggle(&mut self) {
        if self.visible {
            self.hide();
        } else {
            self.show();
        }
    }

    /// Whether the pane is open.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Label of the preview button.
    pub fn button_label(&self) -> &'static str {
        if self.visible { "Hide Preview" } else { "Preview" }
    }

    /// Rendered code, if the pane is open.
    pub fn rendered_text(&self) -> Option<&str> {
        self.visible_render().map(|r| r.text.as_str())
    }

    /// Highlighter class of the rendered code, if the pane is open.
    pub fn rendered_class(&self) -> Option<&str> {
        self.visible_render().map(|r| r.class.as_str())
    }

    fn visible_render(&self) -> Option<&Rendered> {
        self.rendered.as_ref().filter(|_| self.visible)
    }
}
