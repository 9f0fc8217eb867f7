mod input;
mod state;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::text::Span;

pub use state::{ContentKind, FieldConfig, FieldStyle};

use state::DerivedState;

use crate::binding::Binding;
use crate::presentation;
use crate::validate::{self, Validator};

type ChangeListener = Box<dyn FnMut()>;

/// A Material-styled floating-label text field.
///
/// The content string is externally owned and shared through a [`Binding`];
/// the field writes it only to enforce the max-length clamp. Configuration
/// is chained at construction time and every accepted edit runs the change
/// pipeline: clamp, re-validate, update the filled flag, publish validity,
/// notify subscribers.
pub struct MaterialTextField {
    content: Binding<String>,
    validity: Option<Binding<bool>>,
    placeholder: String,
    config: FieldConfig,
    derived: DerivedState,
    is_focused: bool,
    last_seen: String,
    listeners: Vec<ChangeListener>,
    revision: u64,
}

impl MaterialTextField {
    /// Rows a field occupies: label, input, underline (or border), bottom row.
    pub const HEIGHT: u16 = 4;

    pub fn new(content: Binding<String>, placeholder: impl Into<String>) -> Self {
        let mut field = Self {
            content,
            validity: None,
            placeholder: placeholder.into(),
            config: FieldConfig::default(),
            derived: DerivedState::default(),
            is_focused: false,
            last_seen: String::new(),
            listeners: Vec::new(),
            revision: 0,
        };
        let initial = field.content.get();
        field.apply_change(initial);
        field
    }

    pub fn style(mut self, style: FieldStyle) -> Self {
        self.config.style = style;
        self
    }

    /// Attaches the validity output. Without a bound output the embedding
    /// application simply never observes validity.
    pub fn bind_validity(mut self, validity: Binding<bool>) -> Self {
        validity.set(self.derived.is_valid);
        self.validity = Some(validity);
        self
    }

    pub fn content_kind(mut self, kind: ContentKind) -> Self {
        self.config.content_kind = kind;
        self
    }

    pub fn accent_color(mut self, color: Color) -> Self {
        self.config.accent_color = color;
        self.touch();
        self
    }

    /// Appends to the validator sequence; earlier validators keep priority
    /// for the error message. Adding validators enables the error slot.
    pub fn add_validators(mut self, validators: Vec<Box<dyn Validator>>) -> Self {
        self.config.validators.extend(validators);
        self.config.show_error_slot = true;
        self.reconcile();
        self
    }

    pub fn show_error_slot(mut self, show: bool) -> Self {
        self.config.show_error_slot = show;
        self.touch();
        self
    }

    /// Non-empty helper text takes over the bottom row from the error
    /// message, whatever the current validity.
    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.config.helper_text = (!text.is_empty()).then_some(text);
        self.touch();
        self
    }

    pub fn is_secure(mut self, secure: bool) -> Self {
        self.config.is_secure = secure;
        self.touch();
        self
    }

    pub fn is_disabled(mut self, disabled: bool) -> Self {
        self.config.is_disabled = disabled;
        self.touch();
        self
    }

    pub fn max_character_count(mut self, max: usize) -> Self {
        self.config.max_length = Some(max);
        self.reconcile();
        self
    }

    pub fn show_character_counter(mut self, show: bool) -> Self {
        self.config.show_counter = show;
        self.touch();
        self
    }

    pub fn left_decoration(mut self, decoration: Span<'static>) -> Self {
        self.config.left_decoration = Some(decoration);
        self.touch();
        self
    }

    pub fn right_decoration(mut self, decoration: Span<'static>) -> Self {
        self.config.right_decoration = Some(decoration);
        self.touch();
        self
    }

    /// The change pipeline. Clamping happens first so validators and the
    /// filled check only ever see post-clamp content.
    pub fn apply_change(&mut self, next: String) {
        let next = clamp(next, self.config.max_length);
        let (is_valid, error_message) = validate::evaluate(&self.config.validators, &next);
        self.derived.is_valid = is_valid;
        self.derived.error_message = error_message;
        self.derived.is_filled = !next.is_empty();
        if let Some(validity) = &self.validity {
            validity.set(is_valid);
        }
        self.content.set(next.clone());
        self.last_seen = next;
        self.touch();
    }

    /// Re-runs the pipeline if the embedding application wrote the content
    /// binding directly since the last run.
    pub fn refresh(&mut self) {
        let current = self.content.get();
        if current != self.last_seen {
            self.apply_change(current);
        }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.apply_change(content.into());
    }

    pub fn clear(&mut self) {
        self.apply_change(String::new());
    }

    pub fn evaluate(&self) -> (bool, String) {
        validate::evaluate(&self.config.validators, &self.content.get())
    }

    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn content(&self) -> String {
        self.content.get()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn is_filled(&self) -> bool {
        self.derived.is_filled
    }

    pub fn is_valid(&self) -> bool {
        self.derived.is_valid
    }

    pub fn error_message(&self) -> &str {
        &self.derived.error_message
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.is_focused != focused {
            self.is_focused = focused;
            self.touch();
        }
    }

    pub fn height(&self) -> u16 {
        Self::HEIGHT
    }

    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        self.refresh();
        presentation::render_field(self, frame, area);
    }

    fn reconcile(&mut self) {
        let current = self.content.get();
        self.apply_change(current);
    }

    fn touch(&mut self) {
        self.revision += 1;
        for listener in &mut self.listeners {
            listener();
        }
    }
}

fn clamp(content: String, max_length: Option<usize>) -> String {
    match max_length {
        Some(max) if content.chars().count() > max => content.chars().take(max).collect(),
        _ => content,
    }
}
