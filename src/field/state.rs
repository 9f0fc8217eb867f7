use ratatui::style::Color;
use ratatui::text::Span;

use crate::validate::Validator;

/// Visual treatment of the field, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldStyle {
    /// Dimmed fill with an underline that picks up the accent color on focus.
    #[default]
    Normal,
    /// Rounded stroked border with the label floating into the top edge.
    Outlined,
}

/// Advisory tag describing what the field expects. Platforms with soft
/// keyboards use this to pick an input affordance; it has no effect on
/// validation and a terminal has nothing to switch, so it is only stored
/// and exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentKind {
    #[default]
    None,
    Email,
    Number,
    Phone,
    Name,
}

/// Everything configurable on a field instance. Owned by the field for its
/// whole mounted lifetime.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub style: FieldStyle,
    pub content_kind: ContentKind,
    pub accent_color: Color,
    pub is_secure: bool,
    pub is_disabled: bool,
    /// `None` means unbounded: no clamp is ever applied.
    pub max_length: Option<usize>,
    pub show_counter: bool,
    pub show_error_slot: bool,
    pub helper_text: Option<String>,
    pub validators: Vec<Box<dyn Validator>>,
    pub left_decoration: Option<Span<'static>>,
    pub right_decoration: Option<Span<'static>>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            style: FieldStyle::Normal,
            content_kind: ContentKind::None,
            accent_color: Color::Blue,
            is_secure: false,
            is_disabled: false,
            max_length: None,
            show_counter: false,
            show_error_slot: false,
            helper_text: None,
            validators: Vec::new(),
            left_decoration: None,
            right_decoration: None,
        }
    }
}

/// Recomputed by the change pipeline on every content change, never stored
/// anywhere else.
#[derive(Debug, Clone)]
pub struct DerivedState {
    /// Content is non-empty. Drives the floating label only; a field full of
    /// invalid text is still filled.
    pub is_filled: bool,
    pub is_valid: bool,
    /// Empty whenever `is_valid` is true.
    pub error_message: String,
}

impl Default for DerivedState {
    fn default() -> Self {
        Self {
            is_filled: false,
            is_valid: true,
            error_message: String::new(),
        }
    }
}
