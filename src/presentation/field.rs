use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::field::{FieldConfig, FieldStyle, MaterialTextField};

pub(crate) fn render_field(field: &MaterialTextField, frame: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    match field.config().style {
        FieldStyle::Normal => render_normal(field, frame, rows[0]),
        FieldStyle::Outlined => render_outlined(field, frame, rows[0]),
    }
    frame.render_widget(Paragraph::new(bottom_row(field, rows[1].width)), rows[1]);
}

fn render_normal(field: &MaterialTextField, frame: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    if field.is_filled() {
        frame.render_widget(Paragraph::new(floating_label(field)), rows[0]);
    }

    let mut fill = Style::default().bg(Color::DarkGray);
    if field.config().is_disabled {
        fill = fill.add_modifier(Modifier::DIM);
    }
    frame.render_widget(
        Paragraph::new(input_line(field, rows[1].width)).style(fill),
        rows[1],
    );
    frame.render_widget(Paragraph::new(underline(field, rows[2].width)), rows[2]);
    place_cursor(field, frame, rows[1]);
}

fn render_outlined(field: &MaterialTextField, frame: &mut Frame<'_>, area: Rect) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(field));
    if field.is_filled() {
        block = block.title(floating_label(field));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut style = Style::default();
    if field.config().is_disabled {
        style = style.add_modifier(Modifier::DIM);
    }
    frame.render_widget(
        Paragraph::new(input_line(field, inner.width)).style(style),
        inner,
    );
    place_cursor(field, frame, inner);
}

/// The shrunk label shown above the input (Normal) or in the top border
/// (Outlined) once the field holds any content.
pub(crate) fn floating_label(field: &MaterialTextField) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {} ", field.placeholder()),
        Style::default().fg(field.config().accent_color),
    ))
}

pub(crate) fn input_line(field: &MaterialTextField, width: u16) -> Line<'static> {
    let config = field.config();
    let mut spans: Vec<Span<'static>> = vec![Span::raw(" ")];
    if let Some(decoration) = &config.left_decoration {
        spans.push(decoration.clone());
        spans.push(Span::raw(" "));
    }

    let content = display_content(field);
    if content.is_empty() {
        spans.push(Span::styled(
            field.placeholder().to_string(),
            placeholder_style(config),
        ));
    } else {
        spans.push(Span::styled(content, content_style(config)));
    }

    if let Some(decoration) = &config.right_decoration {
        let used: usize = spans
            .iter()
            .map(|span| UnicodeWidthStr::width(span.content.as_ref()))
            .sum();
        let deco_width = UnicodeWidthStr::width(decoration.content.as_ref());
        let pad = (width as usize)
            .saturating_sub(used + deco_width + 1)
            .max(1);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(decoration.clone());
    }

    Line::from(spans)
}

pub(crate) fn underline(field: &MaterialTextField, width: u16) -> Line<'static> {
    let config = field.config();
    let (glyph, mut style) = if field.is_focused() {
        ("━", Style::default().fg(config.accent_color))
    } else {
        ("─", Style::default().fg(Color::Gray))
    };
    if config.is_disabled {
        style = style.add_modifier(Modifier::DIM);
    }
    Line::from(Span::styled(glyph.repeat(width as usize), style))
}

pub(crate) fn border_style(field: &MaterialTextField) -> Style {
    let config = field.config();
    if config.is_disabled {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else if field.is_focused() {
        Style::default().fg(config.accent_color)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Helper text owns the bottom row whenever it is set; the error message
/// only appears without helper text, with the counter trailing either way.
pub(crate) fn bottom_row(field: &MaterialTextField, width: u16) -> Line<'static> {
    let config = field.config();
    let counter = counter_text(field);
    let counter_width = UnicodeWidthStr::width(counter.as_str());
    let budget = (width as usize).saturating_sub(counter_width + 1);

    let (message, style) = if let Some(text) = &config.helper_text {
        (text.clone(), Style::default().fg(Color::Gray))
    } else if config.show_error_slot && !field.is_valid() {
        (
            field.error_message().to_string(),
            Style::default().fg(Color::Red),
        )
    } else {
        (String::new(), Style::default())
    };
    let message = fit_message(&message, budget);

    let used = 1 + UnicodeWidthStr::width(message.as_str());
    let mut spans = vec![Span::raw(" "), Span::styled(message, style)];
    if !counter.is_empty() {
        let pad = (width as usize).saturating_sub(used + counter_width);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(counter, Style::default().fg(Color::Gray)));
    }
    Line::from(spans)
}

/// `current/max`, blank while the field is empty, bare count when no limit
/// is configured.
pub(crate) fn counter_text(field: &MaterialTextField) -> String {
    let content = field.content();
    if content.is_empty() {
        return String::new();
    }
    let count = content.chars().count();
    match field.config().max_length {
        Some(max) => format!("{count}/{max}"),
        None => count.to_string(),
    }
}

fn display_content(field: &MaterialTextField) -> String {
    let content = field.content();
    if field.config().is_secure {
        "•".repeat(content.chars().count())
    } else {
        content
    }
}

fn placeholder_style(config: &FieldConfig) -> Style {
    let style = Style::default().fg(Color::Gray);
    if config.is_disabled {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

fn content_style(config: &FieldConfig) -> Style {
    let style = Style::default().fg(Color::White);
    if config.is_disabled {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

fn fit_message(message: &str, width: usize) -> String {
    if message.is_empty() || width == 0 {
        return String::new();
    }
    wrap(message, width)
        .into_iter()
        .next()
        .map(|line| line.into_owned())
        .unwrap_or_default()
}

fn place_cursor(field: &MaterialTextField, frame: &mut Frame<'_>, area: Rect) {
    if !field.is_focused() || field.config().is_disabled || area.width == 0 {
        return;
    }
    let column = cursor_column(field).min(area.width.saturating_sub(1));
    frame.set_cursor_position((area.x + column, area.y));
}

fn cursor_column(field: &MaterialTextField) -> u16 {
    let config = field.config();
    let mut column = 1usize;
    if let Some(decoration) = &config.left_decoration {
        column += UnicodeWidthStr::width(decoration.content.as_ref()) + 1;
    }
    column += UnicodeWidthStr::width(display_content(field).as_str());
    column.min(u16::MAX as usize) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Binding;
    use crate::validate::RequiredValidator;

    fn make_field(content: &str) -> MaterialTextField {
        MaterialTextField::new(Binding::new(content.to_string()), "Label")
    }

    #[test]
    fn underline_uses_accent_when_focused() {
        let mut field = make_field("").accent_color(Color::Magenta);
        field.set_focused(true);
        let line = underline(&field, 4);
        let span = line.spans.first().expect("underline span");
        assert_eq!(span.style.fg, Some(Color::Magenta));
        assert_eq!(span.content.as_ref(), "━━━━");
    }

    #[test]
    fn underline_is_thin_and_gray_when_blurred() {
        let field = make_field("");
        let line = underline(&field, 4);
        let span = line.spans.first().expect("underline span");
        assert_eq!(span.style.fg, Some(Color::Gray));
        assert_eq!(span.content.as_ref(), "────");
    }

    #[test]
    fn border_tracks_focus_and_disablement() {
        let mut field = make_field("").accent_color(Color::Yellow);
        assert_eq!(border_style(&field).fg, Some(Color::Gray));
        field.set_focused(true);
        assert_eq!(border_style(&field).fg, Some(Color::Yellow));

        let disabled = make_field("").is_disabled(true);
        let style = border_style(&disabled);
        assert_eq!(style.fg, Some(Color::DarkGray));
        assert!(style.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn input_line_shows_placeholder_while_empty() {
        let field = make_field("");
        let line = input_line(&field, 20);
        let span = line.spans.last().expect("placeholder span");
        assert_eq!(span.content.as_ref(), "Label");
        assert_eq!(span.style.fg, Some(Color::Gray));
    }

    #[test]
    fn input_line_masks_secure_content() {
        let field = make_field("secret").is_secure(true);
        let line = input_line(&field, 20);
        let span = line.spans.last().expect("content span");
        assert_eq!(span.content.as_ref(), "••••••");
    }

    #[test]
    fn input_line_places_decorations_around_content() {
        let field = make_field("abc")
            .left_decoration(Span::raw("◆"))
            .right_decoration(Span::raw("✕"));
        let line = input_line(&field, 12);
        let texts: Vec<&str> = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(texts.first(), Some(&" "));
        assert_eq!(texts.get(1), Some(&"◆"));
        assert!(texts.contains(&"abc"));
        assert_eq!(texts.last(), Some(&"✕"));
    }

    #[test]
    fn bottom_row_prefers_helper_text_over_error() {
        let mut field = make_field("")
            .helper_text("This is to give more information")
            .add_validators(vec![Box::new(RequiredValidator::new())]);
        field.set_content("");
        assert!(!field.is_valid());

        let line = bottom_row(&field, 60);
        let span = line.spans.get(1).expect("message span");
        assert_eq!(span.content.as_ref(), "This is to give more information");
        assert_eq!(span.style.fg, Some(Color::Gray));
    }

    #[test]
    fn bottom_row_shows_error_without_helper_text() {
        let mut field =
            make_field("").add_validators(vec![Box::new(RequiredValidator::new())]);
        field.set_content("");
        let line = bottom_row(&field, 60);
        let span = line.spans.get(1).expect("message span");
        assert_eq!(span.content.as_ref(), "Field is required");
        assert_eq!(span.style.fg, Some(Color::Red));
    }

    #[test]
    fn bottom_row_respects_a_disabled_error_slot() {
        let mut field = make_field("")
            .add_validators(vec![Box::new(RequiredValidator::new())])
            .show_error_slot(false);
        field.set_content("");
        let line = bottom_row(&field, 60);
        let span = line.spans.get(1).expect("message span");
        assert_eq!(span.content.as_ref(), "");
    }

    #[test]
    fn counter_is_blank_while_empty() {
        let field = make_field("").max_character_count(5).show_character_counter(true);
        assert_eq!(counter_text(&field), "");
    }

    #[test]
    fn counter_reports_count_against_limit() {
        let mut field = make_field("").max_character_count(5).show_character_counter(true);
        field.set_content("hello world");
        assert_eq!(counter_text(&field), "5/5");
    }

    #[test]
    fn counter_omits_limit_when_unbounded() {
        let mut field = make_field("").show_character_counter(true);
        field.set_content("abc");
        assert_eq!(counter_text(&field), "3");
    }

    #[test]
    fn counter_right_aligns_in_the_bottom_row() {
        let mut field = make_field("").max_character_count(9).show_character_counter(true);
        field.set_content("abc");
        let line = bottom_row(&field, 20);
        let rendered: String = line
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(rendered.len(), 20);
        assert!(rendered.ends_with("3/9"));
    }
}
