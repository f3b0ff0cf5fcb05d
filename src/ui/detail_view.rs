//! Detail Screen Component
//!
//! Renders the five-row descriptor sequence from the controller. Field
//! bindings are re-acquired every frame: while editing, the live text comes
//! out of the edit buffers, never from widget state cached across renders.

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::detail::{Field, InputHint, Row};
use crate::input::EditBuffers;
use crate::store::UsageMetadata;

/// Detail screen widget
pub struct DetailScreen<'a> {
    rows: &'a [Row],
    buffers: Option<&'a EditBuffers>,
    usage: Option<&'a UsageMetadata>,
}

impl<'a> DetailScreen<'a> {
    pub fn new(rows: &'a [Row]) -> Self {
        Self {
            rows,
            buffers: None,
            usage: None,
        }
    }

    /// Live edit buffers to display instead of the record values
    pub fn buffers(mut self, buffers: &'a EditBuffers) -> Self {
        self.buffers = Some(buffers);
        self
    }

    pub fn usage(mut self, usage: Option<&'a UsageMetadata>) -> Self {
        self.usage = usage;
        self
    }
}

impl Widget for DetailScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = self
            .rows
            .iter()
            .find_map(|row| match row {
                Row::Title { hostname } => Some(hostname.as_str()),
                _ => None,
            })
            .unwrap_or("login");

        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        block.render(area, buf);

        let mut y = inner.y;
        for row in self.rows {
            match row {
                Row::Title { hostname } => {
                    let line = Line::from(Span::styled(
                        hostname.clone(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ));
                    buf.set_line(inner.x, y, &line, inner.width);
                    y += 2;
                }
                Row::Input {
                    field,
                    value,
                    hint,
                    editing,
                    focused,
                } => {
                    render_input_row(
                        buf,
                        inner,
                        &mut y,
                        *field,
                        value,
                        *hint,
                        *editing,
                        *focused,
                        self.buffers,
                    );
                }
                Row::Delete => {
                    y += 1;
                    let line = Line::from(Span::styled(
                        "Delete",
                        Style::default().fg(Color::Red),
                    ));
                    buf.set_line(inner.x, y, &line, inner.width);
                    y += 1;
                }
            }
        }

        // Metadata footer, present only once the usage fetch has landed
        if let Some(label) = self.usage.and_then(last_changed_label) {
            let footer_y = inner.y + inner.height.saturating_sub(1);
            if footer_y > y {
                buf.set_string(
                    inner.x,
                    footer_y,
                    label,
                    Style::default().fg(Color::DarkGray),
                );
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_input_row(
    buf: &mut Buffer,
    inner: Rect,
    y: &mut u16,
    field: Field,
    value: &str,
    hint: InputHint,
    editing: bool,
    focused: bool,
    buffers: Option<&EditBuffers>,
) {
    let label_style = Style::default().fg(Color::DarkGray);
    buf.set_string(inner.x, *y, format!("{}:", field.label()), label_style);

    let value_x = inner.x + 12;
    let width = inner.width.saturating_sub(12);

    let live = editing
        .then(|| buffers.map(|b| b.get(field)))
        .flatten();

    match live {
        Some(buffer) => {
            if buffer.value.is_empty() && !focused {
                buf.set_string(
                    value_x,
                    *y,
                    placeholder(hint),
                    Style::default().fg(Color::DarkGray),
                );
                *y += 1;
                return;
            }

            let style = if focused {
                Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::White)
            };
            let shown = if field == Field::Password && !focused {
                anonymize(&buffer.value)
            } else {
                buffer.value.clone()
            };
            buf.set_string(value_x, *y, &shown, style);

            if focused {
                let cursor_col = buffer.value[..buffer.cursor].chars().count();
                let cursor_x = value_x + cursor_col as u16;
                if cursor_x < value_x + width {
                    if let Some(cell) = buf.cell_mut((cursor_x, *y)) {
                        cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
                    }
                }
            }
        }
        None => {
            let shown = if field == Field::Password {
                anonymize(value)
            } else {
                value.to_string()
            };
            let style = match field {
                Field::Password => Style::default().fg(Color::Yellow),
                Field::Website => Style::default().fg(Color::Blue),
                Field::Username => Style::default().fg(Color::White),
            };
            buf.set_string(value_x, *y, &shown, style);
        }
    }

    *y += 1;
}

/// Placeholder for an empty editable field
fn placeholder(hint: InputHint) -> &'static str {
    match hint {
        InputHint::Email => "user@example.com",
        InputHint::Url => "https://",
        InputHint::Plain => "",
    }
}

/// Replace every character with a bullet, capped so row width stays sane
pub fn anonymize(secret: &str) -> String {
    "•".repeat(secret.chars().count().min(20))
}

/// Footer text for the password-changed timestamp
pub fn last_changed_label(usage: &UsageMetadata) -> Option<String> {
    let ts = DateTime::from_timestamp(usage.password_last_changed_at, 0)?;
    let local = ts.with_timezone(&Local);
    Some(format!(
        "Last modified {}",
        local.format("%d-%b-%Y at %H:%M")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymize_masks_every_char() {
        assert_eq!(anonymize("secret"), "••••••");
        assert_eq!(anonymize(""), "");
    }

    #[test]
    fn test_anonymize_caps_length() {
        assert_eq!(anonymize(&"x".repeat(100)).chars().count(), 20);
    }

    #[test]
    fn test_last_changed_label() {
        let usage = UsageMetadata {
            password_last_changed_at: 1_700_000_000,
            last_used_at: None,
        };
        let label = last_changed_label(&usage).unwrap();
        assert!(label.starts_with("Last modified "));
    }
}
