//! Status Line Component
//!
//! Mode indicator, timed messages, and key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::detail::Mode;

/// Message type for status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Error,
}

impl MessageType {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::White,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }
}

/// Status line widget
pub struct StatusLine<'a> {
    mode: Mode,
    message: Option<(&'a str, MessageType)>,
    hostname: Option<&'a str>,
}

impl<'a> StatusLine<'a> {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            message: None,
            hostname: None,
        }
    }

    pub fn message(mut self, msg: &'a str, msg_type: MessageType) -> Self {
        self.message = Some((msg, msg_type));
        self
    }

    pub fn hostname(mut self, hostname: &'a str) -> Self {
        self.hostname = Some(hostname);
        self
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(Color::DarkGray));

        let mut x = area.x;

        let mode_style = match self.mode {
            Mode::Viewing => Style::default().fg(Color::Black).bg(Color::Blue),
            Mode::Editing => Style::default().fg(Color::Black).bg(Color::Green),
        };
        let indicator = format!(" {} ", self.mode.indicator());
        buf.set_string(x, area.y, &indicator, mode_style.add_modifier(Modifier::BOLD));
        x += indicator.len() as u16 + 1;

        if let Some((msg, msg_type)) = self.message {
            buf.set_string(x, area.y, msg, Style::default().fg(msg_type.color()));
        } else if let Some(hostname) = self.hostname {
            buf.set_string(x, area.y, hostname, Style::default().fg(Color::White));
        }
    }
}

/// Bottom help bar with mode-specific key hints
pub struct HelpBar {
    mode: Mode,
    confirming: bool,
}

impl HelpBar {
    pub fn new(mode: Mode, confirming: bool) -> Self {
        Self { mode, confirming }
    }
}

impl Widget for HelpBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hints: &[(&str, &str)] = if self.confirming {
            &[("y", "confirm"), ("n", "cancel")]
        } else {
            match self.mode {
                Mode::Viewing => &[
                    ("e", "edit"),
                    ("u", "copy user"),
                    ("c", "copy pass"),
                    ("d", "delete"),
                    ("r", "refresh"),
                    ("q", "quit"),
                ],
                Mode::Editing => &[
                    ("enter", "next field"),
                    ("tab", "next field"),
                    ("esc", "done"),
                ],
            }
        };

        let mut spans = Vec::new();
        for (key, action) in hints {
            spans.push(Span::styled(
                format!("[{}]", key),
                Style::default().fg(Color::Cyan),
            ));
            spans.push(Span::raw(format!(" {}  ", action)));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
