use ratatui::style::{Color, Modifier, Style};

/// Fixed palette for the whole screen.
pub struct Theme {
    pub accent: Style,
    pub ok: Style,
    pub error: Style,
    pub muted: Style,
    pub text: Style,
    pub math: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Style::default().fg(Color::Cyan),
            ok: Style::default().fg(Color::Green),
            error: Style::default().fg(Color::Red),
            muted: Style::default().fg(Color::DarkGray),
            text: Style::default(),
            math: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        }
    }
}
