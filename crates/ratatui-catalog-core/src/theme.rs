use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

/// The two supported color schemes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub mode: ThemeMode,
    pub text_primary: Style,
    pub text_muted: Style,
    pub placeholder: Style,
    pub accent: Style,
    pub danger: Style,
    pub border: Style,
    /// Background used by filled input fields.
    pub surface: Style,
    pub header: Style,
    /// Highlight for the row under the table cursor.
    pub row_hover: Style,
    pub row_selected: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            text_primary: Style::default().fg(Color::Black).bg(Color::White),
            text_muted: Style::default().fg(Color::DarkGray),
            placeholder: Style::default().fg(Color::Gray),
            accent: Style::default().fg(Color::Blue),
            danger: Style::default().fg(Color::Red),
            border: Style::default().fg(Color::Gray),
            surface: Style::default().fg(Color::Black).bg(Color::Gray),
            header: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            row_hover: Style::default().add_modifier(Modifier::REVERSED),
            row_selected: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        }
    }

    pub fn dark() -> Self {
        use ratatui::style::Stylize;

        Self {
            mode: ThemeMode::Dark,
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            placeholder: Style::default().dark_gray(),
            accent: Style::default().cyan(),
            danger: Style::default().light_red(),
            border: Style::default().dark_gray(),
            surface: Style::default().white().on_dark_gray(),
            header: Style::default().gray().bold(),
            row_hover: Style::default().reversed(),
            row_selected: Style::default().cyan().bold(),
        }
    }

    /// Returns the theme for the opposite mode.
    pub fn toggled(&self) -> Self {
        Self::for_mode(self.mode.toggle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_flips_between_modes() {
        let t = Theme::default();
        assert_eq!(t.mode, ThemeMode::Dark);
        assert_eq!(t.toggled().mode, ThemeMode::Light);
        assert_eq!(t.toggled().toggled().mode, ThemeMode::Dark);
    }
}
