use ratatui::style::{Color, Modifier, Style};

/// Colors for one display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub selection: Color,
    pub border: Color,
    pub error: Color,
    pub loading: Color,
}

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(0xf8, 0xf9, 0xfa),
    surface: Color::Rgb(0xff, 0xff, 0xff),
    text: Color::Rgb(0x21, 0x21, 0x21),
    muted: Color::Rgb(0x75, 0x75, 0x75),
    accent: Color::Rgb(0x19, 0x76, 0xd2),
    selection: Color::Rgb(0xe3, 0xf2, 0xfd),
    border: Color::Rgb(0xe0, 0xe0, 0xe0),
    error: Color::Rgb(0xd3, 0x2f, 0x2f),
    loading: Color::Rgb(0xed, 0x6c, 0x02),
};

pub const DARK: Palette = Palette {
    background: Color::Rgb(0x12, 0x12, 0x12),
    surface: Color::Rgb(0x1e, 0x1e, 0x1e),
    text: Color::Rgb(0xff, 0xff, 0xff),
    muted: Color::Rgb(0xb0, 0xb0, 0xb0),
    accent: Color::Rgb(0x90, 0xca, 0xf9),
    selection: Color::Rgb(0x2a, 0x3f, 0x54),
    border: Color::Rgb(0x44, 0x44, 0x44),
    error: Color::Rgb(0xf4, 0x43, 0x36),
    loading: Color::Rgb(0xff, 0xb7, 0x4d),
};

pub fn palette(dark_mode: bool) -> Palette {
    if dark_mode {
        DARK
    } else {
        LIGHT
    }
}

impl Palette {
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}
