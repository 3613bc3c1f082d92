//! Terminal colors and glyphs for the section catalog.

use ratatui::style::Color;

use crate::core::section::{Accent, Icon, SectionId};
use crate::core::view::BulletKind;

pub const FOCUS_BORDER: Color = Color::Cyan;
pub const IDLE_BORDER: Color = Color::DarkGray;

pub fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Blue => Color::Blue,
        Accent::Green => Color::Green,
        Accent::Purple => Color::Magenta,
        Accent::Orange => Color::Rgb(255, 165, 0),
        Accent::Indigo => Color::Rgb(99, 102, 241),
        Accent::Red => Color::Red,
    }
}

pub fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Settings => "⚙",
        Icon::Code => "</>",
        Icon::Cloud => "☁",
        Icon::Zap => "⚡",
        Icon::Book => "▤",
        Icon::Users => "◎",
    }
}

pub fn section_color(section: SectionId) -> Color {
    accent_color(section.descriptor().accent)
}

/// Accent for a raw section key. Unknown sections render neutral.
pub fn section_key_color(key: &str) -> Color {
    SectionId::from_key(key).map_or(Color::Gray, section_color)
}

/// Each bullet list on the article page has its own color family.
pub fn bullet_color(kind: BulletKind) -> Color {
    match kind {
        BulletKind::KeyPoints => Color::Blue,
        BulletKind::ArchitecturalConsiderations => Color::Magenta,
        BulletKind::Limitations => Color::Yellow,
    }
}
