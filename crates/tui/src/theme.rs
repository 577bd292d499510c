use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Padding};

use focusflow_core::ModeProfile;

pub struct Theme;

impl Theme {
    // ── Borders ──────────────────────────────────────────────────────
    pub const BORDER_DIM: Color = Color::DarkGray;
    pub const BORDER_NORMAL: Color = Color::Rgb(63, 63, 70);

    // ── Text ─────────────────────────────────────────────────────────
    pub const TEXT_PRIMARY: Color = Color::Rgb(228, 228, 231);
    pub const TEXT_BOOSTED: Color = Color::White;
    pub const TEXT_SECONDARY: Color = Color::Rgb(161, 161, 170);
    pub const TEXT_MUTED: Color = Color::Rgb(113, 113, 122);
    pub const TEXT_HINT: Color = Color::Rgb(82, 82, 91);

    // ── Footer key hints ─────────────────────────────────────────────
    pub const TEXT_KEY: Color = Color::Rgb(161, 161, 170);
    pub const TEXT_KEY_DESC: Color = Color::DarkGray;

    // ── Accents ──────────────────────────────────────────────────────
    pub const ACCENT_ORANGE: Color = Color::Rgb(249, 115, 22);
    pub const ACCENT_TEAL: Color = Color::Rgb(20, 184, 166);
    pub const ACCENT_AMBER: Color = Color::Rgb(245, 158, 11);
    pub const ACCENT_GREEN: Color = Color::Rgb(34, 197, 94);
    pub const ACCENT_RED: Color = Color::Rgb(239, 68, 68);

    // ── Status ───────────────────────────────────────────────────────
    pub const TOGGLE_ON: Color = Color::Rgb(34, 197, 94);
    pub const TOGGLE_OFF: Color = Color::Rgb(113, 113, 122);
    pub const DONE: Color = Color::Rgb(34, 197, 94);
    pub const FIELD_VALUE: Color = Color::Rgb(134, 139, 152);

    // ── Padding ──────────────────────────────────────────────────────
    pub const PADDING_CARD: Padding = Padding::new(2, 2, 1, 1);
    pub const PADDING_COMPACT: Padding = Padding::new(1, 1, 0, 0);

    // ── Blocks ───────────────────────────────────────────────────────

    pub fn block() -> Block<'static> {
        Self::block_accent(Self::BORDER_NORMAL)
    }

    pub fn block_dim() -> Block<'static> {
        Self::block_accent(Self::BORDER_DIM)
    }

    /// Rounded block with an arbitrary border color (mode accents).
    pub fn block_accent(color: Color) -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(color))
    }

    /// Primary text color, brightened when the contrast boost is active.
    pub fn text(boosted: bool) -> Color {
        if boosted {
            Self::TEXT_BOOSTED
        } else {
            Self::TEXT_PRIMARY
        }
    }

    /// Secondary text color, lifted one step when the contrast boost is active.
    pub fn dim(boosted: bool) -> Color {
        if boosted {
            Self::TEXT_PRIMARY
        } else {
            Self::TEXT_SECONDARY
        }
    }
}

// ── Mode accent ──────────────────────────────────────────────────────

/// Terminal color for a mode profile's accent token.
pub fn accent_color(profile: &ModeProfile) -> Color {
    match profile.accent {
        "orange" => Theme::ACCENT_ORANGE,
        "teal" => Theme::ACCENT_TEAL,
        "amber" => Theme::ACCENT_AMBER,
        _ => Theme::TEXT_SECONDARY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use focusflow_core::SupportMode;

    #[test]
    fn each_mode_has_a_distinct_accent() {
        let adhd = accent_color(&ModeProfile::for_mode(SupportMode::Adhd));
        let autism = accent_color(&ModeProfile::for_mode(SupportMode::Autism));
        let dyslexia = accent_color(&ModeProfile::for_mode(SupportMode::Dyslexia));
        assert!(adhd != autism && autism != dyslexia && adhd != dyslexia);
    }

    #[test]
    fn contrast_boost_brightens_both_text_levels() {
        assert_eq!(Theme::text(true), Theme::TEXT_BOOSTED);
        assert_eq!(Theme::dim(true), Theme::TEXT_PRIMARY);
        assert_eq!(Theme::text(false), Theme::TEXT_PRIMARY);
    }
}
