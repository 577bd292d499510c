//! Declarative model for the settings screen.
//!
//! Every adjustable preference is listed once in [`SETTINGS_LAYOUT`]; the
//! view renders the list and the key handler walks it, so adding a setting
//! is a one-line change here.

use focusflow_core::{AccessibilitySettings, SupportMode};

// ── Setting fields enum ─────────────────────────────────────────────────

/// Identifies a single adjustable setting in the settings view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    FontSize,
    LineSpacing,
    LetterSpacing,
    DyslexiaFont,
    HighContrast,
    ZenMode,
    SupportMode,
}

/// One row of the settings screen. Header rows are decorative; the
/// selection cursor skips them.
#[derive(Debug, Clone)]
pub enum SettingItem {
    Header(&'static str),
    Field {
        field: SettingField,
        label: &'static str,
        description: &'static str,
    },
}

impl SettingItem {
    pub fn field(&self) -> Option<SettingField> {
        if let Self::Field { field, .. } = self {
            Some(*field)
        } else {
            None
        }
    }
}

/// Everything the settings screen shows, top to bottom.
pub const SETTINGS_LAYOUT: &[SettingItem] = &[
    SettingItem::Header("Text"),
    SettingItem::Field {
        field: SettingField::FontSize,
        label: "Font Size",
        description: "Base text size used across the app",
    },
    SettingItem::Field {
        field: SettingField::LineSpacing,
        label: "Line Spacing",
        description: "Vertical room between lines of task text",
    },
    SettingItem::Field {
        field: SettingField::LetterSpacing,
        label: "Letter Spacing",
        description: "Horizontal room between characters",
    },
    SettingItem::Header("Reading"),
    SettingItem::Field {
        field: SettingField::DyslexiaFont,
        label: "Dyslexia Font",
        description: "Use the dyslexia-friendly typeface while in Dyslexia mode",
    },
    SettingItem::Field {
        field: SettingField::HighContrast,
        label: "High Contrast",
        description: "Boost contrast and brightness across the whole app",
    },
    SettingItem::Field {
        field: SettingField::ZenMode,
        label: "Zen Mode",
        description: "Hide everything except the current task",
    },
    SettingItem::Header("Support"),
    SettingItem::Field {
        field: SettingField::SupportMode,
        label: "Support Mode",
        description: "Switches the dashboard layout and accent (shortcut: m)",
    },
];

impl SettingField {
    /// True for on/off fields; the rest cycle through their options.
    pub fn is_toggle(self) -> bool {
        matches!(self, Self::DyslexiaFont | Self::HighContrast | Self::ZenMode)
    }

    /// Current value of this field, rendered for its settings row.
    pub fn display_value(
        self,
        settings: &AccessibilitySettings,
        mode: Option<SupportMode>,
    ) -> String {
        match self {
            Self::FontSize => settings.font_size.label().to_string(),
            Self::LineSpacing => settings.line_spacing.label().to_string(),
            Self::LetterSpacing => settings.letter_spacing.label().to_string(),
            Self::DyslexiaFont => on_off(settings.dyslexia_font),
            Self::HighContrast => on_off(settings.high_contrast),
            Self::ZenMode => on_off(settings.zen_mode),
            Self::SupportMode => match mode {
                Some(mode) => mode.label().to_string(),
                None => "(not set)".to_string(),
            },
        }
    }

    /// Apply one activation (toggle or cycle) to the settings.
    ///
    /// `SupportMode` is a no-op here: the mode lives on the profile, not in
    /// the accessibility settings, so the app handles it separately.
    pub fn activate(self, settings: &mut AccessibilitySettings) {
        match self {
            Self::FontSize => settings.font_size = settings.font_size.cycle(),
            Self::LineSpacing => settings.line_spacing = settings.line_spacing.cycle(),
            Self::LetterSpacing => settings.letter_spacing = settings.letter_spacing.cycle(),
            Self::DyslexiaFont => settings.dyslexia_font = !settings.dyslexia_font,
            Self::HighContrast => settings.high_contrast = !settings.high_contrast,
            Self::ZenMode => settings.zen_mode = !settings.zen_mode,
            Self::SupportMode => {}
        }
    }
}

fn on_off(value: bool) -> String {
    if value { "On" } else { "Off" }.to_string()
}

/// How many rows the selection cursor can land on.
pub fn selectable_count() -> usize {
    SETTINGS_LAYOUT
        .iter()
        .filter(|item| item.field().is_some())
        .count()
}

/// Field at cursor position `n`, counting field rows only.
pub fn nth_field(n: usize) -> Option<SettingField> {
    SETTINGS_LAYOUT.iter().filter_map(SettingItem::field).nth(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use focusflow_core::FontSize;

    #[test]
    fn nth_field_skips_headers() {
        assert_eq!(nth_field(0), Some(SettingField::FontSize));
        assert_eq!(nth_field(3), Some(SettingField::DyslexiaFont));
        assert_eq!(nth_field(6), Some(SettingField::SupportMode));
        assert_eq!(nth_field(7), None);
    }

    #[test]
    fn selectable_count_matches_layout() {
        assert_eq!(selectable_count(), 7);
    }

    #[test]
    fn activate_cycles_and_toggles() {
        let mut settings = AccessibilitySettings::default();
        SettingField::FontSize.activate(&mut settings);
        assert_eq!(settings.font_size, FontSize::Lg);
        SettingField::HighContrast.activate(&mut settings);
        assert!(settings.high_contrast);
        SettingField::SupportMode.activate(&mut settings);
        assert_eq!(settings.font_size, FontSize::Lg);
    }

    #[test]
    fn display_value_reports_mode_from_profile() {
        let settings = AccessibilitySettings::default();
        assert_eq!(
            SettingField::SupportMode.display_value(&settings, Some(SupportMode::Autism)),
            "Autism"
        );
        assert_eq!(
            SettingField::SupportMode.display_value(&settings, None),
            "(not set)"
        );
    }
}
