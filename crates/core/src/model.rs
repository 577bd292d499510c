//! Domain types: tasks, users, support modes, and accessibility preferences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authenticated account. Lives for the session only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Single actionable step inside a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: i64,
    pub content: String,
    pub completed: bool,
}

/// Internal task shape every view renders from. Replaced wholesale on each
/// refresh; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub display_order: Option<i64>,
    pub steps: Vec<Step>,
}

impl Task {
    pub fn steps_done(&self) -> usize {
        self.steps.iter().filter(|s| s.completed).count()
    }

    /// All steps complete, or there are no steps.
    pub fn all_steps_done(&self) -> bool {
        self.steps.iter().all(|s| s.completed)
    }
}

// ── Support mode ────────────────────────────────────────────────────────

/// The three UI/behavior presets. Selects the active dashboard profile and
/// the font family the style layer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportMode {
    Adhd,
    Autism,
    Dyslexia,
}

impl SupportMode {
    pub const ALL: [SupportMode; 3] = [Self::Adhd, Self::Autism, Self::Dyslexia];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adhd => "adhd",
            Self::Autism => "autism",
            Self::Dyslexia => "dyslexia",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Adhd => "ADHD",
            Self::Autism => "Autism",
            Self::Dyslexia => "Dyslexia",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::Adhd => Self::Autism,
            Self::Autism => Self::Dyslexia,
            Self::Dyslexia => Self::Adhd,
        }
    }
}

impl fmt::Display for SupportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown support mode: {0}")]
pub struct ParseSupportModeError(String);

impl FromStr for SupportMode {
    type Err = ParseSupportModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adhd" => Ok(Self::Adhd),
            "autism" => Ok(Self::Autism),
            "dyslexia" => Ok(Self::Dyslexia),
            other => Err(ParseSupportModeError(other.to_string())),
        }
    }
}

// ── Accessibility scales ────────────────────────────────────────────────

/// Five-point font size scale. Serialized with the stylesheet's own tokens
/// so stored snapshots stay readable next to the emitted classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    Sm,
    Base,
    Lg,
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Base => "base",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xxl => "2xl",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Sm => "Small",
            Self::Base => "Medium",
            Self::Lg => "Large",
            Self::Xl => "XL",
            Self::Xxl => "2XL",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Self::Sm => "text-sm",
            Self::Base => "text-base",
            Self::Lg => "text-lg",
            Self::Xl => "text-xl",
            Self::Xxl => "text-2xl",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::Sm => Self::Base,
            Self::Base => Self::Lg,
            Self::Lg => Self::Xl,
            Self::Xl => Self::Xxl,
            Self::Xxl => Self::Sm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSpacing {
    Normal,
    Relaxed,
    Loose,
}

impl LineSpacing {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Relaxed => "Relaxed",
            Self::Loose => "Loose",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Self::Normal => "leading-normal",
            Self::Relaxed => "leading-relaxed",
            Self::Loose => "leading-loose",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::Normal => Self::Relaxed,
            Self::Relaxed => Self::Loose,
            Self::Loose => Self::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterSpacing {
    Normal,
    Wide,
    Wider,
}

impl LetterSpacing {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Wide => "Wide",
            Self::Wider => "Wider",
        }
    }

    /// `wider` maps onto the widest tracking class the stylesheet defines.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Normal => "tracking-normal",
            Self::Wide => "tracking-wide",
            Self::Wider => "tracking-widest",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::Normal => Self::Wide,
            Self::Wide => Self::Wider,
            Self::Wider => Self::Normal,
        }
    }
}

// ── Accessibility aggregate ─────────────────────────────────────────────

/// One process-wide instance; survives support-mode switches and is
/// persisted on every change. Callers merge into a copy before handing it
/// back to the store; the store replaces, it never patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilitySettings {
    pub font_size: FontSize,
    pub high_contrast: bool,
    pub zen_mode: bool,
    pub dyslexia_font: bool,
    pub line_spacing: LineSpacing,
    pub letter_spacing: LetterSpacing,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            font_size: FontSize::Base,
            high_contrast: false,
            zen_mode: false,
            dyslexia_font: true,
            line_spacing: LineSpacing::Relaxed,
            letter_spacing: LetterSpacing::Wide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_mode_round_trips_through_str() {
        for mode in SupportMode::ALL {
            assert_eq!(mode.as_str().parse::<SupportMode>().unwrap(), mode);
        }
        assert!("focus".parse::<SupportMode>().is_err());
    }

    #[test]
    fn font_size_cycle_visits_every_size() {
        let mut size = FontSize::Sm;
        let mut seen = vec![size];
        for _ in 0..4 {
            size = size.cycle();
            seen.push(size);
        }
        assert_eq!(size.cycle(), FontSize::Sm);
        seen.dedup();
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn largest_font_size_uses_2xl_token() {
        let json = serde_json::to_string(&FontSize::Xxl).unwrap();
        assert_eq!(json, r#""2xl""#);
        let back: FontSize = serde_json::from_str(&json).unwrap();
        assert_eq!(back, FontSize::Xxl);
    }

    #[test]
    fn wider_letter_spacing_maps_to_widest_class() {
        assert_eq!(LetterSpacing::Wider.class(), "tracking-widest");
        assert_eq!(LetterSpacing::Wide.class(), "tracking-wide");
    }

    #[test]
    fn default_settings_match_initial_preferences() {
        let settings = AccessibilitySettings::default();
        assert_eq!(settings.font_size, FontSize::Base);
        assert!(!settings.high_contrast);
        assert!(!settings.zen_mode);
        assert!(settings.dyslexia_font);
        assert_eq!(settings.line_spacing, LineSpacing::Relaxed);
        assert_eq!(settings.letter_spacing, LetterSpacing::Wide);
    }

    #[test]
    fn all_steps_done_is_true_for_stepless_task() {
        let task = Task {
            id: 1,
            title: "t".into(),
            description: None,
            completed: false,
            display_order: None,
            steps: Vec::new(),
        };
        assert!(task.all_steps_done());
        assert_eq!(task.steps_done(), 0);
    }
}
