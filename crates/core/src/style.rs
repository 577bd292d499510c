//! Accessibility effect application: derive presentation attributes from
//! the current preferences and persist the snapshot.
//!
//! The attribute vocabulary is the stylesheet's own class tokens. Targets
//! are abstract: the browser build would hand in the document root, the
//! terminal build hands in a [`ClassSet`] its theme reads from, and tests
//! hand in a plain set they can diff.

use std::collections::BTreeSet;

use crate::model::{AccessibilitySettings, SupportMode};

// ── Attribute groups ────────────────────────────────────────────────────
// Within each group at most one member may be active at a time.

pub const SIZE_CLASSES: [&str; 5] = ["text-sm", "text-base", "text-lg", "text-xl", "text-2xl"];
pub const FAMILY_CLASSES: [&str; 3] = ["font-sans", "font-lexend", "font-dyslexic"];
pub const CONTRAST_CLASSES: [&str; 2] = ["contrast-125", "brightness-110"];
pub const ZEN_CLASS: &str = "tracking-wide";

/// The exact attribute set the target must end up with. Pure; evaluated
/// rule by rule, and the rules do not interact.
pub fn presentation_classes(
    settings: &AccessibilitySettings,
    mode: Option<SupportMode>,
) -> Vec<&'static str> {
    let mut classes = vec![settings.font_size.class()];
    if settings.high_contrast {
        classes.extend(CONTRAST_CLASSES);
    }
    if settings.zen_mode {
        classes.push(ZEN_CLASS);
    }
    classes.push(if mode == Some(SupportMode::Dyslexia) {
        "font-dyslexic"
    } else {
        "font-lexend"
    });
    classes
}

// ── Seams ───────────────────────────────────────────────────────────────

/// Mutable attribute surface the applier writes to.
pub trait StyleTarget {
    fn add(&mut self, class: &'static str);
    fn remove(&mut self, class: &'static str);
}

/// Durable storage for the settings snapshot, written on every apply.
pub trait SnapshotStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn persist_accessibility(
        &mut self,
        settings: &AccessibilitySettings,
    ) -> Result<(), Self::Error>;
}

/// Ready-made target: an ordered set of active classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassSet(BTreeSet<&'static str>);

impl ClassSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().copied()
    }
}

impl StyleTarget for ClassSet {
    fn add(&mut self, class: &'static str) {
        self.0.insert(class);
    }

    fn remove(&mut self, class: &'static str) {
        self.0.remove(class);
    }
}

// ── Applier ─────────────────────────────────────────────────────────────

/// Applies the derived attributes and persists the snapshot before
/// returning. Each group is cleared before its member is set, so applying
/// twice with unchanged inputs leaves the target identical.
pub struct EffectApplier<T, S> {
    target: T,
    store: S,
}

impl<T: StyleTarget, S: SnapshotStore> EffectApplier<T, S> {
    pub fn new(target: T, store: S) -> Self {
        Self { target, store }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn apply(
        &mut self,
        settings: &AccessibilitySettings,
        mode: Option<SupportMode>,
    ) -> Result<(), S::Error> {
        for class in SIZE_CLASSES {
            self.target.remove(class);
        }
        for class in FAMILY_CLASSES {
            self.target.remove(class);
        }
        for class in CONTRAST_CLASSES {
            self.target.remove(class);
        }
        self.target.remove(ZEN_CLASS);

        for class in presentation_classes(settings, mode) {
            self.target.add(class);
        }

        self.store.persist_accessibility(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FontSize;

    #[derive(Default)]
    struct MemStore {
        saved: Vec<AccessibilitySettings>,
    }

    impl SnapshotStore for MemStore {
        type Error = std::convert::Infallible;

        fn persist_accessibility(
            &mut self,
            settings: &AccessibilitySettings,
        ) -> Result<(), Self::Error> {
            self.saved.push(*settings);
            Ok(())
        }
    }

    fn applier() -> EffectApplier<ClassSet, MemStore> {
        EffectApplier::new(ClassSet::new(), MemStore::default())
    }

    #[test]
    fn default_settings_yield_base_size_and_default_family() {
        let classes = presentation_classes(&AccessibilitySettings::default(), None);
        assert_eq!(classes, vec!["text-base", "font-lexend"]);
    }

    #[test]
    fn dyslexia_mode_selects_the_dyslexia_family() {
        let classes =
            presentation_classes(&AccessibilitySettings::default(), Some(SupportMode::Dyslexia));
        assert!(classes.contains(&"font-dyslexic"));
        assert!(!classes.contains(&"font-lexend"));
    }

    #[test]
    fn applying_twice_with_unchanged_settings_changes_nothing() {
        let mut applier = applier();
        let settings = AccessibilitySettings {
            high_contrast: true,
            zen_mode: true,
            ..AccessibilitySettings::default()
        };
        applier.apply(&settings, Some(SupportMode::Adhd)).unwrap();
        let first = applier.target().clone();
        applier.apply(&settings, Some(SupportMode::Adhd)).unwrap();
        assert_eq!(applier.target(), &first);
    }

    #[test]
    fn changing_font_size_clears_the_previous_size_class() {
        let mut applier = applier();
        let mut settings = AccessibilitySettings {
            font_size: FontSize::Lg,
            ..AccessibilitySettings::default()
        };
        applier.apply(&settings, None).unwrap();
        assert!(applier.target().contains("text-lg"));

        settings.font_size = FontSize::Sm;
        applier.apply(&settings, None).unwrap();
        assert!(applier.target().contains("text-sm"));
        assert!(!applier.target().contains("text-lg"));
    }

    #[test]
    fn contrast_pair_toggles_on_and_off_together() {
        let mut applier = applier();
        let mut settings = AccessibilitySettings {
            high_contrast: true,
            ..AccessibilitySettings::default()
        };
        applier.apply(&settings, None).unwrap();
        assert!(applier.target().contains("contrast-125"));
        assert!(applier.target().contains("brightness-110"));

        settings.high_contrast = false;
        applier.apply(&settings, None).unwrap();
        assert!(!applier.target().contains("contrast-125"));
        assert!(!applier.target().contains("brightness-110"));
    }

    #[test]
    fn switching_away_from_dyslexia_swaps_the_family() {
        let mut applier = applier();
        let settings = AccessibilitySettings::default();
        applier.apply(&settings, Some(SupportMode::Dyslexia)).unwrap();
        assert!(applier.target().contains("font-dyslexic"));

        applier.apply(&settings, Some(SupportMode::Autism)).unwrap();
        assert!(applier.target().contains("font-lexend"));
        assert!(!applier.target().contains("font-dyslexic"));
    }

    #[test]
    fn every_apply_persists_a_snapshot() {
        let mut applier = applier();
        let settings = AccessibilitySettings::default();
        applier.apply(&settings, None).unwrap();
        applier.apply(&settings, None).unwrap();
        assert_eq!(applier.store.saved.len(), 2);
        assert_eq!(applier.store.saved[0], settings);
    }
}
