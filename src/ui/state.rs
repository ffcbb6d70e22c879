//! UI state management

use bevy::prelude::*;

use crate::core::time_of_day::{Contrast, Gradient, TimeOfDay, is_daytime};
use crate::core::TimeSample;

/// Main UI state resource
#[derive(Resource)]
pub struct UiState {
    pub show_panel: bool,
    pub tab: PanelTab,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_panel: true,
            tab: PanelTab::CityInfo,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTab {
    CityInfo,
    TimeCapsule,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Light while the sun is up in the displayed city.
    pub fn for_sample(sample: &TimeSample) -> Self {
        if is_daytime(&sample.instant) {
            Theme::Light
        } else {
            Theme::Dark
        }
    }
}

/// Styling of the whole window, derived from the displayed city's local time.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ThemeState {
    pub theme: Theme,
    pub gradient: Gradient,
    pub contrast: Contrast,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            gradient: TimeOfDay::Afternoon.gradient(),
            contrast: TimeOfDay::Afternoon.contrast(),
        }
    }
}

impl ThemeState {
    /// Returns true when anything visible changed.
    pub fn update(&mut self, sample: &TimeSample) -> bool {
        let next = ThemeState {
            theme: Theme::for_sample(sample),
            gradient: sample.gradient,
            contrast: sample.contrast,
        };
        if next == *self {
            return false;
        }
        *self = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const TOKYO: chrono_tz::Tz = chrono_tz::Asia::Tokyo;

    #[test]
    fn test_theme_follows_daylight() {
        // 14:00 and 23:00 in Tokyo
        let day = TimeSample::at(Utc.with_ymd_and_hms(2024, 1, 10, 5, 0, 0).unwrap(), TOKYO);
        let night = TimeSample::at(Utc.with_ymd_and_hms(2024, 1, 10, 14, 0, 0).unwrap(), TOKYO);
        assert_eq!(Theme::for_sample(&day), Theme::Light);
        assert_eq!(Theme::for_sample(&night), Theme::Dark);
    }

    #[test]
    fn test_update_reports_changes_only() {
        let mut state = ThemeState::default();
        let afternoon = TimeSample::at(Utc.with_ymd_and_hms(2024, 1, 10, 5, 0, 0).unwrap(), TOKYO);
        assert!(!state.update(&afternoon));

        // 18:00 is dusk and no longer daylight
        let dusk = TimeSample::at(Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(), TOKYO);
        assert!(state.update(&dusk));
        assert_eq!(state.theme, Theme::Dark);
        assert!(!state.contrast.is_light_background());
        assert!(!state.update(&dusk));
    }
}
