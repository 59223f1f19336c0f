use log::error;

pub trait SettingsService {
    fn get_settings(&self) -> Settings;
    fn set_settings(&self, settings: Settings) -> bool;
}

pub trait SettingsRepository {
    fn read_settings(&self) -> Settings;
    fn write_settings(&self, settings: Settings) -> bool;
}

pub const CALENDAR_WEEKS_MAX: u32 = 52;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub calendar_weeks: u32,
    pub theme: Theme,
}

impl Settings {
    /// Number of weeks shown in the calendar, limited to a sensible range.
    #[must_use]
    pub fn calendar_weeks(&self) -> u32 {
        self.calendar_weeks.clamp(1, CALENDAR_WEEKS_MAX)
    }

    #[must_use]
    pub fn current_theme(&self) -> Theme {
        match self.theme {
            Theme::System => {
                if let Some(window) = web_sys::window() {
                    if let Ok(prefers_dark_scheme) =
                        window.match_media("(prefers-color-scheme: dark)")
                    {
                        if let Some(media_query_list) = prefers_dark_scheme {
                            if media_query_list.matches() {
                                Theme::Dark
                            } else {
                                Theme::Light
                            }
                        } else {
                            error!("failed to determine preferred color scheme");
                            Theme::Dark
                        }
                    } else {
                        error!("failed to match media to determine preferred color scheme");
                        Theme::Dark
                    }
                } else {
                    error!("failed to access window to determine preferred color scheme");
                    Theme::Dark
                }
            }
            Theme::Light | Theme::Dark => self.theme,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            calendar_weeks: 10,
            theme: Theme::Dark,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    System,
    Light,
    Dark,
}
