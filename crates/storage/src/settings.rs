use std::collections::VecDeque;

use soma_web_app::{Settings, SettingsRepository, log};

use crate::{Backend, KEY_LOG, KEY_SETTINGS, Store};

impl<B: Backend> SettingsRepository for Store<B> {
    fn read_settings(&self) -> Settings {
        self.read(KEY_SETTINGS).unwrap_or_default()
    }

    fn write_settings(&self, settings: Settings) -> bool {
        self.write(KEY_SETTINGS, &settings)
    }
}

// Log entries bypass the logging store methods, as a failure would be logged again.
impl<B: Backend + Send + Sync + 'static> log::Repository for Store<B> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.backend()
            .get(KEY_LOG)
            .map(Option::unwrap_or_default)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(log::MAX_ENTRIES);
        self.backend()
            .set(KEY_LOG, &entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use ::log::Level;
    use pretty_assertions::assert_eq;
    use soma_web_app::Theme;

    use crate::memory::MemoryStorage;

    use super::*;

    fn store() -> Store<MemoryStorage> {
        Store::new(MemoryStorage::new())
    }

    #[test]
    fn test_settings() {
        let store = store();
        let settings = Settings {
            calendar_weeks: 4,
            theme: Theme::System,
        };

        assert_eq!(store.read_settings(), Settings::default());
        assert!(store.write_settings(settings));
        assert_eq!(store.read_settings(), settings);
    }

    #[test]
    fn test_settings_missing_fields() {
        let store = store();
        store
            .backend()
            .insert_raw(KEY_SETTINGS, r#"{ "theme": "Light" }"#);

        assert_eq!(
            store.read_settings(),
            Settings {
                theme: Theme::Light,
                ..Settings::default()
            }
        );
    }

    #[test]
    fn test_settings_unavailable() {
        let store = store();
        store.backend().set_unavailable(true);

        assert!(!store.write_settings(Settings::default()));
        assert_eq!(store.read_settings(), Settings::default());
    }

    #[test]
    fn test_log_entries_are_limited() {
        let store = store();

        for i in 0..=log::MAX_ENTRIES {
            log::Repository::write_entry(&store, log::Entry::new(Level::Debug, i.to_string()))
                .unwrap();
        }

        let entries = log::Repository::read_entries(&store).unwrap();
        assert_eq!(entries.len(), log::MAX_ENTRIES);
        assert_eq!(entries[0].message, log::MAX_ENTRIES.to_string());
        assert_eq!(entries[log::MAX_ENTRIES - 1].message, "1");
    }

    #[test]
    fn test_log_unavailable() {
        let store = store();
        store.backend().set_unavailable(true);

        assert_eq!(
            log::Repository::write_entry(&store, log::Entry::new(Level::Warn, String::new())),
            Err(log::Error::Unknown("storage unavailable".to_string()))
        );
        assert!(log::Repository::read_entries(&store).is_err());
    }
}
