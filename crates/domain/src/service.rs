use chrono::NaiveDate;
use log::{debug, info};

use crate::{History, HistoryRepository, SessionKey, SessionRecord, streak, tonnage};

pub trait HistoryService {
    fn get_history(&self) -> History;
    fn save_session(&self, record: SessionRecord) -> SessionKey;

    /// Key figures shown on the home screen.
    fn overview(&self, today: NaiveDate) -> Overview {
        let history = self.get_history();
        Overview {
            sessions: history.len(),
            streak: streak(&history, today),
            tonnage: tonnage(history.sessions()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overview {
    pub sessions: usize,
    pub streak: u32,
    pub tonnage: f64,
}

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R: HistoryRepository> HistoryService for Service<R> {
    fn get_history(&self) -> History {
        let history = self.repository.load_history();
        debug!("loaded history with {} sessions", history.len());
        history
    }

    fn save_session(&self, record: SessionRecord) -> SessionKey {
        let key = self.repository.append_session(record);
        info!("saved session {key}");
        key
    }
}
