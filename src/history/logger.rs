use anyhow::Result;
use log::info;
use parking_lot::Mutex;

use super::race_log::{HistoryEntry, RaceIdentity, RaceLog, apply_entry};
use super::store::JsonStore;
use crate::config::settings::HistorySettings;

/// Records predictions into the current race log.
///
/// The read-modify-write of the log file happens under `write_lock`, so
/// concurrent callers sharing a logger cannot lose each other's entries.
pub struct HistoryLogger {
    store: JsonStore,
    key: String,
    write_lock: Mutex<()>,
}

impl HistoryLogger {
    pub fn new(settings: &HistorySettings) -> Result<Self> {
        Ok(Self::with_store(JsonStore::new(&settings.data_dir)?, settings.log_key))
    }

    pub fn with_store(store: JsonStore, key: &str) -> Self {
        Self {
            store,
            key: key.to_string(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn record(&self, identity: &RaceIdentity, entry: HistoryEntry) -> Result<RaceLog> {
        let _guard = self.write_lock.lock();

        let existing: Option<RaceLog> = self.store.load(&self.key)?;
        if let Some(previous) = existing.as_ref().filter(|log| log.race_id != identity.race_id) {
            info!(
                "Race changed from {} to {}, starting a new log",
                previous.race_id, identity.race_id
            );
        }

        let log = apply_entry(existing, identity, entry);
        self.store.save(&self.key, &log)?;

        info!(
            "Recorded prediction for race {} ({} entries)",
            log.race_id,
            log.history.len()
        );
        Ok(log)
    }

    pub fn load(&self) -> Result<Option<RaceLog>> {
        self.store.load(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn identity(race_id: i64) -> RaceIdentity {
        RaceIdentity {
            race_id,
            participants: ["Us".to_string(), "Them".to_string()],
            start_timestamp: 1_700_000_000,
        }
    }

    fn entry(observed_at: i64, current_hour: f64) -> HistoryEntry {
        HistoryEntry {
            observed_at,
            current_hour,
            your_score: 1000.0,
            lead: 200.0,
            target: 3000.0,
            predicted_end: 150.0,
        }
    }

    fn logger(dir: &std::path::Path) -> HistoryLogger {
        HistoryLogger::with_store(JsonStore::new(dir).unwrap(), "current_war")
    }

    #[test]
    fn test_new_race_id_replaces_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let logger = logger(temp_dir.path());

        logger.record(&identity(1), entry(10, 5.0)).unwrap();
        logger.record(&identity(2), entry(20, 1.0)).unwrap();

        let log = logger.load().unwrap().unwrap();
        assert_eq!(log.race_id, 2);
        assert_eq!(log.history.len(), 1);
        assert_eq!(log.history[0].current_hour, 1.0);
    }

    #[test]
    fn test_same_race_grows_in_submission_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let logger = logger(temp_dir.path());

        logger.record(&identity(5), entry(10, 5.0)).unwrap();
        logger.record(&identity(5), entry(20, 6.0)).unwrap();

        let log = logger.load().unwrap().unwrap();
        let hours: Vec<f64> = log.history.iter().map(|e| e.current_hour).collect();
        assert_eq!(hours, vec![5.0, 6.0]);
    }

    #[test]
    fn test_absent_log_loads_as_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(logger(temp_dir.path()).load().unwrap().is_none());
    }

    #[test]
    fn test_concurrent_records_are_not_lost() {
        let temp_dir = tempfile::tempdir().unwrap();
        let logger = Arc::new(logger(temp_dir.path()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let logger = Arc::clone(&logger);
                thread::spawn(move || {
                    logger.record(&identity(9), entry(i, i as f64)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let log = logger.load().unwrap().unwrap();
        assert_eq!(log.history.len(), 8);
    }
}
