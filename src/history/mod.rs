pub mod logger;
pub mod race_log;
pub mod store;

pub use logger::HistoryLogger;
pub use race_log::{HistoryEntry, MANUAL_RACE_ID, RaceId, RaceIdentity, RaceLog, apply_entry};
pub use store::JsonStore;
