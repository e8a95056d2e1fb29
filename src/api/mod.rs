pub mod models;
pub mod torn_client;

pub use torn_client::{LiveCredentials, LiveWarData, TornClient, live_credentials, map_ranked_war};
