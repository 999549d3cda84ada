use murmur_utils::create_random_secret;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// The single pseudo-identity every cooperating client schedules
    /// under. Not an authentication mechanism.
    pub shared_user_id: String,
    /// Seconds between alarm poll ticks. A tunable: due reminders are
    /// detected within one cadence period of becoming due.
    pub poll_interval_secs: u64,
    /// Width in seconds of the due-detection window around a trigger time
    pub detection_window_secs: i64,
    /// Maximum number of reminders fetched in one gateway list call
    pub reminder_page_limit: usize,
}

impl Config {
    pub fn new() -> Self {
        let shared_user_id = match std::env::var("SHARED_USER_ID") {
            Ok(id) => id,
            Err(_) => {
                info!("Did not find SHARED_USER_ID environment variable. Going to create one.");
                let id = create_random_secret(20);
                info!(
                    "Shared user id was generated and set to: {}. Configure other clients with the same id to share reminders.",
                    id
                );
                id
            }
        };
        Self {
            shared_user_id,
            poll_interval_secs: env_or_default("POLL_INTERVAL_SECS", 15),
            detection_window_secs: env_or_default("ALARM_DETECTION_WINDOW_SECS", 60),
            reminder_page_limit: env_or_default("REMINDER_PAGE_LIMIT", 100),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn env_or_default<T>(var: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match std::env::var(var) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    var, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}
