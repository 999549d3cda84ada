mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{
    IReminderRepo, InMemoryReminderRepo, ReminderEvent, ReminderEventKind, Repos,
};
use std::sync::Arc;
pub use system::{FixedTimeSys, ISys, RealSys};

#[derive(Clone)]
pub struct MurmurContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl MurmurContext {
    fn create() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> MurmurContext {
    MurmurContext::create()
}
