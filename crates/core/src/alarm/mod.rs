mod presenter;
mod scheduler;

pub use presenter::{AlarmPresenter, TracingAlarmPresenter};
pub use scheduler::{AlarmScheduler, AlarmState};
