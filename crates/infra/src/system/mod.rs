use chrono::{Local, NaiveDateTime};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current host wall-clock time. No timezone handling happens
    /// anywhere in the core; everything is local wall clock.
    fn now(&self) -> NaiveDateTime;
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a fixed instant, for tests
pub struct FixedTimeSys(pub NaiveDateTime);
impl ISys for FixedTimeSys {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
