use chrono::{DateTime, Local};
use std::future::Future;
use std::time::Duration;

/// Wall time and waiting between live refreshes.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
    fn sleep(&self, period: Duration) -> impl Future<Output = ()>;
}

/// Real clock backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn sleep(&self, period: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(period)
    }
}
