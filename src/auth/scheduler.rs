use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::RwLock;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{Interval, MissedTickBehavior};

/// Source of wall-clock time for token expiry checks
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(|e| e.into_inner()) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

/// Drives the periodic session check. `tick` resolves when the next check is due and returns
/// false once no further checks will come.
#[async_trait]
pub trait Scheduler: Send + Sync {
    async fn tick(&self) -> bool;
}

/// Fires on a fixed period, starting one period from now
pub struct IntervalScheduler {
    interval: Mutex<Interval>,
}

impl IntervalScheduler {
    pub fn new(period: std::time::Duration) -> Self {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval: Mutex::new(interval),
        }
    }
}

#[async_trait]
impl Scheduler for IntervalScheduler {
    async fn tick(&self) -> bool {
        self.interval.lock().await.tick().await;
        true
    }
}

/// Fires each time its [`ManualTrigger`] is pulled; stops once the trigger is dropped.
pub struct ManualScheduler {
    rx: Mutex<mpsc::UnboundedReceiver<()>>,
}

#[derive(Clone)]
pub struct ManualTrigger {
    tx: mpsc::UnboundedSender<()>,
}

impl ManualScheduler {
    pub fn new() -> (Self, ManualTrigger) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx: Mutex::new(rx) }, ManualTrigger { tx })
    }
}

impl ManualTrigger {
    pub fn fire(&self) {
        let _ = self.tx.send(());
    }
}

#[async_trait]
impl Scheduler for ManualScheduler {
    async fn tick(&self) -> bool {
        self.rx.lock().await.recv().await.is_some()
    }
}
