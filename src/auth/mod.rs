mod scheduler;
mod session;
mod store;
pub(crate) mod token;

pub use scheduler::{
    Clock, IntervalScheduler, ManualClock, ManualScheduler, ManualTrigger, Scheduler, SystemClock,
};
pub use session::{SessionManager, SessionStatus};
pub use store::{FileTokenStore, MemoryTokenStore, StoreError, StoredTokens, TokenStore};
pub use token::{expires_at, needs_refresh, DEFAULT_REFRESH_SKEW_SECS};
