pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod processor;
pub mod replay;
pub mod store;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    AssetId, Badge, BlockIdentity, ClaimPeriod, DayIndex, Decimal, EngineState, PriceObservation,
    TriggerEvent,
};
pub use engine::{DayGate, StreakOutcome};
pub use error::AppError;
pub use processor::{DailyOutcome, DailyProcessor, ProcessError};
pub use store::{MemoryStore, StoreError, StreakStore};
