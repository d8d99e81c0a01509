//! One trigger event in, at most one processed day out.

use crate::domain::{Badge, TriggerEvent};
use crate::engine::{self, DayGate, StreakOutcome};
use crate::store::{DailyUpdate, StreakStore};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{DailyOutcome, ProcessError};

/// Runs the day gate and streak evaluator for every incoming event.
///
/// Invocations are serialized by an internal lock held from the state read
/// to the commit, so concurrent callers observe the same behaviour as an
/// ordered single-threaded host.
#[derive(Debug)]
pub struct DailyProcessor {
    store: Arc<dyn StreakStore>,
    gate: DayGate,
    badge_defaults: Badge,
    lock: Mutex<()>,
}

impl DailyProcessor {
    pub fn new(store: Arc<dyn StreakStore>, gate: DayGate, badge_defaults: Badge) -> Self {
        Self {
            store,
            gate,
            badge_defaults,
            lock: Mutex::new(()),
        }
    }

    pub fn gate(&self) -> &DayGate {
        &self.gate
    }

    pub fn badge_id(&self) -> &str {
        &self.badge_defaults.id
    }

    /// The badge the next evaluation will use: the stored row once one exists,
    /// otherwise the configured defaults.
    pub async fn current_badge(&self) -> Result<Badge, ProcessError> {
        Ok(self.store.load_badge(&self.badge_defaults).await?)
    }

    /// Process a trigger event.
    ///
    /// Events for other assets and days already processed are silent no-ops.
    /// Otherwise the streak is evaluated for the event's day and the engine
    /// state, badge and any new claim period are committed together.
    ///
    /// # Errors
    /// Returns an error if the store fails; nothing is committed in that case.
    pub async fn on_daily_observation(
        &self,
        event: &TriggerEvent,
    ) -> Result<DailyOutcome, ProcessError> {
        let Some(day) = self.gate.admit(event) else {
            return Ok(DailyOutcome::IgnoredAsset);
        };

        let _guard = self.lock.lock().await;

        let mut engine_state = self.store.load_engine_state().await?;
        if !DayGate::should_process(day, &engine_state) {
            debug!(
                day = %day,
                last_processed_day = %engine_state.last_processed_day,
                "Day already processed"
            );
            return Ok(DailyOutcome::AlreadyProcessed {
                day,
                last_processed_day: engine_state.last_processed_day,
            });
        }

        let mut badge = self.store.load_badge(&self.badge_defaults).await?;

        let streak_outcome = if badge.is_active_on(day) {
            let asset = self.gate.tracked_asset();
            let yesterday = self
                .store
                .get_price_observation(asset, day.previous(1))
                .await?;
            let day_before = self
                .store
                .get_price_observation(asset, day.previous(2))
                .await?;
            Some(engine::evaluate(
                event,
                &mut badge,
                yesterday.as_ref(),
                day_before.as_ref(),
            ))
        } else {
            None
        };

        DayGate::mark_processed(day, &mut engine_state);

        let update = DailyUpdate {
            engine_state,
            claim_period: streak_outcome
                .as_ref()
                .and_then(|o| o.claim_period().cloned()),
            badge,
        };
        let inserted = self.store.commit(&update).await?;

        let outcome = match streak_outcome {
            None => DailyOutcome::Inactive { day },
            Some(StreakOutcome::Inconclusive) => DailyOutcome::Inconclusive { day },
            Some(StreakOutcome::Incremented { change, streak }) => DailyOutcome::Incremented {
                day,
                price_change: change,
                current_streak: streak,
            },
            Some(StreakOutcome::Reset {
                change,
                ended_streak,
            }) => DailyOutcome::Reset {
                day,
                price_change: change,
                ended_streak,
            },
            Some(StreakOutcome::ResetAndClaimed {
                change,
                claim_period,
            }) => DailyOutcome::Claimed {
                day,
                price_change: change,
                claim_period,
                inserted,
            },
        };

        info!(
            badge = %update.badge.id,
            day = %day,
            block = %event.block_identity,
            current_streak = update.badge.current_streak,
            outcome = ?outcome,
            "Processed badge streak day"
        );

        Ok(outcome)
    }
}
