//! Reservation hold expiry loop.
//!
//! Releases pending reservations whose hold deadline has passed so
//! their seats don't stay blocked indefinitely.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::interval;

use crate::state::AppState;

const LOOP_INTERVAL_SECS: u64 = 5;

pub async fn run_hold_expiry_loop(state: Arc<AppState>, mut shutdown: broadcast::Receiver<()>) {
    let mut ticker = interval(Duration::from_secs(LOOP_INTERVAL_SECS));

    loop {
        tokio::select! {
            _ = shutdown.recv() => {
                tracing::info!("Hold expiry loop shutting down");
                break;
            }
            _ = ticker.tick() => {
                let expired = state.expire_holds();
                if expired > 0 {
                    tracing::info!(expired, "released expired reservation holds");
                }
            }
        }
    }
}
