//! The charcoal gauge: burns down in the background, purely decorative.
//!
//! Nothing in the cooking state machine reads the charcoal level.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::actors::linger;
use crate::events::Emphasis;
use crate::grill::Grill;

/// Below this level the system warns about the fire.
pub const LOW_CHARCOAL: u32 = 30;

/// Burns 1-3 units every `tick` until the run ends.
pub async fn burn_charcoal(grill: Arc<Grill>, tick: Duration, seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    while linger(&grill, tick).await {
        if grill.charcoal() == 0 {
            continue;
        }
        let left = grill.burn_charcoal(rng.random_range(1..=3));
        debug!(left, "Charcoal burned");
        if left < LOW_CHARCOAL {
            grill.emit("SYSTEM", format!("Charcoal running low: {left}%"), Some(Emphasis::Warning));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::mock::RecordingSink;
    use crate::grill::FULL_CHARCOAL;
    use crate::model::Roster;

    #[tokio::test(start_paused = true)]
    async fn test_burns_until_closed() {
        let sink = Arc::new(RecordingSink::new());
        let grill = Arc::new(Grill::new(Roster::family(), sink.clone()));
        let task = tokio::spawn(burn_charcoal(grill.clone(), Duration::from_secs(2), Some(5)));

        tokio::time::sleep(Duration::from_secs(61)).await;
        grill.deactivate();
        task.await.unwrap();

        // 30 ticks at 1-3 units each.
        let burned = FULL_CHARCOAL - grill.charcoal();
        assert!((30..=90).contains(&burned), "burned {burned}");
        let warned = sink.count_containing("Charcoal running low") > 0;
        assert_eq!(warned, grill.charcoal() < LOW_CHARCOAL);
    }
}
