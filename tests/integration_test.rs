use grill_sim::actors::{Actor, ActorError, Behavior, MainCook, Meddler, Seasoner, Thief};
use grill_sim::events::mock::RecordingSink;
use grill_sim::grill::{Grill, Snapshot, BEVERAGE_CAPACITY};
use grill_sim::lifecycle::{GrillSystem, SystemConfig};
use grill_sim::model::{CookState, Roster};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const ALL_STATES: [CookState; 6] = [
    CookState::Raw,
    CookState::Searing,
    CookState::FirstTurn,
    CookState::SecondTurn,
    CookState::Ready,
    CookState::Burnt,
];

/// Checks that nothing moved backwards, and that stolen or finished pieces stayed put.
fn assert_forward_only(previous: &Snapshot, current: &Snapshot) {
    let before: HashMap<_, _> = previous.items.iter().map(|i| (i.name.clone(), i)).collect();
    for item in &current.items {
        let old = before[&item.name];
        assert!(item.state >= old.state, "{} went from {} to {}", item.name, old.state, item.state);
        assert!(item.cook_ticks >= old.cook_ticks);
        assert!(item.stolen || !old.stolen, "{} was un-stolen", item.name);
        assert!(item.seasoned || !old.seasoned, "{} was un-seasoned", item.name);
        if old.stolen {
            assert_eq!((item.state, item.cook_ticks), (old.state, old.cook_ticks));
        }
        if old.state.is_terminal() {
            assert_eq!(item.state, old.state);
        }
    }
    let stats = (&previous.stats, &current.stats);
    assert!(stats.1.conflicts >= stats.0.conflicts, "conflict counter went down");
    assert!(stats.1.thefts >= stats.0.thefts);
    assert!(stats.1.seasonings >= stats.0.seasonings);
    assert!(stats.1.interventions >= stats.0.interventions);
}

fn spawn_family(grill: &Arc<Grill>, rounds: u64) -> Vec<JoinHandle<Result<(), ActorError>>> {
    fn spawn<B: Behavior>(
        grill: &Arc<Grill>,
        name: &str,
        behavior: B,
        seed: u64,
        rounds: u64,
    ) -> JoinHandle<Result<(), ActorError>> {
        let actor = Actor::seeded(name, behavior, seed).with_rounds(rounds);
        tokio::spawn(actor.run(grill.clone()))
    }
    vec![
        spawn(grill, "Head Cook", MainCook::new(), 10, rounds),
        spawn(grill, "Uncle Alfonso", Meddler::new(), 11, rounds),
        spawn(grill, "Uncle Ariel", Meddler::new(), 12, rounds),
        spawn(grill, "Uncle Rodrigo", Meddler::new(), 13, rounds),
        spawn(grill, "Cousin Maxi", Thief::new(), 14, rounds),
        spawn(grill, "Cousin Sebastian", Thief::new(), 15, rounds),
        spawn(grill, "Grandma Vivi", Seasoner::new(), 16, rounds),
    ]
}

/// All four behaviours on the family roster for a bounded number of rounds.
#[tokio::test(start_paused = true)]
async fn test_family_cookout_end_to_end() {
    let sink = Arc::new(RecordingSink::new());
    let grill = Arc::new(Grill::new(Roster::family(), sink.clone()));
    let actors = spawn_family(&grill, 25);

    let monitor = {
        let grill = grill.clone();
        tokio::spawn(async move {
            let mut previous = grill.snapshot().await;
            let mut samples = 0;
            while grill.is_active() {
                tokio::time::sleep(Duration::from_millis(250)).await;
                let current = grill.snapshot().await;
                assert_forward_only(&previous, &current);
                previous = current;
                samples += 1;
            }
            samples
        })
    };

    for handle in actors {
        handle.await.unwrap().unwrap();
    }
    grill.deactivate();
    assert!(monitor.await.unwrap() > 0);

    let snapshot = grill.snapshot().await;
    let total: usize = ALL_STATES.iter().map(|s| snapshot.count_in(*s)).sum();
    assert_eq!(total, 7);
    assert_eq!(snapshot.stolen() as u64, snapshot.stats.thefts);
    assert_eq!(
        snapshot.items.iter().filter(|i| i.seasoned).count() as u64,
        snapshot.stats.seasonings
    );
    assert!(snapshot.stats.interventions > 0, "three uncles over 25 rounds never meddled");
    assert!(snapshot.count_in(CookState::Raw) < 7, "25 cooking passes and nothing moved");
    assert!(grill.pools().beverage.available() <= BEVERAGE_CAPACITY);
    assert_eq!(grill.holder(), None);
    assert_eq!(sink.count_containing("takes over the grill"), sink.count_containing("steps away"));
}

/// The coordinator path: start, run for the configured time, shut down, report.
#[tokio::test(start_paused = true)]
async fn test_grill_system_run() {
    let sink = Arc::new(RecordingSink::new());
    let config = SystemConfig {
        duration: Duration::from_secs(120),
        seed: Some(7),
        ..SystemConfig::default()
    };
    let system = GrillSystem::start(config, Roster::family(), sink.clone());
    let grill = system.grill().clone();
    let report = system.run().await;

    assert!(!grill.is_active());
    assert!(report.failed_actors.is_empty(), "{:?}", report.failed_actors);
    assert_eq!(report.snapshot.items.len(), 7);
    let conflicts = report.snapshot.stats.conflicts;
    assert!(conflicts > 0, "seven relatives for two minutes and no one waited?");
    assert_eq!(sink.count_containing("takes over the grill"), sink.count_containing("steps away"));
    for name in ["Head Cook", "Uncle Alfonso", "Cousin Maxi", "Grandma Vivi"] {
        let events = sink.by_actor(name);
        assert!(events.len() >= 2, "{name} never showed up");
    }
}
