//! Event Ledger Tests
//!
//! Covers publishing, the four query indices, memory synthesis, relationship
//! derivation, subscriptions and the retention sweep, all through the public
//! ledger API.

use psychsim_core_rs::{
    EventCategory, EventDraft, EventFilter, EventLedger, EventSeverity, EventSource, EventType,
    MemoryFilter, MemoryType, SubscriptionFilter, Trajectory,
};

const TICKS_PER_DAY: usize = 24;

fn battle_victory(primary: &str, secondary: &str) -> EventDraft {
    EventDraft::new(
        EventType::BattleVictory,
        EventSource::BattleArena,
        primary,
        EventSeverity::High,
        "Defeated a rival in the arena",
    )
    .with_secondary(vec![secondary.to_string()])
}

fn argument(primary: &str, secondary: &str) -> EventDraft {
    EventDraft::new(
        EventType::KitchenArgument,
        EventSource::KitchenTable,
        primary,
        EventSeverity::Medium,
        "Argued about the grocery budget",
    )
    .with_secondary(vec![secondary.to_string()])
}

// ============================================================================
// Publishing and querying
// ============================================================================

#[test]
fn test_ids_and_timestamps_assigned_in_order() {
    let mut ledger = EventLedger::new(TICKS_PER_DAY);
    let first = ledger.publish(battle_victory("achilles", "hector"), 3).clone();
    let second = ledger.publish(argument("achilles", "hector"), 9).clone();
    assert_eq!(first.id, "event_000001");
    assert_eq!(second.id, "event_000002");
    assert_eq!(first.timestamp_tick, 3);
    assert_eq!(second.timestamp_tick, 9);
    assert_eq!(first.category, EventCategory::Battle);
    assert_eq!(second.category, EventCategory::Social);
}

#[test]
fn test_character_query_includes_secondary_roles() {
    let mut ledger = EventLedger::new(TICKS_PER_DAY);
    ledger.publish(battle_victory("achilles", "hector"), 0);
    let filter = EventFilter::default();
    assert_eq!(ledger.query_character("hector", &filter, 0).len(), 1);
    assert_eq!(ledger.query_character("patroclus", &filter, 0).len(), 0);
}

#[test]
fn test_filters_are_conjunctive() {
    let mut ledger = EventLedger::new(TICKS_PER_DAY);
    ledger.publish(battle_victory("achilles", "hector"), 0);
    ledger.publish(argument("achilles", "hector"), TICKS_PER_DAY * 20);

    let filter = EventFilter {
        within_days: Some(5),
        categories: Some(vec![EventCategory::Social]),
        ..Default::default()
    };
    let found = ledger.query_character("achilles", &filter, TICKS_PER_DAY * 20);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].event_type, EventType::KitchenArgument);

    let mismatched = EventFilter {
        within_days: Some(5),
        categories: Some(vec![EventCategory::Battle]),
        ..Default::default()
    };
    assert!(ledger
        .query_character("achilles", &mismatched, TICKS_PER_DAY * 20)
        .is_empty());
}

#[test]
fn test_limit_keeps_newest() {
    let mut ledger = EventLedger::new(TICKS_PER_DAY);
    for tick in 0..10 {
        ledger.publish(argument("achilles", "hector"), tick);
    }
    let filter = EventFilter {
        limit: Some(3),
        ..Default::default()
    };
    let found = ledger.query_character("achilles", &filter, 10);
    assert_eq!(found.len(), 3);
    assert_eq!(found[0].timestamp_tick, 9);
    assert_eq!(found[2].timestamp_tick, 7);
}

// ============================================================================
// Derived state
// ============================================================================

#[test]
fn test_memories_synthesized_for_all_participants() {
    let mut ledger = EventLedger::new(TICKS_PER_DAY);
    ledger.publish(battle_victory("achilles", "hector"), 0);

    let winner = ledger.memories().query("achilles", &MemoryFilter::default());
    let loser = ledger.memories().query("hector", &MemoryFilter::default());
    assert_eq!(winner.len(), 1);
    assert_eq!(loser.len(), 1);
    // "victory" in the type name promotes the memory to an achievement.
    assert_eq!(winner[0].memory_type, MemoryType::Achievement);
    assert!(winner[0].importance > loser[0].importance);
    assert_eq!(winner[0].associated_characters, vec!["hector".to_string()]);
}

#[test]
fn test_relationships_move_with_events() {
    let mut ledger = EventLedger::new(TICKS_PER_DAY);
    ledger.publish(battle_victory("achilles", "hector"), 0);
    let after_victory = ledger
        .relationships()
        .get("achilles", "hector")
        .expect("edge exists")
        .clone();
    assert_eq!(after_victory.trust_level, 3.0);
    assert_eq!(after_victory.trajectory, Trajectory::Improving);

    ledger.publish(argument("achilles", "hector"), 5);
    let after_argument = ledger
        .relationships()
        .get("achilles", "hector")
        .expect("edge exists");
    assert_eq!(after_argument.trust_level, -2.0);
    assert_eq!(after_argument.trajectory, Trajectory::Declining);
    assert_eq!(after_argument.conflicts.len(), 1);
    assert_eq!(after_argument.interaction_count, 2);
}

// ============================================================================
// Subscriptions
// ============================================================================

#[test]
fn test_subscription_filtering_and_drain() {
    let mut ledger = EventLedger::new(TICKS_PER_DAY);
    let battles = ledger.subscribe(SubscriptionFilter {
        categories: Some(vec![EventCategory::Battle]),
        ..Default::default()
    });
    let hectors = ledger.subscribe(SubscriptionFilter {
        character_id: Some("hector".to_string()),
        ..Default::default()
    });

    ledger.publish(battle_victory("achilles", "hector"), 0);
    ledger.publish(argument("achilles", "patroclus"), 1);

    let battle_events = ledger.drain(battles);
    assert_eq!(battle_events.len(), 1);
    assert_eq!(battle_events[0].event_type, EventType::BattleVictory);

    let hector_events = ledger.drain(hectors);
    assert_eq!(hector_events.len(), 1);

    // Drained queues start empty again.
    assert!(ledger.drain(battles).is_empty());
}

// ============================================================================
// Retention
// ============================================================================

#[test]
fn test_sweep_respects_window_and_importance() {
    let mut ledger = EventLedger::new(TICKS_PER_DAY);
    // Importance 6: argument, medium severity. Swept once old.
    ledger.publish(argument("achilles", "hector"), 0);
    // Importance 9: battle victory, high severity. Kept.
    ledger.publish(battle_victory("achilles", "hector"), 0);
    // Recent low-importance event inside the window. Kept.
    ledger.publish(argument("achilles", "hector"), TICKS_PER_DAY * 15);

    let (events_removed, _) = ledger.sweep(TICKS_PER_DAY * 16);
    assert_eq!(events_removed, 1);
    assert_eq!(ledger.len(), 2);

    // Indices still point at the survivors.
    let found = ledger.query_character("achilles", &EventFilter::default(), TICKS_PER_DAY * 16);
    assert_eq!(found.len(), 2);
}

#[test]
fn test_resolved_flag_is_only_event_mutation() {
    let mut ledger = EventLedger::new(TICKS_PER_DAY);
    let id = ledger.publish(battle_victory("achilles", "hector"), 0).id.clone();
    let before = ledger.get(&id).cloned().expect("event exists");
    assert!(ledger.mark_resolved(&id));
    let after = ledger.get(&id).cloned().expect("event exists");
    assert!(after.resolved);
    assert_eq!(before.description, after.description);
    assert_eq!(before.timestamp_tick, after.timestamp_tick);
}
