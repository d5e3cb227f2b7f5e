//! Integration tests exercising the composed system: governance engine,
//! registry link, and the real item registry sharing one key-value store.
//!
//! These tests wire together components that a deployment connects at
//! startup, verifying the whole path from proposal to stored item — not
//! just each crate in isolation.

use std::sync::Arc;

use curia_governance::{
    GovernanceEngine, GovernanceError, GovernanceParams, ProposalKind, Registry,
};
use curia_nullables::{NullClock, NullSink, NullStore, NullWitness};
use curia_registry::{ItemRegistry, RegistryLink, MAX_LIST_ITEMS};
use curia_types::{ContentHash, ItemId, PrincipalId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct World {
    engine: GovernanceEngine,
    registry: Arc<ItemRegistry>,
    store: Arc<NullStore>,
    clock: Arc<NullClock>,
    witness: Arc<NullWitness>,
}

fn deployer() -> PrincipalId {
    PrincipalId::new([0xDD; 20])
}

fn governor() -> PrincipalId {
    PrincipalId::new([0x60; 20])
}

fn member(seed: u8) -> PrincipalId {
    PrincipalId::new([seed; 20])
}

fn hash() -> ContentHash {
    ContentHash::new(vec![0xAB; 32])
}

/// Build the full system: registry and governance share one store, and the
/// governance engine reaches the registry through a link bound to the same
/// identity the registry was initialized to obey.
fn world() -> World {
    let store = Arc::new(NullStore::new());
    let mut authorized: Vec<PrincipalId> = (1..=5).map(member).collect();
    authorized.push(deployer());
    let witness = Arc::new(NullWitness::authorizing(&authorized));
    let clock = Arc::new(NullClock::new(50));

    let registry = Arc::new(ItemRegistry::new(
        store.clone(),
        witness.clone(),
        deployer(),
    ));
    registry.initialize(&governor()).unwrap();

    let engine = GovernanceEngine::new(
        store.clone(),
        Arc::new(RegistryLink::new(registry.clone(), governor())),
        clock.clone(),
        witness.clone(),
        Arc::new(NullSink::new()),
        GovernanceParams::default(),
    );
    World {
        engine,
        registry,
        store,
        clock,
        witness,
    }
}

/// Run one creation proposal through acceptance and execution.
fn pass_creation(w: &World, name: &str) {
    let id = ItemId::from(name);
    w.engine
        .propose_create(&id, "a governed item", "https://example.org/item", &hash())
        .unwrap();
    for seed in 1..=3u8 {
        w.engine.cast_vote(&id, &member(seed), true).unwrap();
    }
    w.clock.advance(11);
    assert!(w.engine.execute(&id).unwrap());
}

/// Run one removal proposal through acceptance and execution.
fn pass_removal(w: &World, name: &str) {
    let id = ItemId::from(name);
    w.engine.propose_remove(&id).unwrap();
    for seed in 1..=3u8 {
        w.engine.cast_vote(&id, &member(seed), true).unwrap();
    }
    w.clock.advance(11);
    assert!(w.engine.execute(&id).unwrap());
}

// ---------------------------------------------------------------------------
// 1. Governance is the only mutation path
// ---------------------------------------------------------------------------

#[test]
fn direct_mutations_are_declined_for_everyone_but_the_governor() {
    let w = world();

    // Committee members, the deployer, nobody gets through directly.
    for caller in [member(1), deployer(), PrincipalId::ZERO] {
        assert!(!w
            .registry
            .create_item(&caller, &ItemId::from("backdoor"), "d", "u", &hash())
            .unwrap());
    }
    assert!(matches!(
        w.registry.get_item(&ItemId::from("backdoor")),
        Err(curia_governance::RegistryError::NotFound(_))
    ));

    // The proposal path lands the item.
    pass_creation(&w, "frontdoor");
    assert!(w.registry.get_item(&ItemId::from("frontdoor")).is_ok());
}

#[test]
fn the_link_carries_the_governor_identity() {
    let w = world();
    pass_creation(&w, "frog");

    let item = w.registry.get_item(&ItemId::from("frog")).unwrap();
    assert_eq!(item.description, "a governed item");
    assert_eq!(item.url, "https://example.org/item");
    assert_eq!(item.content_hash, hash());
    assert_eq!(w.registry.owner().unwrap(), Some(governor()));
}

// ---------------------------------------------------------------------------
// 2. Full circle: create, then remove, through governance
// ---------------------------------------------------------------------------

#[test]
fn full_circle_create_then_remove() {
    let w = world();
    let id = ItemId::from("m1");

    pass_creation(&w, "m1");
    assert!(w.registry.get_item(&id).is_ok());

    pass_removal(&w, "m1");
    assert!(matches!(
        w.registry.get_item(&id),
        Err(curia_governance::RegistryError::NotFound(_))
    ));
    assert!(matches!(
        w.engine.get_proposal(&id),
        Err(GovernanceError::ProposalNotFound(_))
    ));

    // Shared store is back to just the owner cell: both proposal state and
    // the item's cells were fully reclaimed.
    assert_eq!(w.store.len(), 1);
}

#[test]
fn the_id_is_reusable_after_removal() {
    let w = world();
    pass_creation(&w, "phoenix");
    pass_removal(&w, "phoenix");
    pass_creation(&w, "phoenix");
    assert!(w.registry.get_item(&ItemId::from("phoenix")).is_ok());
}

// ---------------------------------------------------------------------------
// 3. Rejected and superseded proposals against the real registry
// ---------------------------------------------------------------------------

#[test]
fn unaccepted_removal_leaves_the_item_in_place() {
    let w = world();
    pass_creation(&w, "survivor");
    let id = ItemId::from("survivor");

    w.engine.propose_remove(&id).unwrap();
    w.engine.cast_vote(&id, &member(1), true).unwrap();
    w.engine.cast_vote(&id, &member(2), false).unwrap();
    w.clock.advance(11);

    assert!(w.engine.execute(&id).unwrap());
    assert!(w.registry.get_item(&id).is_ok());
}

#[test]
fn an_expired_removal_can_be_reproposed_with_fresh_votes() {
    let w = world();
    pass_creation(&w, "stubborn");
    let id = ItemId::from("stubborn");

    w.engine.propose_remove(&id).unwrap();
    w.engine.cast_vote(&id, &member(1), true).unwrap();
    w.clock.advance(11); // expires with 1 of 3 needed votes

    w.engine.propose_remove(&id).unwrap();
    let view = w.engine.get_proposal(&id).unwrap();
    assert_eq!(view.votes_for, 0);

    // The earlier voter gets a fresh say.
    w.engine.cast_vote(&id, &member(1), true).unwrap();
    assert_eq!(w.engine.get_proposal(&id).unwrap().votes_for, 1);
}

// ---------------------------------------------------------------------------
// 4. Views over the composed system
// ---------------------------------------------------------------------------

#[test]
fn removal_views_show_the_stored_item() {
    let w = world();
    pass_creation(&w, "viewed");
    let id = ItemId::from("viewed");

    w.engine.propose_remove(&id).unwrap();
    let view = w.engine.get_proposal(&id).unwrap();
    assert_eq!(view.kind, ProposalKind::Remove);
    assert!(view.open_for_voting);
    assert_eq!(view.item, w.registry.get_item(&id).unwrap());
}

#[test]
fn listing_pages_through_governed_items() {
    let w = world();
    for index in 0..10u8 {
        pass_creation(&w, &format!("item-{index:02}"));
    }

    let first = w.registry.list_items(0).unwrap();
    assert_eq!(first.len(), MAX_LIST_ITEMS);
    assert_eq!(first[0].id, ItemId::from("item-00"));

    let second = w.registry.list_items(MAX_LIST_ITEMS).unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(second[1].id, ItemId::from("item-09"));
}

// ---------------------------------------------------------------------------
// 5. Committee membership changes
// ---------------------------------------------------------------------------

#[test]
fn a_revoked_member_loses_its_vote() {
    let w = world();
    w.engine
        .propose_create(&ItemId::from("frog"), "d", "u", &hash())
        .unwrap();

    w.witness.revoke(&member(1));
    let err = w
        .engine
        .cast_vote(&ItemId::from("frog"), &member(1), true)
        .unwrap_err();
    assert!(matches!(err, GovernanceError::Unauthorized(_)));

    // Reinstated, the member votes normally.
    w.witness.authorize(member(1));
    w.engine
        .cast_vote(&ItemId::from("frog"), &member(1), true)
        .unwrap();
}

// ---------------------------------------------------------------------------
// 6. Registry initialization through the link
// ---------------------------------------------------------------------------

#[test]
fn initialization_is_one_shot_even_via_the_link() {
    let w = world();
    let link = RegistryLink::new(w.registry.clone(), governor());
    assert!(matches!(
        link.initialize(&member(1)),
        Err(curia_governance::RegistryError::AlreadyInitialized)
    ));
    assert_eq!(w.registry.owner().unwrap(), Some(governor()));
}
