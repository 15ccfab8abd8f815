//! Integration tests for resource subscriptions.


use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use modgate_lifecycle::observers::{LifecycleEvent, WarningKind};
use modgate_lifecycle::subscription::{
    InputPhase, InputValue, ResourceHandle, SubscriptionManager, interaction,
};
use test_utils::{create_test_host, warnings};

#[test]
fn subscribe_enables_and_attaches() {
    let (host, registry, events) = create_test_host();
    let jump = registry.add("Jump");
    let mut subs = SubscriptionManager::new("InputLogger");

    assert!(subs.subscribe(&host, "Jump", interaction(|_, _| {})));

    assert!(jump.is_enabled());
    assert_eq!(jump.attached(), 1);
    assert!(subs.is_subscribed("Jump"));
    assert!(subs.get("Jump").is_some_and(|s| s.handle().is_some()));
    assert!(events.lock().unwrap().contains(&LifecycleEvent::Subscribed {
        system: "InputLogger".into(),
        resource: "Jump".into(),
    }));
}

#[test]
fn double_subscribe_leaves_one_callback() {
    let (host, registry, events) = create_test_host();
    let jump = registry.add("Jump");
    let mut subs = SubscriptionManager::new("InputLogger");

    let first = interaction(|_, _| {});
    let second = interaction(|_, _| {});
    assert!(subs.subscribe(&host, "Jump", Arc::clone(&first)));
    assert!(subs.subscribe(&host, "Jump", Arc::clone(&second)));

    assert_eq!(jump.attached(), 1);
    assert_eq!(subs.len(), 1);
    assert!(subs.get("Jump").is_some_and(|s| s.owns(&second)));
    assert!(warnings(&events).is_empty());
}

#[test]
fn replace_survives_a_failed_detach() {
    let (host, registry, events) = create_test_host();
    let jump = registry.add("Jump");
    let mut subs = SubscriptionManager::new("InputLogger");

    let first = interaction(|_, _| {});
    let second = interaction(|_, _| {});
    assert!(subs.subscribe(&host, "Jump", Arc::clone(&first)));
    jump.fail_detach();
    assert!(subs.subscribe(&host, "Jump", Arc::clone(&second)));

    assert_eq!(subs.len(), 1);
    assert!(subs.get("Jump").is_some_and(|s| s.owns(&second)));
    assert!(jump.is_enabled());
    assert_eq!(warnings(&events), vec![WarningKind::DetachFailed]);
}

#[test]
fn callback_receives_handle_and_phase() {
    let (host, registry, _events) = create_test_host();
    let move_action = registry.add("Move");
    move_action.set_value(InputValue::Vector { x: 0.0, y: 1.0 });
    let lines = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);

    let mut subs = SubscriptionManager::new("InputLogger");
    subs.subscribe(
        &host,
        "Move",
        interaction(move |handle, phase| {
            sink.lock()
                .unwrap()
                .push(format!("[{}] On{} {}", handle.name(), phase, handle.read_value()));
        }),
    );
    move_action.fire(InputPhase::Performed);

    assert_eq!(*lines.lock().unwrap(), vec!["[Move] OnPerformed (0.00, 1.00)"]);
}

#[test]
fn unsubscribe_never_subscribed_is_noop() {
    let (host, registry, events) = create_test_host();
    registry.add("Jump");
    let mut subs = SubscriptionManager::new("InputLogger");

    assert!(!subs.unsubscribe(&host, "Jump"));
    assert!(!subs.unsubscribe(&host, "Nothing"));
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn unsubscribe_detaches_and_disables() {
    let (host, registry, _events) = create_test_host();
    let jump = registry.add("Jump");
    let mut subs = SubscriptionManager::new("InputLogger");
    subs.subscribe(&host, "Jump", interaction(|_, _| {}));

    assert!(subs.unsubscribe(&host, "Jump"));
    assert_eq!(jump.attached(), 0);
    assert!(!jump.is_enabled());
    assert!(!subs.unsubscribe(&host, "Jump"));
}

#[test]
fn missing_resource_warns_and_records_nothing() {
    let (host, _registry, events) = create_test_host();
    let mut subs = SubscriptionManager::new("InputLogger");

    assert!(!subs.subscribe(&host, "Ghost", interaction(|_, _| {})));
    assert!(subs.is_empty());
    assert_eq!(warnings(&events), vec![WarningKind::MissingResource]);
}

#[test]
fn attach_failure_warns_and_leaves_handle_disabled() {
    let (host, registry, events) = create_test_host();
    let jump = registry.add("Jump");
    jump.fail_attach();
    let mut subs = SubscriptionManager::new("InputLogger");

    assert!(!subs.subscribe(&host, "Jump", interaction(|_, _| {})));
    assert!(!jump.is_enabled());
    assert!(subs.is_empty());
    assert_eq!(warnings(&events), vec![WarningKind::AttachFailed]);
}

#[test]
fn dispose_all_releases_every_handle() {
    let (host, registry, _events) = create_test_host();
    let handles: Vec<_> = ["A", "B", "C"].iter().map(|n| registry.add(n)).collect();
    let mut subs = SubscriptionManager::new("InputLogger");
    for name in ["A", "B", "C"] {
        assert!(subs.subscribe(&host, name, interaction(|_, _| {})));
    }

    // The host forgets "B" but the handle object is still alive.
    registry.remove("B");

    assert_eq!(subs.dispose_all(&host), 3);
    assert!(subs.is_empty());
    for handle in &handles {
        assert_eq!(handle.attached(), 0);
        assert!(!handle.is_enabled());
    }
}

#[test]
fn dispose_all_survives_a_vanished_handle() {
    let (host, registry, events) = create_test_host();
    let a = registry.add("A");
    registry.add("B");
    let c = registry.add("C");
    let mut subs = SubscriptionManager::new("InputLogger");
    for name in ["A", "B", "C"] {
        subs.subscribe(&host, name, interaction(|_, _| {}));
    }

    // Dropping the registry's only reference destroys "B" entirely.
    registry.remove("B");

    assert_eq!(subs.dispose_all(&host), 3);
    assert!(subs.is_empty());
    assert_eq!(a.attached(), 0);
    assert_eq!(c.attached(), 0);
    assert!(!a.is_enabled());
    assert!(!c.is_enabled());
    assert_eq!(warnings(&events), vec![WarningKind::MissingResource]);

    let released = events
        .lock()
        .unwrap()
        .iter()
        .filter(|e| matches!(e, LifecycleEvent::Unsubscribed { .. }))
        .count();
    assert_eq!(released, 3);
}

#[test]
fn dispose_all_continues_after_detach_failure() {
    let (host, registry, events) = create_test_host();
    let a = registry.add("A");
    let b = registry.add("B");
    let c = registry.add("C");
    let mut subs = SubscriptionManager::new("InputLogger");
    for name in ["A", "B", "C"] {
        assert!(subs.subscribe(&host, name, interaction(|_, _| {})));
    }
    b.fail_detach();

    assert_eq!(subs.dispose_all(&host), 3);
    assert!(subs.is_empty());
    assert_eq!(a.attached(), 0);
    assert_eq!(c.attached(), 0);
    assert!(!a.is_enabled());
    assert!(!b.is_enabled());
    assert!(!c.is_enabled());
    assert_eq!(warnings(&events), vec![WarningKind::DetachFailed]);
}

#[test]
fn set_all_enabled_skips_nothing_alive() {
    let (host, registry, _events) = create_test_host();
    let a = registry.add("A");
    let b = registry.add("B");
    let mut subs = SubscriptionManager::new("InputLogger");
    subs.subscribe(&host, "A", interaction(|_, _| {}));
    subs.subscribe(&host, "B", interaction(|_, _| {}));

    assert_eq!(subs.set_all_enabled(false), 2);
    assert!(!a.is_enabled());
    assert!(!b.is_enabled());
    assert_eq!(a.attached(), 1);

    assert!(subs.set_enabled("A", true));
    assert!(a.is_enabled());
    assert!(!subs.set_enabled("Missing", true));
}

#[test]
fn fired_callbacks_stop_after_unsubscribe() {
    let (host, registry, _events) = create_test_host();
    let jump = registry.add("Jump");
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let mut subs = SubscriptionManager::new("InputLogger");
    subs.subscribe(
        &host,
        "Jump",
        interaction(move |_, _| {
            seen.fetch_add(1, Ordering::SeqCst);
        }),
    );

    jump.fire(InputPhase::Started);
    subs.unsubscribe(&host, "Jump");
    jump.fire(InputPhase::Started);

    assert_eq!(count.load(Ordering::SeqCst), 1);
}
