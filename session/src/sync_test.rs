use std::time::Duration;

use super::*;
use crate::storage::StorageScope;

#[tokio::test]
async fn every_subscriber_sees_each_event() {
    let bus = AuthBus::new();
    let mut header = bus.subscribe();
    let mut profile = bus.subscribe();

    assert_eq!(bus.publish(AuthEvent::LoggedIn), 2);
    assert_eq!(header.recv().await, Some(AuthEvent::LoggedIn));
    assert_eq!(profile.recv().await, Some(AuthEvent::LoggedIn));
}

#[test]
fn dropping_subscription_unsubscribes() {
    let bus = AuthBus::new();
    assert_eq!(bus.subscriber_count(), 0);

    let sub = bus.subscribe();
    let other = bus.subscribe();
    assert_eq!(bus.subscriber_count(), 2);

    drop(sub);
    assert_eq!(bus.subscriber_count(), 1);
    drop(other);
    assert_eq!(bus.subscriber_count(), 0);
    assert_eq!(bus.publish(AuthEvent::LoggedOut), 0);
}

#[test]
fn try_recv_drains_without_blocking() {
    let bus = AuthBus::new();
    let mut sub = bus.subscribe();
    assert_eq!(sub.try_recv(), None);

    bus.publish(AuthEvent::TokenRefreshed);
    assert_eq!(sub.try_recv(), Some(AuthEvent::TokenRefreshed));
    assert_eq!(sub.try_recv(), None);
}

#[tokio::test]
async fn storage_bridge_forwards_foreign_session_writes() {
    let scope = StorageScope::memory();
    let this_tab = scope.handle();
    let other_tab = scope.handle();

    let bus = AuthBus::new();
    let mut sub = bus.subscribe();
    let _bridge = bus.bridge_storage(&this_tab);

    this_tab.set("accessToken", "mine").expect("own write");
    other_tab.set("theme", "dark").expect("unrelated key");
    other_tab.remove("accessToken").expect("foreign logout");

    let event = tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event should arrive")
        .expect("bus alive");
    assert_eq!(event, AuthEvent::StorageChanged { key: "accessToken".to_owned() });
    assert_eq!(sub.try_recv(), None);
}

#[tokio::test]
async fn dropped_bridge_stops_forwarding() {
    let scope = StorageScope::memory();
    let this_tab = scope.handle();
    let other_tab = scope.handle();

    let bus = AuthBus::new();
    let mut sub = bus.subscribe();
    drop(bus.bridge_storage(&this_tab));
    tokio::task::yield_now().await;

    other_tab.set("role", "ADMIN").expect("write");
    let waited = tokio::time::timeout(Duration::from_millis(100), sub.recv()).await;
    assert!(waited.is_err(), "no event after the bridge is dropped");
}
