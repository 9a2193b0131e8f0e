#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use cmdsync_core::config::RefreshConfig;
use cmdsync_core::explorer::InMemoryExplorerView;
use cmdsync_core::{
    ApplicableContext, Command, CommandManager, GoalRegistry, RefreshCoordinator, RefreshPhase,
};
use common::loaded_manager;
use tokio::time::sleep;

/// The manager is returned so the coordinator's weak reference stays alive
async fn coordinator() -> (Arc<CommandManager>, RefreshCoordinator, Arc<InMemoryExplorerView>) {
    let manager = loaded_manager(vec![
        Command::new("c1", "custom", "").with_goal("build"),
        Command::new("c2", "custom", "").with_goal("run"),
    ])
    .await;
    let view = Arc::new(InMemoryExplorerView::new());
    let coordinator = RefreshCoordinator::new(
        &manager,
        Arc::new(GoalRegistry::new()),
        view.clone(),
        RefreshConfig::default(),
    );
    (manager, coordinator, view)
}

#[tokio::test(start_paused = true)]
async fn test_refresh_fires_after_delay() {
    let (_manager, coordinator, view) = coordinator().await;

    coordinator.request_refresh();
    assert_eq!(coordinator.phase(), RefreshPhase::PendingRefresh);

    sleep(Duration::from_millis(250)).await;
    assert_eq!(view.render_count(), 0);

    sleep(Duration::from_millis(100)).await;
    assert_eq!(view.render_count(), 1);
    assert_eq!(coordinator.phase(), RefreshPhase::Idle);
    assert!(view.selected_command().is_none());

    let rendered = view.rendered().unwrap();
    assert_eq!(rendered.len(), 5);
    assert_eq!(rendered.command_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_burst_coalesces_into_one_refresh() {
    let (_manager, coordinator, view) = coordinator().await;

    for _ in 0..5 {
        coordinator.request_refresh();
        sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(view.render_count(), 0);

    sleep(Duration::from_millis(250)).await;
    assert_eq!(view.render_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_only_latest_target_is_selected() {
    let (_manager, coordinator, view) = coordinator().await;
    let c1 = Command::new("c1", "custom", "");
    let c2 = Command::new("c2", "custom", "");

    coordinator.request_refresh_and_select(&c1);
    sleep(Duration::from_millis(100)).await;
    coordinator.request_refresh_and_select(&c2);

    sleep(Duration::from_millis(350)).await;
    assert_eq!(view.render_count(), 1);
    assert_eq!(coordinator.phase(), RefreshPhase::PendingSelect);
    assert!(view.selected_command().is_none());

    sleep(Duration::from_millis(300)).await;
    assert_eq!(view.render_count(), 1);
    assert_eq!(view.selected_command().as_deref(), Some("c2"));
    assert_eq!(coordinator.phase(), RefreshPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_request_during_select_wait_cancels_select() {
    let (_manager, coordinator, view) = coordinator().await;

    coordinator.request_refresh_and_select(&Command::new("c1", "custom", ""));
    sleep(Duration::from_millis(350)).await;
    assert_eq!(coordinator.phase(), RefreshPhase::PendingSelect);

    coordinator.request_refresh();
    assert_eq!(coordinator.phase(), RefreshPhase::PendingRefresh);

    sleep(Duration::from_millis(1000)).await;
    assert_eq!(view.render_count(), 2);
    assert!(view.selected_command().is_none());
    assert_eq!(coordinator.phase(), RefreshPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_drops_pending_refresh() {
    let (_manager, coordinator, view) = coordinator().await;

    coordinator.request_refresh();
    coordinator.cancel();
    assert_eq!(coordinator.phase(), RefreshPhase::Idle);

    sleep(Duration::from_millis(1000)).await;
    assert_eq!(view.render_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_reads_snapshot_at_fire_time() {
    let manager = loaded_manager(Vec::new()).await;
    let view = Arc::new(InMemoryExplorerView::new());
    let coordinator = RefreshCoordinator::new(
        &manager,
        Arc::new(GoalRegistry::new()),
        view.clone(),
        RefreshConfig {
            refresh_delay_ms: 50,
            select_delay_ms: 10,
        },
    );

    coordinator.request_refresh();
    manager
        .create_command("test", "custom", ApplicableContext::workspace())
        .await
        .unwrap();

    sleep(Duration::from_millis(60)).await;
    let rendered = view.rendered().unwrap();
    assert_eq!(rendered.get("test").unwrap().len(), 1);
}

#[test]
fn test_without_runtime_refreshes_immediately() {
    let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let manager = runtime.block_on(loaded_manager(vec![Command::new("c1", "custom", "")]));
    let view = Arc::new(InMemoryExplorerView::new());
    let coordinator = RefreshCoordinator::new(
        &manager,
        Arc::new(GoalRegistry::new()),
        view.clone(),
        RefreshConfig::default(),
    );

    coordinator.request_refresh_and_select(&Command::new("c1", "custom", ""));

    assert_eq!(view.render_count(), 1);
    assert_eq!(view.selected_command().as_deref(), Some("c1"));
    assert_eq!(coordinator.phase(), RefreshPhase::Idle);
}
