use std::time::Duration;

use clario_core::model::{SessionSnapshot, SessionUser, UserId};

use super::test_harness::{ViewKind, seed_result, setup_view_harness};

fn gauge() -> ViewKind {
    ViewKind::Gauge { min: 0, max: 10 }
}

#[tokio::test(flavor = "current_thread")]
async fn gauge_smoke_renders_full_ring_on_mount() {
    let mut harness = setup_view_harness(gauge(), SessionSnapshot::signed_out());
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains(r#"data-current-value="100""#), "missing percent in {html}");
    assert!(html.contains(">10<"), "missing counter label in {html}");
    assert!(html.contains("gauge-primary"), "missing primary arc in {html}");
    assert!(!html.contains("gauge-secondary"), "secondary arc at 100% in {html}");
    assert!(html.contains(r#"viewBox="0 0 100 100""#), "missing canvas in {html}");
    assert!(html.contains("transform: rotate(-90.0deg)"), "missing arc rotation in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gauge_smoke_reports_invalid_bounds() {
    let mut harness =
        setup_view_harness(ViewKind::Gauge { min: 5, max: 5 }, SessionSnapshot::signed_out());
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("gauge-error"), "missing error state in {html}");
    assert!(!html.contains("gauge-ring"), "ring rendered for invalid bounds in {html}");
    assert_eq!(harness.tickers.live(), 0);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn gauge_smoke_ticks_down_and_shows_secondary() {
    let mut harness = setup_view_harness(gauge(), SessionSnapshot::signed_out());
    harness.rebuild();
    harness.drive_async().await;

    tokio::time::advance(Duration::from_secs(1)).await;
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains(r#"data-current-value="90""#), "missing 90% in {html}");
    assert!(html.contains(">9<"), "missing counter 9 in {html}");
    assert!(html.contains("gauge-secondary"), "secondary arc hidden at 90% in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn gauge_smoke_releases_timer_on_unmount() {
    for _ in 0..3 {
        let mut harness = setup_view_harness(gauge(), SessionSnapshot::signed_out());
        harness.rebuild();
        harness.drive_async().await;
        assert_eq!(harness.tickers.live(), 1);

        // re-rendering must not start another timer
        harness.dom.mark_dirty(dioxus::prelude::ScopeId::ROOT);
        harness.drive_async().await;
        assert_eq!(harness.tickers.live(), 1);

        let tickers = harness.tickers.clone();
        drop(harness);
        assert_eq!(tickers.live(), 0);
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_loaded_result() {
    let user = SessionUser::new(UserId::random(), true);
    let mut harness = setup_view_harness(ViewKind::Dashboard, SessionSnapshot::signed_in(user));
    seed_result(&harness.storage, user.id, "Science").await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Recommended stream: Science"), "missing stream in {html}");
    assert!(html.contains("Strongest area: Analytical"), "missing top area in {html}");
    assert!(html.contains("gauge-ring"), "missing gauge in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_prompts_when_quiz_not_done() {
    let user = SessionUser::new(UserId::random(), false);
    let mut harness = setup_view_harness(ViewKind::Dashboard, SessionSnapshot::signed_in(user));
    seed_result(&harness.storage, user.id, "Arts").await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Complete the quiz"), "missing prompt in {html}");
    assert!(!html.contains("Recommended stream"), "fetched despite quiz not done in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_handles_missing_result() {
    let user = SessionUser::new(UserId::random(), true);
    let mut harness = setup_view_harness(ViewKind::Dashboard, SessionSnapshot::signed_in(user));

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("No quiz result found."), "missing empty state in {html}");
    assert!(!html.contains("Loading quiz result"), "still loading in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn result_view_smoke_lists_scores() {
    let user = SessionUser::new(UserId::random(), true);
    let mut harness = setup_view_harness(ViewKind::Result, SessionSnapshot::signed_in(user));
    seed_result(&harness.storage, user.id, "Science").await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Analytical"), "missing category in {html}");
    assert!(html.contains("Total: 13"), "missing total in {html}");
    assert!(html.contains(r#"data-top="true""#), "missing top marker in {html}");
}
