use async_trait::async_trait;
use launch_auditor::config::FeedConfig;
use launch_auditor::feeds::{FixtureTransport, RelayRoute};
use launch_auditor::{FeedAggregator, FeedTransport, PollUpdate, Poller, Result};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Answers every request, but only after `delay`
struct SlowTransport {
    delay: Duration,
}

#[async_trait]
impl FeedTransport for SlowTransport {
    fn name(&self) -> &'static str {
        "slow"
    }

    async fn get_json(&self, _url: &str, _timeout: Duration) -> Result<Value> {
        tokio::time::sleep(self.delay).await;
        Ok(json!([{ "mint": "late1", "name": "Late", "symbol": "LATE" }]))
    }
}

fn config() -> FeedConfig {
    FeedConfig {
        launch_feed_url: "https://launches.test/coins".into(),
        profile_feed_url: "https://profiles.test/latest".into(),
        relay_routes: vec![RelayRoute::Direct],
        ..FeedConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_run_stops_on_cancel() {
    let config = config();
    let transport = FixtureTransport::new().respond(
        config.launch_feed_url.clone(),
        json!([{ "mint": "m1", "name": "One", "symbol": "ONE", "created_timestamp": 1 }]),
    );
    let aggregator = Arc::new(FeedAggregator::from_config(&config, Arc::new(transport)));
    let poller = Poller::new(aggregator, config.poll_interval());

    let cancel = CancellationToken::new();
    let mut updates = Vec::new();
    let stop = cancel.clone();

    poller
        .run(cancel, |update| {
            updates.push(update);
            if updates.len() == 3 {
                stop.cancel();
            }
        })
        .await;

    assert_eq!(updates.len(), 3);
    for update in &updates {
        assert!(matches!(update, PollUpdate::Synced(assets) if assets.len() == 1));
    }
}

#[tokio::test(start_paused = true)]
async fn test_cancel_before_start_yields_nothing() {
    let config = config();
    let aggregator = Arc::new(FeedAggregator::from_config(
        &config,
        Arc::new(FixtureTransport::new()),
    ));
    let poller = Poller::new(aggregator, Duration::from_secs(4));

    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut calls = 0;
    poller.run(cancel, |_| calls += 1).await;

    assert_eq!(calls, 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_pass_discards_result() {
    let config = config();
    let transport = SlowTransport {
        delay: Duration::from_secs(30),
    };
    let aggregator = Arc::new(FeedAggregator::from_config(&config, Arc::new(transport)));
    let poller = Poller::new(aggregator, config.poll_interval());

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            cancel.cancel();
        }
    });

    let started = tokio::time::Instant::now();
    let mut calls = 0;
    poller.run(cancel, |_| calls += 1).await;

    assert_eq!(calls, 0);
    // run returned on cancel, well before the pass could finish
    assert!(started.elapsed() < Duration::from_secs(30));
}

#[tokio::test]
async fn test_repeat_mints_never_flash() {
    let config = config();
    let transport = FixtureTransport::new().respond(
        config.launch_feed_url.clone(),
        json!([{ "mint": "m1", "created_timestamp": 1 }]),
    );
    let aggregator = Arc::new(FeedAggregator::from_config(&config, Arc::new(transport)));
    let mut poller = Poller::new(aggregator, config.poll_interval());

    // first pass has no prior snapshot, nothing flashes
    match poller.poll_once().await {
        PollUpdate::Synced(assets) => assert!(!assets[0].is_flash),
        other => panic!("unexpected update {:?}", other),
    }

    // the same mint again is not new either
    match poller.poll_once().await {
        PollUpdate::Synced(assets) => assert!(!assets[0].is_flash),
        other => panic!("unexpected update {:?}", other),
    }
    assert!(poller.snapshot().contains("m1"));
}

#[tokio::test]
async fn test_unavailable_without_any_data() {
    let config = config();
    let aggregator = Arc::new(FeedAggregator::from_config(
        &config,
        Arc::new(FixtureTransport::new()),
    ));
    let mut poller = Poller::new(aggregator, config.poll_interval());

    assert_eq!(poller.poll_once().await, PollUpdate::Unavailable);
}
