//! Integration tests for job registration against the host's cron store.

mod helpers;

use std::sync::Arc;

use straico_core::registry;
use straico_core::traits::{JobScheduler, KeyValueStore};
use straico_core::types::Recurrence;
use straico_lifecycle::TeardownStep;
use straico_scheduler::{CronScheduler, JobDispatcher, register_plugin_jobs};

use helpers::TestHost;

#[tokio::test]
async fn test_registration_is_persisted_once_per_hook() {
    let app = TestHost::new().await;
    let options = app.host.options();
    options
        .set(registry::OPTION_MODEL_UPDATE_FREQUENCY, "weekly")
        .await
        .unwrap();
    options.set(registry::OPTION_NOTIFY_LOW_COINS, "1").await.unwrap();

    register_plugin_jobs(options, app.host.cron_events()).await.unwrap();
    register_plugin_jobs(options, app.host.cron_events()).await.unwrap();

    let events = app.host.cron_events().list().await.unwrap();
    let hooks: Vec<_> = events
        .iter()
        .map(|e| (e.hook.as_str(), e.recurrence))
        .collect();
    assert_eq!(
        hooks,
        vec![
            (registry::JOB_COIN_CHECK, Recurrence::Hourly),
            (registry::JOB_MODEL_UPDATE, Recurrence::Weekly),
        ]
    );
}

#[tokio::test]
async fn test_uninstall_clears_persisted_jobs() {
    let app = TestHost::new().await;
    app.host
        .options()
        .set(registry::OPTION_NOTIFY_LOW_COINS, "on")
        .await
        .unwrap();
    register_plugin_jobs(app.host.options(), app.host.cron_events())
        .await
        .unwrap();

    let report = app
        .host
        .uninstaller()
        .uninstall(&app.host.removal_signal())
        .await
        .unwrap();

    assert_eq!(
        report.outcome(TeardownStep::ScheduledJobs).map(|s| s.removed),
        Some(2)
    );
    assert!(app.host.cron_events().list().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_runtime_loads_persisted_events() {
    let app = TestHost::new().await;
    register_plugin_jobs(app.host.options(), app.host.cron_events())
        .await
        .unwrap();

    let cron = CronScheduler::new(Arc::new(JobDispatcher::new()))
        .await
        .unwrap();
    for event in app.host.cron_events().list().await.unwrap() {
        cron.schedule(&event.hook, event.recurrence).await.unwrap();
    }

    assert_eq!(cron.hooks(), vec![registry::JOB_MODEL_UPDATE.to_string()]);
    assert!(!cron.is_scheduled(registry::JOB_COIN_CHECK).await.unwrap());
    assert_eq!(cron.clear(registry::JOB_MODEL_UPDATE).await.unwrap(), 1);
}
