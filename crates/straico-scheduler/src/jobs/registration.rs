//! Registration of the model update and coin check jobs from plugin options.

use tracing;

use straico_core::registry;
use straico_core::result::AppResult;
use straico_core::traits::options::KeyValueStore;
use straico_core::traits::scheduler::JobScheduler;
use straico_core::types::Recurrence;

/// A job that ended up scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginJob {
    /// Hook name.
    pub hook: &'static str,
    /// Recurrence it was scheduled with.
    pub recurrence: Recurrence,
}

/// Schedule the plugin's recurring jobs according to its options.
///
/// - `straico_model_update_event` always runs, on
///   `straico_model_update_frequency` (daily when unset or invalid).
/// - `straico_coin_check_event` runs only while `straico_notify_low_coins`
///   is enabled, on `straico_coin_check_frequency` (hourly when unset or
///   invalid). When notifications are off, any existing instance is cleared.
///
/// Each hook is cleared before it is scheduled, so calling this again after
/// a settings change leaves exactly one instance per hook.
pub async fn register_plugin_jobs(
    options: &dyn KeyValueStore,
    scheduler: &dyn JobScheduler,
) -> AppResult<Vec<PluginJob>> {
    let mut scheduled = Vec::new();

    let model_update = read_recurrence(
        options,
        registry::OPTION_MODEL_UPDATE_FREQUENCY,
        Recurrence::Daily,
    )
    .await?;
    scheduler.clear(registry::JOB_MODEL_UPDATE).await?;
    scheduler
        .schedule(registry::JOB_MODEL_UPDATE, model_update)
        .await?;
    scheduled.push(PluginJob {
        hook: registry::JOB_MODEL_UPDATE,
        recurrence: model_update,
    });

    scheduler.clear(registry::JOB_COIN_CHECK).await?;
    if is_enabled(options.get(registry::OPTION_NOTIFY_LOW_COINS).await?.as_deref()) {
        let coin_check = read_recurrence(
            options,
            registry::OPTION_COIN_CHECK_FREQUENCY,
            Recurrence::Hourly,
        )
        .await?;
        scheduler
            .schedule(registry::JOB_COIN_CHECK, coin_check)
            .await?;
        scheduled.push(PluginJob {
            hook: registry::JOB_COIN_CHECK,
            recurrence: coin_check,
        });
    } else {
        tracing::info!("Low coin notifications disabled; coin check not scheduled");
    }

    Ok(scheduled)
}

async fn read_recurrence(
    options: &dyn KeyValueStore,
    key: &str,
    fallback: Recurrence,
) -> AppResult<Recurrence> {
    let Some(raw) = options.get(key).await? else {
        return Ok(fallback);
    };
    match raw.parse::<Recurrence>() {
        Ok(recurrence) => Ok(recurrence),
        Err(e) => {
            tracing::warn!(option = key, value = %raw, error = %e, "Invalid frequency, using default");
            Ok(fallback)
        }
    }
}

/// Checkbox-style option values.
fn is_enabled(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    #[derive(Debug, Default)]
    struct MapOptions(Mutex<HashMap<String, String>>);

    impl MapOptions {
        fn with(pairs: &[(&str, &str)]) -> Self {
            let map = pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Self(Mutex::new(map))
        }
    }

    #[async_trait]
    impl KeyValueStore for MapOptions {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str) -> AppResult<()> {
            self.0
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> AppResult<bool> {
            Ok(self.0.lock().unwrap().remove(key).is_some())
        }
    }

    #[derive(Debug, Default)]
    struct VecScheduler(Mutex<Vec<(String, Recurrence)>>);

    #[async_trait]
    impl JobScheduler for VecScheduler {
        async fn schedule(&self, hook: &str, recurrence: Recurrence) -> AppResult<()> {
            self.0.lock().unwrap().push((hook.to_string(), recurrence));
            Ok(())
        }

        async fn is_scheduled(&self, hook: &str) -> AppResult<bool> {
            Ok(self.0.lock().unwrap().iter().any(|(h, _)| h == hook))
        }

        async fn clear(&self, hook: &str) -> AppResult<u64> {
            let mut jobs = self.0.lock().unwrap();
            let before = jobs.len();
            jobs.retain(|(h, _)| h != hook);
            Ok((before - jobs.len()) as u64)
        }
    }

    #[tokio::test]
    async fn test_defaults_without_options() {
        let options = MapOptions::default();
        let scheduler = VecScheduler::default();

        let jobs = register_plugin_jobs(&options, &scheduler).await.unwrap();
        assert_eq!(
            jobs,
            vec![PluginJob {
                hook: registry::JOB_MODEL_UPDATE,
                recurrence: Recurrence::Daily,
            }]
        );
        assert!(!scheduler.is_scheduled(registry::JOB_COIN_CHECK).await.unwrap());
    }

    #[tokio::test]
    async fn test_coin_check_follows_options() {
        let options = MapOptions::with(&[
            (registry::OPTION_MODEL_UPDATE_FREQUENCY, "twicedaily"),
            (registry::OPTION_NOTIFY_LOW_COINS, "1"),
            (registry::OPTION_COIN_CHECK_FREQUENCY, "6"),
        ]);
        let scheduler = VecScheduler::default();

        register_plugin_jobs(&options, &scheduler).await.unwrap();
        register_plugin_jobs(&options, &scheduler).await.unwrap();

        let jobs = scheduler.0.lock().unwrap().clone();
        assert_eq!(
            jobs,
            vec![
                (registry::JOB_MODEL_UPDATE.to_string(), Recurrence::TwiceDaily),
                (registry::JOB_COIN_CHECK.to_string(), Recurrence::EveryHours(6)),
            ]
        );
    }

    #[tokio::test]
    async fn test_disabling_notifications_clears_coin_check() {
        let options = MapOptions::with(&[(registry::OPTION_NOTIFY_LOW_COINS, "yes")]);
        let scheduler = VecScheduler::default();
        register_plugin_jobs(&options, &scheduler).await.unwrap();
        assert!(scheduler.is_scheduled(registry::JOB_COIN_CHECK).await.unwrap());

        options
            .set(registry::OPTION_NOTIFY_LOW_COINS, "0")
            .await
            .unwrap();
        register_plugin_jobs(&options, &scheduler).await.unwrap();
        assert!(!scheduler.is_scheduled(registry::JOB_COIN_CHECK).await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_frequency_falls_back() {
        let options =
            MapOptions::with(&[(registry::OPTION_MODEL_UPDATE_FREQUENCY, "fortnightly")]);
        let scheduler = VecScheduler::default();
        let jobs = register_plugin_jobs(&options, &scheduler).await.unwrap();
        assert_eq!(jobs[0].recurrence, Recurrence::Daily);
    }

    #[test]
    fn test_is_enabled() {
        assert!(is_enabled(Some("1")));
        assert!(is_enabled(Some(" On ")));
        assert!(!is_enabled(Some("0")));
        assert!(!is_enabled(Some("")));
        assert!(!is_enabled(None));
    }
}
