//! In-memory host facilities for coordinator tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use straico_core::error::AppError;
use straico_core::result::AppResult;
use straico_core::traits::{
    AreaEntry, DirRemoval, EphemeralCache, FileArea, JobScheduler, KeyValueStore, SchemaManager,
};
use straico_core::types::Recurrence;

#[derive(Debug, Default)]
pub struct FakeSchema {
    installed: AtomicBool,
    fail: bool,
}

impl FakeSchema {
    pub fn failing() -> Self {
        Self {
            installed: AtomicBool::new(false),
            fail: true,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaManager for FakeSchema {
    fn tables(&self) -> Vec<String> {
        vec!["straico_shortcodes".into(), "straico_agent_log".into()]
    }

    async fn install(&self) -> AppResult<()> {
        if self.fail {
            return Err(AppError::database("disk I/O error"));
        }
        self.installed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn uninstall(&self) -> AppResult<u64> {
        if self.fail {
            return Err(AppError::database("database is locked"));
        }
        if self.installed.swap(false, Ordering::SeqCst) {
            Ok(self.tables().len() as u64)
        } else {
            Ok(0)
        }
    }
}

#[derive(Debug, Default)]
pub struct FakeOptions {
    values: Mutex<HashMap<String, String>>,
    locked: Mutex<HashSet<String>>,
}

impl FakeOptions {
    /// Make deletes of `key` fail.
    pub fn fail_on(&self, key: &str) {
        self.locked.lock().unwrap().insert(key.to_string());
    }

    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }
}

#[async_trait]
impl KeyValueStore for FakeOptions {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        if self.locked.lock().unwrap().contains(key) {
            return Err(AppError::database(format!("cannot delete '{key}'")));
        }
        Ok(self.values.lock().unwrap().remove(key).is_some())
    }
}

#[derive(Debug, Default)]
pub struct FakeCache(Mutex<HashMap<String, String>>);

impl FakeCache {
    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

#[async_trait]
impl EphemeralCache for FakeCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.0.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) -> AppResult<()> {
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
pub struct FakeScheduler(Mutex<Vec<(String, Recurrence)>>);

impl FakeScheduler {
    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

#[async_trait]
impl JobScheduler for FakeScheduler {
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

/// Upload area whose directory can never be inspected.
#[derive(Debug)]
pub struct BrokenFiles;

#[async_trait]
impl FileArea for BrokenFiles {
    async fn resolve(&self, subdir: &str) -> AppResult<Option<PathBuf>> {
        Ok(Some(PathBuf::from("/unreadable").join(subdir)))
    }

    async fn exists(&self, dir: &Path) -> AppResult<bool> {
        Err(AppError::storage(format!(
            "Permission denied: {}",
            dir.display()
        )))
    }

    async fn list(&self, _dir: &Path) -> AppResult<Vec<AreaEntry>> {
        Err(AppError::storage("Permission denied"))
    }

    async fn delete_file(&self, _path: &Path) -> AppResult<bool> {
        Err(AppError::storage("Permission denied"))
    }

    async fn remove_dir(&self, _dir: &Path) -> AppResult<DirRemoval> {
        Err(AppError::storage("Permission denied"))
    }
}
