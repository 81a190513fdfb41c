//! Scripted fakes for the probe and recovery capabilities.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use link_watchdog::probe::Prober;
use link_watchdog::recovery::{Recoverer, RecoveryError};

/// Tracks how many capability calls are running at once.
#[derive(Debug, Default)]
pub struct Activity {
    current: AtomicUsize,
    max: AtomicUsize,
}

impl Activity {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    #[allow(dead_code)]
    pub fn max_concurrent(&self) -> usize {
        self.max.load(Ordering::SeqCst)
    }
}

/// Returns scripted outcomes in order, then `true` forever.
pub struct ScriptedProber {
    outcomes: Mutex<VecDeque<bool>>,
    latency: Duration,
    activity: Arc<Activity>,
    started: Mutex<Vec<Instant>>,
    completed: AtomicUsize,
}

impl ScriptedProber {
    pub fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            latency: Duration::ZERO,
            activity: Arc::new(Activity::default()),
            started: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
        }
    }

    #[allow(dead_code)]
    pub fn always_up() -> Self {
        Self::new(Vec::<bool>::new())
    }

    #[allow(dead_code)]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[allow(dead_code)]
    pub fn with_activity(mut self, activity: Arc<Activity>) -> Self {
        self.activity = activity;
        self
    }

    #[allow(dead_code)]
    pub fn started_at(&self) -> Vec<Instant> {
        self.started.lock().unwrap().clone()
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, _target: &str) -> bool {
        self.started.lock().unwrap().push(Instant::now());
        self.activity.enter();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.activity.exit();

        let outcome = self.outcomes.lock().unwrap().pop_front().unwrap_or(true);
        self.completed.fetch_add(1, Ordering::SeqCst);
        outcome
    }
}

/// Records every recovery request; optionally fails or takes time.
#[derive(Default)]
pub struct RecordingRecoverer {
    interfaces: Mutex<Vec<String>>,
    fail: bool,
    latency: Duration,
    activity: Arc<Activity>,
    completed: AtomicUsize,
}

impl RecordingRecoverer {
    #[allow(dead_code)]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    #[allow(dead_code)]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    #[allow(dead_code)]
    pub fn with_activity(mut self, activity: Arc<Activity>) -> Self {
        self.activity = activity;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.interfaces.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Recoverer for RecordingRecoverer {
    async fn recover(&self, interface: &str) -> Result<(), RecoveryError> {
        self.interfaces.lock().unwrap().push(interface.to_string());
        self.activity.enter();
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.activity.exit();
        self.completed.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            Err(RecoveryError::Spawn {
                step: format!("wg-quick down {}", interface),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        } else {
            Ok(())
        }
    }
}
