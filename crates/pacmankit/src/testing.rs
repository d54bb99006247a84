//! In-memory backend for unit tests.

use crate::backend::Backend;
use crate::backend::pacman::action_flags;
use crate::error::{Error, Result};
use crate::types::{Action, InstallReason};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Backend that serves canned query output and records executed actions.
#[derive(Default)]
pub struct FakeBackend {
    explicit: String,
    dependency: String,
    failing_queries: bool,
    orphan_batches: Mutex<VecDeque<String>>,
    sticky_orphans: Option<String>,
    fail_on: Option<&'static str>,
    executed: Mutex<Vec<Action>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(mut self, explicit: &str, dependency: &str) -> Self {
        self.explicit = explicit.to_string();
        self.dependency = dependency.to_string();
        self
    }

    pub fn with_orphan_batches(self, batches: &[&str]) -> Self {
        *self.orphan_batches.lock().unwrap() = batches.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn with_sticky_orphans(mut self, orphans: &str) -> Self {
        self.sticky_orphans = Some(orphans.to_string());
        self
    }

    /// Fail every action with this label.
    pub fn failing_on(mut self, label: &'static str) -> Self {
        self.fail_on = Some(label);
        self
    }

    pub fn failing_queries(mut self) -> Self {
        self.failing_queries = true;
        self
    }

    pub fn executed(&self) -> Vec<Action> {
        self.executed.lock().unwrap().clone()
    }
}

impl Backend for FakeBackend {
    fn name(&self) -> &str {
        "fake"
    }

    fn query(&self, reason: InstallReason) -> Result<String> {
        if self.failing_queries {
            return Err(Error::QueryFailed {
                query: format!("fake query {}", reason),
                stderr: "database is locked".to_string(),
            });
        }
        Ok(match reason {
            InstallReason::Explicit => self.explicit.clone(),
            InstallReason::Dependency => self.dependency.clone(),
        })
    }

    fn query_orphans(&self) -> Result<String> {
        if let Some(sticky) = &self.sticky_orphans {
            return Ok(sticky.clone());
        }
        Ok(self
            .orphan_batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    fn command_line(&self, action: &Action) -> Option<Vec<String>> {
        let mut cmd = vec!["fake".to_string()];
        cmd.extend(action_flags(action)?.into_iter().map(str::to_string));
        cmd.extend(action.packages().iter().map(|p| p.to_string()));
        Some(cmd)
    }

    fn execute(&self, action: &Action) -> Result<()> {
        if self.fail_on == Some(action.label()) {
            return Err(Error::ActionFailed {
                action: action.label().to_string(),
                message: "exit status: 1".to_string(),
            });
        }
        self.executed.lock().unwrap().push(action.clone());
        Ok(())
    }
}
