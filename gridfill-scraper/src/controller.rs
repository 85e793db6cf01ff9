//! Run lifecycle for a polling frontend.
//!
//! `Idle -> Running -> {Completed, Failed} -> Idle`. At most one run is in
//! flight; the frontend calls [`RunController::poll`] once per tick.

use std::sync::Arc;

use futures::FutureExt;
use gridfill_core::ActivityLog;
use tokio::task::JoinHandle;

use crate::error::{ScrapeError, error_chain};
use crate::pipeline::{Pipeline, RunParams};
use crate::report::RunReport;
use crate::transport::HttpTransport;

/// What a poll observed.
#[derive(Debug)]
pub enum RunState {
    Idle,
    Running,
    Completed(RunReport),
    Failed(String),
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

pub struct RunController<T> {
    pipeline: Arc<Pipeline<T>>,
    task: Option<JoinHandle<Result<RunReport, ScrapeError>>>,
}

impl<T: HttpTransport> RunController<T> {
    pub fn new(pipeline: Pipeline<T>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            task: None,
        }
    }

    pub fn log(&self) -> &ActivityLog {
        self.pipeline.log()
    }

    pub fn pipeline(&self) -> &Pipeline<T> {
        &self.pipeline
    }

    /// A run has been started and its outcome not yet collected.
    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }

    /// Spawn a run on the current tokio runtime.
    ///
    /// Returns `false` without doing anything while a run is unresolved.
    pub fn start(&mut self, params: RunParams) -> bool {
        if self.task.is_some() {
            return false;
        }

        let pipeline = Arc::clone(&self.pipeline);
        self.task = Some(tokio::spawn(async move {
            let result = pipeline.run(&params).await;
            if let Err(e) = &result {
                pipeline
                    .log()
                    .error(format!("Run failed: {}", error_chain(e)));
            }
            result
        }));
        true
    }

    /// Check on the current run without blocking.
    ///
    /// A finished run is reported exactly once; later polls see `Idle`.
    pub fn poll(&mut self) -> RunState {
        let Some(handle) = self.task.as_mut() else {
            return RunState::Idle;
        };
        let Some(joined) = handle.now_or_never() else {
            return RunState::Running;
        };
        self.task = None;

        match joined {
            Ok(Ok(report)) => RunState::Completed(report),
            Ok(Err(e)) => RunState::Failed(e.to_string()),
            Err(e) => {
                let message = if e.is_panic() {
                    "Run task panicked".to_string()
                } else {
                    format!("Run task ended unexpectedly: {}", e)
                };
                self.log().error(message.clone());
                RunState::Failed(message)
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
