//! Sync scheduler
//!
//! Drives the sync engine on a fixed wall-clock interval using cron
//! expressions. Exposes explicit cancel/shutdown so non-browser hosts can
//! stop the polling loop cleanly.

use crate::config::{DEFAULT_SYNC_INTERVAL_SECS, MIN_SYNC_INTERVAL_SECS};
use crate::error::{AppError, Result};
use crate::services::sync::{SyncEngine, SyncOutcome};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

/// Sync polling frequency options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncFrequency {
    Seconds(u32),
    Minutes(u32),
    Hours(u32),
}

impl SyncFrequency {
    /// Convert frequency to cron expression.
    /// Second intervals must divide a minute evenly to express as cron.
    fn to_cron(self) -> String {
        match self {
            SyncFrequency::Seconds(s) => format!("*/{} * * * * *", s),
            SyncFrequency::Minutes(m) => {
                if m == 1 {
                    "0 * * * * *".to_string()
                } else {
                    format!("0 */{} * * * *", m)
                }
            }
            SyncFrequency::Hours(h) => {
                if h == 1 {
                    "0 0 * * * *".to_string()
                } else {
                    format!("0 0 */{} * * *", h)
                }
            }
        }
    }

    fn interval_secs(self) -> u64 {
        match self {
            SyncFrequency::Seconds(s) => s as u64,
            SyncFrequency::Minutes(m) => m as u64 * 60,
            SyncFrequency::Hours(h) => h as u64 * 3600,
        }
    }
}

impl Default for SyncFrequency {
    fn default() -> Self {
        SyncFrequency::Seconds(DEFAULT_SYNC_INTERVAL_SECS)
    }
}

impl FromStr for SyncFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Format: <number><unit>, e.g. "30s", "5m", "2h"
        let s = s.trim().to_lowercase();
        if s.is_empty() {
            return Err("Empty frequency string".to_string());
        }

        let unit = s.chars().last().unwrap();
        let number_part = &s[..s.len() - 1];

        let value: u32 = number_part
            .parse()
            .map_err(|_| format!("Invalid number in frequency: {}", s))?;

        if value == 0 {
            return Err("Frequency value must be greater than 0".to_string());
        }

        match unit {
            's' => {
                if 60 % value != 0 {
                    return Err(format!(
                        "Second interval {} must divide a minute evenly",
                        value
                    ));
                }
                Ok(SyncFrequency::Seconds(value))
            }
            'm' => Ok(SyncFrequency::Minutes(value)),
            'h' => Ok(SyncFrequency::Hours(value)),
            _ => Err(format!(
                "Invalid frequency unit '{}'. Use 's' (seconds), 'm' (minutes), or 'h' (hours)",
                unit
            )),
        }
    }
}

/// Scheduler service for periodic sync polling
pub struct SyncScheduler {
    scheduler: Arc<RwLock<JobScheduler>>,
    engine: Arc<SyncEngine>,
    current_job_id: Arc<RwLock<Option<Uuid>>>,
}

impl SyncScheduler {
    /// Create new sync scheduler
    pub async fn new(engine: Arc<SyncEngine>) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self {
            scheduler: Arc::new(RwLock::new(scheduler)),
            engine,
            current_job_id: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<()> {
        let scheduler = self.scheduler.read().await;
        scheduler
            .start()
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to start scheduler: {}", e)))?;
        tracing::info!("Sync scheduler started");
        Ok(())
    }

    /// Schedule periodic sync polling.
    ///
    /// A rejected frequency leaves any currently scheduled job running;
    /// the active schedule is only cancelled once the request is valid.
    pub async fn schedule_sync(&self, frequency: SyncFrequency, enabled: bool) -> Result<()> {
        if enabled && frequency.interval_secs() < MIN_SYNC_INTERVAL_SECS as u64 {
            return Err(AppError::Scheduler(format!(
                "Sync interval must be at least {}s",
                MIN_SYNC_INTERVAL_SECS
            )));
        }

        // Remove existing job if any
        self.cancel_sync().await?;

        if !enabled {
            tracing::info!("Periodic sync disabled");
            return Ok(());
        }

        let cron_expr = frequency.to_cron();
        let engine = Arc::clone(&self.engine);

        // Create sync job
        let job = Job::new_async(cron_expr.clone(), move |_uuid, _l| {
            let engine = Arc::clone(&engine);
            Box::pin(async move {
                tracing::debug!("Running scheduled sync poll");
                match engine.sync_now().await {
                    Ok(SyncOutcome::SkippedBusy) => {
                        tracing::debug!("Previous sync cycle still in flight");
                    }
                    Ok(SyncOutcome::UpToDate) => {
                        tracing::debug!("Collection already up to date");
                    }
                    Ok(SyncOutcome::Applied { replaced }) => {
                        tracing::info!("Scheduled sync applied {} server quotes", replaced);
                    }
                    Err(e) => {
                        // Non-fatal: the next tick is the retry.
                        tracing::warn!("Scheduled sync failed: {}", e);
                    }
                }
            })
        })
        .map_err(|e| AppError::Scheduler(format!("Failed to create sync job: {}", e)))?;

        let job_id = job.guid();

        // Add job to scheduler
        let scheduler = self.scheduler.write().await;
        scheduler
            .add(job)
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to schedule job: {}", e)))?;

        // Store job ID
        let mut current_job = self.current_job_id.write().await;
        *current_job = Some(job_id);

        tracing::info!("Periodic sync scheduled: {:?} ({})", frequency, cron_expr);
        Ok(())
    }

    /// Cancel scheduled sync polling
    pub async fn cancel_sync(&self) -> Result<()> {
        let mut current_job = self.current_job_id.write().await;

        if let Some(job_id) = *current_job {
            let scheduler = self.scheduler.write().await;
            scheduler
                .remove(&job_id)
                .await
                .map_err(|e| AppError::Scheduler(format!("Failed to remove job: {}", e)))?;

            *current_job = None;
            tracing::info!("Periodic sync cancelled");
        }

        Ok(())
    }

    /// Shutdown scheduler gracefully
    pub async fn shutdown(&self) -> Result<()> {
        let mut scheduler = self.scheduler.write().await;
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::Scheduler(format!("Failed to shutdown scheduler: {}", e)))?;
        tracing::info!("Sync scheduler shutdown");
        Ok(())
    }
}
