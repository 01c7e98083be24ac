use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use serde_json::Value;
use shared_audit::{AuditLevel, AuditLogger, AuditRecord};
use uuid::Uuid;

/// Builder configuring telemetry for the analysis pipeline.
#[derive(Debug)]
pub struct AnalysisTelemetryBuilder {
    component: String,
    audit_path: Option<PathBuf>,
    correlation: Option<Uuid>,
}

impl AnalysisTelemetryBuilder {
    /// Creates a new builder for the given component name.
    #[must_use]
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            audit_path: None,
            correlation: None,
        }
    }

    /// Sets the JSON-lines audit log path.
    #[must_use]
    pub fn audit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.audit_path = Some(path.into());
        self
    }

    /// Ties every record to one correlation id.
    #[must_use]
    pub fn correlation(mut self, correlation: Uuid) -> Self {
        self.correlation = Some(correlation);
        self
    }

    /// Finalizes the builder.
    pub fn build(self) -> Result<AnalysisTelemetry> {
        let logger = match self.audit_path {
            Some(path) => Some(AuditLogger::open(path)?),
            None => None,
        };
        Ok(AnalysisTelemetry {
            inner: Arc::new(TelemetryInner {
                component: self.component,
                logger,
                correlation: self.correlation,
            }),
        })
    }
}

/// Cheaply-cloneable telemetry handle. Logging is best-effort: the
/// pipeline never fails because a record could not be written.
#[derive(Debug, Clone)]
pub struct AnalysisTelemetry {
    inner: Arc<TelemetryInner>,
}

#[derive(Debug)]
struct TelemetryInner {
    component: String,
    logger: Option<AuditLogger>,
    correlation: Option<Uuid>,
}

impl AnalysisTelemetry {
    /// Returns a builder for this handle.
    #[must_use]
    pub fn builder(component: impl Into<String>) -> AnalysisTelemetryBuilder {
        AnalysisTelemetryBuilder::new(component)
    }

    /// Writes a structured record when a logger is configured.
    pub fn log(&self, level: AuditLevel, action: &str, details: Value) -> Result<()> {
        if let Some(logger) = &self.inner.logger {
            let mut record = AuditRecord::new(self.inner.component.as_str(), level, action)
                .with_details(details);
            record.correlation = self.inner.correlation;
            logger.write(&record)?;
        }
        Ok(())
    }
}
