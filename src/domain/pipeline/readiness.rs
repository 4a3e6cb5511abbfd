use crate::infrastructure::processors::AudioProcessor;
use crate::infrastructure::repositories::{HealthStatus, TtsRepository};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessorReadiness {
    pub name: &'static str,
    pub available: bool,
}

/// Result of probing every external collaborator before a job starts
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessReport {
    pub backend: Result<HealthStatus, String>,
    pub processors: Vec<ProcessorReadiness>,
}

impl ReadinessReport {
    pub fn backend_ready(&self) -> bool {
        matches!(&self.backend, Ok(status) if status.is_healthy())
    }

    pub fn is_ready(&self) -> bool {
        self.backend_ready() && self.processors.iter().all(|p| p.available)
    }
}

/// Probe the backend and all processors concurrently. The probes share no
/// state and never run alongside a job.
pub async fn check_readiness(
    tts_repo: &dyn TtsRepository,
    processors: &[Arc<dyn AudioProcessor>],
) -> ReadinessReport {
    let processor_probes = join_all(processors.iter().map(|processor| async move {
        ProcessorReadiness {
            name: processor.name(),
            available: processor.is_available().await,
        }
    }));

    let (backend, processors) = tokio::join!(tts_repo.check_health(), processor_probes);
    let backend = backend.map_err(|e| e.to_string());

    let report = ReadinessReport {
        backend,
        processors,
    };

    match &report.backend {
        Ok(status) => tracing::info!(
            backend_status = %status.status,
            model_loaded = status.model_loaded,
            device = status.device.as_deref().unwrap_or("unknown"),
            "TTS backend health checked"
        ),
        Err(e) => tracing::warn!(error = %e, "TTS backend health check failed"),
    }
    for processor in &report.processors {
        if !processor.available {
            tracing::warn!(processor = processor.name, "Audio processor unavailable");
        }
    }

    report
}
