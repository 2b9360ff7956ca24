//! Résumé generation: layout, render and save, with an observable status.
//!
//! Status walks `idle → generating → success|error → idle`. The return to idle
//! happens `reset_delay` after completion unless a newer run has started.
//! While a run is in flight the trigger is disabled and further calls are refused.
//! A run is detached from its caller: dropping the `generate` future does not
//! stop it from reaching a terminal status.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info};

use crate::resume::layout::{layout_document, PageConfig};
use crate::resume::models::ResumeDocument;
use crate::resume::render::DocumentRenderer;
use crate::resume::sink::{DocumentSink, FileBlob};

pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Measurement, serialization or save failed. The message is kept verbatim.
    #[error("Document generation failed: {message}")]
    DocumentGenerationFailed { message: String },

    #[error("A document is already being generated")]
    InProgress,
}

impl BuildError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::DocumentGenerationFailed {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    Idle,
    Generating,
    Success,
    Error,
}

#[derive(Clone)]
pub struct ResumeBuilder {
    renderer: Arc<dyn DocumentRenderer>,
    sink: Arc<dyn DocumentSink>,
    page_config: PageConfig,
    reset_delay: Duration,
    status: Arc<watch::Sender<GenerationStatus>>,
    /// Incremented per run; a pending reset only applies to the run that scheduled it.
    runs: Arc<AtomicU64>,
}

impl ResumeBuilder {
    pub fn new(
        renderer: Arc<dyn DocumentRenderer>,
        sink: Arc<dyn DocumentSink>,
        page_config: PageConfig,
        reset_delay: Duration,
    ) -> Self {
        let (status, _) = watch::channel(GenerationStatus::Idle);
        Self {
            renderer,
            sink,
            page_config,
            reset_delay,
            status: Arc::new(status),
            runs: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn status(&self) -> GenerationStatus {
        *self.status.borrow()
    }

    #[allow(dead_code)]
    pub fn subscribe(&self) -> watch::Receiver<GenerationStatus> {
        self.status.subscribe()
    }

    /// The download trigger is disabled while a generation is in flight.
    pub fn is_trigger_enabled(&self) -> bool {
        self.status() != GenerationStatus::Generating
    }

    /// Lays out, renders and saves `doc`. Never retries; the caller re-triggers.
    pub async fn generate(&self, doc: &ResumeDocument) -> Result<FileBlob, BuildError> {
        let claimed = self.status.send_if_modified(|status| {
            if *status == GenerationStatus::Generating {
                false
            } else {
                *status = GenerationStatus::Generating;
                true
            }
        });
        if !claimed {
            return Err(BuildError::InProgress);
        }
        let run = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
        info!(run, name = %doc.name, "generating résumé");

        let this = self.clone();
        let doc = doc.clone();
        tokio::spawn(async move { this.complete(run, doc).await })
            .await
            .map_err(|e| BuildError::failed(format!("generation task failed: {e}")))?
    }

    /// Builds, publishes the terminal status and schedules the reset for `run`.
    async fn complete(&self, run: u64, doc: ResumeDocument) -> Result<FileBlob, BuildError> {
        let result = self.build(doc).await;

        let terminal = match &result {
            Ok(blob) => {
                info!(run, file = %blob.file_name, pages = blob.page_count, "résumé generated");
                GenerationStatus::Success
            }
            Err(e) => {
                error!(run, "Error generating résumé: {e}");
                GenerationStatus::Error
            }
        };
        self.status.send_replace(terminal);
        self.schedule_reset(run, terminal);

        result
    }

    async fn build(&self, doc: ResumeDocument) -> Result<FileBlob, BuildError> {
        let renderer = Arc::clone(&self.renderer);
        let sink = Arc::clone(&self.sink);
        let config = self.page_config.clone();

        // Layout and serialization are CPU-bound, the save is blocking file IO.
        tokio::task::spawn_blocking(move || {
            let laid_out = layout_document(&doc, &config);
            let bytes = renderer.render(&laid_out)?;
            let blob = FileBlob {
                file_name: doc.file_name(),
                bytes: Bytes::from(bytes),
                page_count: laid_out.page_count(),
            };
            sink.save(&blob)?;
            Ok(blob)
        })
        .await
        .map_err(|e| BuildError::failed(format!("generation task failed: {e}")))?
    }

    fn schedule_reset(&self, run: u64, terminal: GenerationStatus) {
        let status = Arc::clone(&self.status);
        let runs = Arc::clone(&self.runs);
        let delay = self.reset_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if runs.load(Ordering::SeqCst) != run {
                return;
            }
            status.send_if_modified(|current| {
                if *current == terminal {
                    *current = GenerationStatus::Idle;
                    true
                } else {
                    false
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::font_metrics::FontFamily;
    use crate::resume::layout::{default_page_config, LaidOutDocument};
    use crate::resume::render::PdfRenderer;
    use crate::resume::sink::DirectorySink;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct FailingRenderer;

    impl DocumentRenderer for FailingRenderer {
        fn render(&self, _doc: &LaidOutDocument) -> Result<Vec<u8>, BuildError> {
            Err(BuildError::failed("font table corrupted"))
        }
    }

    /// Blocks inside `render` until the test opens the gate.
    struct GatedRenderer {
        gate: Mutex<std::sync::mpsc::Receiver<()>>,
    }

    impl DocumentRenderer for GatedRenderer {
        fn render(&self, doc: &LaidOutDocument) -> Result<Vec<u8>, BuildError> {
            self.gate.lock().unwrap().recv().unwrap();
            PdfRenderer::new().render(doc)
        }
    }

    struct FailingSink;

    impl DocumentSink for FailingSink {
        fn save(&self, _blob: &FileBlob) -> Result<PathBuf, BuildError> {
            Err(BuildError::failed("disk full"))
        }
    }

    fn builder_with(
        renderer: Arc<dyn DocumentRenderer>,
        sink: Arc<dyn DocumentSink>,
    ) -> ResumeBuilder {
        ResumeBuilder::new(
            renderer,
            sink,
            default_page_config(FontFamily::Helvetica),
            DEFAULT_RESET_DELAY,
        )
    }

    fn files_in(dir: &std::path::Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .map(|entries| {
                entries
                    .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_walks_status_and_returns_to_idle() {
        let dir = tempfile::tempdir().unwrap();
        let (open, gate) = std::sync::mpsc::channel();
        let builder = Arc::new(builder_with(
            Arc::new(GatedRenderer {
                gate: Mutex::new(gate),
            }),
            Arc::new(DirectorySink::new(dir.path())),
        ));
        assert_eq!(builder.status(), GenerationStatus::Idle);

        let mut rx = builder.subscribe();
        let task = {
            let builder = Arc::clone(&builder);
            tokio::spawn(async move { builder.generate(&ResumeDocument::sample()).await })
        };

        rx.wait_for(|s| *s == GenerationStatus::Generating)
            .await
            .unwrap();
        assert!(!builder.is_trigger_enabled());
        open.send(()).unwrap();

        let blob = task.await.unwrap().unwrap();
        assert_eq!(blob.file_name, "Fahad-Khan-Resume.pdf");
        assert_eq!(blob.page_count, 1);
        assert!(blob.bytes.starts_with(b"%PDF"));
        assert_eq!(builder.status(), GenerationStatus::Success);
        assert_eq!(files_in(dir.path()), vec!["Fahad-Khan-Resume.pdf".to_string()]);

        tokio::time::sleep(DEFAULT_RESET_DELAY + Duration::from_millis(1)).await;
        assert_eq!(builder.status(), GenerationStatus::Idle);
        assert!(builder.is_trigger_enabled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_trigger_refused_while_generating() {
        let dir = tempfile::tempdir().unwrap();
        let (open, gate) = std::sync::mpsc::channel();
        let builder = Arc::new(builder_with(
            Arc::new(GatedRenderer {
                gate: Mutex::new(gate),
            }),
            Arc::new(DirectorySink::new(dir.path())),
        ));

        let mut rx = builder.subscribe();
        let task = {
            let builder = Arc::clone(&builder);
            tokio::spawn(async move { builder.generate(&ResumeDocument::sample()).await })
        };
        rx.wait_for(|s| *s == GenerationStatus::Generating)
            .await
            .unwrap();

        let second = builder.generate(&ResumeDocument::sample()).await;
        assert_eq!(second.unwrap_err(), BuildError::InProgress);
        assert_eq!(builder.status(), GenerationStatus::Generating);

        open.send(()).unwrap();
        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_caller_still_finishes_and_resets() {
        let dir = tempfile::tempdir().unwrap();
        let (open, gate) = std::sync::mpsc::channel();
        let builder = Arc::new(builder_with(
            Arc::new(GatedRenderer {
                gate: Mutex::new(gate),
            }),
            Arc::new(DirectorySink::new(dir.path())),
        ));

        let mut rx = builder.subscribe();
        let caller = {
            let builder = Arc::clone(&builder);
            tokio::spawn(async move { builder.generate(&ResumeDocument::sample()).await })
        };
        rx.wait_for(|s| *s == GenerationStatus::Generating)
            .await
            .unwrap();

        // The client goes away mid-generation.
        caller.abort();
        assert!(caller.await.unwrap_err().is_cancelled());
        open.send(()).unwrap();

        rx.wait_for(|s| *s == GenerationStatus::Success)
            .await
            .unwrap();
        tokio::time::sleep(DEFAULT_RESET_DELAY + Duration::from_millis(1)).await;
        assert_eq!(builder.status(), GenerationStatus::Idle);
        assert!(builder.is_trigger_enabled());

        open.send(()).unwrap();
        let blob = builder.generate(&ResumeDocument::sample()).await.unwrap();
        assert_eq!(blob.file_name, "Fahad-Khan-Resume.pdf");
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_failure_reports_error_then_idle() {
        let dir = tempfile::tempdir().unwrap();
        let builder = builder_with(
            Arc::new(FailingRenderer),
            Arc::new(DirectorySink::new(dir.path())),
        );

        let err = builder
            .generate(&ResumeDocument::sample())
            .await
            .unwrap_err();

        assert_eq!(err, BuildError::failed("font table corrupted"));
        assert_eq!(builder.status(), GenerationStatus::Error);
        assert!(files_in(dir.path()).is_empty(), "no partial file");

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert_eq!(builder.status(), GenerationStatus::Error);
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(builder.status(), GenerationStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_failure_keeps_message() {
        let builder = builder_with(Arc::new(PdfRenderer::new()), Arc::new(FailingSink));

        let err = builder
            .generate(&ResumeDocument::sample())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Document generation failed: disk full");
        assert_eq!(builder.status(), GenerationStatus::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_reset_does_not_clobber_new_run() {
        let dir = tempfile::tempdir().unwrap();
        let builder = builder_with(
            Arc::new(PdfRenderer::new()),
            Arc::new(DirectorySink::new(dir.path())),
        );

        builder.generate(&ResumeDocument::sample()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2000)).await;
        builder.generate(&ResumeDocument::sample()).await.unwrap();

        // The first run's reset fires at 3000ms and must not touch the second run.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(builder.status(), GenerationStatus::Success);

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(builder.status(), GenerationStatus::Idle);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&GenerationStatus::Generating).unwrap(),
            "\"generating\""
        );
    }
}
