use super::error::{BatchError, WordFailure};
use super::model::{
    ArchiveSummary, BatchPhase, BatchProgress, BatchReport, BatchRequest, BatchSnapshot,
    GenerationResult, LogEntry, FINALIZING_MARKER,
};
use super::preview::PreviewStore;
use super::word_list::parse_word_list;
use crate::domain::archive::{
    archive_folder_name, entry_file_name, ArchiveBuilder, ExportError, ExportedArchive,
};
use crate::domain::audio::{encode_wav, validate_audio, Validation};
use crate::domain::tts::{AudioOutput, Language, ProviderProfile, SpeechRequest, Voice};
use crate::infrastructure::repositories::{ArchiveRepository, TtsRepository};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Bounds for a per-request delay override
pub const MIN_REQUEST_DELAY: Duration = Duration::from_millis(100);
pub const MAX_REQUEST_DELAY: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Default)]
pub struct OrchestratorSettings {
    /// Used when a start request carries no credential of its own
    pub default_credential: Option<String>,
    /// Replaces the provider's default pause between calls
    pub delay_override: Option<Duration>,
}

/// Accepted run, produced by [`BatchOrchestrator::begin`]
#[derive(Debug)]
pub struct BatchRun {
    words: Vec<String>,
    language: Language,
    voice: Voice,
    credential: String,
    delay: Duration,
}

impl BatchRun {
    pub fn total(&self) -> usize {
        self.words.len()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Drives one batch at a time through `Idle -> Running -> Finalizing -> Idle`.
///
/// Words are processed strictly one after another with a pause before every
/// call except the first. State is only mutated here and published to
/// observers as [`BatchSnapshot`]s.
pub struct BatchOrchestrator {
    tts_repo: Arc<dyn TtsRepository>,
    archive_repo: Arc<dyn ArchiveRepository>,
    previews: Arc<PreviewStore>,
    settings: OrchestratorSettings,
    state: watch::Sender<BatchSnapshot>,
    archive: Mutex<Option<Arc<ExportedArchive>>>,
}

impl BatchOrchestrator {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        archive_repo: Arc<dyn ArchiveRepository>,
        previews: Arc<PreviewStore>,
        settings: OrchestratorSettings,
    ) -> Self {
        let (state, _) = watch::channel(BatchSnapshot::default());
        Self {
            tts_repo,
            archive_repo,
            previews,
            settings,
            state,
            archive: Mutex::new(None),
        }
    }

    pub fn profile(&self) -> ProviderProfile {
        self.tts_repo.profile()
    }

    pub fn has_default_credential(&self) -> bool {
        self.settings
            .default_credential
            .as_deref()
            .is_some_and(|c| !c.trim().is_empty())
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<BatchSnapshot> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> BatchSnapshot {
        self.state.borrow().clone()
    }

    pub fn previews(&self) -> &Arc<PreviewStore> {
        &self.previews
    }

    /// Archive of the last run whose export succeeded
    pub fn archive(&self) -> Option<Arc<ExportedArchive>> {
        self.archive.lock().clone()
    }

    /// Validate a start request and move from Idle to Running.
    ///
    /// On success all previews of the previous run are released, the log is
    /// cleared and progress is reset. On error nothing changes.
    pub fn begin(&self, request: BatchRequest) -> Result<BatchRun, BatchError> {
        let credential = self
            .resolve_credential(request.credential.as_deref())
            .ok_or(BatchError::MissingCredential)?;

        let words = parse_word_list(&request.words);
        if words.is_empty() {
            return Err(BatchError::EmptyWordList);
        }

        let delay = self.resolve_delay(request.delay);
        let total = words.len();
        let mut accepted = false;

        self.state.send_if_modified(|snapshot| {
            if snapshot.phase != BatchPhase::Idle {
                return false;
            }

            let released = self.previews.release_all();
            *self.archive.lock() = None;

            tracing::info!(
                word_count = total,
                language = %request.language,
                voice = %request.voice,
                delay_ms = delay.as_millis(),
                released_previews = released,
                "Batch accepted"
            );

            *snapshot = BatchSnapshot {
                phase: BatchPhase::Running,
                progress: BatchProgress {
                    is_running: true,
                    completed_count: 0,
                    total_count: total,
                    current_word: String::new(),
                },
                logs: vec![LogEntry::info(format!(
                    "Starting batch process for {} words in {}...",
                    total, request.language
                ))],
                previews: Vec::new(),
                archive: None,
                last_report: None,
            };
            accepted = true;
            true
        });

        if !accepted {
            return Err(BatchError::AlreadyRunning);
        }

        Ok(BatchRun {
            words,
            language: request.language,
            voice: request.voice,
            credential,
            delay,
        })
    }

    /// Process every word of an accepted run, export the archive and return to Idle
    pub async fn run(&self, run: BatchRun) -> BatchReport {
        let profile = self.tts_repo.profile();
        let folder = archive_folder_name(run.language, Utc::now().date_naive());
        let mut archive = ArchiveBuilder::new(folder);
        let mut report = BatchReport::default();

        for (index, word) in run.words.iter().enumerate() {
            self.update(|s| {
                s.progress.current_word = word.clone();
                s.logs
                    .push(LogEntry::info(format!("Generating audio for: \"{}\"", word)));
            });

            if index > 0 {
                tokio::time::sleep(run.delay).await;
            }

            match self.generate_word(word, &run, profile).await {
                GenerationResult::Succeeded {
                    audio_bytes,
                    container_format,
                } => {
                    let file_name = entry_file_name(word, container_format.extension());
                    let preview = self
                        .previews
                        .register(word, &file_name, audio_bytes.clone());
                    archive.add(file_name.clone(), audio_bytes);
                    report.successes += 1;

                    self.update(|s| {
                        s.previews.push(preview);
                        s.logs.push(LogEntry::success(format!("Success: {}", file_name)));
                        s.progress.completed_count += 1;
                    });
                }
                GenerationResult::Failed { reason } => {
                    tracing::warn!(word = %word, error = %reason, "Word generation failed");
                    report.failures += 1;

                    self.update(|s| {
                        s.logs
                            .push(LogEntry::error(format!("Failed \"{}\": {}", word, reason)));
                        s.progress.completed_count += 1;
                    });
                }
            }
        }

        self.update(|s| {
            s.phase = BatchPhase::Finalizing;
            s.progress.current_word = FINALIZING_MARKER.to_string();
            s.logs.push(LogEntry::info(format!(
                "Batch complete. Success: {}, Failures: {}. Zipping...",
                report.successes, report.failures
            )));
        });

        tracing::info!(
            successes = report.successes,
            failures = report.failures,
            "Batch words processed, exporting archive"
        );

        let file_name = archive.archive_file_name();
        let entry_count = archive.len();
        let archive_repo = self.archive_repo.clone();
        // Deflate runs on the blocking pool
        let exported = tokio::task::spawn_blocking(move || archive_repo.export(&archive))
            .await
            .unwrap_or_else(|e| Err(ExportError::Write(format!("export task failed: {}", e))));

        let export_log = match exported {
            Ok(bytes) => {
                let exported = ExportedArchive {
                    file_name,
                    bytes,
                    entry_count,
                };
                report.archive_file_name = Some(exported.file_name.clone());
                let summary = ArchiveSummary {
                    file_name: exported.file_name.clone(),
                    entry_count: exported.entry_count,
                    size_bytes: exported.bytes.len(),
                };
                *self.archive.lock() = Some(Arc::new(exported));
                (
                    Some(summary),
                    LogEntry::success("ZIP file downloaded successfully."),
                )
            }
            Err(e) => {
                tracing::error!(error = %e, "Archive export failed");
                report.export_error = Some(e.to_string());
                (None, LogEntry::error(format!("Failed to generate ZIP: {}", e)))
            }
        };

        let (summary, entry) = export_log;
        self.update(|s| {
            s.logs.push(entry);
            s.archive = summary;
            s.phase = BatchPhase::Idle;
            s.progress.is_running = false;
            s.progress.current_word.clear();
            s.last_report = Some(report.clone());
        });

        report
    }

    /// Run an accepted batch on its own task.
    ///
    /// The run is supervised: if it panics, the orchestrator goes back to Idle
    /// with an error log line so later batches are not locked out. The handle
    /// yields the report, or `None` when the run was aborted.
    pub fn spawn_run(self: &Arc<Self>, run: BatchRun) -> JoinHandle<Option<BatchReport>> {
        let orchestrator = Arc::clone(self);
        tokio::spawn(async move {
            let worker = Arc::clone(&orchestrator);
            match tokio::spawn(async move { worker.run(run).await }).await {
                Ok(report) => {
                    tracing::info!(
                        successes = report.successes,
                        failures = report.failures,
                        archive = ?report.archive_file_name,
                        "Batch finished"
                    );
                    Some(report)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Batch task aborted");
                    orchestrator.abort(&e.to_string());
                    None
                }
            }
        })
    }

    /// `begin` followed by `run`, for callers that wait for the whole batch
    pub async fn start(&self, request: BatchRequest) -> Result<BatchReport, BatchError> {
        let run = self.begin(request)?;
        Ok(self.run(run).await)
    }

    /// Release every preview and clear the log. Not allowed mid-run.
    pub fn clear(&self) -> Result<usize, BatchError> {
        let mut released = None;
        self.state.send_if_modified(|s| {
            if s.phase != BatchPhase::Idle {
                return false;
            }
            released = Some(self.previews.release_all());
            s.previews.clear();
            s.logs.clear();
            true
        });

        released.ok_or(BatchError::AlreadyRunning)
    }

    async fn generate_word(
        &self,
        word: &str,
        run: &BatchRun,
        profile: ProviderProfile,
    ) -> GenerationResult {
        let request = SpeechRequest {
            word: word.to_string(),
            language: run.language,
            voice: run.voice,
            credential: run.credential.clone(),
        };

        match self.produce_clip(&request, profile).await {
            Ok(audio_bytes) => GenerationResult::Succeeded {
                audio_bytes,
                container_format: profile.output.container(),
            },
            Err(reason) => GenerationResult::Failed { reason },
        }
    }

    async fn produce_clip(
        &self,
        request: &SpeechRequest,
        profile: ProviderProfile,
    ) -> Result<Vec<u8>, WordFailure> {
        let raw = self.tts_repo.generate(request).await?;
        if raw.is_empty() {
            return Err(WordFailure::EmptyAudio);
        }

        let clip = match profile.output {
            AudioOutput::RawPcm(format) => encode_wav(&raw, format),
            AudioOutput::Container(_) => raw,
        };

        if profile.validate_content {
            if let Validation::Invalid(failure) = validate_audio(&clip) {
                return Err(failure.into());
            }
        }

        Ok(clip)
    }

    fn resolve_credential(&self, requested: Option<&str>) -> Option<String> {
        requested
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .or_else(|| {
                self.settings
                    .default_credential
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
            })
            .map(str::to_string)
    }

    fn resolve_delay(&self, requested: Option<Duration>) -> Duration {
        match requested {
            Some(delay) => delay.clamp(MIN_REQUEST_DELAY, MAX_REQUEST_DELAY),
            None => self
                .settings
                .delay_override
                .unwrap_or_else(|| self.tts_repo.profile().default_delay),
        }
    }

    fn abort(&self, reason: &str) {
        self.update(|s| {
            let successes = s.previews.len();
            s.logs
                .push(LogEntry::error(format!("Batch aborted: {}", reason)));
            s.phase = BatchPhase::Idle;
            s.progress.is_running = false;
            s.progress.current_word.clear();
            s.archive = None;
            s.last_report = Some(BatchReport {
                successes,
                failures: s.progress.completed_count.saturating_sub(successes),
                archive_file_name: None,
                export_error: None,
            });
        });
    }

    fn update(&self, modify: impl FnOnce(&mut BatchSnapshot)) {
        self.state.send_modify(modify);
    }
}
