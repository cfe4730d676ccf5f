use anyhow::{Context, Result, anyhow};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use crate::translation::{BatchTranslator, RetryPolicy, TranslationService};

// @module: Application controller for subtitle processing

/// Language tag used in generated file names
pub const TARGET_LANGUAGE: &str = "zh";

/// What happened to a single input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Translation written to this path
    Translated(PathBuf),
    /// Output already existed and was left alone
    Skipped(PathBuf),
}

/// Counters for a folder run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FolderSummary {
    pub translated: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Inputs left out because an earlier input maps to the same output
    pub conflicts: usize,
}

/// Main application controller for subtitle translation
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Service shared by every file of the run
    service: TranslationService,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let service = TranslationService::new(&config.translation)
            .context("Failed to create translation service")?;
        Ok(Self::with_service(config, service))
    }

    /// Create a controller around an existing translation service
    pub fn with_service(config: Config, service: TranslationService) -> Self {
        Self { config, service }
    }

    /// Send one tiny request to the provider before any file is touched
    pub async fn check_connection(&self) -> Result<()> {
        info!("Checking connection to {} ({})", self.service.provider_name(), self.service.model());
        self.service
            .test_connection()
            .await
            .context("Connection check failed")
    }

    /// Translate one SRT file
    ///
    /// Without an explicit output path the result goes next to the input as
    /// `<stem>.zh.srt`. An existing output is kept unless `force_overwrite`.
    pub async fn run(&self, input_file: PathBuf, output_file: Option<PathBuf>, force_overwrite: bool) -> Result<FileOutcome> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(&input_file, output_file, &multi_progress, force_overwrite).await
    }

    async fn run_with_progress(
        &self,
        input_file: &Path,
        output_file: Option<PathBuf>,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<FileOutcome> {
        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_path = output_file.unwrap_or_else(|| Self::default_output_path(input_file));
        if FileManager::file_exists(&output_path) && !force_overwrite {
            warn!("Skipping {}, translation already exists (use -f to force overwrite)", input_file.display());
            return Ok(FileOutcome::Skipped(output_path));
        }

        let subtitles = SubtitleCollection::from_file(input_file)?;
        info!("Loaded {} subtitle entries from {}", subtitles.entries.len(), input_file.display());

        let start_time = Instant::now();
        let translated = self.translate_with_progress(&subtitles, multi_progress).await?;

        SubtitleCollection::with_entries(output_path.clone(), translated).write_to_srt(&output_path)?;

        info!("Success: {} ({})", output_path.display(), Self::format_duration(start_time.elapsed()));
        Ok(FileOutcome::Translated(output_path))
    }

    async fn translate_with_progress(
        &self,
        subtitles: &SubtitleCollection,
        multi_progress: &MultiProgress,
    ) -> Result<Vec<SubtitleEntry>> {
        let common = &self.config.translation.common;
        let total = subtitles.entries.len();

        let progress_bar = multi_progress.add(ProgressBar::new(total as u64));
        progress_bar.set_style(Self::bar_style("entries"));
        progress_bar.set_message("Translating");

        info!("zhsubs: {} - {}", self.service.provider_name(), self.service.model());

        let mut batch = BatchTranslator::new(self.service.clone(), common.chunk_size, RetryPolicy::from_common(common))
            .strict_alignment(common.strict_alignment);

        let pb = progress_bar.clone();
        let result = batch
            .translate_entries(&subtitles.entries, move |done, _total| pb.set_position(done as u64))
            .await;

        progress_bar.finish_and_clear();

        let translated = result.with_context(|| format!("Failed to translate {}", subtitles.source_file.display()))?;
        info!("Successfully translated all {} subtitle entries", translated.len());
        Ok(translated)
    }

    /// Run the workflow in folder mode, processing every SRT file below a directory
    ///
    /// Files that already are translations, or whose translation exists, are skipped.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let translated_suffix = format!(".{}.srt", TARGET_LANGUAGE);
        let subtitle_files: Vec<PathBuf> = FileManager::find_files(&input_dir, "srt")?
            .into_iter()
            .filter(|path| {
                !path.file_name()
                    .map(|name| name.to_string_lossy().to_lowercase().ends_with(&translated_suffix))
                    .unwrap_or(false)
            })
            .collect();

        if subtitle_files.is_empty() {
            return Err(anyhow!("No subtitle files found in directory: {:?}", input_dir));
        }

        let mut summary = FolderSummary::default();
        let subtitle_files = Self::drop_output_conflicts(subtitle_files, &mut summary);

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(subtitle_files.len() as u64));
        folder_pb.set_style(Self::bar_style("files"));
        folder_pb.set_message("Processing files");

        for subtitle_file in &subtitle_files {
            let file_name = subtitle_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match self.run_with_progress(subtitle_file, None, &multi_progress, force_overwrite).await {
                Ok(FileOutcome::Translated(_)) => summary.translated += 1,
                Ok(FileOutcome::Skipped(_)) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {:#}", file_name, e);
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!("Folder processing completed: {} translated, {} skipped, {} conflicts, {} errors ({})",
            summary.translated, summary.skipped, summary.conflicts, summary.failed,
            Self::format_duration(start_time.elapsed()));

        Ok(summary)
    }

    // Keep the first input for each output path; later ones would be skipped or overwrite it
    fn drop_output_conflicts(files: Vec<PathBuf>, summary: &mut FolderSummary) -> Vec<PathBuf> {
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut kept = Vec::with_capacity(files.len());

        for file in files {
            let output = Self::default_output_path(&file);
            match claimed.get(&output) {
                Some(first) => {
                    warn!("Not translating {}: {} already writes {}",
                        file.display(), first.display(), output.display());
                    summary.conflicts += 1;
                }
                None => {
                    claimed.insert(output, file.clone());
                    kept.push(file);
                }
            }
        }

        kept
    }

    /// Output path next to the input file, tagged with the target language
    pub fn default_output_path(input_file: &Path) -> PathBuf {
        let output_dir = input_file.parent().unwrap_or_else(|| Path::new(""));
        FileManager::generate_output_path(input_file, output_dir, TARGET_LANGUAGE)
    }

    fn bar_style(unit: &str) -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}} {{eta}}",
                unit
            ))
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░")
    }

    // Format duration in a human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
