// Transcode interactor - Orchestrates probing, planning and launching

use std::sync::Arc;

use crate::adapters::toml_config::TranscodeConfig;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::planner::{tokenize, ProfileCommandBuilder};
use crate::ports::*;

/// Interactor for the transcode use cases
///
/// Every error returned here happens before a process exists. Once a
/// handle is returned, failures only show up in the log and the sink.
pub struct TranscodeInteractor {
    probe_port: Arc<dyn ProbePort>,
    launch_port: Arc<dyn LaunchPort>,
    log_port: Arc<dyn LogPort>,
    config: Arc<TranscodeConfig>,
}

impl TranscodeInteractor {
    /// Create new transcode interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        launch_port: Arc<dyn LaunchPort>,
        log_port: Arc<dyn LogPort>,
        config: Arc<TranscodeConfig>,
    ) -> Self {
        Self {
            probe_port,
            launch_port,
            log_port,
            config,
        }
    }

    /// Build the encoder arguments for a profile without launching anything
    ///
    /// Only profiles that need stream metadata touch the probe.
    pub async fn plan(
        &self,
        profile: Profile,
        path: &str,
        window: &TimeWindow,
    ) -> Result<Vec<String>, DomainError> {
        let streams = if profile.needs_probe() {
            let streams = self.probe_port.probe_streams(path).await?;
            self.log_port
                .debug(&format!("Probed {} streams in {}", streams.len(), path))
                .await;
            streams
        } else {
            Vec::new()
        };

        Ok(ProfileCommandBuilder::new(&self.config).build(profile, path, window, &streams))
    }

    /// Start a transcode of `request` in the given profile
    pub async fn transcode(
        &self,
        profile: Profile,
        request: TranscodeRequest,
    ) -> Result<ProcessHandle, DomainError> {
        self.log_port
            .info(&format!("Starting {} transcode of {}", profile, request.path))
            .await;

        let argv = self.plan(profile, &request.path, &request.window).await?;
        self.launch_port.launch(argv, request.sink)
    }

    /// MPEG transport stream for DLNA renderers
    pub async fn mpegts(&self, request: TranscodeRequest) -> Result<ProcessHandle, DomainError> {
        self.transcode(Profile::MpegTs, request).await
    }

    /// Legacy WebM stream
    pub async fn webm(&self, request: TranscodeRequest) -> Result<ProcessHandle, DomainError> {
        self.transcode(Profile::WebM, request).await
    }

    /// Fragmented MP4 for cast devices
    pub async fn chromecast(&self, request: TranscodeRequest) -> Result<ProcessHandle, DomainError> {
        self.transcode(Profile::ChromecastMp4, request).await
    }

    /// Fragmented MP4 for browsers
    pub async fn web(&self, request: TranscodeRequest) -> Result<ProcessHandle, DomainError> {
        self.transcode(Profile::WebMp4, request).await
    }

    /// Run a free-form command for a dynamic stream
    ///
    /// The command is not probed and cannot seek, so `window` is ignored.
    pub async fn exec_adhoc(
        &self,
        command: &str,
        window: TimeWindow,
        sink: DiagnosticSink,
    ) -> Result<ProcessHandle, DomainError> {
        let argv = tokenize(command)?;
        self.log_port
            .debug(&format!(
                "Ad-hoc command ignores window start={} length={}",
                window.start, window.length
            ))
            .await;
        self.launch_port.launch(argv, sink)
    }
}
