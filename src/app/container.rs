use std::sync::Arc;

use crate::adapters::toml_config::TranscodeConfig;
use crate::adapters::{FfprobeAdapter, ProcessLauncher, TracingLogAdapter};
use crate::app::transcode_interactor::TranscodeInteractor;
use crate::ports::{LaunchPort, LogPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn transcode_interactor(&self) -> Arc<TranscodeInteractor>;
}

pub struct DefaultAppContainer {
    transcode_interactor: Arc<TranscodeInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: TranscodeConfig) -> Self {
        let config = Arc::new(config);
        let log_port = Arc::new(TracingLogAdapter::new(config.log_level()));
        let probe_port = Arc::new(FfprobeAdapter::new(config.encoders.probe.clone()));
        let launch_port = Arc::new(ProcessLauncher::new(
            Arc::clone(&log_port) as Arc<dyn LogPort>
        ));

        let transcode_interactor = Arc::new(TranscodeInteractor::new(
            probe_port as Arc<dyn ProbePort>,
            launch_port as Arc<dyn LaunchPort>,
            log_port as Arc<dyn LogPort>,
            config,
        ));

        Self {
            transcode_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn transcode_interactor(&self) -> Arc<TranscodeInteractor> {
        Arc::clone(&self.transcode_interactor)
    }
}
