//! Voice recording.
//!
//! [`AudioInput`] is the seam to whatever produces audio bytes — a
//! microphone backend, a file, a test mock. [`VoiceRecorder`] drives one
//! input through a two-state idle/recording lifecycle: acquiring the input
//! can fail (permission denied, device missing) and leaves the recorder
//! idle; stopping drains the buffered chunks into an embeddable payload.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::Result;
use crate::media::EmbeddedMedia;

/// One buffered span of recorded audio bytes.
pub type AudioChunk = Vec<u8>;

/// A source of recorded audio.
#[async_trait::async_trait]
pub trait AudioInput: Send + std::fmt::Debug {
    /// The name of this input (for logging and error messages).
    fn name(&self) -> &'static str;

    /// Mime type of the audio this input produces.
    fn media_type(&self) -> &'static str {
        "audio/wav"
    }

    /// Acquire the input and begin sending chunks through the channel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DeviceAccess`] if the input cannot be
    /// acquired (e.g. permission denied or the backing file is missing).
    async fn start(&mut self, tx: mpsc::UnboundedSender<AudioChunk>) -> Result<()>;

    /// Release the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input fails to release cleanly.
    fn stop(&mut self) -> Result<()>;

    /// Whether the input is currently acquired.
    fn is_running(&self) -> bool;
}

/// Audio input that streams the contents of a local file.
///
/// Stands in for live capture on a machine without an audio stack; the
/// recorder and everything above it can't tell the difference.
#[derive(Debug)]
pub struct FileInput {
    path: std::path::PathBuf,
    running: bool,
}

impl FileInput {
    /// Chunk size for streaming file contents.
    const CHUNK_SIZE: usize = 32 * 1024;

    /// Create an input over the given audio file.
    #[must_use]
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            path: path.into(),
            running: false,
        }
    }
}

#[async_trait::async_trait]
impl AudioInput for FileInput {
    fn name(&self) -> &'static str {
        "audio file"
    }

    fn media_type(&self) -> &'static str {
        crate::media::mime_for_path(&self.path)
    }

    async fn start(&mut self, tx: mpsc::UnboundedSender<AudioChunk>) -> Result<()> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            crate::Error::device_access(
                self.name(),
                format!("cannot read {}: {e}", self.path.display()),
            )
        })?;

        for chunk in bytes.chunks(Self::CHUNK_SIZE) {
            // The receiver lives in the recorder; if it's gone there is
            // nobody left to hand the audio to.
            if tx.send(chunk.to_vec()).is_err() {
                break;
            }
        }

        self.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.running = false;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Recorder state.
#[derive(Debug)]
enum RecorderState {
    Idle,
    Recording {
        started: Instant,
        rx: mpsc::UnboundedReceiver<AudioChunk>,
    },
}

/// Two-state voice recorder over an [`AudioInput`].
///
/// Only one recording can be in progress at a time; starting while
/// recording and stopping while idle are both no-ops.
#[derive(Debug)]
pub struct VoiceRecorder {
    input: Box<dyn AudioInput>,
    state: RecorderState,
}

impl VoiceRecorder {
    /// Create an idle recorder over the given input.
    #[must_use]
    pub fn new(input: Box<dyn AudioInput>) -> Self {
        Self {
            input,
            state: RecorderState::Idle,
        }
    }

    /// Whether a recording is in progress.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    /// Acquire the input and begin recording.
    ///
    /// Starting while already recording is a no-op. On failure the error
    /// carries user-facing instructions and the recorder stays idle.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DeviceAccess`] if the input cannot be
    /// acquired.
    pub async fn start(&mut self) -> Result<()> {
        if self.is_recording() {
            debug!("recording already in progress");
            return Ok(());
        }

        let (tx, rx) = mpsc::unbounded_channel();
        self.input.start(tx).await?;
        self.state = RecorderState::Recording {
            started: Instant::now(),
            rx,
        };
        debug!(input = self.input.name(), "recording started");
        Ok(())
    }

    /// Stop recording and finalize the buffered audio.
    ///
    /// Returns the embeddable payload, or `None` when the recorder was
    /// already idle (idempotent stop).
    pub fn stop(&mut self) -> Option<EmbeddedMedia> {
        let state = std::mem::replace(&mut self.state, RecorderState::Idle);
        let RecorderState::Recording { mut rx, .. } = state else {
            return None;
        };

        if let Err(e) = self.input.stop() {
            warn!("input failed to release cleanly: {e}");
        }

        let mut bytes = Vec::new();
        while let Ok(chunk) = rx.try_recv() {
            bytes.extend_from_slice(&chunk);
        }

        debug!(len = bytes.len(), "recording finalized");
        Some(EmbeddedMedia::new(self.input.media_type(), bytes))
    }

    /// Time since recording started; zero when idle.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        match &self.state {
            RecorderState::Idle => Duration::ZERO,
            RecorderState::Recording { started, .. } => started.elapsed(),
        }
    }

    /// Elapsed time as `MM:SS`, the one-second-resolution display value.
    #[must_use]
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed())
    }
}

/// Format a duration as `MM:SS`, flooring to whole seconds.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Input that delivers scripted chunks on start.
    #[derive(Debug)]
    struct MockInput {
        chunks: Vec<AudioChunk>,
        running: bool,
    }

    impl MockInput {
        fn with_chunks(chunks: Vec<AudioChunk>) -> Self {
            Self {
                chunks,
                running: false,
            }
        }
    }

    #[async_trait::async_trait]
    impl AudioInput for MockInput {
        fn name(&self) -> &'static str {
            "mock input"
        }

        async fn start(&mut self, tx: mpsc::UnboundedSender<AudioChunk>) -> Result<()> {
            for chunk in self.chunks.drain(..) {
                let _ = tx.send(chunk);
            }
            self.running = true;
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.running = false;
            Ok(())
        }

        fn is_running(&self) -> bool {
            self.running
        }
    }

    /// Input that always fails to acquire.
    #[derive(Debug)]
    struct DeniedInput;

    #[async_trait::async_trait]
    impl AudioInput for DeniedInput {
        fn name(&self) -> &'static str {
            "microphone"
        }

        async fn start(&mut self, _tx: mpsc::UnboundedSender<AudioChunk>) -> Result<()> {
            Err(crate::Error::device_access(
                self.name(),
                "permission denied; check your input settings",
            ))
        }

        fn stop(&mut self) -> Result<()> {
            Ok(())
        }

        fn is_running(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn test_start_then_stop_collects_chunks() {
        let input = MockInput::with_chunks(vec![b"abc".to_vec(), b"def".to_vec()]);
        let mut recorder = VoiceRecorder::new(Box::new(input));

        recorder.start().await.unwrap();
        assert!(recorder.is_recording());

        let media = recorder.stop().expect("a recording was in progress");
        assert_eq!(media.bytes, b"abcdef");
        assert_eq!(media.mime, "audio/wav");
        assert!(!recorder.is_recording());
    }

    #[tokio::test]
    async fn test_stop_when_idle_is_noop() {
        let mut recorder = VoiceRecorder::new(Box::new(MockInput::with_chunks(vec![])));
        assert!(recorder.stop().is_none());
        assert!(recorder.stop().is_none());
    }

    #[tokio::test]
    async fn test_denied_input_surfaces_error_and_stays_idle() {
        let mut recorder = VoiceRecorder::new(Box::new(DeniedInput));

        let err = recorder.start().await.unwrap_err();
        assert!(err.is_device_access());
        assert!(!recorder.is_recording());
        assert!(recorder.stop().is_none());
    }

    #[tokio::test]
    async fn test_start_while_recording_is_noop() {
        let input = MockInput::with_chunks(vec![b"x".to_vec()]);
        let mut recorder = VoiceRecorder::new(Box::new(input));

        recorder.start().await.unwrap();
        recorder.start().await.unwrap();
        assert!(recorder.is_recording());

        let media = recorder.stop().unwrap();
        assert_eq!(media.bytes, b"x");
    }

    #[tokio::test]
    async fn test_elapsed_display_after_three_seconds() {
        let input = MockInput::with_chunks(vec![b"voice".to_vec()]);
        let mut recorder = VoiceRecorder::new(Box::new(input));
        recorder.start().await.unwrap();

        // Simulate three seconds of recording.
        if let RecorderState::Recording { started, .. } = &mut recorder.state {
            *started = Instant::now() - Duration::from_secs(3);
        }

        assert_eq!(recorder.elapsed_display(), "00:03");

        let media = recorder.stop().expect("recording finalizes");
        assert!(!media.bytes.is_empty());
    }

    #[test]
    fn test_elapsed_is_zero_when_idle() {
        let recorder = VoiceRecorder::new(Box::new(DeniedInput));
        assert_eq!(recorder.elapsed(), Duration::ZERO);
        assert_eq!(recorder.elapsed_display(), "00:00");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00");
        assert_eq!(format_elapsed(Duration::from_secs(3)), "00:03");
        assert_eq!(format_elapsed(Duration::from_millis(3900)), "00:03");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "01:05");
        assert_eq!(format_elapsed(Duration::from_secs(600)), "10:00");
    }

    #[tokio::test]
    async fn test_file_input_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("kinkeeper_recorder_test_{}.wav", std::process::id()));
        tokio::fs::write(&path, b"RIFF-ish audio bytes").await.unwrap();

        let mut recorder = VoiceRecorder::new(Box::new(FileInput::new(&path)));
        recorder.start().await.unwrap();
        let media = recorder.stop().unwrap();

        assert_eq!(media.mime, "audio/wav");
        assert_eq!(media.bytes, b"RIFF-ish audio bytes");

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_file_input_missing_file_is_device_error() {
        let mut recorder = VoiceRecorder::new(Box::new(FileInput::new(
            "/nonexistent/kinkeeper/voice.wav",
        )));
        let err = recorder.start().await.unwrap_err();
        assert!(err.is_device_access());
        assert!(!recorder.is_recording());
    }
}
