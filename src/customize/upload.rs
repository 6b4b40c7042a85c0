use crate::{
    assets::decode::{PreparedImage, decode_rgba},
    config::DrapeConfig,
    foundation::error::{DrapeError, DrapeResult},
    layer::kind::LayerKind,
    segment::{Segmenter, gate::ProcessingTicket, remove_background},
};

pub const MSG_BACKGROUND_REMOVED: &str = "Background removed successfully!";
pub const MSG_DECODE_FAILED: &str = "Failed to read the image. Please upload a valid image file.";
pub const MSG_PROCESSING_FAILED: &str =
    "Failed to process the image. Please try again with a different photo.";
pub const MSG_STILL_PROCESSING: &str = "Please wait for the current image to finish processing.";

/// An accepted upload holding its layer's processing flag.
///
/// Running the job consumes it, so the flag is released whichever way it ends.
#[derive(Debug)]
pub struct UploadJob {
    ticket: ProcessingTicket,
    config: DrapeConfig,
}

/// Result of one upload attempt, to be handed back to the session.
#[derive(Debug)]
pub struct UploadOutcome {
    pub kind: LayerKind,
    pub result: DrapeResult<PreparedImage>,
}

impl UploadJob {
    pub(crate) fn new(ticket: ProcessingTicket, config: DrapeConfig) -> Self {
        Self { ticket, config }
    }

    pub fn kind(&self) -> LayerKind {
        self.ticket.kind()
    }

    /// Decode `bytes` and cut out the background. Single attempt, no retry.
    #[tracing::instrument(skip_all, fields(layer = %self.kind(), bytes = bytes.len()))]
    pub async fn run(self, bytes: &[u8], segmenter: &dyn Segmenter) -> UploadOutcome {
        let kind = self.kind();
        let result = match decode_rgba(bytes) {
            Ok(image) => remove_background(segmenter, image, &self.config).await,
            Err(e) => Err(e),
        };
        drop(self.ticket);
        UploadOutcome { kind, result }
    }
}

/// Message shown for a failed upload.
pub fn failure_message(err: &DrapeError) -> &'static str {
    match err {
        DrapeError::Decode(_) => MSG_DECODE_FAILED,
        DrapeError::Busy(_) => MSG_STILL_PROCESSING,
        _ => MSG_PROCESSING_FAILED,
    }
}
