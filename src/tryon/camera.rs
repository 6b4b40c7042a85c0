use crate::{
    assets::decode::PreparedImage,
    foundation::error::{DrapeError, DrapeResult},
};

/// A live video stream holding the device lock until stopped.
pub trait VideoStream {
    /// Current frame at the stream's natural size.
    fn frame(&mut self) -> DrapeResult<PreparedImage>;

    /// Release every track. Called at most once per stream.
    fn stop(&mut self);
}

/// Source of video streams (user-facing camera).
pub trait CameraDevice {
    type Stream: VideoStream;

    /// Ask for access and open a stream. Fails with [`DrapeError::Camera`] when denied.
    fn open(&mut self) -> DrapeResult<Self::Stream>;
}

/// Owns at most one active stream from `D`; the stream is stopped on `stop` or drop.
pub struct Camera<D: CameraDevice> {
    device: D,
    stream: Option<D::Stream>,
}

impl<D: CameraDevice> Camera<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            stream: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Open a stream unless one is already running. On failure the camera stays inactive.
    pub fn start(&mut self) -> DrapeResult<()> {
        if self.stream.is_some() {
            return Ok(());
        }
        let stream = self.device.open()?;
        self.stream = Some(stream);
        tracing::debug!("camera stream started");
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!("camera stream stopped");
        }
    }

    pub fn capture_frame(&mut self) -> DrapeResult<PreparedImage> {
        self.stream
            .as_mut()
            .ok_or_else(|| DrapeError::camera("camera is not active"))?
            .frame()
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: CameraDevice> std::fmt::Debug for Camera<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Camera")
            .field("active", &self.is_active())
            .finish()
    }
}

impl<D: CameraDevice> Drop for Camera<D> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Device that always shows the same still image, or refuses access.
#[derive(Clone, Debug)]
pub struct StillFrameDevice {
    frame: PreparedImage,
    allowed: bool,
    opened: u32,
    stopped: std::rc::Rc<std::cell::Cell<u32>>,
}

impl StillFrameDevice {
    pub fn new(frame: PreparedImage) -> Self {
        Self {
            frame,
            allowed: true,
            opened: 0,
            stopped: Default::default(),
        }
    }

    /// A device whose permission prompt is always declined.
    pub fn denied(frame: PreparedImage) -> Self {
        Self {
            allowed: false,
            ..Self::new(frame)
        }
    }

    pub fn opened(&self) -> u32 {
        self.opened
    }

    /// Streams stopped so far, including ones stopped after the camera was dropped.
    pub fn stopped_counter(&self) -> std::rc::Rc<std::cell::Cell<u32>> {
        std::rc::Rc::clone(&self.stopped)
    }
}

#[derive(Debug)]
pub struct StillFrameStream {
    frame: PreparedImage,
    stopped: std::rc::Rc<std::cell::Cell<u32>>,
}

impl VideoStream for StillFrameStream {
    fn frame(&mut self) -> DrapeResult<PreparedImage> {
        Ok(self.frame.clone())
    }

    fn stop(&mut self) {
        self.stopped.set(self.stopped.get() + 1);
    }
}

impl CameraDevice for StillFrameDevice {
    type Stream = StillFrameStream;

    fn open(&mut self) -> DrapeResult<Self::Stream> {
        if !self.allowed {
            return Err(DrapeError::camera("permission denied"));
        }
        self.opened += 1;
        Ok(StillFrameStream {
            frame: self.frame.clone(),
            stopped: std::rc::Rc::clone(&self.stopped),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tryon/camera.rs"]
mod tests;
