use crate::{
    assets::decode::PreparedImage,
    cart::{CartSelection, CartSink},
    catalog::products::Product,
    config::DrapeConfig,
    foundation::error::{DrapeError, DrapeResult},
    layer::{
        content::LayerContent,
        kind::LayerKind,
        store::LayerStore,
        transform::{Direction, LayerTransform},
    },
    notice::Notices,
    render::{compositor::Compositor, frame::Snapshot},
    tryon::camera::{Camera, CameraDevice},
};

pub const MSG_CAMERA_STARTED: &str = "Camera started successfully";
pub const MSG_CAMERA_DENIED: &str = "Could not access camera. Please check permissions.";
pub const MSG_SCREENSHOT_TAKEN: &str = "Screenshot taken!";
pub const MSG_CAMERA_INACTIVE: &str = "Start the camera before taking a screenshot.";
pub const MSG_SCREENSHOT_FAILED: &str = "Failed to take screenshot. Please try again.";
pub const MSG_ADDED_TO_CART: &str = "Added to cart!";
pub const MSG_CART_FAILED: &str = "Could not add to cart. Please try again.";

/// Garment overlay over a camera feed.
///
/// The overlay is a single garment layer; rotation comes from a continuous slider.
#[derive(Debug)]
pub struct TryOnSession<D: CameraDevice> {
    product: Product,
    size: String,
    store: LayerStore,
    camera: Camera<D>,
    compositor: Compositor,
    notices: Notices,
    last_capture: Option<Snapshot>,
}

impl<D: CameraDevice> TryOnSession<D> {
    pub fn new(
        product: Product,
        garment: PreparedImage,
        device: D,
        config: &DrapeConfig,
    ) -> DrapeResult<Self> {
        Self::with_compositor(product, garment, device, Compositor::new(config), config)
    }

    pub fn with_compositor(
        product: Product,
        garment: PreparedImage,
        device: D,
        compositor: Compositor,
        config: &DrapeConfig,
    ) -> DrapeResult<Self> {
        if !product.is_virtual_try_on {
            return Err(DrapeError::validation(format!(
                "product '{}' has no virtual try-on",
                product.id
            )));
        }
        let mut store = LayerStore::try_on(config)?;
        store.set_content(LayerKind::Garment, LayerContent::Image(garment))?;
        Ok(Self {
            size: product.default_size().to_string(),
            product,
            store,
            camera: Camera::new(device),
            compositor,
            notices: Notices::default(),
            last_capture: None,
        })
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    pub fn notices(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn camera_active(&self) -> bool {
        self.camera.is_active()
    }

    pub fn last_capture(&self) -> Option<&Snapshot> {
        self.last_capture.as_ref()
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn select_size(&mut self, size: &str) -> DrapeResult<()> {
        if !self.product.has_size(size) {
            return Err(DrapeError::validation(format!(
                "size '{size}' is not offered for '{}'",
                self.product.id
            )));
        }
        self.size = size.to_string();
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(product = %self.product.id))]
    pub fn start_camera(&mut self) -> DrapeResult<()> {
        if self.camera.is_active() {
            return Ok(());
        }
        match self.camera.start() {
            Ok(()) => {
                self.notices.success(MSG_CAMERA_STARTED);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "camera unavailable");
                self.notices.error(MSG_CAMERA_DENIED);
                Err(e)
            }
        }
    }

    pub fn stop_camera(&mut self) {
        self.camera.stop();
    }

    pub fn move_overlay(&mut self, direction: Direction) -> DrapeResult<LayerTransform> {
        self.store.move_layer(LayerKind::Garment, direction)
    }

    pub fn adjust_scale(&mut self, increase: bool) -> DrapeResult<LayerTransform> {
        self.store.adjust_scale(LayerKind::Garment, increase)
    }

    pub fn set_rotation(&mut self, degrees: f64) -> DrapeResult<LayerTransform> {
        self.store.set_rotation(LayerKind::Garment, degrees)
    }

    /// Grab the current frame and flatten the garment over it.
    #[tracing::instrument(skip_all, fields(product = %self.product.id))]
    pub fn capture(&mut self) -> DrapeResult<&Snapshot> {
        let snapshot = match self.camera.capture_frame() {
            Ok(frame) => self.compositor.flatten(&frame, self.store.layers()),
            Err(e) => Err(e),
        };
        match snapshot {
            Ok(snapshot) => {
                self.notices.success(MSG_SCREENSHOT_TAKEN);
                Ok(self.last_capture.insert(snapshot))
            }
            Err(e) => {
                tracing::warn!(error = %e, "capture failed");
                self.notices.error(match e {
                    DrapeError::Camera(_) => MSG_CAMERA_INACTIVE,
                    _ => MSG_SCREENSHOT_FAILED,
                });
                Err(e)
            }
        }
    }

    pub fn add_to_cart(&mut self, sink: &mut dyn CartSink) -> DrapeResult<()> {
        let selection =
            CartSelection::new(&self.product, self.size.clone(), self.store.snapshot());
        if let Err(e) = sink.add_to_cart(selection) {
            tracing::warn!(error = %e, "cart rejected selection");
            self.notices.error(MSG_CART_FAILED);
            return Err(e);
        }
        self.notices.success(MSG_ADDED_TO_CART);
        Ok(())
    }
}
