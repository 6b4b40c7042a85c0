use crate::{
    assets::decode::PreparedImage,
    cart::{CartSelection, CartSink},
    catalog::products::Product,
    config::DrapeConfig,
    customize::{
        NeckStyle,
        upload::{MSG_BACKGROUND_REMOVED, UploadJob, UploadOutcome, failure_message},
    },
    foundation::{
        core::Rect,
        error::{DrapeError, DrapeResult},
    },
    interaction::{
        controller::{PreviewInteraction, StepAction},
        drag::PointerEvent,
    },
    layer::{
        content::LayerContent,
        kind::LayerKind,
        store::LayerStore,
        transform::{Direction, LayerTransform},
    },
    notice::Notices,
    render::{compositor::Compositor, frame::Snapshot},
    segment::{Segmenter, gate::ProcessingGate},
};

pub const MSG_ADDED_TO_CART: &str = "Added to cart!";
pub const MSG_CART_FAILED: &str = "Could not add to cart. Please try again.";
pub const MSG_UPLOAD_REJECTED: &str = "This layer does not accept image uploads.";

/// State of one customization tool: layers, preview input, uploads and selections.
///
/// Layer transforms are initialized when the session is created, before any content exists.
#[derive(Debug)]
pub struct CustomizationSession {
    config: DrapeConfig,
    product: Product,
    size: String,
    neck_style: NeckStyle,
    store: LayerStore,
    interaction: PreviewInteraction,
    gate: ProcessingGate,
    notices: Notices,
    compositor: Compositor,
}

impl CustomizationSession {
    /// `container` is the preview area in client coordinates.
    pub fn new(product: Product, config: DrapeConfig, container: Rect) -> DrapeResult<Self> {
        Self::with_compositor(product, Compositor::new(&config), config, container)
    }

    pub fn with_compositor(
        product: Product,
        compositor: Compositor,
        config: DrapeConfig,
        container: Rect,
    ) -> DrapeResult<Self> {
        if !product.is_customizable {
            return Err(DrapeError::validation(format!(
                "product '{}' cannot be customized",
                product.id
            )));
        }
        let store = LayerStore::customization(&config)?;
        Ok(Self {
            size: product.default_size().to_string(),
            neck_style: NeckStyle::default(),
            product,
            store,
            interaction: PreviewInteraction::new(container),
            gate: ProcessingGate::new(),
            notices: Notices::default(),
            compositor,
            config,
        })
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn neck_style(&self) -> NeckStyle {
        self.neck_style
    }

    pub fn notices(&mut self) -> &mut Notices {
        &mut self.notices
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

    pub fn set_neck_style(&mut self, neck_style: NeckStyle) {
        self.neck_style = neck_style;
    }

    // Step controls.

    pub fn step(&mut self, kind: LayerKind, action: StepAction) -> DrapeResult<LayerTransform> {
        self.interaction.step(&mut self.store, kind, action)
    }

    pub fn move_layer(
        &mut self,
        kind: LayerKind,
        direction: Direction,
    ) -> DrapeResult<LayerTransform> {
        self.step(kind, StepAction::Move { direction })
    }

    pub fn adjust_scale(&mut self, kind: LayerKind, increase: bool) -> DrapeResult<LayerTransform> {
        self.step(kind, StepAction::Scale { increase })
    }

    pub fn rotate(&mut self, kind: LayerKind, clockwise: bool) -> DrapeResult<LayerTransform> {
        self.step(kind, StepAction::Rotate { clockwise })
    }

    pub fn reset(&mut self, kind: LayerKind) -> DrapeResult<()> {
        self.store.reset(kind)
    }

    // Text layer.

    pub fn set_text(&mut self, text: impl Into<String>) -> DrapeResult<()> {
        self.store.set_text(text)
    }

    pub fn set_font_family(&mut self, family: &str) -> DrapeResult<()> {
        self.store.set_font_family(family)
    }

    pub fn set_color(&mut self, color: &str) -> DrapeResult<()> {
        self.store.set_color(color)
    }

    // Preview pointer input.

    pub fn set_container(&mut self, container: Rect) {
        self.interaction.set_container(container);
    }

    pub fn pointer_down(&mut self, event: &mut PointerEvent) -> DrapeResult<Option<LayerKind>> {
        self.interaction.pointer_down(&mut self.store, event)
    }

    pub fn pointer_move(&mut self, event: &PointerEvent) -> DrapeResult<Option<LayerTransform>> {
        self.interaction.pointer_move(&mut self.store, event)
    }

    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up(&mut self.store);
    }

    pub fn highlighted(&self) -> Option<LayerKind> {
        self.interaction.highlighted(&self.store)
    }

    // Uploads.

    pub fn is_processing(&self, kind: LayerKind) -> bool {
        self.gate.is_processing(kind)
    }

    /// Accept an upload for an image layer. Fails while that layer is still processing.
    pub fn begin_upload(&mut self, kind: LayerKind) -> DrapeResult<UploadJob> {
        let accepted = self.store.layer(kind).and_then(|_| {
            if kind.is_text() {
                Err(DrapeError::validation("text layers take no uploads"))
            } else {
                self.gate.try_acquire(kind)
            }
        });
        match accepted {
            Ok(ticket) => Ok(UploadJob::new(ticket, self.config.clone())),
            Err(e) => {
                match e {
                    DrapeError::Busy(_) => self.notices.error(failure_message(&e)),
                    _ => self.notices.error(MSG_UPLOAD_REJECTED),
                }
                Err(e)
            }
        }
    }

    /// Apply a finished upload. On failure the layer keeps its previous content.
    pub fn finish_upload(&mut self, outcome: UploadOutcome) -> DrapeResult<()> {
        match outcome.result {
            Ok(image) => {
                self.store
                    .set_content(outcome.kind, LayerContent::Image(image))?;
                self.notices.success(MSG_BACKGROUND_REMOVED);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(layer = %outcome.kind, error = %e, "upload failed");
                self.notices.error(failure_message(&e));
                Err(e)
            }
        }
    }

    /// Decode, segment and apply in one go.
    pub async fn upload(
        &mut self,
        kind: LayerKind,
        bytes: &[u8],
        segmenter: &dyn Segmenter,
    ) -> DrapeResult<()> {
        let job = self.begin_upload(kind)?;
        let outcome = job.run(bytes, segmenter).await;
        self.finish_upload(outcome)
    }

    // Output.

    /// Snapshot of the current selection. Rejected while an upload is in flight.
    pub fn selection(&self) -> DrapeResult<CartSelection> {
        if self.gate.any_processing() {
            return Err(DrapeError::busy("an upload is still processing"));
        }
        Ok(
            CartSelection::new(&self.product, self.size.clone(), self.store.snapshot())
                .with_neck_style(self.neck_style),
        )
    }

    pub fn add_to_cart(&mut self, sink: &mut dyn CartSink) -> DrapeResult<()> {
        let selection = match self.selection() {
            Ok(s) => s,
            Err(e) => {
                self.notices.error(failure_message(&e));
                return Err(e);
            }
        };
        if let Err(e) = sink.add_to_cart(selection) {
            tracing::warn!(error = %e, "cart rejected selection");
            self.notices.error(MSG_CART_FAILED);
            return Err(e);
        }
        self.notices.success(MSG_ADDED_TO_CART);
        Ok(())
    }

    /// Flatten the layers over `base` at its natural size.
    pub fn flatten(&self, base: &PreparedImage) -> DrapeResult<Snapshot> {
        self.compositor.flatten(base, self.store.layers())
    }

    /// Rasterize the on-screen preview at the container's size.
    pub fn render_preview(&self, base: &PreparedImage) -> DrapeResult<Snapshot> {
        self.compositor
            .render_preview(base, &self.store, self.interaction.container().size())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/customize/session.rs"]
mod tests;
