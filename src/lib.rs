//! Drape: overlay layers for garment customization and virtual try-on.
//!
//! The crate holds the state and math behind a storefront's customization tool:
//!
//! - a [`LayerStore`] owning position, scale, rotation and content per overlay
//! - pointer input ([`DragController`], [`PreviewInteraction`]) and step controls
//! - a [`Compositor`] that lays layers out for preview and flattens them into a [`Snapshot`]
//! - background removal around an external [`Segmenter`]
//! - sessions tying these together ([`CustomizationSession`], [`TryOnSession`])
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod cart;
pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod customize;
pub(crate) mod interaction;
pub(crate) mod layer;
pub(crate) mod notice;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod segment;
pub(crate) mod tryon;

pub use crate::foundation::core::{Affine, Canvas, Point, Position, Rect, Size, Vec2};
pub use crate::foundation::error::{DrapeError, DrapeResult};

pub use crate::assets::color::HexColor;
pub use crate::assets::decode::{
    PreparedImage, decode_data_uri, decode_image, encode_png, load_image_file, png_data_uri,
};
pub use crate::cart::{CartItem, CartSelection, CartSink, LogCartSink, MemoryCart};
pub use crate::catalog::Catalog;
pub use crate::catalog::products::{Category, Product};
pub use crate::config::DrapeConfig;
pub use crate::customize::NeckStyle;
pub use crate::customize::session::CustomizationSession;
pub use crate::customize::upload::{UploadJob, UploadOutcome};
pub use crate::interaction::controller::{PreviewInteraction, StepAction};
pub use crate::interaction::drag::{
    DragController, DragState, PointerEvent, PointerUpListener, global_pointer_up,
    pointer_to_percent,
};
pub use crate::interaction::highlight::Highlight;
pub use crate::layer::content::{FONT_FAMILIES, LayerContent, TEXT_COLORS, TextContent};
pub use crate::layer::kind::{LayerBounds, LayerKind};
pub use crate::layer::store::{Layer, LayerSnapshot, LayerStore};
pub use crate::layer::transform::{Direction, LayerTransform};
pub use crate::notice::{Notice, NoticeLevel, Notices};
pub use crate::render::compositor::Compositor;
pub use crate::render::frame::Snapshot;
pub use crate::render::layout::{PlacedLayer, PreviewLayout};
pub use crate::render::text::TextRasterizer;
pub use crate::render::transform_stack::TransformStack;
pub use crate::scene::{LoadedScene, Scene, SceneLayer, SceneSize, scene_root};
pub use crate::segment::builtin::{BackdropKeySegmenter, PassthroughSegmenter};
pub use crate::segment::gate::{ProcessingGate, ProcessingTicket};
pub use crate::segment::mask::{LabeledMask, SegmentationMask, apply_mask, fit_within};
pub use crate::segment::{Segmenter, remove_background};
pub use crate::tryon::camera::{
    Camera, CameraDevice, StillFrameDevice, StillFrameStream, VideoStream,
};
pub use crate::tryon::session::TryOnSession;
