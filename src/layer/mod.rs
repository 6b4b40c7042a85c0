//! Overlay layers: kinds and their bounds, transforms, content, and the store that owns them.

pub(crate) mod content;
pub(crate) mod kind;
pub(crate) mod store;
pub(crate) mod transform;
