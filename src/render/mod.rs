//! Layout, text rasterization and CPU compositing of layer stacks.

pub(crate) mod compositor;
pub(crate) mod cpu;
pub(crate) mod frame;
pub(crate) mod layout;
pub(crate) mod text;
pub(crate) mod transform_stack;
