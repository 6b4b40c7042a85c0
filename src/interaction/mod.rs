//! Pointer and button input for the preview: free drag, hover highlight and step controls.

pub(crate) mod controller;
pub(crate) mod drag;
pub(crate) mod highlight;
