//! Virtual try-on: a garment overlay over live camera frames, captured into a snapshot.

pub(crate) mod camera;
pub(crate) mod session;
