use std::{cell::RefCell, collections::BTreeSet, rc::Rc};

use crate::{
    foundation::error::{DrapeError, DrapeResult},
    layer::kind::LayerKind,
};

/// Per-layer "processing" flags for uploads.
///
/// Clones share the same flags. A flag is held by a [`ProcessingTicket`] and cleared when the
/// ticket drops, on success, error or early return alike.
#[derive(Clone, Debug, Default)]
pub struct ProcessingGate {
    pending: Rc<RefCell<BTreeSet<LayerKind>>>,
}

impl ProcessingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `kind`, or fail with [`DrapeError::Busy`] if it is already processing.
    pub fn try_acquire(&self, kind: LayerKind) -> DrapeResult<ProcessingTicket> {
        if !self.pending.borrow_mut().insert(kind) {
            return Err(DrapeError::busy(format!(
                "layer '{kind}' is already processing an upload"
            )));
        }
        tracing::debug!(layer = %kind, "processing started");
        Ok(ProcessingTicket {
            kind,
            pending: Rc::clone(&self.pending),
        })
    }

    pub fn is_processing(&self, kind: LayerKind) -> bool {
        self.pending.borrow().contains(&kind)
    }

    pub fn any_processing(&self) -> bool {
        !self.pending.borrow().is_empty()
    }
}

/// Held while a layer's upload is in flight.
#[derive(Debug)]
pub struct ProcessingTicket {
    kind: LayerKind,
    pending: Rc<RefCell<BTreeSet<LayerKind>>>,
}

impl ProcessingTicket {
    pub fn kind(&self) -> LayerKind {
        self.kind
    }
}

impl Drop for ProcessingTicket {
    fn drop(&mut self) {
        self.pending.borrow_mut().remove(&self.kind);
        tracing::debug!(layer = %self.kind, "processing finished");
    }
}
