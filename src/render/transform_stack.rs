use crate::foundation::core::{Affine, Vec2};

/// Canvas-style current transform with save/restore.
///
/// Each operation post-multiplies, so later calls act in the already-transformed space:
/// `translate; rotate; scale` yields `T * R * S`.
#[derive(Clone, Debug)]
pub struct TransformStack {
    current: Affine,
    saved: Vec<Affine>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self {
            current: Affine::IDENTITY,
            saved: Vec::new(),
        }
    }
}

impl TransformStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Affine {
        self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Pop the last saved transform. Returns `false` (and changes nothing) when none is saved.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(a) => {
                self.current = a;
                true
            }
            None => false,
        }
    }

    pub fn translate(&mut self, v: Vec2) {
        self.current = self.current * Affine::translate(v);
    }

    pub fn rotate(&mut self, radians: f64) {
        self.current = self.current * Affine::rotate(radians);
    }

    pub fn scale(&mut self, s: f64) {
        self.current = self.current * Affine::scale(s);
    }
}
