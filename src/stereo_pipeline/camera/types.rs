//! Camera parameter types

/// Rectified pinhole camera, parameterised like the projection matrix
/// `P = [fx 0 cx tx; 0 fy cy 0; 0 0 1 0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeCamera {
    /// Calibrated image width in pixels
    pub width: usize,
    /// Calibrated image height in pixels
    pub height: usize,
    /// Horizontal focal length in pixels
    pub fx: f64,
    /// Vertical focal length in pixels
    pub fy: f64,
    /// Principal point column
    pub cx: f64,
    /// Principal point row
    pub cy: f64,
    /// Horizontal translation term of the projection matrix (`-fx * baseline`
    /// for the right camera of a rectified pair, 0 for the left)
    pub tx: f64,
}

impl PinholeCamera {
    pub fn new(width: usize, height: usize, fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self {
            width,
            height,
            fx,
            fy,
            cx,
            cy,
            tx: 0.0,
        }
    }

    pub fn with_tx(mut self, tx: f64) -> Self {
        self.tx = tx;
        self
    }

    pub fn fx(&self) -> f64 {
        self.fx
    }

    pub fn fy(&self) -> f64 {
        self.fy
    }

    pub fn cx(&self) -> f64 {
        self.cx
    }

    pub fn cy(&self) -> f64 {
        self.cy
    }

    pub fn tx(&self) -> f64 {
        self.tx
    }
}
