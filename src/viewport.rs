// Screen <-> canvas <-> grid conversions.
use crate::config::ClientConfig;
use crate::model::{Cell, GridSize};

/// On-screen box of the canvas element (`getBoundingClientRect`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&web_sys::DomRect> for CanvasRect {
    fn from(rect: &web_sys::DomRect) -> Self {
        Self {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

/// Grid cell under a client-space point, or `None` outside the grid.
pub fn cell_at(cfg: &ClientConfig, rect: CanvasRect, client_x: f64, client_y: f64) -> Option<Cell> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let scale_x = cfg.canvas_width as f64 / rect.width;
    let scale_y = cfg.canvas_height as f64 / rect.height;
    let cell = cfg.cell_size as f64;
    let x = (((client_x - rect.left) * scale_x) / cell).floor();
    let y = (((client_y - rect.top) * scale_y) / cell).floor();
    let grid: GridSize = cfg.grid();
    let cell = Cell::new(x as i32, y as i32);
    grid.contains(cell).then_some(cell)
}

/// Largest box with the given aspect ratio that fits the container.
pub fn fit_within(container_width: f64, container_height: f64, aspect_ratio: f64) -> (f64, f64) {
    let mut width = container_width;
    let mut height = width / aspect_ratio;
    if height > container_height {
        height = container_height;
        width = height * aspect_ratio;
    }
    (width, height)
}
