use tracing::debug;

use crate::config::ViewConfig;
use crate::error::{Result, ViewerError};

/// Screen-space rectangle the texture is blitted into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// User input understood by the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewInput {
    /// Back to 1:1.
    ResetZoom,
    FitHeight,
    FitWidth,
    /// Wheel notches; positive zooms in.
    Wheel(f32),
    DragStart,
    DragEnd,
    /// Relative pointer motion in screen pixels.
    DragMove { dx: i32, dy: i32 },
}

/// Zoom and pan state for one displayed image.
#[derive(Clone, Debug)]
pub struct ViewportController {
    zoom: f32,
    dest: Rect,
    image_width: u32,
    image_height: u32,
    display_width: u32,
    display_height: u32,
    dragging: bool,
    min_zoom: f32,
    wheel_step_divisor: f32,
}

impl ViewportController {
    /// Initial view: 1:1, or fit-to-height when the image is taller than the
    /// display; horizontally centred, top edge at the top of the screen.
    pub fn new(image: (u32, u32), display: (u32, u32), config: &ViewConfig) -> Result<Self> {
        let (image_width, image_height) = image;
        if image_width == 0 || image_height == 0 {
            return Err(ViewerError::InvalidDimensions {
                width: image_width,
                height: image_height,
            });
        }
        let (display_width, display_height) = display;
        if display_width == 0 || display_height == 0 {
            return Err(ViewerError::InvalidDimensions {
                width: display_width,
                height: display_height,
            });
        }

        let mut view = Self {
            zoom: 1.0,
            dest: Rect::default(),
            image_width,
            image_height,
            display_width,
            display_height,
            dragging: false,
            min_zoom: config.min_zoom,
            wheel_step_divisor: config.wheel_step_divisor,
        };

        if image_height > display_height {
            view.zoom = view.clamped(display_height as f32 / image_height as f32);
        }
        let (w, h) = view.scaled_size();
        view.dest = Rect {
            x: display_width as i32 / 2 - w / 2,
            y: 0,
            w,
            h,
        };
        Ok(view)
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn dest_rect(&self) -> Rect {
        self.dest
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    pub fn display_size(&self) -> (u32, u32) {
        (self.display_width, self.display_height)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Image size at the current zoom, rounded to whole pixels.
    pub fn scaled_size(&self) -> (i32, i32) {
        (
            (self.image_width as f32 * self.zoom).round() as i32,
            (self.image_height as f32 * self.zoom).round() as i32,
        )
    }

    /// Apply one input. Returns `true` if the destination rectangle changed.
    pub fn apply(&mut self, input: ViewInput) -> bool {
        let before = self.dest;
        match input {
            ViewInput::ResetZoom => self.set_zoom(1.0),
            ViewInput::FitHeight => {
                self.set_zoom(self.display_height as f32 / self.image_height as f32)
            }
            ViewInput::FitWidth => self.set_zoom(self.display_width as f32 / self.image_width as f32),
            ViewInput::Wheel(delta) => self.set_zoom(self.zoom + delta / self.wheel_step_divisor),
            ViewInput::DragStart => self.dragging = true,
            ViewInput::DragEnd => self.dragging = false,
            ViewInput::DragMove { dx, dy } => {
                if self.dragging {
                    self.pan(dx, dy);
                }
            }
        }
        self.dest != before
    }

    /// Track a resized display; the current zoom is kept.
    pub fn set_display_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width, height) == self.display_size() {
            return;
        }
        self.display_width = width;
        self.display_height = height;
        self.layout();
    }

    fn clamped(&self, zoom: f32) -> f32 {
        if zoom.is_finite() {
            zoom.max(self.min_zoom)
        } else {
            self.zoom
        }
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.zoom = self.clamped(zoom);
        self.layout();
        debug!(zoom = self.zoom, rect = ?self.dest, "Zoom changed");
    }

    /// Resize the rectangle for the current zoom. Always centred horizontally;
    /// centred vertically while it fits, pinned to the top once it is taller
    /// than the display.
    fn layout(&mut self) {
        let (w, h) = self.scaled_size();
        let dw = self.display_width as i32;
        let dh = self.display_height as i32;

        self.dest.x = dw / 2 - w / 2;
        self.dest.y = if h > dh { 0 } else { dh / 2 - h / 2 };
        self.dest.w = w;
        self.dest.h = h;
    }

    /// Move the image along the axes that overflow the display. Never exposes
    /// empty space: the near edge is clamped at 0 and a move that would pull
    /// the far edge inside the display is undone for that axis.
    fn pan(&mut self, dx: i32, dy: i32) {
        let (w, h) = self.scaled_size();
        let dw = self.display_width as i32;
        let dh = self.display_height as i32;

        if h > dh {
            self.dest.y = pan_axis(self.dest.y, dy, h, dh);
        }
        if w > dw {
            self.dest.x = pan_axis(self.dest.x, dx, w, dw);
        }
    }
}

fn pan_axis(pos: i32, delta: i32, size: i32, display: i32) -> i32 {
    let mut next = pos.saturating_add(delta);
    if next >= 0 {
        next = 0;
    }
    if next.saturating_add(size) <= display {
        next = pos;
    }
    next
}
