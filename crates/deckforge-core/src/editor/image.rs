use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Smallest width or height a frame can be resized to.
pub const MIN_FRAME_DIMENSION: f64 = 100.0;

/// Size a frame starts at before any resize.
pub const DEFAULT_FRAME_SIZE: FrameSize = FrameSize {
    width: 300.0,
    height: 210.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ResizeDrag {
    origin_x: f64,
    origin_y: f64,
    initial: FrameSize,
}

/// Preview and on-screen size of one image slot on a template.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFrame {
    preview: Option<String>,
    size: FrameSize,
    drag: Option<ResizeDrag>,
}

impl Default for ImageFrame {
    fn default() -> Self {
        Self {
            preview: None,
            size: DEFAULT_FRAME_SIZE,
            drag: None,
        }
    }
}

impl ImageFrame {
    /// Seed a frame from a record's image URL. Only URLs that look like a
    /// direct image link become a preview.
    pub fn seeded(url: Option<&str>) -> Self {
        let mut frame = Self::default();
        if let Some(url) = url {
            frame.set_preview_url(url);
        }
        frame
    }

    /// Replace the preview if `url` looks like a direct image link.
    /// Returns whether the preview changed.
    pub fn set_preview_url(&mut self, url: &str) -> bool {
        if is_valid_image_url(url) {
            self.preview = Some(url.to_string());
            true
        } else {
            false
        }
    }

    /// Preview a local file by inlining it as a `data:` URL.
    pub fn preview_file(&mut self, bytes: &[u8], mime: &str) -> &str {
        let url = format!("data:{mime};base64,{}", STANDARD.encode(bytes));
        self.preview.insert(url).as_str()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    pub fn is_resizing(&self) -> bool {
        self.drag.is_some()
    }

    pub fn mouse_down(&mut self, x: f64, y: f64) {
        self.drag = Some(ResizeDrag {
            origin_x: x,
            origin_y: y,
            initial: self.size,
        });
    }

    /// Track the pointer while resizing; ignored when no drag is active.
    pub fn mouse_move(&mut self, x: f64, y: f64) {
        if let Some(drag) = self.drag {
            self.size = FrameSize {
                width: (drag.initial.width + x - drag.origin_x).max(MIN_FRAME_DIMENSION),
                height: (drag.initial.height + y - drag.origin_y).max(MIN_FRAME_DIMENSION),
            };
        }
    }

    /// Ends the drag. Also used when the pointer leaves the template.
    pub fn mouse_up(&mut self) {
        self.drag = None;
    }
}

/// Whether a URL ends in one of the image extensions a frame previews.
pub fn is_valid_image_url(url: &str) -> bool {
    [".jpeg", ".jpg", ".gif", ".png"]
        .iter()
        .any(|ext| url.ends_with(ext))
}
