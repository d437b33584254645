use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

mod annotation;
mod geometry;
mod gesture;
mod preload;
mod transform;
mod view;

pub use annotation::Annotation;
pub use geometry::{map_client_point, ClientRect};
pub use gesture::{text_annotation, Annotator, Effect, Gesture, InputGate, Tool, DOT_RADIUS};
pub use preload::{Warmup, REVEAL_PAGE};
pub use transform::{page_transform, PageTransform};
pub use view::{RefreshTicket, ViewAction, ViewState};

pub const PROCESS_PATH: &str = "/process";
pub const PAGE_PATH: &str = "/page";

/// Warm-up URL, shared with the browser cache.
pub fn page_path(page: u32) -> String {
    format!("{PAGE_PATH}/{page}")
}

/// Cache-busting URL, so server-side edits always show.
pub fn fresh_page_path(page: u32, stamp: u64) -> String {
    format!("{PAGE_PATH}/{page}?t={stamp}")
}

/// Canvas backing-store pixel.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Points of one continuous draw/erase gesture. On the wire each point is
/// an `[x, y]` pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stroke {
    pub points: Vec<PixelPoint>,
}

impl Serialize for Stroke {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.points.len()))?;
        for point in &self.points {
            seq.serialize_element(&[point.x, point.y])?;
        }
        seq.end()
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighlightRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl HighlightRect {
    /// Normalizes two opposite corners, whichever way the drag went.
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ProcessResponse {
    pub status: String,
    #[serde(default)]
    pub pages: Vec<serde_json::Value>,
}

impl ProcessResponse {
    /// Page count of a successful upload, `None` for any other status.
    pub fn page_count(&self) -> Option<u32> {
        if self.status != "success" {
            return None;
        }
        Some(u32::try_from(self.pages.len()).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_serializes_as_coordinate_pairs() {
        let stroke = Stroke {
            points: vec![PixelPoint::new(1, 2), PixelPoint::new(3, 4)],
        };
        let json = serde_json::to_value(&stroke).unwrap();
        assert_eq!(json, serde_json::json!([[1, 2], [3, 4]]));
    }

    #[test]
    fn highlight_rect_is_direction_independent() {
        let a = PixelPoint::new(40, 10);
        let b = PixelPoint::new(5, 70);
        let expected = HighlightRect {
            x: 5,
            y: 10,
            width: 35,
            height: 60,
        };
        assert_eq!(HighlightRect::from_corners(a, b), expected);
        assert_eq!(HighlightRect::from_corners(b, a), expected);
    }

    #[test]
    fn process_response_counts_pages_only_on_success() {
        let ok: ProcessResponse = serde_json::from_str(
            r#"{"status":"success","pages":["page_1.png","page_2.png","page_3.png"]}"#,
        )
        .unwrap();
        assert_eq!(ok.page_count(), Some(3));

        let failed: ProcessResponse =
            serde_json::from_str(r#"{"status":"error","message":"No file uploaded"}"#).unwrap();
        assert_eq!(failed.page_count(), None);
    }

    #[test]
    fn page_paths() {
        assert_eq!(page_path(2), "/page/2");
        assert_eq!(fresh_page_path(2, 1700000000000), "/page/2?t=1700000000000");
    }
}
