use serde::Serialize;

use crate::{HighlightRect, PixelPoint, Stroke};

/// One server-side page mutation, bound to the page it was made on.
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    Draw { page: u32, stroke: Stroke },
    Erase { page: u32, stroke: Stroke },
    Highlight { page: u32, rect: HighlightRect },
    Text { page: u32, text: String, pos: PixelPoint },
    Night { page: u32 },
}

#[derive(Serialize)]
#[serde(untagged)]
enum Body<'a> {
    Draw {
        page_num: u32,
        draw_data: [&'a Stroke; 1],
    },
    Erase {
        page_num: u32,
        erase_data: [&'a Stroke; 1],
    },
    Highlight {
        page_num: u32,
        highlight_rect: &'a HighlightRect,
    },
    Text {
        page_num: u32,
        text: &'a str,
        pos: PixelPoint,
    },
    Night {
        page_num: u32,
    },
}

impl Annotation {
    pub fn page(&self) -> u32 {
        match self {
            Annotation::Draw { page, .. }
            | Annotation::Erase { page, .. }
            | Annotation::Highlight { page, .. }
            | Annotation::Text { page, .. }
            | Annotation::Night { page } => *page,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Annotation::Draw { .. } => "/draw",
            Annotation::Erase { .. } => "/erase",
            Annotation::Highlight { .. } => "/highlight",
            Annotation::Text { .. } => "/text",
            Annotation::Night { .. } => "/night",
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Annotation::Draw { .. } => "draw stroke",
            Annotation::Erase { .. } => "erase stroke",
            Annotation::Highlight { .. } => "highlight",
            Annotation::Text { .. } => "text",
            Annotation::Night { .. } => "night mode toggle",
        }
    }

    fn body(&self) -> Body<'_> {
        match self {
            Annotation::Draw { page, stroke } => Body::Draw {
                page_num: *page,
                draw_data: [stroke],
            },
            Annotation::Erase { page, stroke } => Body::Erase {
                page_num: *page,
                erase_data: [stroke],
            },
            Annotation::Highlight { page, rect } => Body::Highlight {
                page_num: *page,
                highlight_rect: rect,
            },
            Annotation::Text { page, text, pos } => Body::Text {
                page_num: *page,
                text,
                pos: *pos,
            },
            Annotation::Night { page } => Body::Night { page_num: *page },
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.body())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn body(annotation: &Annotation) -> Value {
        serde_json::from_str(&annotation.to_json().unwrap()).unwrap()
    }

    #[test]
    fn draw_wraps_stroke_in_singleton_list() {
        let annotation = Annotation::Draw {
            page: 2,
            stroke: Stroke {
                points: vec![PixelPoint::new(10, 20), PixelPoint::new(11, 21)],
            },
        };
        assert_eq!(annotation.endpoint(), "/draw");
        assert_eq!(
            body(&annotation),
            json!({"page_num": 2, "draw_data": [[[10, 20], [11, 21]]]})
        );
    }

    #[test]
    fn erase_uses_erase_data_key() {
        let annotation = Annotation::Erase {
            page: 1,
            stroke: Stroke {
                points: vec![PixelPoint::new(3, 4)],
            },
        };
        assert_eq!(annotation.endpoint(), "/erase");
        assert_eq!(
            body(&annotation),
            json!({"page_num": 1, "erase_data": [[[3, 4]]]})
        );
    }

    #[test]
    fn highlight_text_and_night_bodies() {
        let highlight = Annotation::Highlight {
            page: 4,
            rect: HighlightRect {
                x: 1,
                y: 2,
                width: 30,
                height: 40,
            },
        };
        assert_eq!(
            body(&highlight),
            json!({"page_num": 4, "highlight_rect": {"x": 1, "y": 2, "width": 30, "height": 40}})
        );

        let text = Annotation::Text {
            page: 3,
            text: "note".to_string(),
            pos: PixelPoint::new(7, 9),
        };
        assert_eq!(text.endpoint(), "/text");
        assert_eq!(
            body(&text),
            json!({"page_num": 3, "text": "note", "pos": {"x": 7, "y": 9}})
        );

        let night = Annotation::Night { page: 5 };
        assert_eq!(night.endpoint(), "/night");
        assert_eq!(night.page(), 5);
        assert_eq!(body(&night), json!({"page_num": 5}));
    }
}
