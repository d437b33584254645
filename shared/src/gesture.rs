//! Canvas input state machine.
//!
//! Pointer events go in, [`Effect`]s come out. The browser side paints dots,
//! opens the text entry and posts annotations; nothing here touches the DOM.

use crate::{Annotation, HighlightRect, PixelPoint, Stroke};

pub const DOT_RADIUS: f64 = 2.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    Draw,
    Erase,
    Highlight,
    Text,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Draw, Tool::Erase, Tool::Highlight, Tool::Text];

    /// Local ink for stroke tools.
    pub fn ink(self) -> Option<&'static str> {
        match self {
            Tool::Draw => Some("black"),
            Tool::Erase => Some("white"),
            Tool::Highlight | Tool::Text => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tool::Draw => "draw",
            Tool::Erase => "erase",
            Tool::Highlight => "highlight",
            Tool::Text => "text",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Stroking {
        page: u32,
        points: Vec<PixelPoint>,
    },
    Anchored {
        page: u32,
        anchor: PixelPoint,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Paint {
        point: PixelPoint,
        color: &'static str,
    },
    Submit(Annotation),
    OpenTextEntry {
        page: u32,
        pos: PixelPoint,
    },
}

#[derive(Debug, Default)]
pub struct Annotator {
    tool: Tool,
    gesture: Gesture,
    history: Vec<Stroke>,
}

impl Annotator {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Finished strokes, kept locally only.
    pub fn history(&self) -> &[Stroke] {
        &self.history
    }

    /// Switching tools drops whatever gesture was in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.gesture = Gesture::Idle;
    }

    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
    }

    pub fn pointer_down(&mut self, page: u32, pos: PixelPoint) -> Option<Effect> {
        match self.tool {
            Tool::Highlight => {
                self.gesture = Gesture::Anchored { page, anchor: pos };
                None
            }
            Tool::Text => Some(Effect::OpenTextEntry { page, pos }),
            Tool::Draw | Tool::Erase => {
                self.gesture = Gesture::Stroking {
                    page,
                    points: vec![pos],
                };
                self.paint(pos)
            }
        }
    }

    pub fn pointer_move(&mut self, pos: PixelPoint) -> Option<Effect> {
        let Gesture::Stroking { points, .. } = &mut self.gesture else {
            return None;
        };
        points.push(pos);
        self.paint(pos)
    }

    pub fn pointer_up(&mut self, pos: PixelPoint) -> Option<Effect> {
        if self.tool == Tool::Text {
            return None;
        }
        match std::mem::take(&mut self.gesture) {
            Gesture::Anchored { page, anchor } => Some(Effect::Submit(Annotation::Highlight {
                page,
                rect: HighlightRect::from_corners(anchor, pos),
            })),
            Gesture::Stroking { page, points } => {
                if points.is_empty() {
                    return None;
                }
                let stroke = Stroke { points };
                self.history.push(stroke.clone());
                let annotation = if self.tool == Tool::Erase {
                    Annotation::Erase { page, stroke }
                } else {
                    Annotation::Draw { page, stroke }
                };
                Some(Effect::Submit(annotation))
            }
            Gesture::Idle => None,
        }
    }

    fn paint(&self, point: PixelPoint) -> Option<Effect> {
        self.tool.ink().map(|color| Effect::Paint { point, color })
    }
}

/// Builds a text annotation unless the entry is blank.
pub fn text_annotation(page: u32, text: &str, pos: PixelPoint) -> Option<Annotation> {
    if text.trim().is_empty() {
        return None;
    }
    Some(Annotation::Text {
        page,
        text: text.to_string(),
        pos,
    })
}

/// Pointer-events policy for the overlay canvas.
///
/// Closed until a tool is chosen. Rotation and night mode suspend it while a
/// re-render is pending; a tool choice or a finished page render lifts that.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputGate {
    armed: bool,
    suspended: bool,
}

impl InputGate {
    pub fn arm(&mut self) {
        self.armed = true;
        self.suspended = false;
    }

    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn accepts_input(&self) -> bool {
        self.armed && !self.suspended
    }

    pub fn pointer_events(&self) -> &'static str {
        if self.accepts_input() {
            "auto"
        } else {
            "none"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> PixelPoint {
        PixelPoint::new(x, y)
    }

    fn with_tool(tool: Tool) -> Annotator {
        let mut annotator = Annotator::default();
        annotator.set_tool(tool);
        annotator
    }

    #[test]
    fn draw_gesture_submits_every_point_once() {
        let mut annotator = Annotator::default();
        assert_eq!(
            annotator.pointer_down(2, p(1, 1)),
            Some(Effect::Paint {
                point: p(1, 1),
                color: "black"
            })
        );
        for i in 2..=4 {
            assert!(matches!(
                annotator.pointer_move(p(i, i)),
                Some(Effect::Paint { .. })
            ));
        }
        let effect = annotator.pointer_up(p(9, 9));
        let expected = Stroke {
            points: vec![p(1, 1), p(2, 2), p(3, 3), p(4, 4)],
        };
        assert_eq!(
            effect,
            Some(Effect::Submit(Annotation::Draw {
                page: 2,
                stroke: expected.clone()
            }))
        );
        assert_eq!(annotator.history(), &[expected]);
        assert_eq!(annotator.gesture(), &Gesture::Idle);
        assert_eq!(annotator.pointer_up(p(9, 9)), None);
    }

    #[test]
    fn cancelled_stroke_is_dropped() {
        let mut annotator = Annotator::default();
        annotator.pointer_down(1, p(1, 1));
        annotator.pointer_move(p(2, 2));
        annotator.cancel();
        assert_eq!(annotator.gesture(), &Gesture::Idle);
        assert_eq!(annotator.pointer_move(p(3, 3)), None);
        assert_eq!(annotator.pointer_up(p(3, 3)), None);
        assert!(annotator.history().is_empty());
    }

    #[test]
    fn erase_paints_white_and_posts_erase() {
        let mut annotator = with_tool(Tool::Erase);
        assert_eq!(
            annotator.pointer_down(1, p(5, 5)),
            Some(Effect::Paint {
                point: p(5, 5),
                color: "white"
            })
        );
        let Some(Effect::Submit(annotation)) = annotator.pointer_up(p(5, 5)) else {
            panic!("erase stroke was not submitted");
        };
        assert_eq!(annotation.endpoint(), "/erase");
    }

    #[test]
    fn stroke_keeps_page_of_gesture_start() {
        let mut annotator = Annotator::default();
        annotator.pointer_down(3, p(0, 0));
        let Some(Effect::Submit(annotation)) = annotator.pointer_up(p(0, 0)) else {
            panic!("stroke was not submitted");
        };
        assert_eq!(annotation.page(), 3);
    }

    #[test]
    fn moves_outside_a_stroke_are_ignored() {
        let mut annotator = Annotator::default();
        assert_eq!(annotator.pointer_move(p(1, 1)), None);
        assert_eq!(annotator.pointer_up(p(1, 1)), None);
        assert!(annotator.history().is_empty());
    }

    #[test]
    fn highlight_submits_normalized_rect_once() {
        let mut annotator = with_tool(Tool::Highlight);
        assert_eq!(annotator.pointer_down(1, p(50, 80)), None);
        assert_eq!(annotator.pointer_move(p(20, 20)), None);
        assert_eq!(
            annotator.pointer_up(p(10, 30)),
            Some(Effect::Submit(Annotation::Highlight {
                page: 1,
                rect: HighlightRect {
                    x: 10,
                    y: 30,
                    width: 40,
                    height: 50
                }
            }))
        );
        assert_eq!(annotator.pointer_up(p(10, 30)), None);
    }

    #[test]
    fn text_tool_opens_entry_and_ignores_release() {
        let mut annotator = with_tool(Tool::Text);
        assert_eq!(
            annotator.pointer_down(4, p(12, 34)),
            Some(Effect::OpenTextEntry {
                page: 4,
                pos: p(12, 34)
            })
        );
        assert_eq!(annotator.pointer_move(p(13, 35)), None);
        assert_eq!(annotator.pointer_up(p(13, 35)), None);
    }

    #[test]
    fn blank_text_builds_no_annotation() {
        assert_eq!(text_annotation(1, "", p(0, 0)), None);
        assert_eq!(text_annotation(1, "  \t", p(0, 0)), None);
        assert_eq!(
            text_annotation(1, "hi", p(3, 4)),
            Some(Annotation::Text {
                page: 1,
                text: "hi".to_string(),
                pos: p(3, 4)
            })
        );
    }

    #[test]
    fn tool_switch_abandons_stroke() {
        let mut annotator = Annotator::default();
        annotator.pointer_down(1, p(1, 1));
        annotator.set_tool(Tool::Highlight);
        assert_eq!(annotator.pointer_up(p(2, 2)), None);
        assert!(annotator.history().is_empty());
    }

    #[test]
    fn gate_opens_on_tool_choice_and_survives_suspension() {
        let mut gate = InputGate::default();
        assert_eq!(gate.pointer_events(), "none");
        gate.resume();
        assert!(!gate.accepts_input());

        gate.arm();
        assert_eq!(gate.pointer_events(), "auto");
        gate.suspend();
        assert_eq!(gate.pointer_events(), "none");
        gate.resume();
        assert!(gate.accepts_input());
    }
}
