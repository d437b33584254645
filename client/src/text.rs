//! Inline text entry, shown where the text tool was clicked.

use web_sys::HtmlElement;

use pdfink_shared::{text_annotation, Annotation, PixelPoint};

use crate::dom::set_display;
use crate::state::{State, TextTarget};

pub fn open_text_entry(
    state: &mut State,
    page: u32,
    pos: PixelPoint,
    client_x: i32,
    client_y: i32,
) {
    state.text_target = Some(TextTarget { page, pos });
    let entry: &HtmlElement = &state.el.text_entry;
    let style = entry.style();
    let _ = style.set_property("left", &format!("{client_x}px"));
    let _ = style.set_property("top", &format!("{client_y}px"));
    set_display(entry, "block");
    state.el.text_input.set_value("");
    let _ = state.el.text_input.focus();
}

pub fn close_text_entry(state: &mut State) {
    state.text_target = None;
    set_display(&state.el.text_entry, "none");
}

/// Closes the entry and returns what should be sent, if anything.
pub fn commit_text_entry(state: &mut State) -> Option<Annotation> {
    let target = state.text_target?;
    let text = state.el.text_input.value();
    close_text_entry(state);
    text_annotation(target.page, &text, target.pos)
}
