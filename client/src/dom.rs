use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlCanvasElement, HtmlElement, PointerEvent};

use pdfink_shared::{map_client_point, ClientRect, InputGate, PixelPoint, Tool};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn set_display(element: &HtmlElement, display: &str) {
    let _ = element.style().set_property("display", display);
}

pub fn set_tool_button(button: &HtmlButtonElement, active: bool) {
    let pressed = if active { "true" } else { "false" };
    let _ = button.set_attribute("aria-pressed", pressed);
}

pub fn set_canvas_mode(canvas: &HtmlCanvasElement, tool: Tool, gate: &InputGate) {
    let cursor = match tool {
        Tool::Draw | Tool::Highlight => "crosshair",
        Tool::Erase => "cell",
        Tool::Text => "text",
    };
    let style = canvas.style();
    let _ = style.set_property("cursor", cursor);
    let _ = style.set_property("pointer-events", gate.pointer_events());
}

pub fn event_to_point(canvas: &HtmlCanvasElement, event: &PointerEvent) -> Option<PixelPoint> {
    let rect = canvas.get_bounding_client_rect();
    map_client_point(
        f64::from(event.client_x()),
        f64::from(event.client_y()),
        ClientRect {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        },
        canvas.width(),
        canvas.height(),
    )
}
