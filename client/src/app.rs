use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Event, EventTarget, HtmlButtonElement, HtmlCanvasElement,
    KeyboardEvent, PointerEvent, Window,
};

use pdfink_shared::{Effect, Tool, ViewAction};

use crate::dom::{event_to_point, get_element, set_canvas_mode, set_tool_button};
use crate::render::{apply_transform, draw_dot, show_page};
use crate::state::{Elements, State};
use crate::submit::{submit_annotation, toggle_night_mode};
use crate::text::{close_text_entry, commit_text_entry, open_text_entry};
use crate::upload::start_upload;
use crate::util::{log, Config};

fn document_ready_state(document: &Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

fn tool_button_id(tool: Tool) -> String {
    format!("tool-{}", tool.name())
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() == Some("complete") {
        started.set(true);
        return start_app();
    }

    let onload_started = started.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onload_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    window.add_event_listener_with_callback("load", onload.as_ref().unchecked_ref())?;
    onload.forget();

    Ok(())
}

fn listen<E>(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(E) + 'static,
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let config = Config::from_window(&window);

    let canvas: HtmlCanvasElement = get_element(&document, "drawing-canvas")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let mut tool_buttons = Vec::with_capacity(Tool::ALL.len());
    for tool in Tool::ALL {
        let button: HtmlButtonElement = get_element(&document, &tool_button_id(tool))?;
        tool_buttons.push((tool, button));
    }

    let el = Elements {
        form: get_element(&document, "form")?,
        preprocessing: get_element(&document, "preprocessing-toggle")?,
        loader: get_element(&document, "loading-indicator")?,
        tools: get_element(&document, "tools")?,
        controls: get_element(&document, "controls")?,
        image: get_element(&document, "pdf-page")?,
        canvas: canvas.clone(),
        text_entry: get_element(&document, "text-entry")?,
        text_input: get_element(&document, "text-entry-input")?,
        tool_buttons,
    };
    let zoom_in: HtmlButtonElement = get_element(&document, "zoom-in")?;
    let zoom_out: HtmlButtonElement = get_element(&document, "zoom-out")?;
    let rotate: HtmlButtonElement = get_element(&document, "rotate")?;
    let night_toggle: EventTarget = get_element(&document, "night-mode-toggle")?;

    let state = Rc::new(RefCell::new(State::new(config, el.clone(), ctx)));
    {
        let mut state = state.borrow_mut();
        crate::dom::set_display(&state.el.image, "none");
        close_text_entry(&mut state);
        sync_tools(&state);
    }
    if config.debug {
        log("PDFInk viewer started with debug logging");
    }

    {
        let state = state.clone();
        let window_cb = window.clone();
        listen(&el.form, "submit", move |event: Event| {
            event.prevent_default();
            if let Err(err) = start_upload(&state, &window_cb) {
                web_sys::console::error_1(&err);
            }
        })?;
    }

    for (action, button) in [
        (ViewAction::ZoomOutClicked, &zoom_out),
        (ViewAction::ZoomInClicked, &zoom_in),
    ] {
        let state = state.clone();
        listen(button, "click", move |_: Event| {
            let mut state = state.borrow_mut();
            state.view = state.view.apply(action);
            apply_transform(&state);
        })?;
    }

    {
        let state = state.clone();
        listen(&rotate, "click", move |_: Event| {
            let mut state = state.borrow_mut();
            state.gate.suspend();
            state.view = state.view.apply(ViewAction::Rotate);
            set_canvas_mode(&state.el.canvas, state.annotator.tool(), &state.gate);
            apply_transform(&state);
        })?;
    }

    {
        let state = state.clone();
        let window_cb = window.clone();
        listen(&night_toggle, "change", move |_: Event| {
            toggle_night_mode(&state, &window_cb);
        })?;
    }

    for (tool, button) in &el.tool_buttons {
        let state = state.clone();
        let tool = *tool;
        listen(button, "click", move |_: Event| {
            let mut state = state.borrow_mut();
            state.annotator.set_tool(tool);
            state.gate.arm();
            sync_tools(&state);
        })?;
    }

    {
        let state = state.clone();
        listen(&document, "keydown", move |event: KeyboardEvent| {
            let action = match event.key().as_str() {
                "ArrowRight" => ViewAction::NextPage,
                "ArrowLeft" => ViewAction::PrevPage,
                _ => return,
            };
            let page = {
                let mut state = state.borrow_mut();
                if !state.view.has_document() || state.text_entry_open() {
                    return;
                }
                let before = state.view.current_page();
                state.view = state.view.apply(action);
                let after = state.view.current_page();
                if before == after {
                    return;
                }
                after
            };
            show_page(&state, page);
        })?;
    }

    {
        let state = state.clone();
        let window_cb = window.clone();
        let canvas_cb = canvas.clone();
        listen(&canvas, "pointerdown", move |event: PointerEvent| {
            if event.button() != 0 {
                return;
            }
            event.prevent_default();
            let effect = {
                let mut state = state.borrow_mut();
                if !state.gate.accepts_input() {
                    return;
                }
                let Some(pos) = event_to_point(&canvas_cb, &event) else {
                    return;
                };
                let page = state.view.current_page();
                state.annotator.pointer_down(page, pos)
            };
            let _ = canvas_cb.set_pointer_capture(event.pointer_id());
            handle_effect(&state, &window_cb, effect, &event);
        })?;
    }

    {
        let state = state.clone();
        let window_cb = window.clone();
        let canvas_cb = canvas.clone();
        listen(&canvas, "pointermove", move |event: PointerEvent| {
            let effect = {
                let mut state = state.borrow_mut();
                let Some(pos) = event_to_point(&canvas_cb, &event) else {
                    return;
                };
                state.annotator.pointer_move(pos)
            };
            handle_effect(&state, &window_cb, effect, &event);
        })?;
    }

    {
        let state = state.clone();
        let window_cb = window.clone();
        let canvas_cb = canvas.clone();
        listen(&canvas, "pointerup", move |event: PointerEvent| {
            let effect = {
                let mut state = state.borrow_mut();
                match event_to_point(&canvas_cb, &event) {
                    Some(pos) => state.annotator.pointer_up(pos),
                    None => {
                        state.annotator.cancel();
                        None
                    }
                }
            };
            if canvas_cb.has_pointer_capture(event.pointer_id()) {
                let _ = canvas_cb.release_pointer_capture(event.pointer_id());
            }
            handle_effect(&state, &window_cb, effect, &event);
        })?;
    }

    {
        let state = state.clone();
        let canvas_cb = canvas.clone();
        listen(&canvas, "pointercancel", move |event: PointerEvent| {
            state.borrow_mut().annotator.cancel();
            if canvas_cb.has_pointer_capture(event.pointer_id()) {
                let _ = canvas_cb.release_pointer_capture(event.pointer_id());
            }
        })?;
    }

    {
        let state = state.clone();
        let window_cb = window.clone();
        listen(&el.text_entry, "submit", move |event: Event| {
            event.prevent_default();
            let annotation = commit_text_entry(&mut state.borrow_mut());
            if let Some(annotation) = annotation {
                submit_annotation(&state, &window_cb, annotation);
            }
        })?;
    }

    {
        let state = state.clone();
        listen(&el.text_input, "keydown", move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                event.prevent_default();
                close_text_entry(&mut state.borrow_mut());
            }
        })?;
    }

    Ok(())
}

fn sync_tools(state: &State) {
    let active = state.annotator.tool();
    for (tool, button) in &state.el.tool_buttons {
        set_tool_button(button, state.gate.accepts_input() && *tool == active);
    }
    set_canvas_mode(&state.el.canvas, active, &state.gate);
}

fn handle_effect(
    state: &Rc<RefCell<State>>,
    window: &Window,
    effect: Option<Effect>,
    event: &PointerEvent,
) {
    match effect {
        None => {}
        Some(Effect::Paint { point, color }) => draw_dot(&state.borrow().ctx, point, color),
        Some(Effect::Submit(annotation)) => submit_annotation(state, window, annotation),
        Some(Effect::OpenTextEntry { page, pos }) => {
            let mut state = state.borrow_mut();
            let _ = state.el.canvas.release_pointer_capture(event.pointer_id());
            open_text_entry(
                &mut state,
                page,
                pos,
                event.client_x(),
                event.client_y(),
            );
        }
    }
}
