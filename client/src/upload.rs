use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, FormData, HtmlImageElement, Window};

use pdfink_shared::{ViewAction, Warmup};

use crate::dom::{set_canvas_mode, set_display};
use crate::net::process_document;
use crate::render::show_page;
use crate::state::State;
use crate::text::close_text_entry;
use crate::util::{error, log, warn};

const UPLOAD_FAILED: &str = "Failed to process PDF";

/// Handles the upload form: resets the view, posts the document and, on
/// success, warms every page image before revealing page 1.
pub fn start_upload(state_rc: &Rc<RefCell<State>>, window: &Window) -> Result<(), JsValue> {
    let (form, generation) = {
        let mut state = state_rc.borrow_mut();
        state.view = state.view.apply(ViewAction::Reset);
        state.annotator.cancel();
        close_text_entry(&mut state);
        for image in state.warmups.drain(..) {
            image.set_onload(None);
        }
        state.warmup_onload = None;
        state.render_seq += 1;
        state.gate.suspend();
        set_canvas_mode(&state.el.canvas, state.annotator.tool(), &state.gate);
        set_display(&state.el.image, "none");
        set_display(&state.el.canvas, "none");
        set_display(&state.el.controls, "none");
        set_display(&state.el.loader, "block");

        let form = FormData::new_with_form(&state.el.form)?;
        let preprocessing = if state.el.preprocessing.checked() {
            "1"
        } else {
            "0"
        };
        form.append_with_str("preprocessing", preprocessing)?;
        (form, state.view.generation())
    };

    let state_rc = state_rc.clone();
    let window = window.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = process_document(&window, &form).await;
        if state_rc.borrow().view.generation() != generation {
            return;
        }
        let page_count = match outcome {
            Ok(response) => response.page_count(),
            Err(err) => {
                error(&format!("Upload failed: {err}"));
                None
            }
        };
        let Some(total_pages) = page_count.filter(|count| *count > 0) else {
            let _ = window.alert_with_message(UPLOAD_FAILED);
            set_display(&state_rc.borrow().el.loader, "none");
            return;
        };
        let warmup = {
            let mut state = state_rc.borrow_mut();
            state.view = state.view.apply(ViewAction::DocumentLoaded { total_pages });
            if state.config.debug {
                log(&format!("document loaded pages={total_pages}"));
            }
            Warmup::for_view(&state.view)
        };
        if let Err(err) = warm_pages(&state_rc, warmup) {
            warn(&format!("Page warm-up failed: {err:?}"));
        }
    });
    Ok(())
}

/// Fetches every page once without cache-busting so later navigation hits
/// the browser cache. Only page 1's arrival has a visible effect.
fn warm_pages(state_rc: &Rc<RefCell<State>>, warmup: Warmup) -> Result<(), JsValue> {
    let mut images = Vec::new();
    for (page, path) in warmup.requests() {
        let image = HtmlImageElement::new()?;
        if warmup.reveals(page, &state_rc.borrow().view) {
            let onload_state = state_rc.clone();
            let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
                if !warmup.reveals(page, &onload_state.borrow().view) {
                    return;
                }
                show_page(&onload_state, page);
                let state = onload_state.borrow();
                set_display(&state.el.loader, "none");
                set_display(&state.el.tools, "flex");
                set_display(&state.el.controls, "flex");
            });
            image.set_onload(Some(onload.as_ref().unchecked_ref()));
            state_rc.borrow_mut().warmup_onload = Some(onload);
        }
        image.set_src(&path);
        images.push(image);
    }
    state_rc.borrow_mut().warmups = images;
    Ok(())
}
