use std::cell::RefCell;
use std::rc::Rc;

use web_sys::Window;

use pdfink_shared::Annotation;

use crate::net::post_annotation;
use crate::render::show_page;
use crate::state::State;
use crate::util::{error, log};

/// Posts `annotation`, then re-renders its page so the server's copy
/// replaces the local ink. The refresh is skipped if the user has moved to
/// another page or document in the meantime.
pub fn submit_annotation(state: &Rc<RefCell<State>>, window: &Window, annotation: Annotation) {
    let (ticket, debug) = {
        let state = state.borrow();
        (state.view.ticket_for(annotation.page()), state.config.debug)
    };
    let state = state.clone();
    let window = window.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if debug {
            log(&format!(
                "submit {} page={} -> {}",
                annotation.kind(),
                annotation.page(),
                annotation.endpoint()
            ));
        }
        if let Err(err) = post_annotation(&window, &annotation).await {
            error(&format!("Failed to send {}: {err}", annotation.kind()));
        }
        let current = state.borrow().view.is_current(ticket);
        if current {
            show_page(&state, ticket.page());
        } else if debug {
            log(&format!(
                "skip stale refresh of page {} after {}",
                ticket.page(),
                annotation.kind()
            ));
        }
    });
}

/// Night mode is rendered server-side; canvas input waits for the new image.
pub fn toggle_night_mode(state: &Rc<RefCell<State>>, window: &Window) {
    let page = {
        let mut state = state.borrow_mut();
        state.gate.suspend();
        crate::dom::set_canvas_mode(&state.el.canvas, state.annotator.tool(), &state.gate);
        state.view.current_page()
    };
    submit_annotation(state, window, Annotation::Night { page });
}
