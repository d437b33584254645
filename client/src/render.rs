use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Event};

use pdfink_shared::{fresh_page_path, page_transform, PixelPoint, ViewAction, DOT_RADIUS};

use crate::dom::{set_canvas_mode, set_display};
use crate::state::State;
use crate::util::{log, now_ms};

pub fn draw_dot(ctx: &CanvasRenderingContext2d, point: PixelPoint, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    let _ = ctx.arc(
        f64::from(point.x),
        f64::from(point.y),
        DOT_RADIUS,
        0.0,
        std::f64::consts::PI * 2.0,
    );
    ctx.fill();
}

pub fn apply_transform(state: &State) {
    let transform = page_transform(&state.view);
    for style in [state.el.image.style(), state.el.canvas.style()] {
        let _ = style.set_property("transform-origin", transform.origin);
        let _ = style.set_property("transform", &transform.transform);
    }
}

/// Requests a fresh render of `page`. Once the image arrives, the overlay is
/// resized to the image's natural size, which also wipes local ink.
pub fn show_page(state_rc: &Rc<RefCell<State>>, page: u32) {
    let mut state = state_rc.borrow_mut();
    state.render_seq += 1;
    let seq = state.render_seq;
    let image = state.el.image.clone();
    image.set_src("");
    set_display(&image, "none");

    let onload_state = state_rc.clone();
    let onload = Closure::<dyn FnMut(Event)>::new(move |_| {
        let mut state = onload_state.borrow_mut();
        if state.render_seq != seq {
            return;
        }
        let image = &state.el.image;
        let canvas = &state.el.canvas;
        canvas.set_width(image.natural_width());
        canvas.set_height(image.natural_height());
        set_display(image, "block");
        set_display(canvas, "block");
        state.gate.resume();
        set_canvas_mode(&state.el.canvas, state.annotator.tool(), &state.gate);
        apply_transform(&state);
    });
    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    state.page_onload = Some(onload);

    state.view = state.view.apply(ViewAction::PageShown);
    if state.config.debug {
        log(&format!("show page {page} seq={seq}"));
    }
    image.set_src(&fresh_page_path(page, now_ms()));
}
