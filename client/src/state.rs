use wasm_bindgen::prelude::Closure;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement,
    HtmlFormElement, HtmlImageElement, HtmlInputElement,
};

use pdfink_shared::{Annotator, InputGate, PixelPoint, Tool, ViewState};

use crate::util::Config;

/// DOM handles the controller drives.
#[derive(Clone)]
pub struct Elements {
    pub form: HtmlFormElement,
    pub preprocessing: HtmlInputElement,
    pub loader: HtmlElement,
    pub tools: HtmlElement,
    pub controls: HtmlElement,
    pub image: HtmlImageElement,
    pub canvas: HtmlCanvasElement,
    pub text_entry: HtmlFormElement,
    pub text_input: HtmlInputElement,
    pub tool_buttons: Vec<(Tool, HtmlButtonElement)>,
}

/// Text waiting for the user to finish typing.
#[derive(Clone, Copy, Debug)]
pub struct TextTarget {
    pub page: u32,
    pub pos: PixelPoint,
}

pub struct State {
    pub config: Config,
    pub el: Elements,
    pub ctx: CanvasRenderingContext2d,
    pub view: ViewState,
    pub annotator: Annotator,
    pub gate: InputGate,
    pub text_target: Option<TextTarget>,
    pub render_seq: u64,
    pub page_onload: Option<Closure<dyn FnMut(Event)>>,
    pub warmups: Vec<HtmlImageElement>,
    pub warmup_onload: Option<Closure<dyn FnMut(Event)>>,
}

impl State {
    pub fn new(config: Config, el: Elements, ctx: CanvasRenderingContext2d) -> Self {
        Self {
            config,
            el,
            ctx,
            view: ViewState::default(),
            annotator: Annotator::default(),
            gate: InputGate::default(),
            text_target: None,
            render_seq: 0,
            page_onload: None,
            warmups: Vec::new(),
            warmup_onload: None,
        }
    }

    pub fn text_entry_open(&self) -> bool {
        self.text_target.is_some()
    }
}
