mod app;
mod dom;
mod net;
mod render;
mod state;
mod submit;
mod text;
mod upload;
mod util;

pub use app::run;
