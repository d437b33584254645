use web_sys::Window;

/// Runtime switches read from the page's query string.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    pub debug: bool,
}

impl Config {
    pub fn from_window(window: &Window) -> Self {
        let search = window.location().search().ok().unwrap_or_default();
        Self {
            debug: debug_enabled(&search),
        }
    }
}

fn debug_enabled(search: &str) -> bool {
    search.contains("debug=1")
        || search.contains("debug=true")
        || search.contains("log=1")
        || search.contains("log=true")
}

pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

pub fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

pub fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

pub fn error(message: &str) {
    web_sys::console::error_1(&message.into());
}
