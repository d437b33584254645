use crate::PixelPoint;

/// On-screen box of the canvas in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps a pointer position to backing-store pixels, independent of CSS
/// scaling and zoom. Returns `None` while the canvas has no displayed area.
pub fn map_client_point(
    client_x: f64,
    client_y: f64,
    rect: ClientRect,
    backing_width: u32,
    backing_height: u32,
) -> Option<PixelPoint> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    let x = (client_x - rect.left) * (f64::from(backing_width) / rect.width);
    let y = (client_y - rect.top) * (f64::from(backing_height) / rect.height);
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(PixelPoint {
        x: round_half_up(x),
        y: round_half_up(y),
    })
}

// Halves round toward positive infinity, as pointer math does in the browser.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
