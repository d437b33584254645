use crate::ViewState;

/// CSS applied identically to the page image and its overlay canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageTransform {
    pub transform: String,
    pub origin: &'static str,
}

pub fn page_transform(view: &ViewState) -> PageTransform {
    let origin = if view.rotation() % 360 == 0 {
        "top center"
    } else {
        "center center"
    };
    PageTransform {
        transform: format!("scale({}) rotate({}deg)", view.zoom(), view.rotation()),
        origin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViewAction;

    #[test]
    fn unrotated_page_scales_from_top() {
        let view = ViewState::default();
        assert_eq!(
            page_transform(&view),
            PageTransform {
                transform: "scale(1) rotate(0deg)".to_string(),
                origin: "top center",
            }
        );
    }

    #[test]
    fn rotated_page_pivots_on_center() {
        let view = ViewState::default()
            .apply(ViewAction::ZoomOutClicked)
            .apply(ViewAction::Rotate);
        let transform = page_transform(&view);
        assert_eq!(transform.transform, "scale(1.1) rotate(90deg)");
        assert_eq!(transform.origin, "center center");
    }
}
