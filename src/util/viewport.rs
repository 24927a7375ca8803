/// Canvas dimensions for a viewport measured in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// Backing store size in device pixels (the surface size).
    pub backing: (u32, u32),
    /// Displayed size in CSS pixels.
    pub css: (f64, f64),
}

impl CanvasSize {
    /// Fill a `css_width` x `css_height` viewport at `pixel_ratio` device
    /// pixels per CSS pixel. The backing store is never smaller than 1x1,
    /// and a non-positive or non-finite ratio counts as 1.
    #[must_use]
    pub fn fill(css_width: f64, css_height: f64, pixel_ratio: f64) -> Self {
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        let css_width = css_width.max(0.0);
        let css_height = css_height.max(0.0);
        let device = |css: f64| (css * ratio).round().max(1.0) as u32;
        Self {
            backing: (device(css_width), device(css_height)),
            css: (css_width, css_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_dpi_keeps_css_size_at_viewport() {
        let size = CanvasSize::fill(1280.0, 720.0, 2.0);
        assert_eq!(size.backing, (2560, 1440));
        assert_eq!(size.css, (1280.0, 720.0));
    }

    #[test]
    fn fractional_ratio_rounds_backing_store() {
        let size = CanvasSize::fill(1001.0, 500.0, 1.5);
        assert_eq!(size.backing, (1502, 750));
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(CanvasSize::fill(0.0, 0.0, 2.0).backing, (1, 1));
        assert_eq!(CanvasSize::fill(800.0, 600.0, 0.0).backing, (800, 600));
        assert_eq!(
            CanvasSize::fill(800.0, 600.0, f64::NAN).backing,
            (800, 600)
        );
    }
}
