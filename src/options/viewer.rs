use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewer", inline)]
#[serde(default)]
/// Native window settings. The native viewer has no document to scroll, so
/// it simulates one of `page_height` pixels driven by the mouse wheel.
pub struct ViewerOptions {
    /// Window title.
    pub title: String,
    /// Scrollable page height in pixels (the most negative offset).
    #[schemars(title = "Page Height", range(min = 0.0, max = 20000.0), extend("step" = 100.0))]
    pub page_height: f32,
    /// Pixels scrolled per wheel line / arrow key press.
    pub line_pixels: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: "Stardrift".to_owned(),
            page_height: 4000.0,
            line_pixels: 40.0,
        }
    }
}
