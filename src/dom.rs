use crate::constants::{SECTION_SELECTOR, TITLE_SELECTOR};
use crate::titles::{split_heading, TitleNodes};
use parallax_core::{ProjectionUpdate, Section, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Current inner size and pixel density of the browser window.
pub fn viewport(window: &web::Window) -> anyhow::Result<Viewport> {
    let css_px = |v: Result<JsValue, JsValue>| -> anyhow::Result<f32> {
        let v = v.map_err(js_err)?;
        v.as_f64()
            .map(|f| f as f32)
            .ok_or_else(|| anyhow::anyhow!("window size is not a number: {:?}", v))
    };
    let width = css_px(window.inner_width())?;
    let height = css_px(window.inner_height())?;
    Ok(Viewport::new(
        width,
        height,
        window.device_pixel_ratio() as f32,
    )?)
}

#[inline]
pub fn scroll_y(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

/// Size the canvas to the viewport in CSS pixels and its backing store to
/// the (pixel-ratio capped) surface size.
pub fn sync_canvas_size(canvas: &web::HtmlCanvasElement, update: &ProjectionUpdate) {
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", update.css_width));
    _ = style.set_property("height", &format!("{}px", update.css_height));
    canvas.set_width(update.surface_width.max(1));
    canvas.set_height(update.surface_height.max(1));
}

/// Every `<section>` in document order, with its heading split into letters.
/// A section without a heading still counts, it just has no title to animate.
pub fn collect_sections(
    document: &web::Document,
) -> anyhow::Result<(Vec<Section>, Vec<TitleNodes>)> {
    let list = document
        .query_selector_all(SECTION_SELECTOR)
        .map_err(js_err)?;
    let mut sections = Vec::new();
    let mut titles = Vec::new();
    for i in 0..list.length() {
        let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let index = sections.len();
        match el.query_selector(TITLE_SELECTOR).map_err(js_err)? {
            Some(heading) => {
                let nodes = split_heading(document, &heading, index)?;
                sections.push(Section::new(index, Some(nodes.len())));
                titles.push(nodes);
            }
            None => {
                log::warn!("[dom] section {} has no heading", index);
                sections.push(Section::new(index, None));
            }
        }
    }
    Ok((sections, titles))
}
