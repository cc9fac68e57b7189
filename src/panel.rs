use crate::constants::{COLOR_INPUT_ID, PANEL_CLASS, PANEL_LABEL, PANEL_STYLE};
use crate::dom::js_err;
use crate::frame::SharedLoop;
use parallax_core::Rgb;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Use the page's `input#material-color` if it has one, otherwise add a
/// small labelled colour picker in the top-right corner.
fn color_input(document: &web::Document) -> anyhow::Result<web::HtmlInputElement> {
    if let Some(el) = document.get_element_by_id(COLOR_INPUT_ID) {
        return el
            .dyn_into::<web::HtmlInputElement>()
            .map_err(|e| anyhow::anyhow!("#{} is not an input: {:?}", COLOR_INPUT_ID, e));
    }
    let body = document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no document body"))?;
    let label = document.create_element("label").map_err(js_err)?;
    label.set_class_name(PANEL_CLASS);
    _ = label.set_attribute("style", PANEL_STYLE);
    label.set_text_content(Some(PANEL_LABEL));
    let input: web::HtmlInputElement = document
        .create_element("input")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    input.set_type("color");
    input.set_id(COLOR_INPUT_ID);
    label.append_child(&input).map_err(js_err)?;
    body.append_child(&label).map_err(js_err)?;
    Ok(input)
}

/// Live-edit the shared material colour.
pub fn wire_material_color(document: &web::Document, run_loop: &SharedLoop) {
    let input = match color_input(document) {
        Ok(i) => i,
        Err(e) => {
            log::warn!("[panel] colour control unavailable: {:?}", e);
            return;
        }
    };
    input.set_value(&run_loop.borrow().coordinator().material_color().to_string());

    let rl = run_loop.clone();
    let source = input.clone();
    let closure = Closure::wrap(Box::new(move || match source.value().parse::<Rgb>() {
        Ok(color) => rl.borrow_mut().set_material_color(color),
        Err(e) => log::warn!("[panel] {}", e),
    }) as Box<dyn FnMut()>);
    _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
    closure.forget();
}
