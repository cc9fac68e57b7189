use crate::dom;
use crate::frame::SharedLoop;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_scroll(run_loop: &SharedLoop) {
    let rl = run_loop.clone();

    let closure = Closure::wrap(Box::new(move || {
        if let Some(w) = web::window() {
            let y = dom::scroll_y(&w);
            rl.borrow_mut().on_scroll(y);
        }
    }) as Box<dyn FnMut()>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

pub fn wire_resize(run_loop: &SharedLoop) {
    let rl = run_loop.clone();

    let closure = Closure::wrap(Box::new(move || {
        let Some(w) = web::window() else {
            return;
        };
        match dom::viewport(&w) {
            Ok(vp) => {
                let update = rl.borrow_mut().on_resize(vp);
                log::debug!(
                    "[resize] {}x{} @{}x",
                    update.surface_width,
                    update.surface_height,
                    update.pixel_ratio
                );
            }
            // minimised windows report a zero size; keep the last good one
            Err(e) => log::warn!("[resize] ignored: {}", e),
        }
    }) as Box<dyn FnMut()>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}
