use crate::frame::SharedLoop;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the cursor over the whole window; the canvas sits behind the page
/// content and never receives pointer events itself.
pub fn wire_pointermove(run_loop: &SharedLoop) {
    let rl = run_loop.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        rl.borrow_mut()
            .on_pointer_move(ev.client_x() as f32, ev.client_y() as f32);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}
