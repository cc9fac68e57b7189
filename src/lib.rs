#![cfg(target_arch = "wasm32")]
use parallax_core::{
    Coordinator, InstantClock, ParticleField, RunLoop, SceneParams, PARTICLE_SPREAD,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod panel;
mod render;
mod titles;

use constants::CANVAS_SELECTOR;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("parallax-web starting");
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .query_selector(CANVAS_SELECTOR)
        .map_err(dom::js_err)?
        .ok_or_else(|| anyhow::anyhow!("missing {}", CANVAS_SELECTOR))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{} is not a canvas: {:?}", CANVAS_SELECTOR, e))?;

    let viewport = dom::viewport(&window)?;
    let (sections, titles) = dom::collect_sections(&document)?;
    log::info!("[init] {} sections, {} titles", sections.len(), titles.len());

    let params = SceneParams::default();
    let field = ParticleField::scatter(
        params.particle_count,
        sections.len().max(3),
        params.object_spacing,
        params.particle_seed,
    );
    log::debug!("[init] {} particles over ±{} units", field.len(), PARTICLE_SPREAD);

    dom::sync_canvas_size(&canvas, &viewport.projection_update());
    let gpu = frame::init_gpu(&canvas, &field).await;
    let presenter = frame::WebPresenter::new(canvas, gpu, titles);

    let coordinator = Coordinator::new(params, viewport, sections);
    let run_loop: frame::SharedLoop = Rc::new(RefCell::new(RunLoop::new(
        coordinator,
        InstantClock::new(),
        presenter,
    )));
    {
        let mut rl = run_loop.borrow_mut();
        rl.start();
        // a reload can restore a scroll position; settle onto that section
        rl.on_scroll(dom::scroll_y(&window));
    }

    events::wire_pointermove(&run_loop);
    events::wire_scroll(&run_loop);
    events::wire_resize(&run_loop);
    panel::wire_material_color(&document, &run_loop);

    frame::start_loop(run_loop);
    Ok(())
}
