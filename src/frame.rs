use crate::dom;
use crate::render;
use crate::titles::TitleNodes;
use parallax_core::{
    FrameSnapshot, InstantClock, ParticleField, Presenter, ProjectionUpdate, RunLoop,
};
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedLoop = Rc<RefCell<RunLoop<InstantClock, WebPresenter>>>;

/// Draws the scene into the canvas and writes title letter styles to the DOM.
/// Without a GPU the titles still animate.
pub struct WebPresenter {
    canvas: web::HtmlCanvasElement,
    gpu: Option<render::GpuState<'static>>,
    titles: Vec<TitleNodes>,
}

impl WebPresenter {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState<'static>>,
        titles: Vec<TitleNodes>,
    ) -> Self {
        Self { canvas, gpu, titles }
    }
}

impl Presenter for WebPresenter {
    type Error = wgpu::SurfaceError;

    fn present(&mut self, frame: &FrameSnapshot) -> Result<(), Self::Error> {
        for title in &frame.titles {
            if let Some(nodes) = self.titles.iter_mut().find(|n| n.section == title.section) {
                nodes.apply(&title.styles);
            }
        }
        match &mut self.gpu {
            Some(g) => g.render(frame),
            None => Ok(()),
        }
    }

    fn resize(&mut self, update: &ProjectionUpdate) {
        dom::sync_canvas_size(&self.canvas, update);
        if let Some(g) = &mut self.gpu {
            g.resize(self.canvas.width(), self.canvas.height());
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    field: &ParticleField,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, field).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(run_loop: SharedLoop) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if let ControlFlow::Continue(()) = run_loop.borrow_mut().tick() {
            request_frame(&tick_clone);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
