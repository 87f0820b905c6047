#![cfg(target_arch = "wasm32")]
use drift_core::{SceneParams, Session};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;
mod style;

// Keeps the canvas backing store and the session viewport in step with the window.
fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, session: &Rc<RefCell<Session>>) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let session_resize = session.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        session_resize.borrow_mut().resize(dom::viewport());
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("drift-web starting");

    spawn_local(async move {
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

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let seed: u64 = rand::random();
    let session = Rc::new(RefCell::new(Session::new(
        SceneParams::default(),
        dom::viewport(),
        seed,
    )?));
    let presenter = Rc::new(RefCell::new(overlay::Presenter::new(document)?));

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas, &session);

    let clusters = session.borrow().clusters().to_vec();
    let gpu = frame::init_gpu(&canvas, &clusters).await;

    events::wire_global_keydown(session.clone(), presenter.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        session: session.clone(),
        presenter: presenter.clone(),
        clock_origin: Instant::now(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        presenter,
        canvas,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
