use crate::frame::session_ms;
use crate::input;
use crate::overlay::Presenter;
use drift_core::{PointerOutcome, Session};
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub session: Rc<RefCell<Session>>,
    pub presenter: Rc<RefCell<Presenter>>,
    pub clock_origin: Instant,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_click_outside(&w);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let pos = input::pointer_css_px(&ev, &w.canvas);
        w.session.borrow_mut().pointer_down(pos);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_css_px(&ev, &w.canvas);
        w.session.borrow_mut().pointer_move(pos);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_css_px(&ev, &w.canvas);
        let now = session_ms(w.clock_origin);
        let outcome = w.session.borrow_mut().pointer_up(pos, now);
        match outcome {
            PointerOutcome::Opened(plan) => w.presenter.borrow_mut().build(&plan),
            PointerOutcome::Missed => log::debug!("[click] nothing under ({:.0},{:.0})", pos.x, pos.y),
            PointerOutcome::OverlayActive => log::debug!("[click] overlay open, pick skipped"),
            PointerOutcome::Dragged | PointerOutcome::NoPress => {}
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let notches = input::wheel_notches(ev.delta_y(), ev.delta_mode());
        w.session.borrow_mut().wheel(notches);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

// Any click outside the primary card dismisses the overlay once it is armed.
fn wire_click_outside(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if !w.session.borrow().is_overlay_open() {
            return;
        }
        let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        let bounds = w
            .presenter
            .borrow()
            .primary_rect()
            .or_else(|| w.session.borrow().primary_bounds());
        let Some(bounds) = bounds else {
            return;
        };
        let now = session_ms(w.clock_origin);
        let dismissal = w.session.borrow_mut().click_outside(pos, bounds, now);
        if let Some(d) = dismissal {
            w.presenter.borrow_mut().dismiss(&d);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(doc) = crate::dom::window_document() {
        _ = doc.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}
