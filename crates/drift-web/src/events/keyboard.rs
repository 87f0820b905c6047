use crate::input::{key_action, KeyAction};
use crate::overlay::Presenter;
use drift_core::Session;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    session: &Rc<RefCell<Session>>,
    presenter: &Rc<RefCell<Presenter>>,
) {
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    let mut s = session.borrow_mut();
    match action {
        KeyAction::Dismiss => {
            if let Some(d) = s.dismiss() {
                drop(s);
                presenter.borrow_mut().dismiss(&d);
            }
        }
        // the overlay owns both pause flags while it is open
        _ if s.is_overlay_open() => log::debug!("[keys] {:?} ignored while overlay open", action),
        KeyAction::ToggleAnimation => {
            let paused = !s.is_animation_paused();
            s.set_animation_paused(paused);
            log::info!("[keys] animation paused={}", paused);
            ev.prevent_default();
        }
        KeyAction::ToggleRotation => {
            let paused = !s.is_rotation_paused();
            s.set_rotation_paused(paused);
            log::info!("[keys] rotation paused={}", paused);
        }
    }
}

pub fn wire_global_keydown(session: Rc<RefCell<Session>>, presenter: Rc<RefCell<Presenter>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &session, &presenter);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
