// web/ - Browser bindings
//
// Everything that touches wasm-bindgen/web-sys lives under here. The page
// contract: a canvas with id `net-bg` (required) and optionally the quiz
// form markup that web/quiz.rs binds to.

mod quiz;
mod surface;

pub use surface::CanvasSurface;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use crate::sim::NetWorld;

const CANVAS_ID: &str = "net-bg";

struct App {
    world: NetWorld,
    surface: CanvasSurface,
}

impl App {
    /// Remeasure the viewport and propagate the new logical bounds.
    fn refresh_geometry(&mut self) {
        self.surface.resize();
        let (w, h) = self.surface.logical_size();
        self.world.resize(w, h);
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    // The form controller is optional: a page without the quiz markup
    // still gets the background field.
    match quiz::init(&document) {
        Ok(true) => log::info!("quiz controller attached"),
        Ok(false) => log::info!("no quiz form on this page"),
        Err(e) => log::error!("quiz controller failed to attach: {e:?}"),
    }

    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or("canvas #net-bg not found")?
        .dyn_into::<HtmlCanvasElement>()?;

    let mut surface = CanvasSurface::new(canvas)?;
    surface.resize();
    let (w, h) = surface.logical_size();
    let seed = (js_sys::Date::now() as u64) as u32;
    let world = NetWorld::new(w, h, seed);
    log::info!("field seeded at {w}x{h}");

    let app = Rc::new(RefCell::new(App { world, surface }));
    install_pointer_handlers(&window, &app)?;
    install_resize_handler(&window, &app)?;
    install_visibility_handler(&document, &app)?;
    start_frame_loop(&window, app)?;

    Ok(())
}

fn install_pointer_handlers(window: &Window, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let mouse_move = {
        let app = app.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            app.borrow_mut()
                .world
                .pointer_moved(e.client_x() as f32, e.client_y() as f32);
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    window.add_event_listener_with_callback("mousemove", mouse_move.as_ref().unchecked_ref())?;
    mouse_move.forget();

    let mouse_leave = {
        let app = app.clone();
        Closure::wrap(Box::new(move || {
            app.borrow_mut().world.pointer_left();
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("mouseleave", mouse_leave.as_ref().unchecked_ref())?;
    mouse_leave.forget();

    let touch_move = {
        let app = app.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            // First active touch only; an empty list is ignored.
            let Some(t) = e.touches().get(0) else { return };
            app.borrow_mut()
                .world
                .pointer_moved(t.client_x() as f32, t.client_y() as f32);
        }) as Box<dyn FnMut(TouchEvent)>)
    };
    window.add_event_listener_with_callback("touchmove", touch_move.as_ref().unchecked_ref())?;
    touch_move.forget();

    let touch_end = {
        let app = app.clone();
        Closure::wrap(Box::new(move || {
            app.borrow_mut().world.pointer_left();
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("touchend", touch_end.as_ref().unchecked_ref())?;
    touch_end.forget();

    Ok(())
}

fn install_resize_handler(window: &Window, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let on_resize = {
        let app = app.clone();
        Closure::wrap(Box::new(move || {
            app.borrow_mut().refresh_geometry();
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

fn install_visibility_handler(document: &Document, app: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let on_change = {
        let app = app.clone();
        let document = document.clone();
        Closure::wrap(Box::new(move || {
            if document.hidden() {
                return;
            }
            // Geometry may have changed while rendering was suspended;
            // remeasure and start the field over.
            let mut app = app.borrow_mut();
            app.refresh_geometry();
            app.world.reseed();
        }) as Box<dyn FnMut()>)
    };
    document
        .add_event_listener_with_callback("visibilitychange", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(())
}

// `f` holds the animation-frame closure so it can reschedule itself; the
// Option lets the Closure be created before a reference to it exists.
fn start_frame_loop(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |t: f64| {
        {
            let mut app = app.borrow_mut();
            let App { world, surface } = &mut *app;
            world.frame(t, surface);
        }
        // schedule next
        if let Some(window) = web_sys::window() {
            let _ = window
                .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));

    window.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;
    Ok(())
}
