mod utils;

pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod particle;
pub mod render;
pub mod surface;

pub use crate::config::FieldConfig;
pub use crate::error::FieldError;
pub use crate::field::{FieldState, Viewport};
pub use crate::particle::Particle;
pub use crate::render::{render, FrameStats};
pub use crate::surface::{RecordingSurface, Surface};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use utils::Timer;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, Window};

pub const DEFAULT_HOST_SELECTOR: &str = ".hero";

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_tracing();
}

// Everything one frame needs, shared between the frame loop and the resize
// listener. Both borrow it only for the length of a synchronous callback, so
// a resize always lands between two frames.
struct Animation {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    config: FieldConfig,
    field: FieldState,
}

impl Animation {
    fn frame(&mut self) -> Result<FrameStats, JsValue> {
        let _timer = if self.config.profile {
            Some(Timer::new("ParticleBackground::frame"))
        } else {
            None
        };
        self.field.tick();
        render(&self.field, &self.config, &mut self.ctx)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.field.resize(Viewport::new(width as f64, height as f64));
    }
}

#[wasm_bindgen]
pub struct ParticleBackground {
    animation: Rc<RefCell<Animation>>,
    running: Rc<Cell<bool>>,
    // Bumped on every start/stop so a superseded frame loop notices and exits
    generation: Rc<Cell<u32>>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Drives a canvas the caller already owns. `seed` makes the field
    /// reproducible; without it the generator is seeded from entropy.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        config_json: &str,
        seed: Option<u32>,
    ) -> Result<ParticleBackground, JsValue> {
        let config = FieldConfig::from_json(config_json)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed as u64),
            None => StdRng::from_entropy(),
        };
        Ok(ParticleBackground::with_canvas(canvas, config, rng)?)
    }

    /// Creates a background canvas inside the first element matching
    /// `selector` (`.hero` when empty) and starts animating it.
    ///
    /// Returns `undefined` when no such element exists; the page simply has
    /// no particle background then.
    pub fn attach(selector: &str, config_json: &str) -> Result<Option<ParticleBackground>, JsValue> {
        let config = FieldConfig::from_json(config_json)?;
        let selector = if selector.is_empty() {
            DEFAULT_HOST_SELECTOR
        } else {
            selector
        };
        Ok(ParticleBackground::attach_to(selector, config)?)
    }

    /// Runs a single tick and render by hand.
    pub fn frame(&self) -> Result<(), JsValue> {
        self.animation.borrow_mut().frame()?;
        Ok(())
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.animation.borrow_mut().resize(width, height);
    }

    /// Schedules a tick and render on every animation frame until `stop` is
    /// called or the canvas leaves the document.
    pub fn start(&self) -> Result<(), JsValue> {
        if self.running.get() {
            return Ok(());
        }
        let window = window()?;
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);
        self.running.set(true);

        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        let animation = self.animation.clone();
        let running = self.running.clone();
        let current = self.generation.clone();
        let loop_window = window.clone();

        *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let superseded = current.get() != generation;
            if superseded || !animation.borrow().canvas.is_connected() {
                debug!(superseded, "particle animation stopped");
                if !superseded {
                    running.set(false);
                }
                // Drop our handle to this closure so it is freed once we return
                let _ = f.borrow_mut().take();
                return;
            }

            if let Err(e) = animation.borrow_mut().frame() {
                error!(?e, "particle frame failed");
            }

            if let Some(callback) = f.borrow().as_ref() {
                if let Err(e) = loop_window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    error!(?e, "failed to schedule next particle frame");
                    running.set(false);
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(callback) = g.borrow().as_ref() {
            window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        }
        info!("particle animation started");
        Ok(())
    }

    pub fn stop(&self) {
        self.running.set(false);
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.running.get()
    }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> usize {
        self.animation.borrow().field.particles().len()
    }
}

impl ParticleBackground {
    pub fn with_canvas(
        canvas: HtmlCanvasElement,
        config: FieldConfig,
        mut rng: StdRng,
    ) -> Result<ParticleBackground, FieldError> {
        config.validate()?;
        let ctx = canvas
            .get_context("2d")
            .map_err(FieldError::dom)?
            .ok_or_else(|| FieldError::Dom("canvas has no 2d context".to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::Dom("2d context has unexpected type".to_owned()))?;

        let viewport = Viewport::new(canvas.width() as f64, canvas.height() as f64);
        let field = FieldState::initialize(viewport, &config, &mut rng);

        Ok(ParticleBackground {
            animation: Rc::new(RefCell::new(Animation {
                canvas,
                ctx,
                config,
                field,
            })),
            running: Rc::new(Cell::new(false)),
            generation: Rc::new(Cell::new(0)),
            on_resize: None,
        })
    }

    // The canvas only joins the host once it has a working 2d context
    fn mount(
        host: &HtmlElement,
        canvas: HtmlCanvasElement,
        config: FieldConfig,
        rng: StdRng,
    ) -> Result<ParticleBackground, FieldError> {
        let background = ParticleBackground::with_canvas(canvas.clone(), config, rng)?;
        host.append_child(&canvas).map_err(FieldError::dom)?;
        Ok(background)
    }

    fn attach_to(selector: &str, config: FieldConfig) -> Result<Option<ParticleBackground>, FieldError> {
        let window = window()?;
        let document = document(&window)?;
        let host = match document.query_selector(selector).map_err(FieldError::dom)? {
            Some(host) => host
                .dyn_into::<HtmlElement>()
                .map_err(|_| FieldError::Dom(format!("{} is not an HTML element", selector)))?,
            None => {
                warn!(selector, "no host element, particle background disabled");
                return Ok(None);
            }
        };

        let canvas = document
            .create_element("canvas")
            .map_err(FieldError::dom)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FieldError::Dom("created element is not a canvas".to_owned()))?;
        style_background_canvas(&canvas, config.canvas_opacity)?;
        let (width, height) = host_size(&host);
        canvas.set_width(width);
        canvas.set_height(height);

        let mut background = ParticleBackground::mount(&host, canvas, config, StdRng::from_entropy())?;

        let animation = background.animation.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            let (width, height) = host_size(&host);
            animation.borrow_mut().resize(width, height);
        }) as Box<dyn FnMut()>);
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(FieldError::dom)?;
        background.on_resize = Some(on_resize);

        background.start().map_err(FieldError::dom)?;
        info!(selector, width, height, "particle background attached");
        Ok(Some(background))
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.stop();
        if let (Some(on_resize), Some(window)) = (self.on_resize.take(), web_sys::window()) {
            let _ = window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        }
    }
}

fn window() -> Result<Window, FieldError> {
    web_sys::window().ok_or_else(|| FieldError::Dom("no global window".to_owned()))
}

fn document(window: &Window) -> Result<Document, FieldError> {
    window
        .document()
        .ok_or_else(|| FieldError::Dom("window has no document".to_owned()))
}

fn host_size(host: &HtmlElement) -> (u32, u32) {
    (host.offset_width().max(0) as u32, host.offset_height().max(0) as u32)
}

// Full-bleed overlay behind the hero content that never eats pointer events
fn style_background_canvas(canvas: &HtmlCanvasElement, opacity: f64) -> Result<(), FieldError> {
    let style = canvas.style();
    let opacity = opacity.to_string();
    let properties = [
        ("position", "absolute"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("pointer-events", "none"),
        ("opacity", opacity.as_str()),
        ("z-index", "0"),
    ];
    for (name, value) in properties.iter() {
        style.set_property(name, value).map_err(FieldError::dom)?;
    }
    Ok(())
}
