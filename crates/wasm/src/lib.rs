#![deny(unsafe_code)]
//! Browser front end for the flow-field animation.
//!
//! [`FlowFieldApp`] binds a [`Player`] to a `<canvas>` element: trails are
//! stroked through the 2D context ([`canvas::WebCanvas`]) and the loop is
//! paced by `requestAnimationFrame` ([`frame::AnimationFrames`]). The page
//! wires its buttons and the window `resize` event to the exported methods.

pub mod canvas;
pub mod frame;

use canvas::WebCanvas;
use flowfield_core::{EffectConfig, FlowError, Player, StrokeStyle};
use frame::AnimationFrames;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

type CanvasPlayer = Player<WebCanvas, AnimationFrames>;

#[wasm_bindgen]
pub struct FlowFieldApp {
    player: Rc<RefCell<CanvasPlayer>>,
    canvas: HtmlCanvasElement,
    style: StrokeStyle,
    _tick: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl FlowFieldApp {
    /// Attaches to the canvas with id `canvas_id`, sized `width` x `height`.
    ///
    /// `params` is a JSON object with any of `no_of_particles`, `cell_size`,
    /// `curve`, `zoom` and `seed`; a random seed is drawn when `seed` is
    /// absent. The animation starts stopped.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, width: u32, height: u32, params: &str) -> Result<FlowFieldApp, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {canvas_id:?}")))?
            .dyn_into()?;

        let config = config_from_params(params, random_seed).map_err(|e| JsValue::from_str(&e))?;
        let style = StrokeStyle::default();
        let surface = WebCanvas::attach(&canvas, width, height, style)?;
        let player = Player::with_scheduler(surface, AnimationFrames::new(window), config)
            .map_err(to_js)?;
        let player = Rc::new(RefCell::new(player));

        let weak = Rc::downgrade(&player);
        let tick = Closure::<dyn FnMut()>::new(move || {
            let Some(player) = weak.upgrade() else {
                return;
            };
            if let Err(e) = player.borrow_mut().fire() {
                web_sys::console::error_1(&to_js(e));
            };
        });
        player
            .borrow_mut()
            .scheduler_mut()
            .set_callback(tick.as_ref().unchecked_ref::<js_sys::Function>().clone());

        Ok(FlowFieldApp {
            player,
            canvas,
            style,
            _tick: tick,
        })
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.player.borrow_mut().start().map_err(to_js)
    }

    pub fn stop(&self) {
        self.player.borrow_mut().stop();
    }

    /// Flips between running and stopped; returns whether it now runs.
    pub fn toggle(&self) -> Result<bool, JsValue> {
        self.player.borrow_mut().toggle().map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.player.borrow().is_running()
    }

    /// Rebuilds the effect with new parameters and a fresh random seed.
    pub fn refresh(&self, no_of_particles: usize, cell_size: f64, curve: f64, zoom: f64) -> Result<(), JsValue> {
        let config = EffectConfig {
            no_of_particles,
            cell_size,
            curve,
            zoom,
            seed: random_seed(),
        };
        self.player.borrow_mut().rebuild(config).map_err(to_js)
    }

    /// Resizes the canvas and rebuilds the effect for the new size.
    ///
    /// When the new size cannot hold a flow field the canvas goes back to its
    /// previous size and the current animation carries on. If the resized
    /// effect cannot get a frame the canvas keeps its new size and the
    /// animation stops.
    pub fn resize(&self, width: u32, height: u32) -> Result<(), JsValue> {
        let previous = (self.canvas.width(), self.canvas.height());
        let surface = WebCanvas::attach(&self.canvas, width, height, self.style)?;
        let resized = self.player.borrow_mut().resize(surface);
        match resized {
            Ok(()) => Ok(()),
            Err(e @ FlowError::Scheduler(_)) => Err(to_js(e)),
            Err(e) => {
                WebCanvas::attach(&self.canvas, previous.0, previous.1, self.style)?;
                Err(to_js(e))
            }
        }
    }

    /// Active parameters as a JSON string.
    pub fn params(&self) -> String {
        self.player.borrow().config().to_json().to_string()
    }
}

impl Drop for FlowFieldApp {
    fn drop(&mut self) {
        // The pending frame would otherwise fire into a dropped closure.
        self.player.borrow_mut().stop();
    }
}

fn to_js(e: FlowError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}

/// Parses the constructor's params JSON. `seed` is only called when the
/// object carries no `"seed"` key.
fn config_from_params(params: &str, seed: impl FnOnce() -> u64) -> Result<EffectConfig, String> {
    let value: serde_json::Value = if params.trim().is_empty() {
        serde_json::Value::Object(Default::default())
    } else {
        serde_json::from_str(params).map_err(|e| format!("invalid params JSON: {e}"))?
    };
    let mut config = EffectConfig::from_json(&value);
    if value.get("seed").is_none() {
        config.seed = seed();
    }
    Ok(config)
}
