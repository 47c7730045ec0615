use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

pub mod animation;
pub mod data;
pub mod growth;
pub mod math;
pub mod particles;
pub mod render;

use animation::{AnimationFrames, FrameId, PhaseScheduler};
use data::{LayoutClass, Scene, ShowConfig};
use render::Canvas2dSurface;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Everything the frame callback touches
struct Stage {
    canvas: HtmlCanvasElement,
    surface: Canvas2dSurface,
    scheduler: PhaseScheduler<AnimationFrames>,
    config: ShowConfig,
    /// Id of the outstanding `requestAnimationFrame`
    pending: Rc<Cell<Option<FrameId>>>,
    /// Set by the scheduler when a run reaches Done
    finished: Rc<Cell<bool>>,
    on_finished: Option<js_sys::Function>,
    /// Last CSS size handed to `resize`
    size: Option<(f64, f64)>,
}

impl Stage {
    /// Paint one frame. Returns the JS hook to call once the borrow is released.
    fn tick(&mut self, now_ms: f64) -> Option<js_sys::Function> {
        let frame = self.pending.take()?;
        self.scheduler.on_frame(frame, now_ms, &mut self.surface);
        if self.finished.replace(false) {
            self.on_finished.clone()
        } else {
            None
        }
    }

    fn start_run(&mut self, css_width: f64, css_height: f64) -> Result<(), String> {
        let layout = LayoutClass::classify(css_width, css_height, self.config.layouts.compact_width);
        let scene = Scene::derive(css_width, css_height, layout, &self.config);
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.scheduler.start_run(scene, &mut rng)?;
        self.size = Some((css_width, css_height));
        Ok(())
    }
}

fn on_tick(stage: &Weak<RefCell<Stage>>, now_ms: f64) {
    let Some(stage) = stage.upgrade() else {
        return;
    };
    let hook = match stage.try_borrow_mut() {
        Ok(mut guard) => guard.tick(now_ms),
        Err(_) => {
            log::warn!("frame fired while the stage was busy");
            return;
        }
    };
    // The hook may call straight back into HeartTree
    if let Some(hook) = hook {
        if let Err(e) = hook.call0(&JsValue::NULL) {
            log::error!("finished hook threw: {:?}", e);
        }
    }
}

/// Growing branch with a bloom of hearts, drawn on a 2D canvas
#[wasm_bindgen]
pub struct HeartTree {
    stage: Rc<RefCell<Stage>>,
}

#[wasm_bindgen]
impl HeartTree {
    /// Create the show for `canvas`. Nothing is drawn until the first `resize`.
    ///
    /// `config_yaml` overrides the stock show; `on_finished` is called once
    /// per run when it completes.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        on_finished: Option<js_sys::Function>,
        config_yaml: Option<String>,
    ) -> Result<HeartTree, JsValue> {
        let config = match config_yaml.as_deref() {
            Some(yaml) => ShowConfig::from_yaml(yaml).map_err(|e| JsValue::from_str(&e))?,
            None => ShowConfig::default(),
        };
        let window = web_sys::window().ok_or("No window available")?;
        let surface = Canvas2dSurface::from_canvas(&canvas).map_err(|e| JsValue::from_str(&e))?;

        let pending = Rc::new(Cell::new(None));
        let finished = Rc::new(Cell::new(false));

        let stage = Rc::new_cyclic(|weak: &Weak<RefCell<Stage>>| {
            let weak = weak.clone();
            let tick = Closure::wrap(Box::new(move |ts: f64| on_tick(&weak, ts)) as Box<dyn FnMut(f64)>);

            let mut scheduler = PhaseScheduler::new(AnimationFrames::new(window, tick, pending.clone()));
            let flag = finished.clone();
            scheduler.set_on_finished(move || flag.set(true));

            RefCell::new(Stage {
                canvas,
                surface,
                scheduler,
                config,
                pending,
                finished,
                on_finished,
                size: None,
            })
        });

        log::info!("heart tree ready");
        Ok(Self { stage })
    }

    /// Fit the canvas to `css_width` x `css_height` at `dpr` and restart the show
    pub fn resize(&self, css_width: f64, css_height: f64, dpr: f64) -> Result<(), JsValue> {
        let mut guard = self.stage.borrow_mut();
        let stage = &mut *guard;
        stage
            .surface
            .fit(&stage.canvas, css_width, css_height, dpr)
            .map_err(|e| JsValue::from_str(&e))?;
        stage.start_run(css_width, css_height).map_err(|e| JsValue::from_str(&e))
    }

    /// Run the show again at the last size
    pub fn restart(&self) -> Result<(), JsValue> {
        let mut stage = self.stage.borrow_mut();
        let (w, h) = stage.size.ok_or("resize must be called before restart")?;
        stage.start_run(w, h).map_err(|e| JsValue::from_str(&e))
    }

    /// Cancel the current run; the finished hook is not called
    pub fn stop(&self) {
        self.stage.borrow_mut().scheduler.stop();
    }

    /// Current phase name, or `idle` when no run exists
    pub fn phase(&self) -> String {
        self.stage
            .borrow()
            .scheduler
            .phase()
            .map_or("idle", |phase| phase.as_str())
            .to_string()
    }

    /// Layout class of the current run
    pub fn layout(&self) -> Option<String> {
        let stage = self.stage.borrow();
        stage.scheduler.show().map(|show| show.scene().layout.as_str().to_string())
    }

    /// Whether a run is in flight
    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        let stage = self.stage.borrow();
        stage.scheduler.handle().map_or(false, |handle| !handle.is_finished())
    }

    #[wasm_bindgen(js_name = heartCount)]
    pub fn heart_count(&self) -> usize {
        let stage = self.stage.borrow();
        stage.scheduler.show().map_or(0, |show| show.particles().count())
    }
}

impl Drop for HeartTree {
    fn drop(&mut self) {
        // A frame left pending would call into a dropped closure
        if let Ok(mut stage) = self.stage.try_borrow_mut() {
            stage.scheduler.stop();
        }
    }
}
