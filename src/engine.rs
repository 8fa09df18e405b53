use crate::browser;
use anyhow::{anyhow, Error, Result};
// web assembly is a single threaded environment, so Rc RefCell > Mutex
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref (unsafe) cast from Javascript type to Rust type
    // - we create the closures ourselves and know the expected type
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use self::input::{KeyPress, KeyState};

/// ┌──────────────────────── Frame Loop ─────────────────────────┐
/// │ requestAnimationFrame(perf)                                 │
/// │   ├─► drain queued KeyPress -> KeyState + Game::on_key      │
/// │   ├─► FramePacer::advance(perf) x Game::update(&KeyState)   │
/// │   ├─► Game::draw(&Renderer)                                 │
/// │   └─► requestAnimationFrame(self)                           │
/// └─────────────────────────────────────────────────────────────┘
#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn update(&mut self, keystate: &KeyState);
    fn draw(&self, renderer: &Renderer);

    /// Discrete key transitions, delivered before the frame's updates
    fn on_key(&mut self, _press: &KeyPress) {}

    fn frame_pacing(&self) -> FramePacing {
        FramePacing::PerFrame
    }
}

// length of a frame in milliseconds
const FRAME_SIZE: f32 = 1.0 / 60.0 * 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePacing {
    /// One update per display refresh. Speed follows the refresh rate.
    PerFrame,
    /// Updates at a fixed 60Hz regardless of the refresh rate
    Fixed,
}

/// Decides how many update steps each animation frame gets
#[derive(Debug, Clone)]
pub struct FramePacer {
    pacing: FramePacing,
    last_frame: f64,
    accumulated_delta: f32,
}

impl FramePacer {
    pub fn new(pacing: FramePacing, start: f64) -> Self {
        FramePacer {
            pacing,
            last_frame: start,
            accumulated_delta: 0.0,
        }
    }

    pub fn advance(&mut self, perf: f64) -> u32 {
        let steps = match self.pacing {
            FramePacing::PerFrame => 1,
            FramePacing::Fixed => {
                self.accumulated_delta += (perf - self.last_frame) as f32;
                let mut steps = 0;
                while self.accumulated_delta > FRAME_SIZE {
                    steps += 1;
                    self.accumulated_delta -= FRAME_SIZE;
                }
                steps
            }
        };
        self.last_frame = perf;
        steps
    }
}

pub struct GameLoop;

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut game = game.initialize().await?;
        let mut keyevent_receiver = input::prepare_input()?;
        let mut keystate = KeyState::new();
        let mut pacer = FramePacer::new(game.frame_pacing(), browser::now()?);
        let renderer = Renderer {
            context: browser::context()?,
        };
        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            for press in input::drain(&mut keyevent_receiver) {
                keystate.apply(&press);
                game.on_key(&press);
            }
            for _ in 0..pacer.advance(perf) {
                game.update(&keystate);
            }
            game.draw(&renderer);
            if let Some(callback) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(callback) {
                    error!("GameLoop: {:#}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

// ==================== Geometry ====================
// canvas space : origin top left, +y points down
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    pub fn new_from_x_y(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect::new(Point { x, y }, Size { width, height })
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.height
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.position.x + self.size.width * 0.5,
            y: self.position.y + self.size.height * 0.5,
        }
    }

    /// Axis aligned overlap test
    /// - separated only when one edge lies strictly past the opposite edge
    /// - touching edges count as a hit
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.x() > self.right()
            || other.right() < self.x()
            || other.y() > self.bottom()
            || other.bottom() < self.y())
    }
}

// ==================== Rendering ====================
pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn clear(&self, rect: &Rect) {
        self.context.clear_rect(
            rect.x().into(),
            rect.y().into(),
            rect.size.width.into(),
            rect.size.height.into(),
        );
    }

    pub fn draw_entire_image(&self, image: &HtmlImageElement, destination: &Rect) {
        if let Err(err) = self.context.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            destination.x().into(),
            destination.y().into(),
            destination.size.width.into(),
            destination.size.height.into(),
        ) {
            error!("Renderer: could not draw image : {:#?}", err);
        }
    }

    /// Draws with a css filter (e.g. `hue-rotate(180deg)`) scoped to this call
    pub fn draw_filtered_image(&self, image: &HtmlImageElement, destination: &Rect, filter: &str) {
        self.context.save();
        self.context.set_filter(filter);
        self.draw_entire_image(image, destination);
        self.context.restore();
    }

    pub fn save(&self) {
        self.context.save();
    }

    pub fn restore(&self) {
        self.context.restore();
    }

    /// rotate the canvas around `center` instead of the canvas origin
    pub fn rotate_about(&self, center: Point, radians: f32) {
        let (x, y): (f64, f64) = (center.x.into(), center.y.into());
        let result = self
            .context
            .translate(x, y)
            .and_then(|_| self.context.rotate(radians.into()))
            .and_then(|_| self.context.translate(-x, -y));
        if let Err(err) = result {
            error!("Renderer: could not rotate : {:#?}", err);
        }
    }

    pub fn fill_circle(&self, center: Point, radius: f32, color: &str, alpha: f32) {
        self.context.save();
        self.context.set_fill_style_str(color);
        self.context.set_global_alpha(alpha.into());
        self.context.begin_path();
        match self.context.arc(
            center.x.into(),
            center.y.into(),
            radius.into(),
            0.0,
            std::f64::consts::TAU,
        ) {
            Ok(()) => self.context.fill(),
            Err(err) => error!("Renderer: could not draw arc : {:#?}", err),
        }
        self.context.restore();
    }

    pub fn stroke_rect(&self, rect: &Rect, color: &str) {
        self.context.save();
        self.context.set_stroke_style_str(color);
        self.context.stroke_rect(
            rect.x().into(),
            rect.y().into(),
            rect.size.width.into(),
            rect.size.height.into(),
        );
        self.context.restore();
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::create_html_image_element()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let source_name = source.to_string();
    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!(
                "[engine.rs::load_image] Error loading image {}: {:#?}",
                source_name,
                err
            )));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callback alive until image is loaded or errors
    success_callback.forget();
    error_callback.forget();

    // ?? - Result<Result<(), Error>, oneshot::Canceled>
    // - first ? yields the channel result
    // - second ? yields the image load result
    rx.await??;

    Ok(image)
}

// ==================== Input ====================
pub mod input {
    use crate::browser;
    use anyhow::Result;
    use futures::channel::mpsc::{unbounded, UnboundedReceiver};
    use std::collections::HashMap;
    use wasm_bindgen::JsCast;

    /// Raw key transition, identified by `KeyboardEvent.code`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum KeyPress {
        KeyDown(String),
        KeyUp(String),
    }

    /// Current pressed state per key code
    #[derive(Debug, Default, Clone)]
    pub struct KeyState {
        pressed_keys: HashMap<String, bool>,
    }

    impl KeyState {
        pub fn new() -> Self {
            KeyState::default()
        }

        pub fn is_pressed(&self, code: &str) -> bool {
            self.pressed_keys.get(code).copied().unwrap_or(false)
        }

        pub fn set_pressed(&mut self, code: &str) {
            self.pressed_keys.insert(code.to_string(), true);
        }

        pub fn set_released(&mut self, code: &str) {
            self.pressed_keys.insert(code.to_string(), false);
        }

        pub fn apply(&mut self, press: &KeyPress) {
            match press {
                KeyPress::KeyDown(code) => self.set_pressed(code),
                KeyPress::KeyUp(code) => self.set_released(code),
            }
        }
    }

    /// Hooks document keydown/keyup and forwards them over a channel
    /// - the listeners never touch game state, the frame loop drains the
    ///   channel at the start of every frame
    pub fn prepare_input() -> Result<UnboundedReceiver<KeyPress>> {
        let (keydown_sender, keyevent_receiver) = unbounded();
        let keyup_sender = keydown_sender.clone();

        let onkeydown = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            let _ = keydown_sender.unbounded_send(KeyPress::KeyDown(event.code()));
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

        let onkeyup = browser::closure_wrap(Box::new(move |event: web_sys::KeyboardEvent| {
            let _ = keyup_sender.unbounded_send(KeyPress::KeyUp(event.code()));
        }) as Box<dyn FnMut(web_sys::KeyboardEvent)>);

        let document = browser::document()?;
        document.set_onkeydown(Some(onkeydown.as_ref().unchecked_ref()));
        document.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
        // listeners live for the lifetime of the page
        onkeydown.forget();
        onkeyup.forget();

        Ok(keyevent_receiver)
    }

    /// Everything queued since the last frame, in arrival order
    pub fn drain(receiver: &mut UnboundedReceiver<KeyPress>) -> Vec<KeyPress> {
        let mut presses = Vec::new();
        // Err -> nothing queued right now, or the channel is closed
        while let Ok(press) = receiver.try_recv() {
            presses.push(press);
        }
        presses
    }

}
