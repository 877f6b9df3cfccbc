//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`], plus the [`Screen`] handed to a model while it animates.

use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use crate::canvas::{Canvas, Frame, compute_frame};
use crate::messages::Msg;

/// How long the idle loop waits for input before redrawing.
const IDLE_POLL: Duration = Duration::from_millis(16);

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A simple cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Hand the screen to [`Model::animate`] until it returns.
    Animate,
    /// Stop the application loop.
    End,
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `canvas`.
    fn draw(&self, canvas: &mut Canvas);

    /// Run a blocking animation, presenting intermediate frames through
    /// `screen`. Called after `update` returns [`Effect::Animate`]. The
    /// returned message, if any, is fed back into `update`.
    fn animate(&mut self, _screen: &mut Screen<'_>) -> Option<Msg> {
        None
    }
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait up to `timeout` for input and send every available message
    /// through `tx`. A zero timeout must not block.
    fn poll_msgs(&mut self, timeout: Duration, tx: &Sender<Msg>) -> Result<(), Box<dyn Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// The view of the driver a model gets while animating.
///
/// Input arriving during an animation is not delivered to the model. Only
/// interrupts are observed: Escape stops the animation, a quit request
/// stops it and is forwarded to the loop once the animation returns.
pub struct Screen<'a> {
    driver: &'a mut dyn Driver,
    prev: &'a mut Canvas,
    curr: &'a mut Canvas,
    ctx: &'a Context,
    interrupted: bool,
    forward: Vec<Msg>,
    error: Option<Box<dyn Error>>,
}

impl<'a> Screen<'a> {
    fn new(
        driver: &'a mut dyn Driver,
        prev: &'a mut Canvas,
        curr: &'a mut Canvas,
        ctx: &'a Context,
    ) -> Self {
        Self {
            driver,
            prev,
            curr,
            ctx,
            interrupted: false,
            forward: Vec::new(),
            error: None,
        }
    }

    /// Draw a frame with `draw` and flush the difference to the driver.
    ///
    /// A driver error interrupts the animation and is reported by the loop
    /// once [`Model::animate`] returns.
    pub fn present(&mut self, draw: impl FnOnce(&mut Canvas)) {
        if self.error.is_some() {
            return;
        }
        draw(&mut *self.curr);
        let frame = compute_frame(&*self.prev, &*self.curr);
        if !frame.is_empty() {
            if let Err(e) = self.driver.flush(frame) {
                self.fail(e);
                return;
            }
        }
        self.prev.clone_from(&*self.curr);
    }

    /// Whether the animation should stop. Never blocks.
    pub fn interrupted(&mut self) -> bool {
        self.poll(Duration::ZERO);
        self.interrupted
    }

    /// Wait for `d` while still watching for interrupts. Used for pacing.
    pub fn pause(&mut self, d: Duration) {
        if !self.interrupted {
            self.poll(d);
        }
    }

    fn poll(&mut self, timeout: Duration) {
        if self.ctx.is_done() {
            self.interrupted = true;
        }
        if self.error.is_some() {
            return;
        }
        let (tx, rx) = mpsc::channel();
        if let Err(e) = self.driver.poll_msgs(timeout, &tx) {
            self.fail(e);
            return;
        }
        for msg in rx.try_iter() {
            if !msg.is_interrupt() {
                if let Msg::Screen { .. } = msg {
                    self.forward.push(msg);
                }
                continue;
            }
            self.interrupted = true;
            if !matches!(msg, Msg::KeyDown { key: crate::Key::Escape, .. }) {
                self.forward.push(Msg::Quit);
            }
        }
    }

    fn fail(&mut self, e: Box<dyn Error>) {
        self.interrupted = true;
        self.error = Some(e);
    }
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    prev: Canvas,
    curr: Canvas,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            prev: Canvas::new(config.width, config.height),
            curr: Canvas::new(config.width, config.height),
        }
    }

    /// The model, e.g. to inspect its state after [`run`](App::run).
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the main Model-View-Update loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model.
    /// 3. Loops: poll → update → draw → diff → flush.
    /// 4. Stops when the model returns [`Effect::End`]; the driver is closed
    ///    on every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let result = self.event_loop();
        self.driver.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init)?;
        self.process_pending(&rx, &tx, &ctx)?;

        while !ctx.is_done() {
            self.driver.poll_msgs(IDLE_POLL, &tx)?;
            self.process_pending(&rx, &tx, &ctx)?;
        }
        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        tx: &Sender<Msg>,
        ctx: &Context,
    ) -> Result<(), Box<dyn Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { width, height, .. } = msg {
                self.prev.resize(width, height);
                self.curr.resize(width, height);
            }
            needs_draw = true;
            match self.model.update(msg) {
                None => {}
                Some(Effect::End) => {
                    ctx.cancel();
                    return Ok(());
                }
                Some(Effect::Animate) => self.animate(tx, ctx)?,
            }
        }

        if needs_draw {
            self.model.draw(&mut self.curr);
            let frame = compute_frame(&self.prev, &self.curr);
            if !frame.is_empty() {
                self.driver.flush(frame)?;
            }
            self.prev.clone_from(&self.curr);
        }
        Ok(())
    }

    fn animate(&mut self, tx: &Sender<Msg>, ctx: &Context) -> Result<(), Box<dyn Error>> {
        let mut screen = Screen::new(&mut self.driver, &mut self.prev, &mut self.curr, ctx);
        let reply = self.model.animate(&mut screen);
        if let Some(e) = screen.error.take() {
            return Err(e);
        }
        for msg in screen.forward.drain(..).chain(reply) {
            tx.send(msg)?;
        }
        Ok(())
    }
}
