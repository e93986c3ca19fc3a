//! The stroke surface: pointer input in, connected line segments out.
//!
//! Input handlers push surface-local points onto a FIFO queue. A
//! self-rescheduling frame loop drains the queue once per frame, stroking a
//! segment from the last committed point to each queued point in order.
//!
//! Everything runs on one cooperative thread. Shared state lives behind
//! `RefCell`s in an `Rc`; scheduled frames and input handlers hold only a
//! `Weak` so a dropped surface stops drawing instead of leaking.

use crate::error::SurfaceError;
use crate::geometry::{self, Point, Segment};
use crate::input::{InputEvent, InputSource};
use crate::mode::Mode;
use crate::options::ContextOptions;
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::surface::SurfaceHandle;
use std::cell::{Cell, Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// Transient per-stroke state. Reset by `stop` and `clear`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    /// Start of the next segment: the last rendered point, or the pointer-down position.
    pub last: Point,
    /// Points awaiting render, oldest first.
    pub pending: VecDeque<Point>,
    /// True between pointer-down and pointer-up.
    pub drawing: bool,
    pub mode: Mode,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            last: Point::ORIGIN,
            pending: VecDeque::new(),
            drawing: false,
            mode: Mode::Draw,
        }
    }
}

struct Shared<S: SurfaceHandle, F: FrameScheduler> {
    surface: RefCell<S>,
    scheduler: RefCell<F>,
    state: RefCell<DrawState>,
    /// The pending frame while the loop is running.
    frame: Cell<Option<FrameHandle>>,
    /// Bumped on every stop so a frame dispatched before cancellation
    /// cannot revive the loop.
    generation: Cell<u64>,
    options: ContextOptions,
}

/// A freehand drawing surface bound to a platform canvas.
///
/// Cloning yields another handle to the same surface.
pub struct StrokeSurface<S: SurfaceHandle, F: FrameScheduler> {
    shared: Rc<Shared<S, F>>,
}

impl<S: SurfaceHandle, F: FrameScheduler> Clone for StrokeSurface<S, F> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<S, F> StrokeSurface<S, F>
where
    S: SurfaceHandle + 'static,
    F: FrameScheduler + 'static,
{
    /// Bind to `surface`, apply `options` to its context and register with
    /// `input`. The frame loop is not started.
    pub fn new(
        surface: S,
        scheduler: F,
        input: &mut impl InputSource,
        options: ContextOptions,
    ) -> Result<Self, SurfaceError> {
        let shared = Rc::new(Shared {
            surface: RefCell::new(surface),
            scheduler: RefCell::new(scheduler),
            state: RefCell::new(DrawState::default()),
            frame: Cell::new(None),
            generation: Cell::new(0),
            options,
        });
        shared.set_mode(Mode::Draw);
        shared.apply_options();

        let weak = Rc::downgrade(&shared);
        input.listen(Rc::new(move |event: InputEvent| {
            weak.upgrade()
                .is_some_and(|shared| shared.handle_input(event))
        }))?;

        log::debug!(
            "stroke surface ready ({} context option(s))",
            shared.options.len()
        );
        Ok(Self { shared })
    }

    /// Start the frame loop, restarting it if already running.
    ///
    /// The first render step runs immediately; each step schedules the
    /// next before drawing. The loop runs until `stop`.
    pub fn start(&self) {
        self.stop();
        log::debug!("frame loop started");
        Shared::run_frame(&self.shared, self.shared.generation.get());
    }

    /// Cancel the frame loop and reset all transient draw state.
    pub fn stop(&self) {
        let shared = &self.shared;
        shared.reset_draw_state();
        shared.generation.set(shared.generation.get().wrapping_add(1));
        if let Some(handle) = shared.frame.take() {
            shared.scheduler.borrow_mut().cancel(handle);
            log::debug!("frame loop stopped");
        }
    }

    /// Erase every pixel and reset draw state. The repaint drops every
    /// context property back to platform defaults, construction options
    /// included. The frame loop keeps running.
    pub fn clear(&self) {
        let shared = &self.shared;
        shared.surface.borrow_mut().repaint();
        shared.reset_draw_state();
        log::debug!("surface cleared");
    }

    /// The surface contents as a data URI in the platform's default format.
    pub fn export_image(&self) -> Result<String, SurfaceError> {
        self.shared.surface.borrow().encode_image()
    }

    pub fn set_mode(&self, mode: Mode) {
        self.shared.set_mode(mode);
    }

    /// Feed one input event, exactly as a registered source would.
    /// Returns `false` when swallowed because the loop is not running.
    pub fn handle_input(&self, event: InputEvent) -> bool {
        self.shared.handle_input(event)
    }

    /// Run one render step now. Returns the number of segments drawn.
    pub fn stroke(&self) -> usize {
        self.shared.stroke()
    }
}

impl<S: SurfaceHandle, F: FrameScheduler> StrokeSurface<S, F> {
    pub fn is_running(&self) -> bool {
        self.shared.frame.get().is_some()
    }

    pub fn state(&self) -> DrawState {
        self.shared.state.borrow().clone()
    }

    pub fn last_point(&self) -> Point {
        self.shared.state.borrow().last
    }

    pub fn is_drawing(&self) -> bool {
        self.shared.state.borrow().drawing
    }

    pub fn mode(&self) -> Mode {
        self.shared.state.borrow().mode
    }

    pub fn pending_len(&self) -> usize {
        self.shared.state.borrow().pending.len()
    }

    pub fn options(&self) -> &ContextOptions {
        &self.shared.options
    }

    /// Borrow the underlying surface. Do not hold across a frame or event.
    pub fn surface(&self) -> Ref<'_, S> {
        self.shared.surface.borrow()
    }

    /// Run `f` with exclusive access to the underlying surface.
    pub fn with_surface_mut<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.shared.surface.borrow_mut())
    }
}

impl<S, F> Shared<S, F>
where
    S: SurfaceHandle + 'static,
    F: FrameScheduler + 'static,
{
    fn run_frame(this: &Rc<Self>, generation: u64) {
        if this.generation.get() != generation {
            return;
        }

        let weak = Rc::downgrade(this);
        let scheduled = this.scheduler.borrow_mut().schedule(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                Shared::run_frame(&shared, generation);
            }
        }));
        match scheduled {
            Ok(handle) => this.frame.set(Some(handle)),
            Err(e) => {
                log::error!("frame loop halted: {e}");
                this.frame.set(None);
            }
        }

        this.stroke();
    }
}

impl<S: SurfaceHandle, F: FrameScheduler> Shared<S, F> {
    fn stroke(&self) -> usize {
        let mut state = self.state.borrow_mut();
        if state.pending.is_empty() && !state.drawing {
            return 0;
        }

        let mut surface = self.surface.borrow_mut();
        let mut drawn = 0;
        while let Some(next) = state.pending.pop_front() {
            surface.draw_segment(Segment::new(state.last, next));
            state.last = next;
            drawn += 1;
        }
        if drawn > 0 {
            log::debug!("drew {drawn} segment(s), last at {:?}", state.last);
        }
        drawn
    }

    fn handle_input(&self, event: InputEvent) -> bool {
        if self.frame.get().is_none() {
            log::trace!("ignoring {event:?}: frame loop not running");
            return false;
        }

        match event {
            InputEvent::PointerDown { client, .. } => {
                let local = self.to_local(client);
                let mut state = self.state.borrow_mut();
                state.drawing = true;
                state.last = local;
            }
            InputEvent::PointerMove { client, .. } => {
                if self.state.borrow().drawing {
                    let local = self.to_local(client);
                    self.state.borrow_mut().pending.push_back(local);
                }
            }
            InputEvent::PointerUp { .. } => {
                self.state.borrow_mut().drawing = false;
            }
        }
        log::trace!("handled {event:?}");
        true
    }

    fn to_local(&self, client: Point) -> Point {
        geometry::to_local(client, self.surface.borrow().bounding_offset())
    }

    fn set_mode(&self, mode: Mode) {
        self.state.borrow_mut().mode = mode;
        self.surface
            .borrow_mut()
            .set_composite_operation(mode.composite_operation());
    }

    fn apply_options(&self) {
        let mut surface = self.surface.borrow_mut();
        for (name, value) in self.options.iter() {
            surface.set_context_property(name, value);
        }
    }

    fn reset_draw_state(&self) {
        *self.state.borrow_mut() = DrawState::default();
        self.set_mode(Mode::Draw);
    }
}

impl<S: SurfaceHandle, F: FrameScheduler> Drop for Shared<S, F> {
    fn drop(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.get_mut().cancel(handle);
        }
    }
}
