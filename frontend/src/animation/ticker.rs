use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Interval;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Window;

use super::easing::Step;
use super::error::FrameError;

/// What drives the easing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickSource {
    /// One tick per display refresh via `requestAnimationFrame`.
    #[default]
    AnimationFrame,
    /// Fixed-rate timer with the given period in milliseconds.
    Interval(u32),
}

/// A running tick loop. Dropping it cancels any pending tick.
pub struct TickLoop {
    _driver: Driver,
}

// Held only to be dropped
enum Driver {
    AnimationFrame { _frames: AnimationFrameLoop },
    Interval { _timer: Rc<RefCell<Option<Interval>>> },
}

impl TickLoop {
    /// Calls `on_tick` once per tick until it returns something other than
    /// [`Step::Moving`].
    pub fn start(
        source: TickSource,
        on_tick: impl FnMut() -> Step + 'static,
    ) -> Result<Self, FrameError> {
        let driver = match source {
            TickSource::AnimationFrame => Driver::AnimationFrame {
                _frames: AnimationFrameLoop::start(on_tick)?,
            },
            TickSource::Interval(period_ms) => Driver::Interval {
                _timer: start_interval(period_ms, on_tick),
            },
        };
        Ok(Self { _driver: driver })
    }
}

struct AnimationFrameLoop {
    window: Window,
    pending: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl AnimationFrameLoop {
    fn start(mut on_tick: impl FnMut() -> Step + 'static) -> Result<Self, FrameError> {
        let window = web_sys::window().ok_or(FrameError::NoWindow)?;
        let pending = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));

        let next = callback.clone();
        let pending_in_tick = pending.clone();
        let window_in_tick = window.clone();
        let tick = Closure::wrap(Box::new(move |_ts_ms: f64| {
            pending_in_tick.set(None);
            if on_tick() != Step::Moving {
                return;
            }
            if let Some(cb) = next.borrow().as_ref() {
                match window_in_tick.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => pending_in_tick.set(Some(id)),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = window.request_animation_frame(tick.as_ref().unchecked_ref())?;
        pending.set(Some(id));
        *callback.borrow_mut() = Some(tick);

        Ok(Self {
            window,
            pending,
            callback,
        })
    }
}

impl Drop for AnimationFrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
        // The closure holds a handle to its own slot; clearing it breaks the cycle.
        self.callback.borrow_mut().take();
    }
}

/// Forwards interval ticks until `on_tick` reports anything but
/// [`Step::Moving`], then swallows the rest.
struct IntervalTicks<F> {
    on_tick: F,
    finished: bool,
}

impl<F: FnMut() -> Step> IntervalTicks<F> {
    fn new(on_tick: F) -> Self {
        Self {
            on_tick,
            finished: false,
        }
    }

    /// True exactly once, on the tick that ends the loop.
    fn fire(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = (self.on_tick)() != Step::Moving;
        self.finished
    }
}

fn start_interval(
    period_ms: u32,
    on_tick: impl FnMut() -> Step + 'static,
) -> Rc<RefCell<Option<Interval>>> {
    let slot: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let slot_in_tick = Rc::downgrade(&slot);
    let mut ticks = IntervalTicks::new(on_tick);
    let interval = Interval::new(period_ms.max(1), move || {
        if !ticks.fire() {
            return;
        }
        let settled = slot_in_tick.upgrade().and_then(|slot| slot.borrow_mut().take());
        if let Some(interval) = settled {
            // clearInterval now; the running callback is freed on the next turn
            let callback = interval.cancel();
            spawn_local(async move { drop(callback) });
        }
    });
    *slot.borrow_mut() = Some(interval);
    slot
}
