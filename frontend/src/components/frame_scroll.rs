use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlImageElement;
use yew::prelude::*;

use crate::animation::easing::Step;
use crate::animation::{
    frame_path, overlay_visible, preload_frames, Animator, BrowserViewport, FrameCache, Motion,
    PreloadProgress, TickLoop, TickSource, Viewport,
};
use crate::config;

const SCROLL_EVENTS: [&str; 2] = ["scroll", "resize"];

#[derive(Properties, PartialEq, Clone)]
pub struct ScrollFrameProps {
    pub total_frames: u32,
    #[prop_or(1)]
    pub start_frame: u32,
    /// Ease toward the scrolled-to frame instead of jumping to it.
    #[prop_or(true)]
    pub smooth: bool,
    #[prop_or(true)]
    pub overlay: bool,
    #[prop_or_else(config::get_frames_base)]
    pub frames_base: String,
    #[prop_or_else(config::get_tick_source)]
    pub tick_source: TickSource,
}

#[function_component]
pub fn ScrollFrameAnimation(props: &ScrollFrameProps) -> Html {
    let total = props.total_frames.max(1);
    let progress = use_state_eq(|| PreloadProgress::new(total));
    let cache = use_state(|| None::<Rc<FrameCache<HtmlImageElement>>>);
    let frame = use_state_eq(|| props.start_frame.clamp(1, total));

    // Preload the whole sequence; re-runs only if the sequence itself changes
    {
        let progress = progress.clone();
        let cache = cache.clone();
        use_effect_with_deps(
            move |(total, base): &(u32, String)| {
                let total = *total;
                let base = base.clone();
                let mounted = Rc::new(Cell::new(true));
                progress.set(PreloadProgress::new(total));
                if cache.is_some() {
                    cache.set(None);
                }
                {
                    let mounted = mounted.clone();
                    spawn_local(async move {
                        let report = {
                            let mounted = mounted.clone();
                            let progress = progress.clone();
                            move |p: PreloadProgress| {
                                if mounted.get() {
                                    progress.set(p);
                                }
                            }
                        };
                        let frames = preload_frames(&base, total, report).await;
                        if mounted.get() {
                            cache.set(Some(Rc::new(frames)));
                        } else {
                            log::debug!("Frame preload finished after unmount, discarding");
                        }
                    });
                }
                move || mounted.set(false)
            },
            (total, props.frames_base.clone()),
        );
    }

    // Scroll and resize listeners driving the animator
    {
        let frame = frame.clone();
        let motion = if props.smooth { Motion::Ease } else { Motion::Snap };
        use_effect_with_deps(
            move |&(total, start, motion, tick_source): &(u32, u32, Motion, TickSource)| {
                let animator = Rc::new(RefCell::new(Animator::new(total, start, motion)));
                let running: Rc<RefCell<Option<TickLoop>>> = Rc::new(RefCell::new(None));
                let viewport = BrowserViewport::new();

                let on_scroll: Rc<dyn Fn(bool)> = Rc::new({
                    let animator = animator.clone();
                    let running = running.clone();
                    let frame = frame.clone();
                    move |mounting: bool| {
                        let viewport = match viewport.as_ref() {
                            Some(viewport) => viewport,
                            None => return,
                        };
                        let metrics = viewport.metrics();
                        let ticket = if mounting {
                            animator.borrow_mut().on_mount(metrics)
                        } else {
                            animator.borrow_mut().on_scroll(metrics)
                        };
                        frame.set(animator.borrow().frame());
                        // At most one convergence loop at a time
                        running.borrow_mut().take();
                        if let Some(ticket) = ticket {
                            let tick = {
                                let animator = animator.clone();
                                let frame = frame.clone();
                                move || {
                                    let step = animator.borrow_mut().tick(ticket);
                                    if step != Step::Superseded {
                                        frame.set(animator.borrow().frame());
                                    }
                                    step
                                }
                            };
                            match TickLoop::start(tick_source, tick) {
                                Ok(tick_loop) => *running.borrow_mut() = Some(tick_loop),
                                Err(e) => {
                                    log::error!("Could not start frame easing: {}", e);
                                    animator.borrow_mut().jump_to_target();
                                    frame.set(animator.borrow().frame());
                                }
                            }
                        }
                    }
                });

                let destructor: Box<dyn FnOnce()> = if let Some(window) = web_sys::window() {
                    let callback = Closure::<dyn Fn()>::new({
                        let on_scroll = on_scroll.clone();
                        move || on_scroll(false)
                    });
                    for event in SCROLL_EVENTS {
                        if let Err(e) = window
                            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
                        {
                            log::error!("Failed to listen for {}: {:?}", event, e);
                        }
                    }
                    // Pick up wherever the page already is
                    on_scroll(true);
                    let running = running.clone();
                    Box::new(move || {
                        for event in SCROLL_EVENTS {
                            if let Err(e) = window.remove_event_listener_with_callback(
                                event,
                                callback.as_ref().unchecked_ref(),
                            ) {
                                log::error!("Failed to stop listening for {}: {:?}", event, e);
                            }
                        }
                        running.borrow_mut().take();
                    })
                } else {
                    log::warn!("No window available, scroll animation disabled");
                    Box::new(|| ())
                };
                move || {
                    destructor();
                }
            },
            (total, props.start_frame, motion, props.tick_source),
        );
    }

    let css = r#"
        .frame-scroll-loading {
            height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            color: white;
            text-align: center;
        }
        .frame-scroll-bar {
            width: 16rem;
            height: 0.5rem;
            margin-top: 1rem;
            background: #1f2937;
            border-radius: 9999px;
            overflow: hidden;
        }
        .frame-scroll-bar-fill {
            height: 100%;
            background: white;
            border-radius: 9999px;
            transition: width 0.3s;
        }
        .frame-scroll-count {
            margin-top: 0.5rem;
            font-size: 0.875rem;
            color: #9ca3af;
        }
        .frame-scroll {
            position: relative;
            width: 100%;
        }
        .frame-scroll-track {
            position: relative;
            height: 150vh;
        }
        .frame-scroll-stage {
            position: sticky;
            top: 0;
            width: 100vw;
            height: 80vh;
            display: flex;
            align-items: center;
            justify-content: center;
            overflow: hidden;
        }
        .frame-scroll-image {
            width: 100%;
            height: 100%;
            object-fit: cover;
        }
        .frame-scroll-missing {
            color: #9ca3af;
        }
        .frame-scroll-overlay {
            position: absolute;
            left: 2rem;
            color: white;
            transition: opacity 0.3s;
        }
        .frame-scroll-overlay h2 {
            font-size: 2.25rem;
            font-weight: bold;
            margin-bottom: 1rem;
        }
        .frame-scroll-overlay p {
            font-size: 1.25rem;
        }
    "#;

    let frames = match (*cache).as_ref() {
        Some(frames) if progress.is_ready() => frames.clone(),
        _ => {
            return html! {
                <div class="frame-scroll-loading">
                    <style>{css}</style>
                    <div>
                        <div>{"Loading Frames..."}</div>
                        <div class="frame-scroll-bar">
                            <div class="frame-scroll-bar-fill" style={format!("width: {}%;", progress.percent())}></div>
                        </div>
                        <div class="frame-scroll-count">
                            {format!("{} / {} frames", progress.loaded(), progress.total())}
                            if progress.failed() > 0 {
                                {format!(" ({} failed)", progress.failed())}
                            }
                        </div>
                    </div>
                </div>
            };
        }
    };

    let current = *frame;
    let overlay_opacity = if overlay_visible(current, total) { 1 } else { 0 };
    html! {
        <div class="frame-scroll">
            <style>{css}</style>
            <div class="frame-scroll-track">
                <div class="frame-scroll-stage">
                    {
                        match frames.resolve(current) {
                            Some(index) => html! {
                                <img
                                    class="frame-scroll-image"
                                    src={frame_path(&props.frames_base, index)}
                                    alt={format!("Frame {}", index)}
                                    fetchpriority={if index == 1 { "high" } else { "auto" }}
                                />
                            },
                            None => html! {
                                <div class="frame-scroll-missing">{"Animation unavailable"}</div>
                            },
                        }
                    }
                    if props.overlay {
                        <div class="frame-scroll-overlay" style={format!("opacity: {};", overlay_opacity)}>
                            <h2>{"Experience Innovation"}</h2>
                            <p>{"Designed with Intention"}</p>
                        </div>
                    }
                </div>
            </div>
        </div>
    }
}
