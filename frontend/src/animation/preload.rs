use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::join_all;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use super::error::FrameError;
use super::frames::{frame_path, FrameCache};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
}

/// Settled/total counters for the loading indicator.
///
/// Ready once every frame has either loaded or failed; reports arriving after
/// that are dropped so the phase can never go back to loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadProgress {
    total: u32,
    loaded: u32,
    failed: u32,
}

impl PreloadProgress {
    pub fn new(total: u32) -> Self {
        Self {
            total: total.max(1),
            loaded: 0,
            failed: 0,
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn loaded(&self) -> u32 {
        self.loaded
    }

    pub fn failed(&self) -> u32 {
        self.failed
    }

    pub fn settled(&self) -> u32 {
        self.loaded + self.failed
    }

    pub fn phase(&self) -> LoadPhase {
        if self.settled() >= self.total {
            LoadPhase::Ready
        } else {
            LoadPhase::Loading
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == LoadPhase::Ready
    }

    pub fn percent(&self) -> f64 {
        self.settled() as f64 / self.total as f64 * 100.0
    }

    pub fn record_loaded(&mut self) -> bool {
        if self.is_ready() {
            return false;
        }
        self.loaded += 1;
        true
    }

    pub fn record_failed(&mut self) -> bool {
        if self.is_ready() {
            return false;
        }
        self.failed += 1;
        true
    }
}

/// Runs `load` for every index in `1..=total` at once and waits for all of
/// them. Failures are kept in the cache as missing frames; `on_progress`
/// sees the counters after each frame settles.
pub async fn settle_all<T, F, Fut>(
    total: u32,
    load: F,
    on_progress: impl Fn(PreloadProgress) + 'static,
) -> FrameCache<T>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<T, FrameError>>,
{
    let total = total.max(1);
    let progress = Rc::new(RefCell::new(PreloadProgress::new(total)));
    let on_progress = Rc::new(on_progress);

    let loads = (1..=total).map(|index| {
        let progress = progress.clone();
        let on_progress = on_progress.clone();
        let pending = load(index);
        async move {
            let result = pending.await;
            let snapshot = {
                let mut progress = progress.borrow_mut();
                match &result {
                    Ok(_) => progress.record_loaded(),
                    Err(_) => progress.record_failed(),
                };
                *progress
            };
            on_progress(snapshot);
            (index, result)
        }
    });

    let results = join_all(loads).await;
    let cache = FrameCache::from_results(total, results);
    log::info!(
        "Frame preload settled: {}/{} loaded, {} failed",
        cache.loaded_count(),
        total,
        cache.failed_count()
    );
    cache
}

/// Runs its closure once when dropped.
struct Detach<F: FnOnce()> {
    on_drop: Option<F>,
}

impl<F: FnOnce()> Detach<F> {
    fn new(on_drop: F) -> Self {
        Self {
            on_drop: Some(on_drop),
        }
    }
}

impl<F: FnOnce()> Drop for Detach<F> {
    fn drop(&mut self) {
        if let Some(on_drop) = self.on_drop.take() {
            on_drop();
        }
    }
}

/// Requests one frame and resolves once the browser has decoded it or
/// given up on it.
pub async fn load_frame(index: u32, path: String) -> Result<HtmlImageElement, FrameError> {
    let img = HtmlImageElement::new()?;
    let (tx, rx) = oneshot::channel::<bool>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let onload = Closure::<dyn Fn()>::new({
        let tx = tx.clone();
        move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(true);
            }
        }
    });
    let onerror = Closure::<dyn Fn()>::new({
        let tx = tx.clone();
        move || {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(false);
            }
        }
    });
    img.set_onload(Some(onload.as_ref().unchecked_ref()));
    img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    // Dropped before the closures, also when this future is dropped mid-load
    let detach = Detach::new(|| {
        img.set_onload(None);
        img.set_onerror(None);
    });
    img.set_src(&path);

    let outcome = rx.await;
    drop(detach);

    match outcome {
        Ok(true) => Ok(img),
        Ok(false) => Err(FrameError::LoadFailed { index, path }),
        Err(_) => Err(FrameError::Cancelled { index }),
    }
}

/// Preloads `frame_0001.jpg ..= frame_<total>.jpg` from `base`.
pub async fn preload_frames(
    base: &str,
    total: u32,
    on_progress: impl Fn(PreloadProgress) + 'static,
) -> FrameCache<HtmlImageElement> {
    log::debug!("Preloading {} frames from {}", total, base);
    settle_all(total, |index| load_frame(index, frame_path(base, index)), on_progress).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{ready, Ready};
    use std::cell::{Cell, RefCell};

    fn flaky(index: u32) -> Ready<Result<u32, FrameError>> {
        if index % 3 == 0 {
            ready(Err(FrameError::LoadFailed {
                index,
                path: frame_path("/frames", index),
            }))
        } else {
            ready(Ok(index))
        }
    }

    #[test]
    fn progress_becomes_ready_only_when_all_settle() {
        let mut progress = PreloadProgress::new(3);
        assert_eq!(progress.phase(), LoadPhase::Loading);
        progress.record_loaded();
        progress.record_failed();
        assert_eq!(progress.phase(), LoadPhase::Loading);
        progress.record_loaded();
        assert_eq!(progress.phase(), LoadPhase::Ready);
        assert_eq!(progress.percent(), 100.0);
    }

    #[test]
    fn ready_never_reverts() {
        let mut progress = PreloadProgress::new(1);
        assert!(progress.record_failed());
        assert!(!progress.record_loaded());
        assert!(!progress.record_failed());
        assert_eq!(progress.settled(), 1);
        assert!(progress.is_ready());
    }

    #[test]
    fn settle_all_tolerates_failures() {
        let cache = block_on(settle_all(9, flaky, |_| {}));
        assert_eq!(cache.loaded_count(), 6);
        assert_eq!(cache.failed_count(), 3);
        assert_eq!(cache.get(4), Some(&4));
        assert_eq!(cache.resolve(3), Some(2));
    }

    #[test]
    fn settle_all_reports_every_frame_once() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let cache = block_on(settle_all(6, flaky, {
            let seen = seen.clone();
            move |progress| seen.borrow_mut().push(progress)
        }));
        let seen = seen.borrow();

        assert_eq!(seen.len(), 6);
        for (i, progress) in seen.iter().enumerate() {
            assert_eq!(progress.settled(), i as u32 + 1);
        }
        assert!(seen[..5].iter().all(|p| p.phase() == LoadPhase::Loading));
        assert_eq!(seen[5].phase(), LoadPhase::Ready);
        assert_eq!(seen[5].failed(), 2);
        assert_eq!(cache.loaded_count(), 4);
    }

    #[test]
    fn settle_all_requests_every_index() {
        let requested = RefCell::new(Vec::new());
        block_on(settle_all(
            5,
            |index| {
                requested.borrow_mut().push(frame_path("/frames", index));
                ready(Ok::<_, FrameError>(()))
            },
            |_| {},
        ));
        let requested = requested.into_inner();
        assert_eq!(requested.len(), 5);
        assert_eq!(requested[0], "/frames/frame_0001.jpg");
        assert_eq!(requested[4], "/frames/frame_0005.jpg");
    }

    #[test]
    fn detach_runs_when_pending_load_is_dropped() {
        use futures::FutureExt;

        let detached = Rc::new(Cell::new(false));
        let (_tx, rx) = oneshot::channel::<bool>();
        let mut pending = Box::pin({
            let detached = detached.clone();
            async move {
                let _detach = Detach::new(move || detached.set(true));
                rx.await
            }
        });
        assert!(pending.as_mut().now_or_never().is_none());
        assert!(!detached.get());
        drop(pending);
        assert!(detached.get());
    }

    #[test]
    fn detach_runs_once_after_settling() {
        let count = Rc::new(Cell::new(0));
        {
            let count = count.clone();
            let (tx, rx) = oneshot::channel::<bool>();
            tx.send(true).unwrap();
            let outcome = block_on(async move {
                let detach = Detach::new(move || count.set(count.get() + 1));
                let outcome = rx.await;
                drop(detach);
                outcome
            });
            assert_eq!(outcome, Ok(true));
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn zero_total_still_requests_one_frame() {
        let cache = block_on(settle_all(0, |index| ready(Ok::<_, FrameError>(index)), |_| {}));
        assert_eq!(cache.total(), 1);
        assert_eq!(cache.loaded_count(), 1);
    }
}
