use std::sync::{Condvar, Mutex, OnceLock, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// A finished image: a renderer texture plus the dimensions it was made from.
#[derive(Clone, Debug)]
pub struct ProcessedImage<T> {
    pub texture: T,
    pub width: u32,
    pub height: u32,
}

/// Final outcome of a job. Written once, never replaced.
#[derive(Clone, Debug)]
pub enum SlotState<T> {
    Ready(ProcessedImage<T>),
    Failed(String),
}

/// Write-once hand-off point between one job thread and the render thread.
///
/// The outcome lives in a `OnceLock`, so a reader that sees it also sees every
/// field written before the publish. The mutex/condvar pair only serves
/// blocking waiters.
#[derive(Debug)]
pub struct ImageSlot<T> {
    outcome: OnceLock<SlotState<T>>,
    signal: Mutex<()>,
    published: Condvar,
}

impl<T> Default for ImageSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ImageSlot<T> {
    pub fn new() -> Self {
        Self {
            outcome: OnceLock::new(),
            signal: Mutex::new(()),
            published: Condvar::new(),
        }
    }

    /// Publish the finished image. Returns `false` if the slot was already settled.
    pub fn publish(&self, image: ProcessedImage<T>) -> bool {
        debug!(width = image.width, height = image.height, "Publishing image");
        self.settle(SlotState::Ready(image))
    }

    /// Record a terminal failure. The slot will never become ready.
    pub fn fail(&self, message: impl Into<String>) -> bool {
        self.settle(SlotState::Failed(message.into()))
    }

    fn settle(&self, state: SlotState<T>) -> bool {
        if self.outcome.set(state).is_err() {
            warn!("Image slot already settled, ignoring second outcome");
            return false;
        }
        // Taking the lock orders the notify after any waiter's check-then-wait.
        let _guard = self.signal.lock().unwrap_or_else(PoisonError::into_inner);
        self.published.notify_all();
        true
    }

    pub fn state(&self) -> Option<&SlotState<T>> {
        self.outcome.get()
    }

    /// The published image, once ready.
    pub fn image(&self) -> Option<&ProcessedImage<T>> {
        match self.outcome.get() {
            Some(SlotState::Ready(image)) => Some(image),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.image().is_some()
    }

    pub fn error(&self) -> Option<&str> {
        match self.outcome.get() {
            Some(SlotState::Failed(message)) => Some(message),
            _ => None,
        }
    }

    /// Block until the slot settles.
    pub fn wait(&self) -> &SlotState<T> {
        let mut guard = self.signal.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(state) = self.outcome.get() {
                return state;
            }
            guard = self
                .published
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Block until the slot settles or `timeout` passes.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<&SlotState<T>> {
        let deadline = Instant::now() + timeout;
        let mut guard = self.signal.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(state) = self.outcome.get() {
                return Some(state);
            }
            let remaining = deadline.checked_duration_since(Instant::now())?;
            guard = self
                .published
                .wait_timeout(guard, remaining)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }
}

/// Fixed set of job slots, indexed by job id.
#[derive(Debug)]
pub struct ImageStore<T> {
    slots: Vec<ImageSlot<T>>,
}

impl<T> ImageStore<T> {
    pub fn with_slots(count: usize) -> Self {
        Self {
            slots: (0..count).map(|_| ImageSlot::new()).collect(),
        }
    }

    pub fn slot(&self, index: usize) -> Option<&ImageSlot<T>> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageSlot<T>> {
        self.slots.iter()
    }
}
