//! Frame-callback requests
//!
//! The scheduler asks for one frame at a time through [`FrameRequester`].
//! In the browser this is `requestAnimationFrame`; headless runs use
//! [`ManualFrames`] and pump the queue themselves.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Identifier of one requested frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub i32);

/// Source of frame callbacks
pub trait FrameRequester {
    /// Request one callback for the next frame
    fn request_frame(&mut self) -> Result<FrameId, String>;
    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, id: FrameId);
}

/// Headless frame source: requests queue up until the caller fires them
#[derive(Debug, Default)]
pub struct ManualFrames {
    next_id: i32,
    pending: VecDeque<FrameId>,
    cancelled: Vec<FrameId>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest pending request, removed from the queue
    pub fn next_pending(&mut self) -> Option<FrameId> {
        self.pending.pop_front()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Ids withdrawn through `cancel_frame`, oldest first
    pub fn cancelled(&self) -> &[FrameId] {
        &self.cancelled
    }
}

impl FrameRequester for ManualFrames {
    fn request_frame(&mut self) -> Result<FrameId, String> {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.pending.push_back(id);
        Ok(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let before = self.pending.len();
        self.pending.retain(|&p| p != id);
        if self.pending.len() != before {
            self.cancelled.push(id);
        }
    }
}

/// Browser frame source on `requestAnimationFrame`
///
/// Owns the single tick closure the browser calls back into and shares the
/// id of the outstanding request, so the tick can tell which frame fired.
pub struct AnimationFrames {
    window: Window,
    tick: Closure<dyn FnMut(f64)>,
    pending: Rc<Cell<Option<FrameId>>>,
}

impl AnimationFrames {
    pub fn new(window: Window, tick: Closure<dyn FnMut(f64)>, pending: Rc<Cell<Option<FrameId>>>) -> Self {
        Self { window, tick, pending }
    }
}

impl FrameRequester for AnimationFrames {
    fn request_frame(&mut self) -> Result<FrameId, String> {
        let id = self
            .window
            .request_animation_frame(self.tick.as_ref().unchecked_ref())
            .map_err(|e| format!("requestAnimationFrame failed: {:?}", e))?;
        let id = FrameId(id);
        self.pending.set(Some(id));
        Ok(id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(id.0) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", id.0, e);
        }
        if self.pending.get() == Some(id) {
            self.pending.set(None);
        }
    }
}
