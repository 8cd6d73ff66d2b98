//! `requestAnimationFrame` as a [`FrameScheduler`].

use flowfield_core::{FlowError, FrameHandle, FrameScheduler};
use web_sys::Window;

/// Schedules frames on the browser's refresh cycle.
///
/// Every request registers the same JS callback; the app installs it with
/// [`set_callback`](AnimationFrames::set_callback) once the callback closure
/// exists.
pub struct AnimationFrames {
    window: Window,
    callback: Option<js_sys::Function>,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    pub fn set_callback(&mut self, callback: js_sys::Function) {
        self.callback = Some(callback);
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&mut self) -> Result<FrameHandle, FlowError> {
        let callback = self
            .callback
            .as_ref()
            .ok_or_else(|| FlowError::Scheduler("no frame callback installed".into()))?;
        let id = self
            .window
            .request_animation_frame(callback)
            .map_err(|e| FlowError::Scheduler(format!("requestAnimationFrame failed: {e:?}")))?;
        Ok(FrameHandle::new(id as u64))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        // Cancelling an id that already fired is a no-op in the browser.
        let _ = self.window.cancel_animation_frame(handle.id() as i32);
    }
}
