use crate::{canvas::ShadowCanvas, host::HostClip};
use std::ops::{Deref, DerefMut};

/// Clips the host element's interior out of a canvas for the lifetime of the scope.
///
/// The previous clip state is restored when the scope is dropped.
pub struct ClipScope<'a, C: ShadowCanvas + ?Sized> {
    canvas: &'a mut C,
    save_count: usize,
}

impl<'a, C: ShadowCanvas + ?Sized> ClipScope<'a, C> {
    pub fn new(canvas: &'a mut C, clip: &HostClip) -> ClipScope<'a, C> {
        let save_count = canvas.save();
        canvas.clip_out(clip);
        ClipScope { canvas, save_count }
    }
}

impl<'a, C: ShadowCanvas + ?Sized> Deref for ClipScope<'a, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.canvas
    }
}

impl<'a, C: ShadowCanvas + ?Sized> DerefMut for ClipScope<'a, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.canvas
    }
}

impl<'a, C: ShadowCanvas + ?Sized> Drop for ClipScope<'a, C> {
    fn drop(&mut self) {
        self.canvas.restore_to_count(self.save_count);
    }
}
