//! Canvas double that logs every operation.
use crate::{
    canvas::{LayerContent, ShadowCanvas},
    host::HostClip,
};
use kurbo::Rect;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer,
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ClipKind {
    Path,
    Rect(Rect),
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Op {
    Record(LayerContent),
    Save(usize),
    RestoreToCount(usize),
    ClipOut(ClipKind),
    DrawLayer { recording: u64, placement: Rect, alpha: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MockRecording {
    pub(crate) id: u64,
    pub(crate) content: LayerContent,
}

pub(crate) struct MockCanvas {
    pub(crate) hardware_accelerated: bool,
    pub(crate) fail_recording: bool,
    pub(crate) save_depth: usize,
    pub(crate) ops: Vec<Op>,
    next_recording: u64,
}

impl MockCanvas {
    pub(crate) fn hardware() -> MockCanvas {
        MockCanvas {
            hardware_accelerated: true,
            fail_recording: false,
            save_depth: 0,
            ops: vec![],
            next_recording: 1,
        }
    }

    pub(crate) fn software() -> MockCanvas {
        MockCanvas {
            hardware_accelerated: false,
            ..MockCanvas::hardware()
        }
    }

    pub(crate) fn recordings(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Record(_))).count()
    }

    /// Operations that touch the destination (everything but recording).
    pub(crate) fn paint_ops(&self) -> Vec<&Op> {
        self.ops.iter().filter(|op| !matches!(op, Op::Record(_))).collect()
    }
}

impl ShadowCanvas for MockCanvas {
    type Recording = MockRecording;

    fn is_hardware_accelerated(&mut self) -> bool {
        self.hardware_accelerated
    }

    fn record_layer(&mut self, content: &LayerContent) -> Option<MockRecording> {
        self.ops.push(Op::Record(*content));
        if self.fail_recording {
            return None;
        }
        let id = self.next_recording;
        self.next_recording += 1;
        Some(MockRecording { id, content: *content })
    }

    fn save(&mut self) -> usize {
        let count = self.save_depth;
        self.ops.push(Op::Save(count));
        self.save_depth += 1;
        count
    }

    fn restore_to_count(&mut self, count: usize) {
        self.ops.push(Op::RestoreToCount(count));
        self.save_depth = count;
    }

    fn clip_out(&mut self, clip: &HostClip) {
        let kind = match clip {
            HostClip::Path(_) => ClipKind::Path,
            HostClip::Rect(rect) => ClipKind::Rect(*rect),
        };
        self.ops.push(Op::ClipOut(kind));
    }

    fn draw_layer(&mut self, recording: &MockRecording, placement: Rect, alpha: f32) {
        self.ops.push(Op::DrawLayer {
            recording: recording.id,
            placement,
            alpha,
        });
    }
}

/// Counts `WARN` events.
struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Runs `f` and returns its result with the number of warnings it logged.
pub(crate) fn count_warnings<R>(f: impl FnOnce() -> R) -> (R, usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(count.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, count.load(Ordering::SeqCst))
}
