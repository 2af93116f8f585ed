use std::collections::HashMap;

use glam::Vec3;

use crate::camera::CameraParameters;

/// An event produced by one of the SDK seams.
#[derive(Debug, Clone, PartialEq)]
pub enum SdkEvent {
    /// Tracking is initialised and the camera feed is live.
    Ready,
    /// A new render frame, with seconds since the previous one.
    Frame {
        /// Seconds since the previous frame
        delta: f32,
    },
    /// Camera pose for the current frame, as a column-major matrix.
    Pose {
        /// Column-major 4x4 view matrix
        matrix: [f32; 16],
    },
    /// The viewport changed, and the camera intrinsics with it.
    Resize {
        /// New camera intrinsics
        parameters: CameraParameters,
    },
    /// A surface point where a model can be anchored.
    HitTestResult {
        /// The surface point, in world space
        position: Vec3,
    },
    /// The scene engine finished loading the scene contents.
    SceneLoadEnd,
    /// A named scene element was tapped.
    ElementClick {
        /// Name of the tapped element
        name: String,
    },
}

impl SdkEvent {
    /// The kind used to route this event to subscribers.
    pub fn kind(&self) -> EventKind {
        match self {
            SdkEvent::Ready => EventKind::Ready,
            SdkEvent::Frame { .. } => EventKind::Frame,
            SdkEvent::Pose { .. } => EventKind::Pose,
            SdkEvent::Resize { .. } => EventKind::Resize,
            SdkEvent::HitTestResult { .. } => EventKind::HitTestResult,
            SdkEvent::SceneLoadEnd => EventKind::SceneLoadEnd,
            SdkEvent::ElementClick { .. } => EventKind::ElementClick,
        }
    }
}

/// Discriminant used to register subscriptions on the [`EventBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    Frame,
    Pose,
    Resize,
    HitTestResult,
    SceneLoadEnd,
    ElementClick,
}

type Handler = Box<dyn FnMut(&SdkEvent)>;

/// Synchronous publish/subscribe dispatch for [`SdkEvent`]s.
///
/// Handlers are invoked on the caller's thread, in subscription order;
/// `emit` returns once every handler for the event has run, so there is
/// no concurrent re-entrancy to guard against.
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<EventKind, Vec<Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Default::default()
    }

    /// Register `handler` for every event of the given kind.
    pub fn subscribe(&mut self, kind: EventKind, handler: impl FnMut(&SdkEvent) + 'static) {
        self.subscribers
            .entry(kind)
            .or_default()
            .push(Box::new(handler));
    }

    /// Deliver `event` to its subscribers, in subscription order.
    pub fn emit(&mut self, event: &SdkEvent) {
        if let Some(handlers) = self.subscribers.get_mut(&event.kind()) {
            for handler in handlers.iter_mut() {
                handler(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    pub fn handlers_run_in_subscription_order_test() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        for tag in ["first", "second", "third"] {
            let calls = calls.clone();
            bus.subscribe(EventKind::SceneLoadEnd, move |_| {
                calls.borrow_mut().push(tag);
            });
        }

        // A subscriber for another kind must not fire.
        {
            let calls = calls.clone();
            bus.subscribe(EventKind::Ready, move |_| {
                calls.borrow_mut().push("ready");
            });
        }

        bus.emit(&SdkEvent::SceneLoadEnd);
        assert_eq!(*calls.borrow(), vec!["first", "second", "third"]);

        bus.emit(&SdkEvent::Ready);
        assert_eq!(*calls.borrow(), vec!["first", "second", "third", "ready"]);
    }

    #[test]
    pub fn emit_without_subscribers_is_a_noop_test() {
        let mut bus = EventBus::new();
        bus.emit(&SdkEvent::Frame { delta: 0.016 });
    }
}
