//! Capability detection
//!
//! A pure, ordered predicate chain over the handle's shape. The first
//! matching variant wins and supplies every control primitive; primitives
//! are never mixed across variants. Event delivery is resolved alongside:
//! native registration when the variant offers it, otherwise polling.

use crate::surface::{EventEmitter, MediaElement, PlayerHandle, Transport};
use std::sync::Arc;

/// Which shape the handle turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    /// Element semantics directly on the handle
    Element,
    /// Method wrapper directly on the handle
    Wrapper,
    /// Element semantics one level down
    NestedElement,
    /// Method wrapper one level down
    NestedWrapper,
}

/// The one control surface all operations bind to
#[derive(Clone)]
pub(crate) enum ControlBinding {
    Element(Arc<dyn MediaElement>),
    Transport(Arc<dyn Transport>),
}

/// How time updates and transport events reach subscribers
#[derive(Clone)]
pub(crate) enum UpdateDelivery {
    /// Element-style listener registration
    Element(Arc<dyn MediaElement>),
    /// Emitter-style on/off pair
    Emitter(Arc<dyn EventEmitter>),
    /// No native channel; synthesize updates by polling the transport
    Polling(Arc<dyn Transport>),
}

/// Outcome of a successful detection
pub struct Detected {
    pub(crate) kind: VariantKind,
    pub(crate) binding: ControlBinding,
    pub(crate) delivery: UpdateDelivery,
}

impl Detected {
    pub fn kind(&self) -> VariantKind {
        self.kind
    }

    /// True when updates will be synthesized by polling
    pub fn is_polling(&self) -> bool {
        matches!(self.delivery, UpdateDelivery::Polling(_))
    }
}

/// Probes a handle's shape, in priority order.
///
/// 1. element semantics on the handle itself;
/// 2. a transport wrapper on the handle itself, with an emitter on the same
///    handle preferred over polling for delivery;
/// 3. an inner-player accessor, unwrapped exactly one level and re-probed
///    the same way (a nested transport looks for an emitter on the inner
///    handle first, then the outer one).
///
/// Returns `None` when no variant matches - the handle is not playable yet.
pub fn detect(handle: &Arc<dyn PlayerHandle>) -> Option<Detected> {
    if let Some(element) = handle.as_element() {
        return Some(Detected {
            kind: VariantKind::Element,
            binding: ControlBinding::Element(element.clone()),
            delivery: UpdateDelivery::Element(element),
        });
    }

    if let Some(transport) = handle.as_transport() {
        let delivery = match handle.as_emitter() {
            Some(emitter) => UpdateDelivery::Emitter(emitter),
            None => UpdateDelivery::Polling(transport.clone()),
        };
        return Some(Detected {
            kind: VariantKind::Wrapper,
            binding: ControlBinding::Transport(transport),
            delivery,
        });
    }

    // One level of unwrapping only; deeper nesting is not a known backend
    // shape.
    if let Some(inner) = handle.inner_player() {
        if let Some(element) = inner.as_element() {
            return Some(Detected {
                kind: VariantKind::NestedElement,
                binding: ControlBinding::Element(element.clone()),
                delivery: UpdateDelivery::Element(element),
            });
        }

        if let Some(transport) = inner.as_transport() {
            let delivery = match inner.as_emitter().or_else(|| handle.as_emitter()) {
                Some(emitter) => UpdateDelivery::Emitter(emitter),
                None => UpdateDelivery::Polling(transport.clone()),
            };
            return Some(Detected {
                kind: VariantKind::NestedWrapper,
                binding: ControlBinding::Transport(transport),
                delivery,
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeElement, FakeEmitter, FakeHandle, FakeTransport};

    #[test]
    fn test_element_detected_first() {
        let handle: Arc<dyn PlayerHandle> = Arc::new(
            FakeHandle::element(FakeElement::new()).with_transport(FakeTransport::new()),
        );
        let detected = detect(&handle).unwrap();
        assert_eq!(detected.kind(), VariantKind::Element);
        assert!(!detected.is_polling());
    }

    #[test]
    fn test_bare_wrapper_polls() {
        let handle: Arc<dyn PlayerHandle> = Arc::new(FakeHandle::transport(FakeTransport::new()));
        let detected = detect(&handle).unwrap();
        assert_eq!(detected.kind(), VariantKind::Wrapper);
        assert!(detected.is_polling());
    }

    #[test]
    fn test_wrapper_with_emitter_uses_emitter() {
        let handle: Arc<dyn PlayerHandle> = Arc::new(
            FakeHandle::transport(FakeTransport::new()).with_emitter(FakeEmitter::new()),
        );
        let detected = detect(&handle).unwrap();
        assert_eq!(detected.kind(), VariantKind::Wrapper);
        assert!(!detected.is_polling());
    }

    #[test]
    fn test_nested_element_unwrapped_once() {
        let inner = FakeHandle::element(FakeElement::new());
        let handle: Arc<dyn PlayerHandle> = Arc::new(FakeHandle::nested(Arc::new(inner)));
        let detected = detect(&handle).unwrap();
        assert_eq!(detected.kind(), VariantKind::NestedElement);
    }

    #[test]
    fn test_nested_wrapper_finds_outer_emitter() {
        let inner = FakeHandle::transport(FakeTransport::new());
        let handle: Arc<dyn PlayerHandle> =
            Arc::new(FakeHandle::nested(Arc::new(inner)).with_emitter(FakeEmitter::new()));
        let detected = detect(&handle).unwrap();
        assert_eq!(detected.kind(), VariantKind::NestedWrapper);
        assert!(!detected.is_polling());
    }

    #[test]
    fn test_double_nesting_not_playable() {
        let innermost = FakeHandle::element(FakeElement::new());
        let middle = FakeHandle::nested(Arc::new(innermost));
        let handle: Arc<dyn PlayerHandle> = Arc::new(FakeHandle::nested(Arc::new(middle)));
        assert!(detect(&handle).is_none());
    }

    #[test]
    fn test_empty_handle_not_playable() {
        let handle: Arc<dyn PlayerHandle> = Arc::new(FakeHandle::empty());
        assert!(detect(&handle).is_none());
    }
}
