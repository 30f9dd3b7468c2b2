//! Change events and value extraction
//!
//! A host hands the controller whatever its toolkit produces for an edit. The
//! controller only needs the semantic value, which an [`EventToValue`] function
//! pulls out. Events exposing a target value get a default extractor through
//! [`TargetValue`].

use crate::error::Result;
use std::sync::Arc;

/// Extracts the semantic value from a raw interaction event
///
/// `Ok(None)` means the event carries no value; the display falls back to the
/// default while the commit forwards `None`. An `Err` propagates out of
/// `on_change` untouched.
pub type EventToValue<E, V> = Arc<dyn Fn(&E) -> Result<Option<V>> + Send + Sync>;

/// Events that carry the edited value on their target element
pub trait TargetValue<V> {
    /// Value currently held by the event's target, if any
    fn target_value(&self) -> Option<V>;
}

/// Element an edit happened on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTarget<V> {
    /// Value of the element after the edit
    pub value: Option<V>,
}

/// Generic edit event: a target whose value changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent<V> {
    /// Element that was edited
    pub target: EventTarget<V>,
}

impl<V> ChangeEvent<V> {
    /// Event whose target now holds `value`
    pub fn new(value: impl Into<V>) -> Self {
        Self {
            target: EventTarget {
                value: Some(value.into()),
            },
        }
    }

    /// Event whose target holds no value
    pub fn empty() -> Self {
        Self {
            target: EventTarget { value: None },
        }
    }
}

impl<V: Clone> TargetValue<V> for ChangeEvent<V> {
    fn target_value(&self) -> Option<V> {
        self.target.value.clone()
    }
}

/// Extractor reading [`TargetValue::target_value`]
pub fn default_event_to_value<E, V>() -> EventToValue<E, V>
where
    E: TargetValue<V> + 'static,
    V: 'static,
{
    Arc::new(|event: &E| Ok(event.target_value()))
}

/// Wrap a closure as an [`EventToValue`]
pub fn event_to_value<E, V, F>(extract: F) -> EventToValue<E, V>
where
    F: Fn(&E) -> Result<Option<V>> + Send + Sync + 'static,
{
    Arc::new(extract)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DebounceError;

    #[test]
    fn test_default_extractor_reads_target_value() {
        let extract = default_event_to_value::<ChangeEvent<String>, String>();
        let value = extract(&ChangeEvent::new("hello")).unwrap();
        assert_eq!(value.as_deref(), Some("hello"));
        assert_eq!(extract(&ChangeEvent::empty()).unwrap(), None);
    }

    #[test]
    fn test_custom_extractor() {
        let extract = event_to_value(|raw: &&str| {
            raw.parse::<i64>()
                .map(Some)
                .map_err(DebounceError::extraction)
        });
        assert_eq!(extract(&"42").unwrap(), Some(42));
        assert!(matches!(
            extract(&"forty-two"),
            Err(DebounceError::EventExtraction(_))
        ));
    }
}
