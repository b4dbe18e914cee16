/// Generic result type for component key handling.
///
/// Components consume keys while active (overlays swallow everything) and
/// report back to their parent view with this enum instead of one result
/// type per component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult<T> {
  /// Consumed with nothing for the parent to do
  Handled,
  /// Consumed, and the parent has an event to act on
  Event(T),
  /// Not this component's key; the parent keeps dispatching
  NotHandled,
}
