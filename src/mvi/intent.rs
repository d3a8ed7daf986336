/// Marker trait for intent objects.
///
/// Intents are either user actions (typing, leaving a field) or results
/// coming back from asynchronous work (a validator settling).
pub trait Intent: Send + 'static {}
