/// Marker trait for state driven by a [`Reducer`](super::Reducer).
///
/// `Default` is the state a freshly mounted (or reset) view starts from.
pub trait ViewState: Clone + PartialEq + Default + Send + 'static {}
