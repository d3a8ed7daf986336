use super::intent::Intent;
use super::state::ViewState;

/// Reducer transforms state based on intents.
///
/// Must stay pure: (State, Intent) -> State. Anything that needs a clock or
/// a task belongs to the caller.
pub trait Reducer {
    type State: ViewState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
