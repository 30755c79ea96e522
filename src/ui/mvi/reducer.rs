use super::intent::Intent;
use super::state::UiState;

/// Pure `(State, Intent) -> State` transition function.
///
/// Implementations take the state by value and return the next one, so a
/// caller that wants to keep the previous value clones it first. A reducer
/// never fails: intents it has nothing to do with yield the state unchanged.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
