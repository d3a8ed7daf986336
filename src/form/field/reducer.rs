use crate::form::error_map::ErrorSource;
use crate::form::field::intent::FieldIntent;
use crate::form::field::state::{FieldMeta, FieldState};
use crate::mvi::Reducer;

pub struct FieldReducer;

impl Reducer for FieldReducer {
    type State = FieldState;
    type Intent = FieldIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FieldIntent::Change {
                value,
                sync_error,
                async_scheduled,
            } => {
                let mut meta = state.meta;
                meta.is_dirty = true;
                // Any running validation belongs to the old value now.
                meta.is_validating = false;
                meta.error_map.apply(ErrorSource::OnChange, sync_error);
                meta.error_map.remove(ErrorSource::OnServer);
                if !async_scheduled {
                    meta.error_map.remove(ErrorSource::OnChangeAsync);
                }
                FieldState {
                    value,
                    meta,
                    generation: state.generation + 1,
                    validation_pending: async_scheduled,
                }
            }
            FieldIntent::Blur { blur_error } => {
                let mut meta = state.meta;
                meta.is_touched = true;
                meta.error_map.apply(ErrorSource::OnBlur, blur_error);
                FieldState { meta, ..state }
            }
            FieldIntent::SubmitAttempt {
                change_error,
                blur_error,
                async_scheduled,
            } => {
                let mut meta = state.meta;
                meta.is_touched = true;
                meta.is_validating = false;
                meta.error_map.apply(ErrorSource::OnChange, change_error);
                meta.error_map.apply(ErrorSource::OnBlur, blur_error);
                if !async_scheduled {
                    meta.error_map.remove(ErrorSource::OnChangeAsync);
                }
                FieldState {
                    meta,
                    generation: state.generation + 1,
                    validation_pending: async_scheduled,
                    ..state
                }
            }
            FieldIntent::ValidationStarted { generation } => {
                if generation != state.generation || !state.validation_pending {
                    return state;
                }
                let mut meta = state.meta;
                meta.is_validating = true;
                FieldState { meta, ..state }
            }
            FieldIntent::ValidationSettled { generation, error } => {
                if generation != state.generation || !state.validation_pending {
                    return state;
                }
                let mut meta = state.meta;
                meta.is_validating = false;
                meta.error_map.apply(ErrorSource::OnChangeAsync, error);
                FieldState {
                    meta,
                    validation_pending: false,
                    ..state
                }
            }
            FieldIntent::ReplaceMeta { meta } => FieldState { meta, ..state },
            FieldIntent::Reset { value } => FieldState {
                value,
                meta: FieldMeta::default(),
                generation: state.generation + 1,
                validation_pending: false,
            },
        }
    }
}
