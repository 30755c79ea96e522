use super::collection::Collection;
use super::intent::CatalogIntent;
use crate::ui::mvi::Reducer;

pub struct CatalogReducer;

impl Reducer for CatalogReducer {
    type State = Collection;
    type Intent = CatalogIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CatalogIntent::Insert { record } => {
                let mut records = state.into_records();
                records.push(record);
                Collection::from(records)
            }
            CatalogIntent::Replace { record } => state
                .into_iter()
                .map(|existing| {
                    if existing.id == record.id {
                        record.clone()
                    } else {
                        existing
                    }
                })
                .collect(),
            CatalogIntent::Remove { id } => {
                state.into_iter().filter(|existing| existing.id != id).collect()
            }
            CatalogIntent::Reset { records } => records,
            CatalogIntent::Unrecognized => state,
        }
    }
}
