use crate::ui::mvi::Reducer;
use crate::ui::view::intent::ViewIntent;
use crate::ui::view::state::ViewState;

pub struct ViewReducer;

impl Reducer for ViewReducer {
    type State = ViewState;
    type Intent = ViewIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ViewIntent::Search { text } => ViewState {
                search: text,
                page: 1,
                ..state
            },
            ViewIntent::NextPage { page_count } => {
                if state.page < page_count {
                    ViewState {
                        page: state.page + 1,
                        ..state
                    }
                } else {
                    state
                }
            }
            ViewIntent::PrevPage => {
                if state.page > 1 {
                    ViewState {
                        page: state.page - 1,
                        ..state
                    }
                } else {
                    state
                }
            }
            ViewIntent::GoTo { page, page_count } => ViewState {
                page: page.clamp(1, page_count.max(1)),
                ..state
            },
            ViewIntent::FirstPage => ViewState { page: 1, ..state },
        }
    }
}
