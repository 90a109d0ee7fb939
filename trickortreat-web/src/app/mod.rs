use std::rc::Rc;

use trickortreat_game::{Action, Session, SoundBoard};
use yew::prelude::*;

use crate::audio::WebSoundBoard;
use crate::components::SoundToggle;

pub mod dispatch;
pub mod view;

pub use dispatch::Dispatcher;

#[derive(Properties, Clone)]
pub struct AppProps {
    /// Audio output; defaults to Web Audio.
    #[prop_or_else(default_board)]
    pub board: Rc<dyn SoundBoard>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.board, &other.board)
    }
}

fn default_board() -> Rc<dyn SoundBoard> {
    Rc::new(WebSoundBoard::new())
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let session = use_mut_ref(Session::new);
    let refresh = use_force_update();
    let dispatcher = {
        let session = session.clone();
        let board = props.board.clone();
        use_memo((), move |()| {
            Dispatcher::new(
                session,
                board,
                Callback::from(move |()| refresh.force_update()),
            )
        })
    };
    let on_action = dispatcher.callback();

    let state = session.borrow();
    html! {
        <>
            <div class="retro-scanline" aria-hidden="true" />
            <SoundToggle
                prefs={state.prefs()}
                on_toggle_sound={on_action.reform(|_: MouseEvent| Action::ToggleSound)}
                on_toggle_music={on_action.reform(|_: MouseEvent| Action::ToggleMusic)}
            />
            <main class="card-shell" data-phase={state.phase().to_string()}>
                { view::render_phase(&state, &on_action) }
            </main>
        </>
    }
}
