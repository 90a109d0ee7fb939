use std::cell::RefCell;
use std::rc::Rc;

use trickortreat_game::constants::{GHOST_COUNTDOWN_TICK_MS, GHOST_MOVE_MS};
use trickortreat_game::OutcomeId;
use trickortreat_game::minigame::{ChaseResult, GhostChase as ChaseState, GhostPosition};
use yew::prelude::*;

use crate::dom::{IntervalGuard, IntervalHandle, js_error_message, set_timeout};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub outcome_id: OutcomeId,
    pub seed: u32,
    pub on_finished: Callback<bool>,
}

type Shared<T> = Rc<RefCell<T>>;

/// Stop both timers and report the result upward.
fn resolve(
    handles: &Shared<Vec<IntervalHandle>>,
    on_finished: &Callback<bool>,
    result: ChaseResult,
) {
    for handle in handles.borrow_mut().drain(..) {
        handle.cancel();
    }
    on_finished.emit(result.success());
}

/// Catch-the-ghost round. Key it by outcome id so every round starts fresh.
#[function_component(GhostChase)]
pub fn ghost_chase(props: &Props) -> Html {
    let chase: Shared<ChaseState> = {
        let seed = props.seed;
        let id = props.outcome_id.clone();
        use_mut_ref(move || ChaseState::new(seed, id))
    };
    let handles: Shared<Vec<IntervalHandle>> = use_mut_ref(Vec::new);
    let position = use_state(|| chase.borrow().position());
    let time_left = use_state(|| chase.borrow().time_left());

    {
        let chase = chase.clone();
        let handles = handles.clone();
        let position = position.clone();
        let time_left = time_left.clone();
        let on_finished = props.on_finished.clone();
        use_effect_with(props.outcome_id.clone(), move |_| {
            let movement = {
                let chase = chase.clone();
                IntervalGuard::start(GHOST_MOVE_MS, move || {
                    let mut state = chase.borrow_mut();
                    state.tick_movement();
                    position.set(state.position());
                })
            };
            let countdown = {
                let handles = handles.clone();
                IntervalGuard::start(GHOST_COUNTDOWN_TICK_MS, move || {
                    let result = {
                        let mut state = chase.borrow_mut();
                        let result = state.tick_countdown();
                        time_left.set(state.time_left());
                        result
                    };
                    if let Some(result) = result {
                        resolve(&handles, &on_finished, result);
                    }
                })
            };
            let guards: Vec<IntervalGuard> = [movement, countdown]
                .into_iter()
                .filter_map(|guard| {
                    guard
                        .map_err(|err| {
                            log::error!("ghost timer failed: {}", js_error_message(&err));
                        })
                        .ok()
                })
                .collect();
            handles
                .borrow_mut()
                .extend(guards.iter().map(IntervalGuard::handle));
            move || {
                for guard in &guards {
                    guard.handle().cancel();
                }
                // A tick may still be on the stack; free the closures on the next task.
                if let Err(err) = set_timeout(0, move || drop(guards)) {
                    log::debug!("ghost timers released late: {}", js_error_message(&err));
                }
            }
        });
    }

    let on_catch = {
        let chase = chase.clone();
        let handles = handles.clone();
        let on_finished = props.on_finished.clone();
        Callback::from(move |_: MouseEvent| {
            let caught = chase.borrow_mut().catch();
            if let Some(result) = caught {
                resolve(&handles, &on_finished, result);
            }
        })
    };

    let GhostPosition { top, left } = *position;
    html! {
        <div class="pixel-card ghost-chase">
            <p class="ghost-chase__timer">{ format!("Bắt ma trong {} giây", *time_left) }</p>
            <div class="ghost-chase__arena">
                <button
                    type="button"
                    class="ghost-chase__ghost"
                    aria-label="Bắt ma"
                    style={format!("top: {top:.2}%; left: {left:.2}%;")}
                    onclick={on_catch}
                >
                    { "👻" }
                </button>
            </div>
            <p class="ghost-chase__hint">{ "Bấm trúng ma để nhận kẹo tưởng tượng thơm lừng!" }</p>
        </div>
    }
}
