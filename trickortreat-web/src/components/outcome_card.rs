use trickortreat_game::content::{MINI_GAME_LOST, MINI_GAME_WON};
use trickortreat_game::{Action, Choice, Outcome, OutcomeKind};
use yew::prelude::*;

use crate::components::{ButtonTone, GhostChase, PixelButton};

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub outcome: Outcome,
    pub seed: u32,
    /// Turns remain, so "open next" is offered.
    pub can_continue: bool,
    pub on_action: Callback<Action>,
}

fn choice_tag(choice: Choice) -> &'static str {
    match choice {
        Choice::Treat => "TREAT",
        Choice::Trick => "TRICK",
    }
}

#[function_component(OutcomeCard)]
pub fn outcome_card(props: &Props) -> Html {
    let outcome = &props.outcome;
    let figure = match outcome.kind {
        OutcomeKind::Treat => "🍬",
        OutcomeKind::Trick => "🎭",
    };

    let mini_game = match outcome.mini_game {
        Some(slot) if !slot.complete => {
            let on_action = props.on_action.clone();
            let id = outcome.id.clone();
            let on_finished = Callback::from(move |success: bool| {
                on_action.emit(Action::MiniGameFinished {
                    id: id.clone(),
                    success,
                });
            });
            html! {
                <GhostChase
                    key={outcome.id.as_str().to_string()}
                    outcome_id={outcome.id.clone()}
                    seed={props.seed}
                    {on_finished}
                />
            }
        }
        Some(slot) => {
            let line = if slot.success { MINI_GAME_WON } else { MINI_GAME_LOST };
            html! { <p class="outcome-card__mini-result">{ line }</p> }
        }
        None => Html::default(),
    };

    let on_dismiss = props.on_action.reform(|_: MouseEvent| Action::Dismiss);
    let on_final = props.on_action.reform(|_: MouseEvent| Action::GoToFinal);

    html! {
        <article class="pixel-card outcome-card" data-kind={outcome.kind.to_string()}>
            <div class="outcome-card__meta">
                <span>{ format!("Bạn chọn: {} • Kết quả: {}", choice_tag(outcome.choice), outcome.kind) }</span>
                <span>{ outcome.label.clone() }</span>
            </div>
            <p class="outcome-card__message">{ outcome.message.clone() }</p>
            { for outcome.prompt.iter().map(|prompt| html! {
                <p class="outcome-card__prompt">{ prompt.clone() }</p>
            }) }
            <figure class="result-figure" aria-hidden="true">
                <div class="result-figure__frame">{ figure }</div>
            </figure>
            { mini_game }
            <div class="outcome-card__actions">
                if props.can_continue {
                    <PixelButton tone={ButtonTone::Cyan} label={"Mở tiếp"} onclick={on_dismiss} />
                }
                <PixelButton label={"Nhận quà cuối"} onclick={on_final} />
            </div>
        </article>
    }
}
