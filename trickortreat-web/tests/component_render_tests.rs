use std::rc::Rc;

use futures::executor::block_on;
use trickortreat_game::{Action, Choice, Effect, Session, SilentBoard, Timer};
use trickortreat_web::app::{App, AppProps, view};
use trickortreat_web::components::highlights::{self, Highlights};
use trickortreat_web::components::outcome_card::{self, OutcomeCard};
use yew::prelude::*;
use yew::LocalServerRenderer;

#[derive(Properties, PartialEq, Clone)]
struct ScriptProps {
    actions: Vec<Action>,
}

/// Replays `actions` against a fresh session and renders the phase view.
#[function_component(Scripted)]
fn scripted(props: &ScriptProps) -> Html {
    let session = replay(&props.actions);
    view::render_phase(&session, &Callback::noop())
}

/// Dispatch each action, then run any timers it scheduled.
fn replay(actions: &[Action]) -> Session {
    let mut session = Session::new();
    for action in actions {
        let effects = session.dispatch(action.clone()).unwrap_or_default();
        let mut timers: Vec<Timer> = timers_in(&effects);
        while let Some(timer) = timers.pop() {
            let effects = session.dispatch(timer.fire(5_000)).unwrap_or_default();
            timers.extend(timers_in(&effects));
        }
    }
    session
}

fn timers_in(effects: &[Effect]) -> Vec<Timer> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Schedule { timer, .. } => Some(*timer),
            _ => None,
        })
        .collect()
}

fn render(actions: Vec<Action>) -> String {
    block_on(LocalServerRenderer::<Scripted>::with_props(ScriptProps { actions }).render())
}

#[test]
fn app_starts_on_the_intro_form() {
    let props = AppProps {
        board: Rc::new(SilentBoard),
    };
    let html = block_on(LocalServerRenderer::<App>::with_props(props).render());
    assert!(html.contains("player-name"), "{html}");
    assert!(html.contains("Bắt đầu"));
    assert!(html.contains("Âm thanh"));
    assert!(html.contains("data-phase=\"intro\""));
}

#[test]
fn intro_prefills_inputs() {
    let html = render(vec![
        Action::EditName("Ánh".into()),
        Action::EditLikes("mèo, trà".into()),
    ]);
    assert!(html.contains("Ánh"), "{html}");
    assert!(html.contains("mèo, trà"));
}

#[test]
fn play_view_counts_turns_and_shows_outcome() {
    let html = render(vec![
        Action::EditName("Ánh".into()),
        Action::Start { now_ms: 1_234 },
        Action::ChooseDoor(Choice::Treat),
    ]);
    assert!(html.contains("Đã mở: 1 / 8 lượt"), "{html}");
    assert!(html.contains("Còn 7 lượt"));
    assert!(html.contains("Bạn chọn: TREAT"));
    assert!(html.contains("Nhận quà cuối"));
    assert!(!html.contains("[Tên]"));
}

#[test]
fn play_view_waits_for_a_knock() {
    let html = render(vec![Action::Start { now_ms: 99 }]);
    assert!(html.contains("Gõ cửa để mở bất ngờ cho riêng bạn."), "{html}");
    assert!(!html.contains("Đến quà cuối"));
}

#[test]
fn exhausted_session_offers_the_final_gift() {
    let mut actions = vec![Action::Start { now_ms: 4_242 }];
    for _ in 0..8 {
        actions.push(Action::ChooseDoor(Choice::Trick));
        actions.push(Action::Dismiss);
    }
    let html = render(actions);
    assert!(html.contains("Đã hết 8 lượt!"), "{html}");
    assert!(html.contains("Đến quà cuối"));
    assert!(html.contains("disabled"));
}

#[test]
fn final_view_lists_highlights_and_voucher() {
    let mut actions = vec![
        Action::EditName("Bảo Ngọc".into()),
        Action::Start { now_ms: 31_337 },
    ];
    for _ in 0..3 {
        actions.push(Action::ChooseDoor(Choice::Treat));
    }
    actions.push(Action::GoToFinal);
    let html = render(actions);
    assert!(html.contains("Lượt bạn đã mở: 3 / 8"), "{html}");
    assert!(html.contains("BẢO NGỌC"));
    assert!(html.contains("Tải PNG"));
    assert!(html.contains("Chơi lại"));
    assert_eq!(html.matches("<li>").count(), 3);
}

#[test]
fn highlights_render_empty_state() {
    let html = block_on(
        LocalServerRenderer::<Highlights>::with_props(highlights::Props { items: Vec::new() })
            .render(),
    );
    assert!(html.contains("Chưa mở cánh cửa nào."));
}

#[test]
fn settled_mini_game_shows_result_line() {
    let session = (1..2_000_u64)
        .map(|seed| replay(&[Action::Start { now_ms: seed }, Action::ChooseDoor(Choice::Trick)]))
        .find(|s| s.current().is_some_and(|o| o.mini_game.is_some()))
        .expect("some seed opens with a ghost");
    let mut outcome = session.current().cloned().expect("outcome present");

    let live = block_on(
        LocalServerRenderer::<OutcomeCard>::with_props(outcome_card::Props {
            outcome: outcome.clone(),
            seed: session.seed(),
            can_continue: true,
            on_action: Callback::noop(),
        })
        .render(),
    );
    assert!(live.contains("Bắt ma trong 6 giây"), "{live}");

    outcome.settle_mini_game(true);
    let settled = block_on(
        LocalServerRenderer::<OutcomeCard>::with_props(outcome_card::Props {
            outcome,
            seed: session.seed(),
            can_continue: true,
            on_action: Callback::noop(),
        })
        .render(),
    );
    assert!(settled.contains("Giỏi quá!"), "{settled}");
    assert!(!settled.contains("Bắt ma trong"));
}
