use trickortreat_game::constants::MAX_TURNS;
use trickortreat_game::{Action, Choice, FinalSummary, Phase, Session};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::app::dispatch::now_ms;
use crate::components::{
    ButtonTone, Door, Highlights, OutcomeCard, PixelButton, VoucherPreview,
};
use crate::export::download_voucher;

fn input_value(event: &InputEvent) -> String {
    event.target_unchecked_into::<HtmlInputElement>().value()
}

#[must_use]
pub fn render_phase(session: &Session, on_action: &Callback<Action>) -> Html {
    match session.phase() {
        Phase::Intro => render_intro(session, on_action),
        Phase::Play => render_play(session, on_action),
        Phase::Final => render_final(session, on_action),
    }
}

#[must_use]
pub fn render_intro(session: &Session, on_action: &Callback<Action>) -> Html {
    let on_name = on_action.reform(|e: InputEvent| Action::EditName(input_value(&e)));
    let on_likes = on_action.reform(|e: InputEvent| Action::EditLikes(input_value(&e)));
    let on_start = on_action.reform(|_: MouseEvent| Action::Start { now_ms: now_ms() });
    html! {
        <section class="pixel-card intro">
            <h1>{ "🎃 Trick or Treat" }</h1>
            <div class="intro__fields">
                <label>
                    { "Tên của cậu (tuỳ chọn)" }
                    <input
                        id="player-name"
                        type="text"
                        value={session.name_input().to_string()}
                        oninput={on_name}
                        placeholder="VD: Phạm Hồng Ánh ..."
                    />
                </label>
                <label>
                    { "Điều cậu thích" }
                    <input
                        id="player-likes"
                        type="text"
                        value={session.likes_input().to_string()}
                        oninput={on_likes}
                        placeholder="VD: mèo, cà phê, sách"
                    />
                </label>
            </div>
            <div class="intro__actions">
                <PixelButton tone={ButtonTone::Cyan} label={"Bắt đầu"} onclick={on_start} />
            </div>
        </section>
    }
}

#[must_use]
pub fn render_play(session: &Session, on_action: &Callback<Action>) -> Html {
    let on_treat = on_action.reform(|_: MouseEvent| Action::ChooseDoor(Choice::Treat));
    let on_trick = on_action.reform(|_: MouseEvent| Action::ChooseDoor(Choice::Trick));
    let on_final = on_action.reform(|_: MouseEvent| Action::GoToFinal);
    let locked = !session.can_choose();

    let stage = session.current().map_or_else(
        || {
            html! {
                <div class="pixel-card play__waiting">
                    <p>{ format!("Gõ cửa để mở bất ngờ cho riêng {}.", session.context().display_name()) }</p>
                    <p>{ "Cậu có thể dừng bất cứ lúc nào để nhận quà." }</p>
                </div>
            }
        },
        |outcome| {
            html! {
                <OutcomeCard
                    outcome={outcome.clone()}
                    seed={session.seed()}
                    can_continue={!session.final_offered()}
                    on_action={on_action.clone()}
                />
            }
        },
    );

    html! {
        <section class="play">
            <header class="pixel-card play__header">
                <p>{ format!("Mỗi lượt mở một điều bất ngờ. Cậu có tối đa {MAX_TURNS} lượt và có thể dừng bất cứ lúc nào.") }</p>
                <p class="play__counter">{ format!("Đã mở: {} / {MAX_TURNS} lượt", session.turn_count()) }</p>
            </header>
            <div class="play__board">
                <div class="play__door">
                    <Door open={session.door_open()} />
                    <span>{ format!("Còn {} lượt • Chọn một nút nhé!", session.turns_left()) }</span>
                    <div class="play__choices">
                        <PixelButton tone={ButtonTone::Cyan} label={"Chọn Treat"} disabled={locked} onclick={on_treat} />
                        <PixelButton tone={ButtonTone::Purple} label={"Chọn Trick"} disabled={locked} onclick={on_trick} />
                    </div>
                </div>
                <div class="play__stage">
                    { stage }
                    if session.final_offered() {
                        <div class="pixel-card play__done">
                            <p>{ format!("Đã hết {MAX_TURNS} lượt! Đã đến lúc nhận quà cuối cùng.") }</p>
                            <PixelButton tone={ButtonTone::Purple} label={"Đến quà cuối"} onclick={on_final} />
                        </div>
                    }
                </div>
            </div>
        </section>
    }
}

#[must_use]
pub fn render_final(session: &Session, on_action: &Callback<Action>) -> Html {
    let summary = FinalSummary::from_session(session);
    let on_reset = on_action.reform(|_: MouseEvent| Action::Reset);
    let on_export = {
        let name = session.name_input().to_string();
        Callback::from(move |_: MouseEvent| {
            if let Err(err) = download_voucher(&name) {
                log::error!("voucher export failed: {err}");
            }
        })
    };
    html! {
        <section class="pixel-card final">
            <p class="final__thanks">{ "Cảm ơn bạn đã chơi, mong rằng cậu nhẹ tay =))))." }</p>
            <div class="final__body">
                <VoucherPreview name={AttrValue::from(session.name_input().to_string())} />
                <div class="pixel-card final__summary">
                    <p>{ format!("Lượt bạn đã mở: {} / {}", summary.turns_played, summary.max_turns) }</p>
                    if summary.mini_games_played > 0 {
                        <p>{ format!("Bắt ma: {} / {}", summary.mini_games_won, summary.mini_games_played) }</p>
                    }
                    <p class="final__heading">{ "Những điều bạn mở được:" }</p>
                    <Highlights items={summary.highlights} />
                </div>
            </div>
            <div class="final__actions">
                <PixelButton tone={ButtonTone::Cyan} label={"Tải PNG"} onclick={on_export} />
                <PixelButton tone={ButtonTone::Purple} label={"Chơi lại"} onclick={on_reset} />
            </div>
        </section>
    }
}
