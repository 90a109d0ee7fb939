use trickortreat_game::{Highlight, OutcomeKind};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub items: Vec<Highlight>,
}

#[function_component(Highlights)]
pub fn highlights(props: &Props) -> Html {
    if props.items.is_empty() {
        return html! { <p class="highlights__empty">{ "Chưa mở cánh cửa nào." }</p> };
    }
    html! {
        <ul class="highlights">
            { for props.items.iter().map(|item| {
                let tag = match item.kind {
                    OutcomeKind::Treat => "Treat",
                    OutcomeKind::Trick => "Trick",
                };
                html! { <li>{ format!("• [{tag}] {}", item.message) }</li> }
            }) }
        </ul>
    }
}
