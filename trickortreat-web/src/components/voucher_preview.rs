use trickortreat_game::content::{VOUCHER_VALIDITY, VOUCHER_VENUES};
use trickortreat_game::voucher::owner_line;
use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct Props {
    /// Raw name as typed; trimming and fallback happen here.
    pub name: AttrValue,
}

#[function_component(VoucherPreview)]
pub fn voucher_preview(props: &Props) -> Html {
    html! {
        <div class="pixel-card voucher-preview">
            <h3>{ "Quà tặng cuối cùng mong rằng cậu đừng chê" }</h3>
            <div class="voucher-preview__owner">
                <span>{ "Chủ sở hữu" }</span>
                <strong>{ owner_line(&props.name) }</strong>
                <span class="pixel-card voucher-preview__venues">
                    { for VOUCHER_VENUES.iter().map(|venue| html! { <p>{ *venue }</p> }) }
                </span>
            </div>
            <p class="voucher-preview__validity">{ VOUCHER_VALIDITY }</p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn lists_owner_and_venues() {
        let html = block_on(
            LocalServerRenderer::<VoucherPreview>::with_props(Props {
                name: AttrValue::from(""),
            })
            .render(),
        );
        assert!(html.contains("BẠN"), "{html}");
        assert!(html.contains("Drip Station"));
        assert_eq!(html.matches("<p>").count(), VOUCHER_VENUES.len());
    }
}
