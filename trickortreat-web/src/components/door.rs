use yew::prelude::*;

#[derive(Properties, PartialEq, Eq, Clone)]
pub struct Props {
    pub open: bool,
}

/// Pixel door; `data-open` drives the CSS swing.
#[function_component(Door)]
pub fn door(props: &Props) -> Html {
    let data_open = props.open.then_some(AttrValue::Static("true"));
    html! {
        <div class="pixel-door" data-open={data_open} aria-hidden="true">
            <div class="pixel-door__light" />
            <div class="pixel-door__handle" />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn open_flag_sets_data_attribute() {
        let open = block_on(LocalServerRenderer::<Door>::with_props(Props { open: true }).render());
        assert!(open.contains("data-open=\"true\""), "{open}");
        let closed =
            block_on(LocalServerRenderer::<Door>::with_props(Props { open: false }).render());
        assert!(!closed.contains("data-open"));
    }
}
