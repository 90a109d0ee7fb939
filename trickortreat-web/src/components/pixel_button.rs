use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonTone {
    #[default]
    Plain,
    Cyan,
    Purple,
}

impl ButtonTone {
    const fn class(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Cyan => Some("pixel-button--cyan"),
            Self::Purple => Some("pixel-button--purple"),
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct PixelButtonProps {
    #[prop_or_default]
    pub label: Option<AttrValue>,
    #[prop_or_default]
    pub tone: ButtonTone,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or_default]
    pub aria_label: Option<AttrValue>,
    #[prop_or_default]
    pub onclick: Callback<MouseEvent>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(PixelButton)]
pub fn pixel_button(props: &PixelButtonProps) -> Html {
    let mut classes = classes!("pixel-button", props.class.clone());
    if let Some(tone) = props.tone.class() {
        classes.push(tone);
    }
    html! {
        <button
            type="button"
            class={classes}
            aria-label={props.aria_label.clone()}
            disabled={props.disabled}
            onclick={props.onclick.clone()}
        >
            { if props.children.is_empty() {
                props.label.as_ref().map(|l| html!{ { l.clone() } }).unwrap_or_default()
            } else {
                props.children.iter().collect::<Html>()
            }}
        </button>
    }
}
