use trickortreat_game::AudioPrefs;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub prefs: AudioPrefs,
    pub on_toggle_sound: Callback<MouseEvent>,
    pub on_toggle_music: Callback<MouseEvent>,
}

const fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

#[function_component(SoundToggle)]
pub fn sound_toggle(props: &Props) -> Html {
    html! {
        <div class="sound-toggle">
            <div class="sound-toggle__group">
                <span>{ "Âm thanh" }</span>
                <button
                    type="button"
                    id="toggle-sound"
                    aria-pressed={props.prefs.sfx_enabled.to_string()}
                    onclick={props.on_toggle_sound.clone()}
                >
                    { on_off(props.prefs.sfx_enabled) }
                </button>
            </div>
            <div class="sound-toggle__group">
                <span>{ "Nhạc nền" }</span>
                <button
                    type="button"
                    id="toggle-music"
                    aria-pressed={props.prefs.music_enabled.to_string()}
                    onclick={props.on_toggle_music.clone()}
                >
                    { on_off(props.prefs.music_enabled) }
                </button>
            </div>
        </div>
    }
}
