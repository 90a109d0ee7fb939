pub mod door;
pub mod ghost_chase;
pub mod highlights;
pub mod outcome_card;
pub mod pixel_button;
pub mod sound_toggle;
pub mod voucher_preview;

pub use door::Door;
pub use ghost_chase::GhostChase;
pub use highlights::Highlights;
pub use outcome_card::OutcomeCard;
pub use pixel_button::{ButtonTone, PixelButton};
pub use sound_toggle::SoundToggle;
pub use voucher_preview::VoucherPreview;
