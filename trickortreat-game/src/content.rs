//! Fixed message tables.
//!
//! Every pool is non-empty; the outcome builder relies on that and the tests
//! below pin it.

/// Compliments handed out on the generic treat path.
pub const TREAT_COMPLIMENTS: [&str; 7] = [
    "[Tên] có nụ cười làm ngày u ám cũng sáng lên.",
    "Bạn tử tế theo cách khiến người khác muốn tốt bụng hơn.",
    "Bạn làm căn phòng ấm hơn +10° vui mỗi lần xuất hiện.",
    "Đôi mắt biết kể chuyện; hôm nay kể chuyện vui cho chính bạn nhé.",
    "Bạn là bản gốc độc nhất vô nhị – rất đáng quý.",
    "Bạn khiến điều nhỏ xíu cũng thành niềm vui to.",
    "Trái tim bạn biết lắng nghe; cảm ơn vì điều đó.",
];

/// Small imaginary gifts, drawn from the same pool as the compliments.
pub const TREAT_GIFTS: [&str; 3] = [
    "🎟️ Voucher Ôm Ấm Áp: đổi 1 cái ôm thật chặt bất cứ lúc nào.",
    "🫶 Sticker “Bạn làm được!”: dán vào hôm nay.",
    "🌟 Một lời chúc: Bình yên, ngọt ngào, mọi điều như ý.",
];

/// Treats that weave in one of the player's likes.
pub const TREAT_CUSTOM: [&str; 3] = [
    "[Tên] và [LIKE] – combo hoàn hảo tạo nên ngày tuyệt vời.",
    "[LIKE] làm dễ chịu, nhưng [Tên] còn làm trái tim ấm hơn.",
    "Khi nhắc đến [LIKE], mọi người sẽ nhớ đến niềm vui mà bạn lan tỏa.",
];

/// Compliments followed by gifts, the order the generic treat draw indexes into.
pub const TREAT_GENERIC: [&str; 10] = [
    TREAT_COMPLIMENTS[0],
    TREAT_COMPLIMENTS[1],
    TREAT_COMPLIMENTS[2],
    TREAT_COMPLIMENTS[3],
    TREAT_COMPLIMENTS[4],
    TREAT_COMPLIMENTS[5],
    TREAT_COMPLIMENTS[6],
    TREAT_GIFTS[0],
    TREAT_GIFTS[1],
    TREAT_GIFTS[2],
];

pub const LABEL_VOUCHER: &str = "Voucher ngọt ngào";
pub const LABEL_STICKER: &str = "Sticker cổ vũ";
pub const LABEL_WISH: &str = "Chúc ấm áp";
pub const LABEL_COMPLIMENT: &str = "Kẹo khen ngợi";
pub const LABEL_MINI_GAME: &str = "Mini-game pixel";
pub const LABEL_CHALLENGE: &str = "Thử thách dễ thương";

/// Marker substrings checked in order; the first hit picks the treat label.
const TREAT_LABEL_MARKERS: [(&str, &str); 3] = [
    ("Voucher", LABEL_VOUCHER),
    ("Sticker", LABEL_STICKER),
    ("lời chúc", LABEL_WISH),
];

/// A trick card: the dare itself plus an encouraging follow-up line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickTemplate {
    pub message: &'static str,
    pub prompt: &'static str,
    pub mini_game: bool,
}

pub const TRICK_PROMPTS: [TrickTemplate; 7] = [
    TrickTemplate {
        message: "Nhảy lắc lư 10 giây theo nhạc trong đầu bạn.",
        prompt: "Đếm nhịp như máy arcade: 1-2-3-4, cứ thế lặp lại!",
        mini_game: false,
    },
    TrickTemplate {
        message: "Gửi một emoji dễ thương nhất bạn có.",
        prompt: "Chọn ngay emoji khiến bạn phải mỉm cười.",
        mini_game: false,
    },
    TrickTemplate {
        message: "Kể nhanh 1 kỷ niệm vui của hôm nay.",
        prompt: "Không có thì kể về kỷ niệm vui gần nhất cũng được!",
        mini_game: false,
    },
    TrickTemplate {
        message: "Nói “Tôi thật tuyệt” 3 lần (nhỏ cũng được).",
        prompt: "Tặng thêm một cái gật đầu sau mỗi lần nói nhé.",
        mini_game: false,
    },
    TrickTemplate {
        message: "Hít sâu 3 lần, nhắm mắt 5 giây rồi cười nhẹ.",
        prompt: "Gửi tiếng cười đó vào không khí để nó quay lại với bạn.",
        mini_game: false,
    },
    TrickTemplate {
        message: "Uống một ngụm nước và vươn vai thật đã.",
        prompt: "Thêm một vòng xoay cổ nhẹ để cơ thể tỉnh táo.",
        mini_game: false,
    },
    TrickTemplate {
        message: "Viết 1 câu cảm ơn dành cho bản thân ngay bây giờ.",
        prompt: "Có thể là “Cảm ơn mình vì đã cố gắng đến lúc này”.",
        mini_game: false,
    },
];

pub const TRICK_MINI_GAME: TrickTemplate = TrickTemplate {
    message: "Mini-game Candy Arcade: bắt con ma 👻 trong 6 giây!",
    prompt: "Bấm trúng ma tinh nghịch để nhận 1 kẹo tưởng tượng 🍬.",
    mini_game: true,
};

impl TrickTemplate {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.mini_game {
            LABEL_MINI_GAME
        } else {
            LABEL_CHALLENGE
        }
    }
}

/// Label for a treat template, derived from the marker words it contains.
#[must_use]
pub fn treat_label(template: &str) -> &'static str {
    TREAT_LABEL_MARKERS
        .iter()
        .find(|(marker, _)| template.contains(marker))
        .map_or(LABEL_COMPLIMENT, |(_, label)| *label)
}

/// Lines shown after a mini-game settles.
pub const MINI_GAME_WON: &str = "Giỏi quá! Nhận thêm 1 kẹo tưởng tượng 🍬";
pub const MINI_GAME_LOST: &str = "Ma chạy nhanh thật! Bạn vẫn giữ được một nụ cười nhé.";

/// Venues printed on the final voucher preview.
pub const VOUCHER_VENUES: [&str; 4] = [
    "( Rù rì )8B Đặng Tất , Ba Đình , Hà Nội",
    "( Drip Station ) - Tầng 4 khu tập thể A ngõ 70 Ngọc Khánh",
    "( Coffe Koem )107-K2 KTT Thành Công , Ba Đình",
    "(Leo s Tavern ) 9A Bảo Khánh Hoàn Kiếm",
];
pub const VOUCHER_TITLE: &str = "Quà tặng cuối cùng";
pub const VOUCHER_OWNER_CAPTION: &str = "Chủ sở hữu:";
pub const VOUCHER_VALIDITY: &str = "Hợp lệ vĩnh viễn • Dùng càng nhiều càng tốt";
pub const VOUCHER_BRAND: &str = "Retro Candy Arcade";
