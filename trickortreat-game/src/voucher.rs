//! Final voucher image as canvas drawing commands.
//!
//! The layout is fixed; only the owner line and the filename depend on the
//! player. Hosts replay [`DrawOp`]s onto whatever 2D surface they have.
use serde::{Deserialize, Serialize};

use crate::constants::{
    OWNER_FALLBACK, VOUCHER_FILE_PREFIX, VOUCHER_HEIGHT, VOUCHER_SLUG_FALLBACK, VOUCHER_WIDTH,
};
use crate::content::{VOUCHER_BRAND, VOUCHER_OWNER_CAPTION, VOUCHER_TITLE, VOUCHER_VALIDITY};

pub const COLOR_BACKGROUND: &str = "#0f172a";
pub const COLOR_FRAME: &str = "#6d28d9";
pub const COLOR_PANEL: &str = "#1f2937";
pub const COLOR_CYAN: &str = "#22d3ee";
pub const COLOR_ORANGE: &str = "#fb923c";
pub const COLOR_TEXT: &str = "#f8fafc";

const FONT_TITLE: &str = "34px 'Press Start 2P', 'Fira Sans', monospace";
const FONT_CAPTION: &str = "22px 'Fira Sans', sans-serif";
const FONT_OWNER: &str = "28px 'Press Start 2P', monospace";
const FONT_BODY: &str = "20px 'Fira Sans', sans-serif";
const FONT_BRAND: &str = "18px 'Press Start 2P', monospace";

const TEXT_LEFT: f64 = 140.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
        }
    }
}

/// One canvas call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    FillRect {
        color: &'static str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    StrokeRect {
        color: &'static str,
        line_width: f64,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Text {
        color: &'static str,
        font: &'static str,
        align: TextAlign,
        x: f64,
        y: f64,
        text: String,
    },
}

/// Canvas size and the commands to paint on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoucherLayout {
    pub width: u32,
    pub height: u32,
    pub ops: Vec<DrawOp>,
    pub filename: String,
}

fn inset(margin: f64) -> (f64, f64, f64, f64) {
    let width = f64::from(VOUCHER_WIDTH);
    let height = f64::from(VOUCHER_HEIGHT);
    (margin, margin, width - 2.0 * margin, height - 2.0 * margin)
}

fn fill_inset(color: &'static str, margin: f64) -> DrawOp {
    let (x, y, width, height) = inset(margin);
    DrawOp::FillRect {
        color,
        x,
        y,
        width,
        height,
    }
}

fn text(
    color: &'static str,
    font: &'static str,
    align: TextAlign,
    x: f64,
    y: f64,
    body: &str,
) -> DrawOp {
    DrawOp::Text {
        color,
        font,
        align,
        x,
        y,
        text: body.to_string(),
    }
}

/// Name printed on the voucher, upper-cased.
#[must_use]
pub fn owner_line(raw_name: &str) -> String {
    let trimmed = raw_name.trim();
    let owner = if trimmed.is_empty() { OWNER_FALLBACK } else { trimmed };
    owner.to_uppercase()
}

/// `voucher-om-{slug}.png`, slug from the trimmed lower-cased name with
/// whitespace runs collapsed to `-`.
#[must_use]
pub fn download_filename(raw_name: &str) -> String {
    let slug = raw_name
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    let slug = if slug.is_empty() {
        VOUCHER_SLUG_FALLBACK.to_string()
    } else {
        slug
    };
    format!("{VOUCHER_FILE_PREFIX}{slug}.png")
}

#[must_use]
pub fn layout(raw_name: &str) -> VoucherLayout {
    let (frame_x, frame_y, frame_w, frame_h) = inset(90.0);
    let ops = vec![
        fill_inset(COLOR_BACKGROUND, 0.0),
        fill_inset(COLOR_FRAME, 30.0),
        fill_inset(COLOR_PANEL, 70.0),
        DrawOp::StrokeRect {
            color: COLOR_CYAN,
            line_width: 8.0,
            x: frame_x,
            y: frame_y,
            width: frame_w,
            height: frame_h,
        },
        text(
            COLOR_ORANGE,
            FONT_TITLE,
            TextAlign::Center,
            f64::from(VOUCHER_WIDTH) / 2.0,
            150.0,
            VOUCHER_TITLE,
        ),
        text(COLOR_TEXT, FONT_CAPTION, TextAlign::Left, TEXT_LEFT, 240.0, VOUCHER_OWNER_CAPTION),
        text(COLOR_CYAN, FONT_OWNER, TextAlign::Left, TEXT_LEFT, 300.0, &owner_line(raw_name)),
        text(COLOR_TEXT, FONT_BODY, TextAlign::Left, TEXT_LEFT, 360.0, VOUCHER_VALIDITY),
        text(COLOR_ORANGE, FONT_BRAND, TextAlign::Left, TEXT_LEFT, 470.0, VOUCHER_BRAND),
    ];
    VoucherLayout {
        width: VOUCHER_WIDTH,
        height: VOUCHER_HEIGHT,
        ops,
        filename: download_filename(raw_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_slugs_whitespace_runs() {
        assert_eq!(download_filename("  Ngọc   Anh "), "voucher-om-ngọc-anh.png");
        assert_eq!(download_filename("LAN"), "voucher-om-lan.png");
        assert_eq!(download_filename("   "), "voucher-om-ban.png");
        assert_eq!(download_filename(""), "voucher-om-ban.png");
    }

    #[test]
    fn owner_falls_back_and_upper_cases() {
        assert_eq!(owner_line(" linh "), "LINH");
        assert_eq!(owner_line(""), "BẠN");
    }

    #[test]
    fn blank_names_share_one_fallback() {
        for raw in ["", "   ", "\t\n"] {
            assert_eq!(owner_line(raw), "BẠN");
            assert_eq!(download_filename(raw), "voucher-om-ban.png");
        }
    }

    #[test]
    fn layout_paints_frames_before_text() {
        let voucher = layout("Linh");
        assert_eq!((voucher.width, voucher.height), (900, 540));
        assert_eq!(voucher.ops.len(), 9);
        assert_eq!(
            voucher.ops[0],
            DrawOp::FillRect {
                color: COLOR_BACKGROUND,
                x: 0.0,
                y: 0.0,
                width: 900.0,
                height: 540.0,
            }
        );
        assert_eq!(
            voucher.ops[2],
            DrawOp::FillRect {
                color: COLOR_PANEL,
                x: 70.0,
                y: 70.0,
                width: 760.0,
                height: 400.0,
            }
        );
        assert!(matches!(
            voucher.ops[3],
            DrawOp::StrokeRect { line_width, width, .. } if line_width == 8.0 && width == 720.0
        ));
        let texts: Vec<&str> = voucher
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "Quà tặng cuối cùng",
                "Chủ sở hữu:",
                "LINH",
                "Hợp lệ vĩnh viễn • Dùng càng nhiều càng tốt",
                "Retro Candy Arcade",
            ]
        );
        assert_eq!(voucher.filename, "voucher-om-linh.png");
    }

    #[test]
    fn title_is_centered() {
        let voucher = layout("");
        assert!(matches!(
            &voucher.ops[4],
            DrawOp::Text { align: TextAlign::Center, x, .. } if (*x - 450.0).abs() < f64::EPSILON
        ));
    }
}
