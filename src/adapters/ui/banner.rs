//! ASCII banner with a warm-to-fresh gradient (MEALGRID).

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Tangerine (#ff8c00).
const TANGERINE: (u8, u8, u8) = (0xff, 0x8c, 0x00);
/// Leaf Green (#2ecc71).
const LEAF_GREEN: (u8, u8, u8) = (0x2e, 0xcc, 0x71);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Prints the welcome banner: "MEALGRID" in figlet with a gradient from
/// Tangerine to Leaf Green, then the version line.
pub fn print_welcome() {
    let mut out = stdout();
    let Ok(font) = FIGfont::standard() else {
        let _ = out.execute(Print("MEALGRID\r\n"));
        return;
    };
    let Some(figure) = font.convert("MEALGRID") else {
        let _ = out.execute(Print("MEALGRID\r\n"));
        return;
    };
    let art = figure.to_string();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(TANGERINE, LEAF_GREEN, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: LEAF_GREEN.0,
        g: LEAF_GREEN.1,
        b: LEAF_GREEN.2,
    }));
    let _ = out.execute(Print(format!(
        "v{} | 태백지역 학교 급식 비교 조회\r\n",
        version
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
