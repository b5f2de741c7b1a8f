//! Captcha challenge generation and one-time verification.
//!
//! The challenge is a 6-character code rendered onto a noisy PNG with a
//! small embedded 5x7 font. The expected value lives in the session and
//! is consumed on the first verification attempt, correct or not.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use rand::Rng;
use subtle::ConstantTimeEq;
use tower_sessions::Session;

use crate::server::error::Error;
use crate::server::model::session::SessionCaptcha;

pub const CODE_LENGTH: usize = 6;

// Ambiguous glyphs stay in; the comparison is case-insensitive so the
// usual 0/O complaints are the only cost.
const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const WIDTH: u32 = 150;
const HEIGHT: u32 = 50;
const GLYPH_SCALE: i64 = 2;
const NOISE_LINES: usize = 5;
const NOISE_DOTS: usize = 50;

const BACKGROUND: Rgb<u8> = Rgb([240, 240, 240]);
const LINE_COLOR: Rgb<u8> = Rgb([150, 150, 150]);
const DOT_COLOR: Rgb<u8> = Rgb([100, 100, 100]);
const GLYPH_COLOR: Rgb<u8> = Rgb([50, 50, 50]);

pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// Generates a fresh challenge, stores the expected value in the session,
/// and returns the rendered PNG bytes.
pub async fn issue(session: &Session) -> Result<Vec<u8>, Error> {
    let code = generate_code();
    SessionCaptcha::insert(session, &code).await?;

    render(&code)
}

/// Compares the user's answer against the stored code, case-insensitively
/// and in constant time. The stored code is cleared before comparing, so
/// every code works at most once.
pub async fn verify(session: &Session, input: &str) -> Result<bool, Error> {
    let Some(expected) = SessionCaptcha::take(session).await? else {
        return Ok(false);
    };

    let expected = expected.to_lowercase();
    let input = input.to_lowercase();

    Ok(bool::from(expected.as_bytes().ct_eq(input.as_bytes())))
}

pub fn render(code: &str) -> Result<Vec<u8>, Error> {
    let mut rng = rand::rng();
    let mut image = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    for _ in 0..NOISE_LINES {
        let from = (
            rng.random_range(0..WIDTH as i64),
            rng.random_range(0..HEIGHT as i64),
        );
        let to = (
            rng.random_range(0..WIDTH as i64),
            rng.random_range(0..HEIGHT as i64),
        );
        draw_line(&mut image, from, to, LINE_COLOR);
    }

    for (index, ch) in code.chars().enumerate() {
        let x = 10 + index as i64 * 22;
        let y = rng.random_range(8..=28);
        let slant = rng.random_range(-1..=1);
        draw_glyph(&mut image, ch, x, y, slant, GLYPH_COLOR);
    }

    for _ in 0..NOISE_DOTS {
        let x = rng.random_range(0..WIDTH);
        let y = rng.random_range(0..HEIGHT);
        image.put_pixel(x, y, DOT_COLOR);
    }

    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;

    Ok(buffer.into_inner())
}

fn put_pixel_checked(image: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_line(image: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;

    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut error = dx + dy;

    loop {
        put_pixel_checked(image, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            x += sx;
        }
        if doubled <= dx {
            error += dx;
            y += sy;
        }
    }
}

/// Draws one scaled 5x7 glyph with a per-glyph horizontal slant.
fn draw_glyph(image: &mut RgbImage, ch: char, x: i64, y: i64, slant: i64, color: Rgb<u8>) {
    let rows = glyph_rows(ch);

    for (row, bits) in rows.iter().enumerate() {
        let row_offset = (row as i64 - 3) * slant;
        for col in 0..5 {
            if bits & (0b10000 >> col) == 0 {
                continue;
            }
            let base_x = x + col as i64 * GLYPH_SCALE + row_offset;
            let base_y = y + row as i64 * GLYPH_SCALE;
            for dx in 0..GLYPH_SCALE {
                for dy in 0..GLYPH_SCALE {
                    put_pixel_checked(image, base_x + dx, base_y + dy, color);
                }
            }
        }
    }
}

fn glyph_rows(ch: char) -> [u8; 7] {
    match ch {
        'A' => [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        _ => [0; 7],
    }
}
