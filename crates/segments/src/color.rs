//! Pure color helpers: hex parsing, linear scaling, hue shifting and a stable
//! string hash used to seed per-directory color tweaks.

use rand::Rng;
use rand::seq::IndexedRandom;
use sha2::{
    Digest,
    Sha256,
};

use crate::error::ColorError;

pub type Rgb = (u8, u8, u8);

pub const CHANNEL_MIN: f64 = 0.0;
pub const CHANNEL_MAX: f64 = 255.0;

/// Lightness choices for generated project colors. Kept dark so the
/// brightened foreground stays readable on top.
const RANDOM_LIGHTNESS: [f64; 4] = [0.15, 0.2, 0.25, 0.3];
const RANDOM_SATURATION: [f64; 6] = [0.1, 0.2, 0.4, 0.6, 0.8, 1.0];

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Parse `#rrggbb` (the `#` is optional) into its channels.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidFormat(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_err| ColorError::InvalidFormat(hex.to_string()))
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

pub fn rgb_to_hex((r, g, b): Rgb) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Scale every channel of a hex color by `factor`.
///
/// Use a factor between 0 and 1 to darken and above 1 to brighten. Channels
/// are clamped to `0..=255` and truncated. A negative factor or anything that
/// is not six hex digits comes back unchanged with the `#` stripped, so a bad
/// stored color never takes down a prompt draw.
///
/// ```
/// use segments::color::scale_color;
///
/// assert_eq!(scale_color("#df3c3c", 0.5), "#6f1e1e");
/// assert_eq!(scale_color("#52d24f", 1.6), "#83ff7e");
/// assert_eq!(scale_color("red", 2.0), "red");
/// ```
pub fn scale_color(hex: &str, factor: f64) -> String {
    let digits = hex.trim_matches('#');
    if factor < 0.0 {
        return digits.to_string();
    }

    match hex_to_rgb(digits) {
        Ok((r, g, b)) => {
            let scale = |channel: u8| clamp(f64::from(channel) * factor, CHANNEL_MIN, CHANNEL_MAX) as u8;
            rgb_to_hex((scale(r), scale(g), scale(b)))
        },
        Err(_) => digits.to_string(),
    }
}

/// Map a string onto `[0, 1)`. Stable across runs and platforms.
pub fn hash_to_unit_float(s: &str) -> f64 {
    let digest = Sha256::digest(s.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    // 53 bits is all an f64 mantissa holds; dividing by 2^53 keeps the result below 1.
    let bits = u64::from_be_bytes(head) >> 11;
    bits as f64 / (1u64 << 53) as f64
}

/// Rotate the hue of `rgb` by `shift` turns, keeping saturation and value.
pub fn adjust_hue(rgb: Rgb, shift: f64) -> Rgb {
    let (h, s, v) = rgb_to_hsv(rgb);
    let h = (h + shift).rem_euclid(1.0);
    hsv_to_rgb(h, s, v)
}

pub fn rgb_to_hsv((r, g, b): Rgb) -> (f64, f64, f64) {
    let (r, g, b) = (
        f64::from(r) / CHANNEL_MAX,
        f64::from(g) / CHANNEL_MAX,
        f64::from(b) / CHANNEL_MAX,
    );
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;
    if (max - min).abs() < f64::EPSILON {
        return (0.0, 0.0, v);
    }

    let delta = max - min;
    let s = delta / max;
    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let h = if (r - max).abs() < f64::EPSILON {
        bc - gc
    } else if (g - max).abs() < f64::EPSILON {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    ((h / 6.0).rem_euclid(1.0), s, v)
}

pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let i = (h * 6.0).floor();
        let f = h * 6.0 - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match (i as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    let to_channel = |c: f64| clamp(c * CHANNEL_MAX, CHANNEL_MIN, CHANNEL_MAX) as u8;
    (to_channel(r), to_channel(g), to_channel(b))
}

pub fn hls_to_rgb(h: f64, l: f64, s: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (l, l, l);
    }

    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    (
        hls_channel(m1, m2, h + 1.0 / 3.0),
        hls_channel(m1, m2, h),
        hls_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hls_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// A dark random color for a freshly registered project.
pub fn random_project_color() -> String {
    let mut rng = rand::rng();
    let hue = (rng.random::<f64>() * 1000.0).round() / 1000.0;
    let lightness = *RANDOM_LIGHTNESS.choose(&mut rng).unwrap_or(&RANDOM_LIGHTNESS[0]);
    let saturation = *RANDOM_SATURATION.choose(&mut rng).unwrap_or(&RANDOM_SATURATION[0]);

    let (r, g, b) = hls_to_rgb(hue, lightness, saturation);
    let to_channel = |c: f64| clamp((c * CHANNEL_MAX).round(), CHANNEL_MIN, CHANNEL_MAX) as u8;
    rgb_to_hex((to_channel(r), to_channel(g), to_channel(b)))
}
