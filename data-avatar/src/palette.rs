//! Background colors offered for initials avatars.

/// Hex colors without a leading `#`.
pub const PALETTE: &[&str] = &[
    "b6e3f4", "c0aede", "d1d4f9", "ffd5dc", "ffdfbf", "f4a261", "2a9d8f",
    "e76f51", "264653", "e9c46a", "8e24aa", "663399",
];

pub fn random_color() -> &'static str {
    random_color_with(&mut fastrand::Rng::new())
}

pub fn random_color_with(rng: &mut fastrand::Rng) -> &'static str {
    PALETTE[rng.usize(..PALETTE.len())]
}

/// Normalizes `#RRGGBB` / `rrggbb` to lowercase digits without `#`.
pub fn normalize_hex(color: &str) -> Option<String> {
    let digits = color.trim().trim_start_matches('#');
    if crate::catalog::is_hex_color(digits) {
        Some(digits.to_lowercase())
    } else {
        None
    }
}
