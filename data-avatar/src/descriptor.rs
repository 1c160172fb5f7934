use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::palette::{self, normalize_hex, PALETTE};
use crate::params::Params;
use data_error::Result;

/// Shown when a name yields no initials.
pub const PLACEHOLDER_INITIAL: &str = "?";

/// Seed used whenever a seed sanitizes to nothing.
pub const FALLBACK_SEED: &str = "fallback";

/// How a user's avatar is rendered or fetched.
///
/// Stored as JSON with a `type` tag, e.g.
/// `{"type":"initial","value":"JD","color":"663399"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AvatarDescriptor {
    Initial { value: String, color: String },
    Bitmoji { value: Url },
    Dicebear(DicebearAvatar),
    Image { value: Url },
}

/// A generated avatar. Its `value` is always the URL derived from the
/// other fields, so it can only be created through
/// [`AvatarService::dicebear`](crate::AvatarService::dicebear).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicebearAvatar {
    value: Url,
    style: String,
    seed: String,
    params: Params,
}

impl DicebearAvatar {
    pub(crate) fn new(value: Url, style: String, seed: String, params: Params) -> Self {
        Self {
            value,
            style,
            seed,
            params,
        }
    }

    pub fn value(&self) -> &Url {
        &self.value
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvatarKind {
    Initial,
    Bitmoji,
    Dicebear,
    Image,
}

impl AvatarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvatarKind::Initial => "initial",
            AvatarKind::Bitmoji => "bitmoji",
            AvatarKind::Dicebear => "dicebear",
            AvatarKind::Image => "image",
        }
    }
}

impl fmt::Display for AvatarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvatarKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "initial" => Ok(AvatarKind::Initial),
            "bitmoji" => Ok(AvatarKind::Bitmoji),
            "dicebear" => Ok(AvatarKind::Dicebear),
            "image" => Ok(AvatarKind::Image),
            other => Err(format!("Unknown avatar kind: {}", other)),
        }
    }
}

impl AvatarDescriptor {
    /// Initials of `display_name` on the given color. A color that is
    /// not six hex digits is replaced by the first palette entry.
    pub fn initial(display_name: &str, color: &str) -> Self {
        let color = normalize_hex(color).unwrap_or_else(|| {
            log::warn!("Invalid color {:?}, using {}", color, PALETTE[0]);
            PALETTE[0].to_owned()
        });
        AvatarDescriptor::Initial {
            value: initials(display_name),
            color,
        }
    }

    /// Initials on a random palette color.
    pub fn initial_random(display_name: &str) -> Self {
        Self::initial(display_name, palette::random_color())
    }

    pub fn bitmoji(url: &str) -> Result<Self> {
        Ok(AvatarDescriptor::Bitmoji {
            value: Url::parse(url.trim())?,
        })
    }

    pub fn image(url: &str) -> Result<Self> {
        Ok(AvatarDescriptor::Image {
            value: Url::parse(url.trim())?,
        })
    }

    pub fn kind(&self) -> AvatarKind {
        match self {
            AvatarDescriptor::Initial { .. } => AvatarKind::Initial,
            AvatarDescriptor::Bitmoji { .. } => AvatarKind::Bitmoji,
            AvatarDescriptor::Dicebear(_) => AvatarKind::Dicebear,
            AvatarDescriptor::Image { .. } => AvatarKind::Image,
        }
    }

    /// Initials for `initial`, the image URL otherwise.
    pub fn value(&self) -> &str {
        match self {
            AvatarDescriptor::Initial { value, .. } => value,
            AvatarDescriptor::Bitmoji { value } => value.as_str(),
            AvatarDescriptor::Dicebear(avatar) => avatar.value.as_str(),
            AvatarDescriptor::Image { value } => value.as_str(),
        }
    }

    /// The image to fetch, if this avatar is an image at all.
    pub fn display_url(&self) -> Option<&Url> {
        match self {
            AvatarDescriptor::Initial { .. } => None,
            AvatarDescriptor::Bitmoji { value } => Some(value),
            AvatarDescriptor::Dicebear(avatar) => Some(&avatar.value),
            AvatarDescriptor::Image { value } => Some(value),
        }
    }
}

/// Up to two uppercase initials of a display name.
///
/// ```
/// use data_avatar::initials;
///
/// assert_eq!(initials("Jane Doe"), "JD");
/// assert_eq!(initials("yeet"), "Y");
/// assert_eq!(initials("   "), "?");
/// ```
pub fn initials(display_name: &str) -> String {
    let letters: String = display_name
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    if letters.is_empty() {
        PLACEHOLDER_INITIAL.to_owned()
    } else {
        letters
    }
}

/// Reduces a seed to lowercase ASCII alphanumerics separated by single
/// hyphens.
pub fn sanitize_seed(seed: &str) -> String {
    let mut token = String::with_capacity(seed.len());
    for c in seed.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            token.push(c);
        } else if !token.ends_with('-') {
            token.push('-');
        }
    }

    let token = token.trim_matches('-');
    if token.is_empty() {
        FALLBACK_SEED.to_owned()
    } else {
        token.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    #[rstest]
    #[case("Jane Doe", "JD")]
    #[case("", "?")]
    #[case("yeet", "Y")]
    #[case("  ada   lovelace  byron ", "AL")]
    #[case("émile zola", "ÉZ")]
    fn initials_examples(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(initials(name), expected);
    }

    #[quickcheck]
    fn initials_are_short_and_non_empty(name: String) -> bool {
        let result = initials(&name);
        !result.is_empty() && result.chars().count() <= 2
    }

    #[rstest]
    #[case("vibes-42", "vibes-42")]
    #[case("User 7", "user-7")]
    #[case("  --Hello,  World!!  ", "hello-world")]
    #[case("", "fallback")]
    #[case("日本", "fallback")]
    fn sanitize_examples(#[case] seed: &str, #[case] expected: &str) {
        assert_eq!(sanitize_seed(seed), expected);
    }

    #[quickcheck]
    fn sanitized_seeds_are_url_safe(seed: String) -> bool {
        let token = sanitize_seed(&seed);
        !token.is_empty()
            && !token.starts_with('-')
            && !token.ends_with('-')
            && !token.contains("--")
            && token
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }

    #[test]
    fn initial_descriptor_json() {
        let avatar = AvatarDescriptor::initial("Jane Doe", "#663399");
        assert_eq!(avatar.kind(), AvatarKind::Initial);
        assert_eq!(avatar.value(), "JD");
        assert!(avatar.display_url().is_none());

        let json = serde_json::to_value(&avatar).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "initial", "value": "JD", "color": "663399"})
        );
    }

    #[test]
    fn initial_with_bad_color_uses_palette() {
        match AvatarDescriptor::initial("x", "not-a-color") {
            AvatarDescriptor::Initial { color, .. } => assert_eq!(color, PALETTE[0]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn initial_random_uses_palette() {
        match AvatarDescriptor::initial_random("Jane Doe") {
            AvatarDescriptor::Initial { value, color } => {
                assert_eq!(value, "JD");
                assert!(PALETTE.contains(&color.as_str()));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn image_descriptors_need_absolute_urls() {
        let avatar =
            AvatarDescriptor::bitmoji("https://sdk.bitmoji.com/render/panel/abc.png")
                .unwrap();
        assert_eq!(avatar.kind(), AvatarKind::Bitmoji);
        assert_eq!(avatar.value(), "https://sdk.bitmoji.com/render/panel/abc.png");

        assert!(AvatarDescriptor::image("/relative/path.png").is_err());
        assert!(AvatarDescriptor::image("").is_err());
    }

    #[test]
    fn descriptor_json_round_trip() {
        let avatar = AvatarDescriptor::image("https://cdn.example.com/u/1.jpg").unwrap();
        let json = serde_json::to_string(&avatar).unwrap();
        assert_eq!(
            json,
            r#"{"type":"image","value":"https://cdn.example.com/u/1.jpg"}"#
        );
        let back: AvatarDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, avatar);
    }

    #[rstest]
    #[case("initial", AvatarKind::Initial)]
    #[case("Dicebear", AvatarKind::Dicebear)]
    #[case("IMAGE", AvatarKind::Image)]
    fn kind_from_str(#[case] raw: &str, #[case] kind: AvatarKind) {
        assert_eq!(raw.parse::<AvatarKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), raw.to_lowercase());
    }
}
