use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// An avatar family, e.g. robots or pixel art.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    pub id: String,
    pub display_name: String,
    pub description: String,
}

impl StyleDescriptor {
    pub fn new(id: &str, display_name: &str, description: &str) -> Self {
        Self {
            id: id.to_owned(),
            display_name: display_name.to_owned(),
            description: description.to_owned(),
        }
    }
}

/// A single legal value of a customization parameter.
///
/// Serialized untagged: numbers become JSON numbers, everything
/// else a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Number(value.into())
    }
}

/// The control a parameter is edited with. Declared per parameter
/// rather than guessed from the shape of the first value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Six hex digits without a leading `#`.
    Color,
    /// Free-form display strings.
    Enum,
    /// Small integers.
    Numeric,
}

impl ParamKind {
    pub fn accepts(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (ParamKind::Color, ParamValue::Text(s)) => is_hex_color(s),
            (ParamKind::Enum, ParamValue::Text(_)) => true,
            (ParamKind::Numeric, ParamValue::Number(_)) => true,
            _ => false,
        }
    }
}

/// Returns true for exactly six ASCII hex digits.
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Legal values of one parameter of one style, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDomain {
    pub name: String,
    pub kind: ParamKind,
    pub values: Vec<ParamValue>,
}

impl ParameterDomain {
    pub fn colors(name: &str, values: &[&str]) -> Self {
        Self::with_kind(name, ParamKind::Color, values.iter().map(|&v| v.into()))
    }

    pub fn options(name: &str, values: &[&str]) -> Self {
        Self::with_kind(name, ParamKind::Enum, values.iter().map(|&v| v.into()))
    }

    pub fn numbers(name: &str, values: &[i64]) -> Self {
        Self::with_kind(
            name,
            ParamKind::Numeric,
            values.iter().map(|&v| v.into()),
        )
    }

    fn with_kind<I>(name: &str, kind: ParamKind, values: I) -> Self
    where
        I: IntoIterator<Item = ParamValue>,
    {
        Self {
            name: name.to_owned(),
            kind,
            values: values.into_iter().collect(),
        }
    }

    pub fn contains(&self, value: &ParamValue) -> bool {
        self.values.contains(value)
    }

    /// Uniformly picks one legal value. `None` for an empty domain.
    pub fn pick(&self, rng: &mut fastrand::Rng) -> Option<&ParamValue> {
        rng.choice(self.values.iter())
    }

    /// Interprets raw text according to the declared kind.
    ///
    /// A numeric parameter yields a number when the text parses as one;
    /// colors and enums always stay text, so `"000000"` is never a number.
    pub fn parse_value(&self, raw: &str) -> ParamValue {
        let raw = raw.trim();
        match self.kind {
            ParamKind::Numeric => raw
                .parse::<i64>()
                .map(ParamValue::Number)
                .unwrap_or_else(|_| ParamValue::Text(raw.to_owned())),
            ParamKind::Color => {
                ParamValue::Text(raw.trim_start_matches('#').to_lowercase())
            }
            ParamKind::Enum => ParamValue::Text(raw.to_owned()),
        }
    }

    /// Values that do not match the declared kind.
    pub fn mismatches(&self) -> Vec<&ParamValue> {
        self.values
            .iter()
            .filter(|v| !self.kind.accepts(v))
            .collect()
    }
}

/// Read-only registry of avatar styles and their parameters.
#[derive(Debug, Clone)]
pub struct Catalog {
    styles: Vec<StyleDescriptor>,
    parameters: HashMap<String, Vec<ParameterDomain>>,
}

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(builtin_catalog()));

impl Catalog {
    pub fn new(entries: Vec<(StyleDescriptor, Vec<ParameterDomain>)>) -> Self {
        let mut styles = Vec::with_capacity(entries.len());
        let mut parameters = HashMap::new();
        for (style, domains) in entries {
            if !domains.is_empty() {
                parameters.insert(style.id.clone(), domains);
            }
            styles.push(style);
        }
        Self { styles, parameters }
    }

    /// The catalog of DiceBear styles shipped with the crate.
    pub fn builtin() -> Arc<Catalog> {
        BUILTIN.clone()
    }

    pub fn list_styles(&self) -> &[StyleDescriptor] {
        &self.styles
    }

    pub fn style(&self, id: &str) -> Option<&StyleDescriptor> {
        self.styles.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.style(id).is_some()
    }

    /// Customizable parameters of a style. Unknown styles and styles
    /// without parameters both yield an empty slice.
    pub fn parameters_for(&self, id: &str) -> &[ParameterDomain] {
        self.parameters
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn parameter(&self, id: &str, name: &str) -> Option<&ParameterDomain> {
        self.parameters_for(id)
            .iter()
            .find(|d| d.name == name)
    }
}

const PROBABILITY: &[i64] = &[0, 25, 50, 75, 100];

fn builtin_catalog() -> Catalog {
    use ParameterDomain as P;

    Catalog::new(vec![
        (
            StyleDescriptor::new(
                "adventurer",
                "Adventurer",
                "Illustrated characters ready for a quest",
            ),
            vec![
                P::colors(
                    "hairColor",
                    &[
                        "0e0e0e", "3eac2c", "6a4e35", "85c2c6", "796a45",
                        "562306", "592454", "ab2a18", "ac6511", "afafaf",
                        "b9a05f", "cb6820", "dba3be", "e5d7a3",
                    ],
                ),
                P::colors("skinColor", &["9e5622", "763900", "ecad80", "f2d3b1"]),
                P::options(
                    "eyes",
                    &[
                        "variant01", "variant02", "variant03", "variant04",
                        "variant05", "variant06", "variant07", "variant08",
                        "variant09", "variant10",
                    ],
                ),
                P::options(
                    "mouth",
                    &[
                        "variant01", "variant02", "variant03", "variant04",
                        "variant05", "variant06", "variant07", "variant08",
                    ],
                ),
                P::numbers("glassesProbability", PROBABILITY),
            ],
        ),
        (
            StyleDescriptor::new(
                "avataaars",
                "Avataaars",
                "Cartoon people with clothes and accessories",
            ),
            vec![
                P::options(
                    "top",
                    &[
                        "bigHair", "bob", "bun", "curly", "curvy", "dreads",
                        "frida", "fro", "froBand", "hat", "hijab",
                        "longButNotTooLong", "miaWallace", "shaggy",
                        "shortCurly", "shortFlat", "shortRound", "shortWaved",
                        "sides", "straight01", "straight02", "theCaesar",
                        "turban", "winterHat1",
                    ],
                ),
                P::options(
                    "accessories",
                    &[
                        "eyepatch", "kurt", "prescription01", "prescription02",
                        "round", "sunglasses", "wayfarers",
                    ],
                ),
                P::options(
                    "clothing",
                    &[
                        "blazerAndShirt", "blazerAndSweater", "collarAndSweater",
                        "graphicShirt", "hoodie", "overall", "shirtCrewNeck",
                        "shirtScoopNeck", "shirtVNeck",
                    ],
                ),
                P::options(
                    "eyes",
                    &[
                        "closed", "cry", "default", "eyeRoll", "happy",
                        "hearts", "side", "squint", "surprised", "wink",
                        "winkWacky", "xDizzy",
                    ],
                ),
                P::options(
                    "mouth",
                    &[
                        "concerned", "default", "disbelief", "eating",
                        "grimace", "sad", "screamOpen", "serious", "smile",
                        "tongue", "twinkle",
                    ],
                ),
                P::colors(
                    "skinColor",
                    &[
                        "614335", "d08b5b", "ae5d29", "edb98a", "ffdbb4",
                        "fd9841", "f8d25c",
                    ],
                ),
                P::colors(
                    "hairColor",
                    &[
                        "a55728", "2c1b18", "b58143", "d6b370", "724133",
                        "4a312c", "f59797", "ecdcbf", "c93305", "e8e1e1",
                    ],
                ),
                P::numbers("accessoriesProbability", PROBABILITY),
            ],
        ),
        (
            StyleDescriptor::new("big-ears", "Big Ears", "Characters with big ears"),
            vec![],
        ),
        (
            StyleDescriptor::new(
                "big-smile",
                "Big Smile",
                "Cheerful faces with wide grins",
            ),
            vec![
                P::colors(
                    "skinColor",
                    &[
                        "8c5a2b", "643d19", "a47539", "c99c62", "e2ba87",
                        "efcc9f", "f5d7b1", "ffe4c0",
                    ],
                ),
                P::options(
                    "hair",
                    &[
                        "bangs", "bowlCutHair", "braids", "bunHair",
                        "curlyBob", "curlyShortHair", "froBun",
                        "halfShavedHead", "mohawk", "shavedHead", "shortHair",
                        "straightHair", "wavyBob",
                    ],
                ),
                P::options(
                    "eyes",
                    &[
                        "angry", "cheery", "confused", "normal", "sad",
                        "sleepy", "starstruck", "winking",
                    ],
                ),
                P::options(
                    "mouth",
                    &[
                        "awkwardSmile", "braces", "gapSmile", "kawaii",
                        "openedSmile", "openSad", "teethSmile", "unimpressed",
                    ],
                ),
            ],
        ),
        (
            StyleDescriptor::new("bottts", "Bottts", "Friendly robots"),
            vec![
                P::colors(
                    "primaryColor",
                    &[
                        "663399", "1e88e5", "00acc1", "039be5", "3949ab",
                        "43a047", "546e7a", "5e35b1", "6d4c41", "757575",
                        "7cb342", "8e24aa", "c0ca33", "d81b60", "e53935",
                        "f4511e", "fb8c00", "fdd835", "ffb300",
                    ],
                ),
                P::options(
                    "eyes",
                    &[
                        "bulging", "dizzy", "eva", "frame1", "frame2", "glow",
                        "happy", "hearts", "robocop", "round", "roundFrame01",
                        "roundFrame02", "sensor", "shade01",
                    ],
                ),
                P::options(
                    "mouth",
                    &[
                        "bite", "diagram", "grill01", "grill02", "grill03",
                        "smile01", "smile02", "square01", "square02",
                    ],
                ),
                P::options(
                    "face",
                    &[
                        "round01", "round02", "square01", "square02",
                        "square03", "square04",
                    ],
                ),
                P::options(
                    "top",
                    &[
                        "antenna", "antennaCrooked", "bulb01", "glowingBulb01",
                        "glowingBulb02", "horns", "lights", "pyramid", "radar",
                    ],
                ),
                P::options(
                    "sides",
                    &[
                        "antenna01", "antenna02", "cables01", "cables02",
                        "round", "square", "squareAssymetric",
                    ],
                ),
                P::numbers("textureProbability", PROBABILITY),
            ],
        ),
        (
            StyleDescriptor::new("croodles", "Croodles", "Doodled faces"),
            vec![],
        ),
        (
            StyleDescriptor::new("fun-emoji", "Fun Emoji", "Expressive emoji faces"),
            vec![
                P::colors(
                    "backgroundColor",
                    &[
                        "b6e3f4", "c0aede", "d1d4f9", "ffd5dc", "ffdfbf",
                        "fcbc34", "d84be5", "059ff2", "71cf62", "f6d594",
                    ],
                ),
                P::options(
                    "eyes",
                    &[
                        "closed", "closed2", "crying", "cute", "glasses",
                        "love", "pissed", "plain", "sad", "shades",
                        "sleepClose", "stars", "tearDrop", "wink", "wink2",
                    ],
                ),
                P::options(
                    "mouth",
                    &[
                        "cute", "drip", "faceMask", "kissHeart", "lilSmile",
                        "pissed", "plain", "sad", "shout", "shy", "sick",
                        "smileLol", "smileTeeth", "tongueOut", "wideSmile",
                    ],
                ),
            ],
        ),
        (
            StyleDescriptor::new("identicon", "Identicon", "Symmetric geometric patterns"),
            vec![],
        ),
        (
            StyleDescriptor::new("initials", "Initials", "Letters on a colored tile"),
            vec![],
        ),
        (
            StyleDescriptor::new("lorelei", "Lorelei", "Minimal line-art portraits"),
            vec![],
        ),
        (
            StyleDescriptor::new("micah", "Micah", "Playful flat portraits"),
            vec![],
        ),
        (
            StyleDescriptor::new("miniavs", "Miniavs", "Tiny, simple people"),
            vec![
                P::colors(
                    "hairColor",
                    &["1b0b47", "47280b", "ad3a20", "ffcc65", "0e0e0e"],
                ),
                P::colors("skinColor", &["ffcb7e", "f5d0c5", "836055"]),
                P::options("head", &["normal", "thin", "wide"]),
                P::options("body", &["golf", "tShirt"]),
                P::options(
                    "hair",
                    &[
                        "balndess", "classic01", "classic02", "curly", "elvis",
                        "long", "ponyTail", "slaughter", "stylish",
                    ],
                ),
                P::options("mouth", &["default", "missingTooth"]),
                P::options("eyes", &["normal", "confident", "happy"]),
                P::numbers("blushesProbability", PROBABILITY),
                P::numbers("mustacheProbability", &[0, 25, 50]),
            ],
        ),
        (
            StyleDescriptor::new("notionists", "Notionists", "Sketchy office-style heads"),
            vec![],
        ),
        (
            StyleDescriptor::new("open-peeps", "Open Peeps", "Hand-drawn people"),
            vec![],
        ),
        (
            StyleDescriptor::new("personas", "Personas", "Colorful flat characters"),
            vec![],
        ),
        (
            StyleDescriptor::new("pixel-art", "Pixel Art", "Retro 8-bit characters"),
            vec![
                P::colors(
                    "skinColor",
                    &[
                        "cb9e6e", "b68655", "a26d3d", "8d5524", "e0b687",
                        "ffdbac", "f5cfa0", "eac393",
                    ],
                ),
                P::colors(
                    "hairColor",
                    &[
                        "cab188", "603a14", "83623b", "a78961", "611c17",
                        "603015", "612616", "28150a", "009bbd", "bd1700",
                        "91cb15",
                    ],
                ),
                P::colors(
                    "clothingColor",
                    &[
                        "5bc0de", "428bca", "03396c", "88d8b0", "44c585",
                        "00b159", "ff6f69", "d11141", "ae0001", "ffeead",
                        "ffd969", "ffc425",
                    ],
                ),
                P::options(
                    "eyes",
                    &[
                        "variant01", "variant02", "variant03", "variant04",
                        "variant05", "variant06", "variant07", "variant08",
                        "variant09", "variant10", "variant11", "variant12",
                    ],
                ),
                P::options(
                    "mouth",
                    &[
                        "happy01", "happy02", "happy03", "happy04", "happy05",
                        "happy06", "sad01", "sad02", "sad03", "sad04",
                    ],
                ),
                P::numbers("glassesProbability", PROBABILITY),
            ],
        ),
        (
            StyleDescriptor::new("shapes", "Shapes", "Abstract layered shapes"),
            vec![],
        ),
        (
            StyleDescriptor::new("thumbs", "Thumbs", "Thumbs-up characters"),
            vec![
                P::colors(
                    "shapeColor",
                    &["0a5b83", "1c799f", "69d2e7", "f1f4dc", "f88c49"],
                ),
                P::options(
                    "eyes",
                    &[
                        "variant1W10", "variant2W10", "variant3W10",
                        "variant4W10", "variant5W10",
                    ],
                ),
                P::options(
                    "mouth",
                    &["variant1", "variant2", "variant3", "variant4", "variant5"],
                ),
                P::numbers("faceOffsetX", &[-15, -10, -5, 0, 5, 10, 15]),
                P::numbers("rotate", &[-20, -10, 0, 10, 20]),
            ],
        ),
    ])
}
