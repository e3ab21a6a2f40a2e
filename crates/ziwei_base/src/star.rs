//! Stars, their brightness ratings, and the four transformations.

use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize};

/// Star classification as reported by the placement library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarType {
    /// The 14 major stars (主星).
    Major,
    /// Auspicious assistants (六吉).
    Soft,
    /// Malefic assistants (六煞).
    Tough,
    /// Miscellaneous stars (杂曜).
    Adjective,
    /// Romance stars (桃花).
    Flower,
    /// Helper stars (解神 and similar).
    Helper,
    /// 禄存.
    Lucun,
    /// 天马.
    Tianma,
}

/// Seven-level positional strength scale, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Brightness {
    #[serde(rename = "庙")]
    Miao,
    #[serde(rename = "旺")]
    Wang,
    #[serde(rename = "得")]
    De,
    #[serde(rename = "利")]
    Li,
    #[serde(rename = "平")]
    Ping,
    #[serde(rename = "陷")]
    Xian,
    #[serde(rename = "不")]
    Bu,
}

/// All brightness levels, strongest first.
pub const ALL_BRIGHTNESS: [Brightness; 7] = [
    Brightness::Miao,
    Brightness::Wang,
    Brightness::De,
    Brightness::Li,
    Brightness::Ping,
    Brightness::Xian,
    Brightness::Bu,
];

impl Brightness {
    /// Chinese glyph of the rating.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Miao => "庙",
            Self::Wang => "旺",
            Self::De => "得",
            Self::Li => "利",
            Self::Ping => "平",
            Self::Xian => "陷",
            Self::Bu => "不",
        }
    }

    /// Parse a rating from its glyph.
    pub fn from_glyph(s: &str) -> Option<Self> {
        ALL_BRIGHTNESS.iter().copied().find(|b| b.glyph() == s)
    }
}

/// The four transformations (四化).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mutagen {
    /// 化禄
    #[serde(rename = "禄")]
    Lu,
    /// 化权
    #[serde(rename = "权")]
    Quan,
    /// 化科
    #[serde(rename = "科")]
    Ke,
    /// 化忌
    #[serde(rename = "忌")]
    Ji,
}

/// All four transformations in canonical order.
pub const ALL_MUTAGENS: [Mutagen; 4] = [Mutagen::Lu, Mutagen::Quan, Mutagen::Ke, Mutagen::Ji];

impl Mutagen {
    /// Chinese glyph of the transformation.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Lu => "禄",
            Self::Quan => "权",
            Self::Ke => "科",
            Self::Ji => "忌",
        }
    }

    /// Parse a transformation from its glyph.
    pub fn from_glyph(s: &str) -> Option<Self> {
        ALL_MUTAGENS.iter().copied().find(|m| m.glyph() == s)
    }

    /// 0-based index in canonical order (禄=0 .. 忌=3).
    pub const fn index(self) -> usize {
        match self {
            Self::Lu => 0,
            Self::Quan => 1,
            Self::Ke => 2,
            Self::Ji => 3,
        }
    }
}

/// A star placed in a palace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    pub name: String,
    #[serde(rename = "type")]
    pub star_type: StarType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Brightness>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub mutagen: Option<Mutagen>,
}

impl Star {
    /// A star with no brightness and no transformation.
    pub fn new(name: impl Into<String>, star_type: StarType) -> Self {
        Self {
            name: name.into(),
            star_type,
            scope: None,
            brightness: None,
            mutagen: None,
        }
    }

    pub fn with_brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = Some(brightness);
        self
    }

    pub fn with_mutagen(mut self, mutagen: Mutagen) -> Self {
        self.mutagen = Some(mutagen);
        self
    }
}

/// The placement library reports a missing rating or transformation as `""`.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => {
            let de: serde::de::value::StrDeserializer<'_, D::Error> = s.into_deserializer();
            T::deserialize(de).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_glyph_round_trip() {
        for b in ALL_BRIGHTNESS {
            assert_eq!(Brightness::from_glyph(b.glyph()), Some(b));
        }
        assert_eq!(Brightness::from_glyph(""), None);
    }

    #[test]
    fn brightness_orders_strongest_first() {
        assert!(Brightness::Miao < Brightness::Xian);
        assert!(Brightness::Ping < Brightness::Bu);
    }

    #[test]
    fn mutagen_indices_sequential() {
        for (i, m) in ALL_MUTAGENS.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn deserialize_upstream_star() {
        let json = r#"{"name":"紫微","type":"major","scope":"origin","brightness":"庙","mutagen":"科"}"#;
        let star: Star = serde_json::from_str(json).unwrap();
        assert_eq!(star.name, "紫微");
        assert_eq!(star.star_type, StarType::Major);
        assert_eq!(star.brightness, Some(Brightness::Miao));
        assert_eq!(star.mutagen, Some(Mutagen::Ke));
    }

    #[test]
    fn deserialize_empty_strings_as_none() {
        let json = r#"{"name":"天刑","type":"adjective","brightness":"","mutagen":""}"#;
        let star: Star = serde_json::from_str(json).unwrap();
        assert_eq!(star.brightness, None);
        assert_eq!(star.mutagen, None);
    }

    #[test]
    fn deserialize_missing_fields_as_none() {
        let json = r#"{"name":"天马","type":"tianma"}"#;
        let star: Star = serde_json::from_str(json).unwrap();
        assert_eq!(star.star_type, StarType::Tianma);
        assert_eq!(star.brightness, None);
        assert_eq!(star.mutagen, None);
    }

    #[test]
    fn unknown_mutagen_is_rejected() {
        let json = r#"{"name":"太阳","type":"major","mutagen":"X"}"#;
        assert!(serde_json::from_str::<Star>(json).is_err());
    }
}
