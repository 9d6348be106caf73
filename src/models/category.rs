use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// RGB color used by category dots, pills and bars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

pub const FALLBACK_COLOR: Rgb = Rgb(0xCC, 0xCC, 0xCC);

/// Emission category of an entry.
///
/// The service accepts any string. The five names with a dedicated color get
/// their own variant, anything else is kept verbatim in `Custom` and renders
/// with [`FALLBACK_COLOR`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Transport,
    Home,
    Travel,
    Food,
    Other,
    Custom(String),
}

impl Category {
    pub fn parse(name: &str) -> Self {
        match name {
            "transport" => Category::Transport,
            "home" => Category::Home,
            "travel" => Category::Travel,
            "food" => Category::Food,
            "other" => Category::Other,
            _ => Category::Custom(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Transport => "transport",
            Category::Home => "home",
            Category::Travel => "travel",
            Category::Food => "food",
            Category::Other => "other",
            Category::Custom(name) => name,
        }
    }

    pub fn color(&self) -> Rgb {
        match self {
            Category::Transport => Rgb(0xFF, 0x6B, 0x6B),
            Category::Home => Rgb(0x4E, 0xCD, 0xC4),
            Category::Travel => Rgb(0x45, 0xB7, 0xD1),
            Category::Food => Rgb(0x96, 0xCE, 0xB4),
            Category::Other => Rgb(0xFF, 0xEA, 0xA7),
            Category::Custom(_) => FALLBACK_COLOR,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Custom(_))
    }

    /// Label with the first letter upper-cased, as shown in lists.
    pub fn display_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::parse(value)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::parse(&raw))
    }
}
