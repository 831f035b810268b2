//! Enumerations shared across API areas.

use serde::{Deserialize, Serialize};

/// Scope discriminator used to address entities and documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Space,
    Project,
    Task,
    Document,
    Board,
    Milestone,
    Member,
}

/// How an avatar is produced. Sent as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AvatarMode {
    Uploaded = 0,
    Generated = 2,
}

impl From<AvatarMode> for u8 {
    fn from(mode: AvatarMode) -> u8 {
        mode as u8
    }
}

impl TryFrom<u8> for AvatarMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AvatarMode::Uploaded),
            2 => Ok(AvatarMode::Generated),
            other => Err(format!("unknown avatar mode {other}")),
        }
    }
}

/// Named palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Silver,
    Red,
    Orange,
    Gold,
    Olive,
    Green,
    Mint,
    Blue,
    Violet,
    Lavender,
    Magenta,
    Rose,
}

macro_rules! icons {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// Styler icon shown on board types and select options.
        ///
        /// Names the crate does not list round-trip through `Other`.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "String", from = "String")]
        pub enum Icon {
            $($variant,)*
            Other(String),
        }

        impl Icon {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Icon::$variant => $name,)*
                    Icon::Other(name) => name,
                }
            }
        }

        impl From<String> for Icon {
            fn from(name: String) -> Self {
                match name.as_str() {
                    $($name => Icon::$variant,)*
                    _ => Icon::Other(name),
                }
            }
        }
    };
}

icons! {
    Cursor => "Cursor",
    Square => "Square",
    Hexagon => "Hexagon",
    Rhombus => "Rhombus",
    Triangle => "Triangle",
    Checkbox => "Checkbox",
    Circle => "Circle",
    Light => "Light",
    Search => "Search",
    Stop => "Stop",
    User => "User",
    People => "People",
    Code => "Code",
    Todo => "Todo",
    Board => "Board",
    Document => "Document",
    Project => "Project",
    Bot => "Bot",
    Terminal => "Terminal",
    Clock => "Clock",
    List => "List",
    Target => "Target",
    Moon => "Moon",
    Sun => "Sun",
    Cloud => "Cloud",
    Fire => "Fire",
    Drop => "Drop",
    Laptop => "Laptop",
    Attach => "Attach",
    Flag => "Flag",
    Finish => "Finish",
    Crown => "Crown",
    Money => "Money",
    Shield => "Shield",
    Trophy => "Trophy",
    Bug => "Bug",
    Launch => "Launch",
    Video => "Video",
    Table => "Table",
    Chart => "Chart",
    Info => "Info",
    Help => "Help",
    Attention => "Attention",
    Percent25 => "25%",
    Percent50 => "50%",
    Email => "Email",
    Image => "Image",
    Heart => "Heart",
    Star => "Star",
    Link => "Link",
    Phone => "Phone",
    Layers => "Layers",
    Chat => "Chat",
    Lab => "Lab",
    Puzzle => "Puzzle",
    Bookmark => "Bookmark",
    Book => "Book",
    Home => "Home",
    Gear => "Gear",
    TypeText => "TypeText",
    TypeNumber => "TypeNumber",
    TypeDate => "TypeDate",
    TypeCheck => "TypeCheck",
    TypeUser => "TypeUser",
}

impl From<Icon> for String {
    fn from(icon: Icon) -> String {
        match icon {
            Icon::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Silver => "silver",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Gold => "gold",
            Color::Olive => "olive",
            Color::Green => "green",
            Color::Mint => "mint",
            Color::Blue => "blue",
            Color::Violet => "violet",
            Color::Lavender => "lavender",
            Color::Magenta => "magenta",
            Color::Rose => "rose",
        }
    }
}

/// Color attached to a member, space or profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInfo {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_dark: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_mode_is_an_integer() {
        assert_eq!(serde_json::to_string(&AvatarMode::Generated).unwrap(), "2");
        assert_eq!(serde_json::from_str::<AvatarMode>("0").unwrap(), AvatarMode::Uploaded);
        assert!(serde_json::from_str::<AvatarMode>("1").is_err());
    }

    #[test]
    fn icons_round_trip_including_unlisted_names() {
        assert_eq!(serde_json::to_string(&Icon::Percent25).unwrap(), "\"25%\"");
        assert_eq!(serde_json::from_str::<Icon>("\"Crown\"").unwrap(), Icon::Crown);
        let other: Icon = serde_json::from_str("\"Stormtrooper\"").unwrap();
        assert_eq!(other, Icon::Other("Stormtrooper".to_string()));
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"Stormtrooper\"");
    }

    #[test]
    fn kind_and_color_wire_names() {
        assert_eq!(serde_json::to_string(&Kind::Milestone).unwrap(), "\"Milestone\"");
        assert_eq!(serde_json::to_string(&Color::Lavender).unwrap(), "\"lavender\"");
    }
}
