use crate::{
    assets::{color::HexColor, decode::PreparedImage},
    foundation::error::DrapeResult,
};

/// Font families offered by the text tool.
pub const FONT_FAMILIES: [&str; 8] = [
    "Arial",
    "Verdana",
    "Times New Roman",
    "Courier New",
    "Georgia",
    "Tahoma",
    "Impact",
    "Comic Sans MS",
];

/// Named swatches offered by the text tool.
pub const TEXT_COLORS: [(&str, &str); 10] = [
    ("Black", "#000000"),
    ("White", "#FFFFFF"),
    ("Red", "#FF0000"),
    ("Green", "#00FF00"),
    ("Blue", "#0000FF"),
    ("Yellow", "#FFFF00"),
    ("Pink", "#FF00FF"),
    ("Cyan", "#00FFFF"),
    ("Orange", "#FFA500"),
    ("Purple", "#800080"),
];

/// Text plus its styling. `color` is kept as the canonical hex string.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextContent {
    pub text: String,
    pub font_family: String,
    pub color: String,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: FONT_FAMILIES[0].to_owned(),
            color: TEXT_COLORS[0].1.to_owned(),
        }
    }
}

impl TextContent {
    pub fn new(
        text: impl Into<String>,
        font_family: impl Into<String>,
        color: &str,
    ) -> DrapeResult<Self> {
        let font_family = font_family.into();
        Ok(Self {
            text: text.into(),
            font_family: validate_font_family(&font_family)?,
            color: HexColor::parse(color)?.to_hex(),
        })
    }

    pub fn hex_color(&self) -> DrapeResult<HexColor> {
        HexColor::parse(&self.color)
    }
}

pub(crate) fn validate_font_family(family: &str) -> DrapeResult<String> {
    let family = family.trim();
    if family.is_empty() {
        return Err(crate::foundation::error::DrapeError::validation(
            "font family must not be empty",
        ));
    }
    if family.contains(['<', '>', '"', '&']) {
        return Err(crate::foundation::error::DrapeError::validation(format!(
            "font family '{family}' contains markup characters"
        )));
    }
    Ok(family.to_owned())
}

/// What a layer shows. Layers start `Empty` until the user supplies something.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum LayerContent {
    #[default]
    Empty,
    /// Serialized as a PNG data URI.
    Image(PreparedImage),
    Text(TextContent),
}

impl LayerContent {
    /// True when there is nothing to draw; whitespace-only text counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            LayerContent::Empty => true,
            LayerContent::Image(img) => img.width == 0 || img.height == 0,
            LayerContent::Text(t) => t.text.trim().is_empty(),
        }
    }

    pub fn as_image(&self) -> Option<&PreparedImage> {
        match self {
            LayerContent::Image(img) => Some(img),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextContent> {
        match self {
            LayerContent::Text(t) => Some(t),
            _ => None,
        }
    }
}
