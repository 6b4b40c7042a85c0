//! The garment customization tool: photo, logo and text layers over a product image.

pub(crate) mod session;
pub(crate) mod upload;

use crate::foundation::error::DrapeError;

/// Collar shown on the preview and carried into the cart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeckStyle {
    #[default]
    Round,
    Vneck,
    Crew,
}

impl NeckStyle {
    pub const ALL: [NeckStyle; 3] = [NeckStyle::Round, NeckStyle::Vneck, NeckStyle::Crew];

    pub fn label(self) -> &'static str {
        match self {
            NeckStyle::Round => "Round Neck",
            NeckStyle::Vneck => "V-Neck",
            NeckStyle::Crew => "Crew Neck",
        }
    }
}

impl std::str::FromStr for NeckStyle {
    type Err = DrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "round" => Ok(NeckStyle::Round),
            "vneck" | "v-neck" => Ok(NeckStyle::Vneck),
            "crew" => Ok(NeckStyle::Crew),
            _ => Err(DrapeError::validation(format!("unknown neck style '{s}'"))),
        }
    }
}
