// Copyright (c) 2024 The Botho Foundation

//! Economic sectors with differentiated tax treatment.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Sector of the economy an invoice belongs to.
///
/// Serialized with the statutory tag (`PADRAO`, `SAUDE`, ...); the English
/// names are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Sector {
    /// General rate, no reduction
    #[default]
    #[serde(rename = "PADRAO", alias = "STANDARD")]
    Standard,
    /// Health services (reduced rate)
    #[serde(rename = "SAUDE", alias = "HEALTH")]
    Health,
    /// Education services (reduced rate)
    #[serde(rename = "EDUCACAO", alias = "EDUCATION")]
    Education,
    /// Public collective transport (reduced rate)
    #[serde(rename = "TRANSPORTE_COLETIVO", alias = "PUBLIC_TRANSIT")]
    PublicTransit,
    /// Basic food basket (zero rate)
    #[serde(rename = "CESTA_BASICA", alias = "BASIC_BASKET")]
    BasicBasket,
    /// Fuels (general rate)
    #[serde(rename = "COMBUSTIVEIS", alias = "FUEL")]
    Fuel,
}

impl Sector {
    /// Every sector, in table order.
    pub const ALL: [Sector; 6] = [
        Sector::Standard,
        Sector::Health,
        Sector::Education,
        Sector::PublicTransit,
        Sector::BasicBasket,
        Sector::Fuel,
    ];

    /// Resolve a sector tag, falling back to [`Sector::Standard`] for any
    /// tag that is not recognized.
    pub fn resolve(tag: &str) -> Sector {
        tag.parse().unwrap_or_default()
    }

    /// The statutory tag for this sector.
    pub fn tag(&self) -> &'static str {
        match self {
            Sector::Standard => "PADRAO",
            Sector::Health => "SAUDE",
            Sector::Education => "EDUCACAO",
            Sector::PublicTransit => "TRANSPORTE_COLETIVO",
            Sector::BasicBasket => "CESTA_BASICA",
            Sector::Fuel => "COMBUSTIVEIS",
        }
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Sector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PADRAO" | "STANDARD" => Ok(Sector::Standard),
            "SAUDE" | "HEALTH" => Ok(Sector::Health),
            "EDUCACAO" | "EDUCATION" => Ok(Sector::Education),
            "TRANSPORTE_COLETIVO" | "PUBLIC_TRANSIT" => Ok(Sector::PublicTransit),
            "CESTA_BASICA" | "BASIC_BASKET" => Ok(Sector::BasicBasket),
            "COMBUSTIVEIS" | "FUEL" => Ok(Sector::Fuel),
            _ => Err(ParseError::UnknownSector(s.to_string())),
        }
    }
}
