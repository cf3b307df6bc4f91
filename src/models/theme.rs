use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Gourmet,
    Nature,
    HistoryAndCulture,
    Horror,
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::Gourmet,
        Theme::Nature,
        Theme::HistoryAndCulture,
        Theme::Horror,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Gourmet => "gourmet",
            Theme::Nature => "nature",
            Theme::HistoryAndCulture => "history_and_culture",
            Theme::Horror => "horror",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Gourmet => "Gourmet",
            Theme::Nature => "Nature",
            Theme::HistoryAndCulture => "History & Culture",
            Theme::Horror => "Horror",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gourmet" => Ok(Theme::Gourmet),
            "nature" => Ok(Theme::Nature),
            "history_and_culture" | "history" => Ok(Theme::HistoryAndCulture),
            "horror" => Ok(Theme::Horror),
            _ => Err(format!("Unsupported theme: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    // Gourmet
    CafeHopping,
    BakeryTour,
    LocalGourmet,
    SweetJourney,

    // Nature
    ParkTour,
    Riverside,
    TempleNature,

    // History & culture
    TempleShrine,
    MuseumTour,
    OldTown,
    CulturalWalk,

    // Horror
    GhostTour,
    HauntedRuins,
    CursedNature,
    CemeteryWalk,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::CafeHopping => "cafe_hopping",
            Scenario::BakeryTour => "bakery_tour",
            Scenario::LocalGourmet => "local_gourmet",
            Scenario::SweetJourney => "sweet_journey",
            Scenario::ParkTour => "park_tour",
            Scenario::Riverside => "riverside",
            Scenario::TempleNature => "temple_nature",
            Scenario::TempleShrine => "temple_shrine",
            Scenario::MuseumTour => "museum_tour",
            Scenario::OldTown => "old_town",
            Scenario::CulturalWalk => "cultural_walk",
            Scenario::GhostTour => "ghost_tour",
            Scenario::HauntedRuins => "haunted_ruins",
            Scenario::CursedNature => "cursed_nature",
            Scenario::CemeteryWalk => "cemetery_walk",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Scenario::CafeHopping => "Cafe Hopping",
            Scenario::BakeryTour => "Bakery Tour",
            Scenario::LocalGourmet => "Local Gourmet",
            Scenario::SweetJourney => "Sweet Journey",
            Scenario::ParkTour => "Park Tour",
            Scenario::Riverside => "Riverside Stroll",
            Scenario::TempleNature => "Temples & Greenery",
            Scenario::TempleShrine => "Temples & Shrines",
            Scenario::MuseumTour => "Museum Tour",
            Scenario::OldTown => "Old Town",
            Scenario::CulturalWalk => "Cultural Walk",
            Scenario::GhostTour => "Ghost Tour",
            Scenario::HauntedRuins => "Haunted Ruins",
            Scenario::CursedNature => "Cursed Nature",
            Scenario::CemeteryWalk => "Cemetery Walk",
        }
    }

    /// The theme whose catalogue owns this scenario
    pub fn theme(&self) -> Theme {
        match self {
            Scenario::CafeHopping
            | Scenario::BakeryTour
            | Scenario::LocalGourmet
            | Scenario::SweetJourney => Theme::Gourmet,
            Scenario::ParkTour | Scenario::Riverside | Scenario::TempleNature => Theme::Nature,
            Scenario::TempleShrine
            | Scenario::MuseumTour
            | Scenario::OldTown
            | Scenario::CulturalWalk => Theme::HistoryAndCulture,
            Scenario::GhostTour
            | Scenario::HauntedRuins
            | Scenario::CursedNature
            | Scenario::CemeteryWalk => Theme::Horror,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cafe_hopping" => Ok(Scenario::CafeHopping),
            "bakery_tour" => Ok(Scenario::BakeryTour),
            "local_gourmet" => Ok(Scenario::LocalGourmet),
            "sweet_journey" => Ok(Scenario::SweetJourney),
            "park_tour" => Ok(Scenario::ParkTour),
            "riverside" => Ok(Scenario::Riverside),
            "temple_nature" => Ok(Scenario::TempleNature),
            "temple_shrine" => Ok(Scenario::TempleShrine),
            "museum_tour" => Ok(Scenario::MuseumTour),
            "old_town" => Ok(Scenario::OldTown),
            "cultural_walk" => Ok(Scenario::CulturalWalk),
            "ghost_tour" => Ok(Scenario::GhostTour),
            "haunted_ruins" => Ok(Scenario::HauntedRuins),
            "cursed_nature" => Ok(Scenario::CursedNature),
            "cemetery_walk" => Ok(Scenario::CemeteryWalk),
            _ => Err(format!("Unsupported scenario: '{}'", s)),
        }
    }
}
