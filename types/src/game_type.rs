use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::vp_source::VpSource;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    #[default]
    Base,
    Uprising,
}

const BASE_CATALOG: [VpSource; 25] = [
    VpSource::AllianceBeneGesserit,
    VpSource::AllianceEmperor,
    VpSource::AllianceFremen,
    VpSource::AllianceSpacingGuild,
    VpSource::CardGuildAmbassador,
    VpSource::CardIxianEngineer,
    VpSource::CardOpulence,
    VpSource::CardSayyadina,
    VpSource::ConflictI,
    VpSource::ConflictIi,
    VpSource::ConflictIii,
    VpSource::FriendshipBeneGesserit,
    VpSource::FriendshipEmperor,
    VpSource::FriendshipFremen,
    VpSource::FriendshipSpacingGuild,
    VpSource::IntrigueChoamShares,
    VpSource::IntrigueEndgame,
    VpSource::IntrigueStagedIncident,
    VpSource::IntrigueTheSleeperMustAwaken,
    VpSource::Misc4p,
    VpSource::TechDetonationDevices,
    VpSource::TechEndgame,
    VpSource::TechFlagship,
    VpSource::TechSpySatellites,
    VpSource::SpiceMustFlow,
];

const UPRISING_CATALOG: [VpSource; 16] = [
    VpSource::AllianceBeneGesserit,
    VpSource::AllianceEmperor,
    VpSource::AllianceFremen,
    VpSource::AllianceSpacingGuild,
    VpSource::CardEndgame,
    VpSource::ConflictI,
    VpSource::ConflictIi,
    VpSource::ConflictIii,
    VpSource::ConflictBattleIcons,
    VpSource::FriendshipBeneGesserit,
    VpSource::FriendshipEmperor,
    VpSource::FriendshipFremen,
    VpSource::FriendshipSpacingGuild,
    VpSource::IntrigueEndgame,
    VpSource::Misc4p,
    VpSource::SpiceMustFlow,
];

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Base => "base",
            GameType::Uprising => "uprising",
        }
    }

    /// The closed list of sources a game of this variant can score from.
    pub fn catalog(&self) -> &'static [VpSource] {
        match self {
            GameType::Base => &BASE_CATALOG,
            GameType::Uprising => &UPRISING_CATALOG,
        }
    }

    pub fn offers(&self, source: VpSource) -> bool {
        self.catalog().contains(&source)
    }
}

impl Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(GameType::Base),
            "uprising" => Ok(GameType::Uprising),
            other => Err(format!("unknown game type: {other}")),
        }
    }
}
