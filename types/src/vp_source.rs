use std::{fmt::Display, str::FromStr, sync::OnceLock};

use itertools::Itertools;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::game_type::GameType;

const IMAGE_ROOT: &str = "/images/dune-tracker";

/// Every reason a victory point can be earned, across both game variants.
///
/// This is the storage vocabulary: rows carry the snake_case tag. Which tags a
/// game offers depends on its [`GameType`], see [`GameType::catalog`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VpSource {
    AllianceBeneGesserit,
    AllianceEmperor,
    AllianceFremen,
    AllianceSpacingGuild,
    CardEndgame,
    CardGuildAmbassador,
    CardIxianEngineer,
    CardOpulence,
    CardSayyadina,
    ConflictI,
    ConflictIi,
    ConflictIii,
    ConflictBattleIcons,
    FriendshipBeneGesserit,
    FriendshipEmperor,
    FriendshipFremen,
    FriendshipSpacingGuild,
    IntrigueChoamShares,
    IntrigueEndgame,
    IntrigueStagedIncident,
    IntrigueTheSleeperMustAwaken,
    #[serde(rename = "misc_4p")]
    Misc4p,
    TechDetonationDevices,
    TechEndgame,
    TechFlagship,
    TechSpySatellites,
    SpiceMustFlow,
}

impl VpSource {
    pub const ALL: [VpSource; 27] = [
        VpSource::AllianceBeneGesserit,
        VpSource::AllianceEmperor,
        VpSource::AllianceFremen,
        VpSource::AllianceSpacingGuild,
        VpSource::CardEndgame,
        VpSource::CardGuildAmbassador,
        VpSource::CardIxianEngineer,
        VpSource::CardOpulence,
        VpSource::CardSayyadina,
        VpSource::ConflictI,
        VpSource::ConflictIi,
        VpSource::ConflictIii,
        VpSource::ConflictBattleIcons,
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

    pub fn as_str(&self) -> &'static str {
        match self {
            VpSource::AllianceBeneGesserit => "alliance_bene_gesserit",
            VpSource::AllianceEmperor => "alliance_emperor",
            VpSource::AllianceFremen => "alliance_fremen",
            VpSource::AllianceSpacingGuild => "alliance_spacing_guild",
            VpSource::CardEndgame => "card_endgame",
            VpSource::CardGuildAmbassador => "card_guild_ambassador",
            VpSource::CardIxianEngineer => "card_ixian_engineer",
            VpSource::CardOpulence => "card_opulence",
            VpSource::CardSayyadina => "card_sayyadina",
            VpSource::ConflictI => "conflict_i",
            VpSource::ConflictIi => "conflict_ii",
            VpSource::ConflictIii => "conflict_iii",
            VpSource::ConflictBattleIcons => "conflict_battle_icons",
            VpSource::FriendshipBeneGesserit => "friendship_bene_gesserit",
            VpSource::FriendshipEmperor => "friendship_emperor",
            VpSource::FriendshipFremen => "friendship_fremen",
            VpSource::FriendshipSpacingGuild => "friendship_spacing_guild",
            VpSource::IntrigueChoamShares => "intrigue_choam_shares",
            VpSource::IntrigueEndgame => "intrigue_endgame",
            VpSource::IntrigueStagedIncident => "intrigue_staged_incident",
            VpSource::IntrigueTheSleeperMustAwaken => "intrigue_the_sleeper_must_awaken",
            VpSource::Misc4p => "misc_4p",
            VpSource::TechDetonationDevices => "tech_detonation_devices",
            VpSource::TechEndgame => "tech_endgame",
            VpSource::TechFlagship => "tech_flagship",
            VpSource::TechSpySatellites => "tech_spy_satellites",
            VpSource::SpiceMustFlow => "spice_must_flow",
        }
    }

    /// Alliance tags have a single holder per game.
    pub fn is_alliance(&self) -> bool {
        self.as_str().starts_with("alliance_")
    }

    /// Human readable label, e.g. `conflict_iii` becomes `Conflict III`.
    pub fn label(&self) -> String {
        pretty_label(self.as_str())
    }

    pub fn image_path(&self, game_type: GameType) -> String {
        format!("{IMAGE_ROOT}/{game_type}/{}.jpg", self.as_str())
    }
}

impl Display for VpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVpSource(pub String);

impl Display for UnknownVpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown VP source: {}", self.0)
    }
}

impl std::error::Error for UnknownVpSource {}

impl FromStr for VpSource {
    type Err = UnknownVpSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VpSource::ALL
            .iter()
            .find(|source| source.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownVpSource(s.to_string()))
    }
}

fn roman_numerals() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\b(i+)\b").expect("static regex is valid"))
}

/// Title-cases a snake_case tag and upper-cases standalone runs of `i`.
pub fn pretty_label(tag: &str) -> String {
    let titled = tag
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .join(" ");
    roman_numerals()
        .replace_all(&titled, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}
