//! Plain-text views of a game page for the terminal.

use std::fmt::Write;

use database::{GameData, PlayerVpData};
use itertools::Itertools;
use types::{GameType, VpSource};

use crate::board::VpGrid;
use crate::breakdown::RoundBreakdown;

pub fn render_grid(grid: &VpGrid) -> String {
    let mut out = String::new();
    for (number, vp) in grid.squares() {
        let cell = match vp {
            Some(vp) => format!("{} (round {})", vp.source.label(), vp.round),
            None => "-".to_string(),
        };
        let _ = writeln!(out, "{number:>2}. {cell}");
    }
    out
}

/// One line per player: total, high council seat and swordmaster.
pub fn render_landsraad(data: &GameData) -> String {
    let empty = PlayerVpData::default();
    let mut out = String::new();
    for name in data.player_names() {
        let player = data.player(name).unwrap_or(&empty);
        let council = match &player.high_council {
            Some(record) => format!("high council (round {})", record.round),
            None => "no council seat".to_string(),
        };
        let swordmaster = match &player.swordmaster {
            Some(record) => format!("swordmaster for {} (round {})", record.cost, record.round),
            None => "no swordmaster".to_string(),
        };
        let _ = writeln!(
            out,
            "{name:<12} {:>2} VP  {council}, {swordmaster}",
            player.total
        );
    }
    out
}

pub fn render_breakdown(rows: &[RoundBreakdown<'_>]) -> String {
    let mut out = String::new();
    for row in rows {
        let sources = if row.vps.is_empty() {
            "-".to_string()
        } else {
            row.vps.iter().map(|vp| vp.source.label()).join(", ")
        };
        let _ = writeln!(out, "Round {:>2}: {sources}", row.round);
    }
    out
}

pub fn render_sources(game_type: GameType, sources: &[VpSource]) -> String {
    let mut out = String::new();
    for source in sources {
        let _ = writeln!(
            out,
            "{:<34} {:<34} {}",
            source.as_str(),
            source.label(),
            source.image_path(game_type)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakdown::breakdown_by_round;
    use chrono::Utc;
    use database::VictoryPointRecord;
    use types::Round;
    use uuid::Uuid;

    fn vp(round: u8, source: VpSource) -> VictoryPointRecord {
        VictoryPointRecord {
            id: Uuid::new_v4(),
            game_id: Uuid::nil(),
            player_name: "Ethan".to_string(),
            source,
            round: Round::new(round).unwrap(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_grid_lists_every_square() {
        let grid = VpGrid::layout(&[vp(1, VpSource::ConflictIii)], Round::FIRST);
        let text = render_grid(&grid);
        assert_eq!(text.lines().count(), types::GRID_SQUARES);
        assert!(text.starts_with(" 1. Conflict III (round 1)"));
        assert!(text.contains("15. -"));
    }

    #[test]
    fn test_breakdown_lines() {
        let data = PlayerVpData {
            vps: vec![vp(2, VpSource::Misc4p), vp(2, VpSource::TechFlagship)],
            total: 2,
            ..Default::default()
        };
        let text = render_breakdown(&breakdown_by_round(&data));
        assert_eq!(text, "Round  1: -\nRound  2: Misc 4p, Tech Flagship\n");
    }
}
