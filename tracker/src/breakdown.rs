use database::{PlayerVpData, VictoryPointRecord};
use types::Round;

/// One row of the full breakdown: the VPs a player earned in a round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundBreakdown<'a> {
    pub round: Round,
    pub vps: Vec<&'a VictoryPointRecord>,
}

impl RoundBreakdown<'_> {
    pub fn count(&self) -> usize {
        self.vps.len()
    }
}

/// Rounds 1 through the last round with a VP, always at least one row.
pub fn breakdown_by_round(data: &PlayerVpData) -> Vec<RoundBreakdown<'_>> {
    let last = data.last_round().unwrap_or(Round::FIRST);
    Round::all()
        .take_while(|round| *round <= last)
        .map(|round| RoundBreakdown {
            round,
            vps: data.vps.iter().filter(|vp| vp.round == round).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use types::VpSource;
    use uuid::Uuid;

    fn vp(round: u8, source: VpSource) -> VictoryPointRecord {
        VictoryPointRecord {
            id: Uuid::new_v4(),
            game_id: Uuid::nil(),
            player_name: "Calvin".to_string(),
            source,
            round: Round::new(round).unwrap(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_covers_gaps_up_to_last_round() {
        let data = PlayerVpData {
            vps: vec![
                vp(1, VpSource::Misc4p),
                vp(4, VpSource::ConflictIi),
                vp(4, VpSource::AllianceFremen),
            ],
            total: 3,
            ..Default::default()
        };
        let rows = breakdown_by_round(&data);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].count(), 1);
        assert_eq!(rows[1].count(), 0);
        assert_eq!(rows[3].count(), 2);
        assert_eq!(rows[3].vps[1].source, VpSource::AllianceFremen);
    }

    #[test]
    fn test_no_vps_still_shows_first_round() {
        let data = PlayerVpData::default();
        let rows = breakdown_by_round(&data);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].round, Round::FIRST);
        assert!(rows[0].vps.is_empty());
    }
}
