use types::{GameType, VpSource};

/// Filters a variant's sources by a case-insensitive match on tag or label.
///
/// The current selection, when it matches, is moved to the front.
pub fn search_sources(
    game_type: GameType,
    query: &str,
    current: Option<VpSource>,
) -> Vec<VpSource> {
    let needle = query.trim().to_lowercase();
    let mut matches: Vec<VpSource> = game_type
        .catalog()
        .iter()
        .copied()
        .filter(|source| {
            needle.is_empty()
                || source.as_str().contains(&needle)
                || source.label().to_lowercase().contains(&needle)
        })
        .collect();

    if let Some(position) = current.and_then(|c| matches.iter().position(|s| *s == c)) {
        let selected = matches.remove(position);
        matches.insert(0, selected);
    }
    matches
}
