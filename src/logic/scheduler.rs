//! Fixture scheduling: round-robin generation and chronological ordering.

use crate::models::{Match, MatchId, TeamId, Tournament};
use std::cmp::Ordering;

/// Round label for generated league fixtures.
pub const LEAGUE_STAGE_ROUND: &str = "League Stage";

/// Generate one fixture for every unordered pair of teams, in team entry
/// order: outer index ascending, inner index strictly greater. Match numbers
/// are dense, 1-based, in enumeration order. For N teams this yields exactly
/// N*(N-1)/2 fixtures.
pub fn round_robin_fixtures(teams: &[TeamId]) -> Vec<Match> {
    let mut fixtures = Vec::new();
    let mut number = 1u32;
    for i in 0..teams.len() {
        for j in (i + 1)..teams.len() {
            fixtures.push(Match::new(number, teams[i], teams[j], LEAGUE_STAGE_ROUND));
            number += 1;
        }
    }
    fixtures
}

/// Replace the tournament's fixture list with a fresh round-robin schedule
/// and mark scheduling done. Destructive: any existing matches, including
/// recorded scores and events, are discarded.
pub fn schedule_league_fixtures(tournament: &mut Tournament) {
    tournament.matches = round_robin_fixtures(&tournament.teams);
    tournament.scheduling_done = true;
}

/// Chronological fixture order: dated before undated, then date ascending;
/// within a date (or among undated), timed before untimed, then time
/// ascending; current match number as the final tiebreak.
fn fixture_order(a: &Match, b: &Match) -> Ordering {
    match (a.date.as_deref(), b.date.as_deref()) {
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(x), Some(y)) => {
            let by_date = x.cmp(y);
            if by_date != Ordering::Equal {
                return by_date;
            }
        }
        (None, None) => {}
    }
    match (a.time.as_deref(), b.time.as_deref()) {
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(x), Some(y)) => {
            let by_time = x.cmp(y);
            if by_time != Ordering::Equal {
                return by_time;
            }
        }
        (None, None) => {}
    }
    a.match_number.cmp(&b.match_number)
}

/// Stable-sort the fixtures chronologically and reassign match numbers to
/// their 1-based positions. Applying this twice without intervening edits
/// yields the same sequence.
pub fn reorder_and_renumber(matches: &mut [Match]) {
    matches.sort_by(fixture_order);
    for (index, m) in matches.iter_mut().enumerate() {
        m.match_number = (index + 1) as u32;
    }
}

/// Remove a match from the list and close the numbering gap it leaves.
pub fn remove_and_renumber(matches: &mut Vec<Match>, id: MatchId) -> bool {
    let before = matches.len();
    matches.retain(|m| m.id != id);
    if matches.len() == before {
        return false;
    }
    reorder_and_renumber(matches);
    true
}
