//! Match lifecycle: manual fixture edits and live scoring.
//!
//! Matches move Scheduled -> Live -> Finished. Starting a match and recording
//! events are not guarded against the current status; only team references
//! are validated.

use crate::error::LeagueError;
use crate::logic::scheduler::{remove_and_renumber, reorder_and_renumber};
use crate::models::{Card, CardType, Goal, Match, MatchId, MatchStatus, TeamId, Tournament, UserId};
use serde::Deserialize;

/// Penalty shoot-out scores submitted when ending a drawn match.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyScores {
    pub penalty_score_a: u32,
    pub penalty_score_b: u32,
}

/// A goal being recorded against a live (or, unguarded, any) match.
/// `benefiting_team_id` names the side whose score increments; for an own
/// goal the caller passes the opponent of the scorer's team.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalEvent {
    pub scorer_id: Option<UserId>,
    pub scorer_name: Option<String>,
    pub assist_id: Option<UserId>,
    pub assist_name: Option<String>,
    #[serde(default)]
    pub minute: u32,
    #[serde(default)]
    pub is_own_goal: bool,
    pub benefiting_team_id: TeamId,
}

/// A booking being recorded.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEvent {
    pub player_id: Option<UserId>,
    pub player_name: Option<String>,
    #[serde(default)]
    pub minute: u32,
    pub card_type: CardType,
    pub team_id: TeamId,
}

/// Partial fixture edit. Absent fields keep their value; an empty date or
/// time string clears the field.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchUpdate {
    pub team_a_id: Option<TeamId>,
    pub team_b_id: Option<TeamId>,
    pub date: Option<String>,
    pub time: Option<String>,
}

fn clear_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn check_sides(tournament: &Tournament, team_a: TeamId, team_b: TeamId) -> Result<(), LeagueError> {
    if team_a == team_b {
        return Err(LeagueError::MatchTeamsIdentical);
    }
    if !tournament.has_team(team_a) || !tournament.has_team(team_b) {
        return Err(LeagueError::TeamNotInTournament);
    }
    Ok(())
}

/// Append a manually created fixture. It takes the next match number; the
/// schedule is not re-sorted until a detail edit triggers one.
pub fn add_match(
    tournament: &mut Tournament,
    team_a_id: TeamId,
    team_b_id: TeamId,
    round: &str,
    date: Option<String>,
    time: Option<String>,
) -> Result<Match, LeagueError> {
    check_sides(tournament, team_a_id, team_b_id)?;
    let number = (tournament.matches.len() + 1) as u32;
    let mut fixture = Match::new(number, team_a_id, team_b_id, round);
    fixture.date = date.and_then(clear_empty);
    fixture.time = time.and_then(clear_empty);
    tournament.matches.push(fixture.clone());
    Ok(fixture)
}

/// Edit a fixture's teams, date, or time. Validation happens before any
/// mutation; on success the entire fixture list is re-sorted and
/// re-numbered, so one edit can shift every other match's number.
pub fn update_match_details(
    tournament: &mut Tournament,
    match_id: MatchId,
    update: MatchUpdate,
) -> Result<(), LeagueError> {
    let (current_a, current_b) = {
        let m = tournament.match_ref(match_id)?;
        (m.team_a_id, m.team_b_id)
    };
    let next_a = update.team_a_id.unwrap_or(current_a);
    let next_b = update.team_b_id.unwrap_or(current_b);
    check_sides(tournament, next_a, next_b)?;

    let m = tournament.match_mut(match_id)?;
    m.team_a_id = next_a;
    m.team_b_id = next_b;
    if let Some(date) = update.date {
        m.date = clear_empty(date);
    }
    if let Some(time) = update.time {
        m.time = clear_empty(time);
    }

    reorder_and_renumber(&mut tournament.matches);
    Ok(())
}

/// Delete a fixture and renumber the remainder.
pub fn delete_match(tournament: &mut Tournament, match_id: MatchId) -> Result<(), LeagueError> {
    if remove_and_renumber(&mut tournament.matches, match_id) {
        Ok(())
    } else {
        Err(LeagueError::MatchNotFound)
    }
}

/// Put a match in play. No guard against re-starting a Live or Finished
/// match.
pub fn start_match(tournament: &mut Tournament, match_id: MatchId) -> Result<&Match, LeagueError> {
    let m = tournament.match_mut(match_id)?;
    m.status = MatchStatus::Live;
    Ok(m)
}

/// Finish a match and resolve the winner: higher score wins; on a level
/// score, penalties decide if provided and unequal (and are persisted only
/// then); otherwise the match finishes drawn with no winner.
pub fn end_match(
    tournament: &mut Tournament,
    match_id: MatchId,
    penalties: Option<PenaltyScores>,
) -> Result<&Match, LeagueError> {
    let m = tournament.match_mut(match_id)?;
    let mut winner = None;
    if m.score_a > m.score_b {
        winner = Some(m.team_a_id);
    } else if m.score_b > m.score_a {
        winner = Some(m.team_b_id);
    } else if let Some(p) = penalties {
        if p.penalty_score_a != p.penalty_score_b {
            winner = Some(if p.penalty_score_a > p.penalty_score_b {
                m.team_a_id
            } else {
                m.team_b_id
            });
            m.penalty_score_a = Some(p.penalty_score_a);
            m.penalty_score_b = Some(p.penalty_score_b);
        }
    }
    m.winner_id = winner;
    m.status = MatchStatus::Finished;
    Ok(m)
}

/// Record a goal: bump the benefiting side's score and append the event.
/// Rejected, with no mutation, when the benefiting team is neither side.
pub fn record_goal(
    tournament: &mut Tournament,
    match_id: MatchId,
    event: GoalEvent,
) -> Result<&Match, LeagueError> {
    let m = tournament.match_mut(match_id)?;
    if event.benefiting_team_id == m.team_a_id {
        m.score_a += 1;
    } else if event.benefiting_team_id == m.team_b_id {
        m.score_b += 1;
    } else {
        return Err(LeagueError::BenefitingTeamNotInMatch);
    }
    m.goals.push(Goal {
        scorer_id: event.scorer_id,
        scorer_name: event.scorer_name,
        assist_id: event.assist_id,
        assist_name: event.assist_name,
        minute: event.minute,
        is_own_goal: event.is_own_goal,
        team_id: event.benefiting_team_id,
    });
    Ok(m)
}

/// Record a booking. The card's team must be one of the match's sides;
/// no score changes.
pub fn record_card(
    tournament: &mut Tournament,
    match_id: MatchId,
    event: CardEvent,
) -> Result<&Match, LeagueError> {
    let m = tournament.match_mut(match_id)?;
    if !m.involves(event.team_id) {
        return Err(LeagueError::CardTeamNotInMatch);
    }
    m.cards.push(Card {
        player_id: event.player_id,
        player_name: event.player_name,
        minute: event.minute,
        card_type: event.card_type,
        team_id: event.team_id,
    });
    Ok(m)
}

/// Set the player of the match. The id is stored as given, without roster
/// validation.
pub fn set_player_of_the_match(
    tournament: &mut Tournament,
    match_id: MatchId,
    player_id: UserId,
) -> Result<&Match, LeagueError> {
    let m = tournament.match_mut(match_id)?;
    m.player_of_the_match_id = Some(player_id);
    Ok(m)
}
