//! Tournament aggregate: the tournament record and its owned matches,
//! goals, and cards. Matches have no identity outside their tournament;
//! every mutation goes through the owning aggregate.

use crate::error::LeagueError;
use crate::models::team::TeamId;
use crate::models::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Identifier for a match within its tournament.
pub type MatchId = Uuid;

/// Lifecycle of a match. Transitions only move forward.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Finished,
}

/// Card colour.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum CardType {
    Yellow,
    Red,
}

/// A recorded goal. `team_id` is the side credited with the goal — for an
/// own goal that is the opponent of the scorer's team, as supplied by the
/// caller. Scorer and assist may be free-text names for unregistered players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub scorer_id: Option<UserId>,
    pub scorer_name: Option<String>,
    pub assist_id: Option<UserId>,
    pub assist_name: Option<String>,
    pub minute: u32,
    pub is_own_goal: bool,
    pub team_id: TeamId,
}

/// A recorded booking.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub player_id: Option<UserId>,
    pub player_name: Option<String>,
    pub minute: u32,
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub team_id: TeamId,
}

/// A single fixture between two of the tournament's teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    /// 1-based, dense; reassigned wholesale whenever the schedule reorders.
    pub match_number: u32,
    pub team_a_id: TeamId,
    pub team_b_id: TeamId,
    /// YYYY-MM-DD, compared lexicographically when ordering fixtures.
    pub date: Option<String>,
    /// HH:MM, compared lexicographically within a date.
    pub time: Option<String>,
    pub score_a: u32,
    pub score_b: u32,
    pub penalty_score_a: Option<u32>,
    pub penalty_score_b: Option<u32>,
    pub status: MatchStatus,
    pub goals: Vec<Goal>,
    pub cards: Vec<Card>,
    pub round: String,
    pub winner_id: Option<TeamId>,
    pub player_of_the_match_id: Option<UserId>,
}

impl Match {
    pub fn new(
        match_number: u32,
        team_a_id: TeamId,
        team_b_id: TeamId,
        round: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_number,
            team_a_id,
            team_b_id,
            date: None,
            time: None,
            score_a: 0,
            score_b: 0,
            penalty_score_a: None,
            penalty_score_b: None,
            status: MatchStatus::Scheduled,
            goals: Vec::new(),
            cards: Vec::new(),
            round: round.into(),
            winner_id: None,
            player_of_the_match_id: None,
        }
    }

    /// Whether the given team is one of the two sides.
    pub fn involves(&self, team: TeamId) -> bool {
        self.team_a_id == team || self.team_b_id == team
    }
}

/// The aggregate root: tournament record plus its full fixture list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub logo_url: Option<String>,
    /// Single owner; the only actor allowed to mutate administrative fields.
    pub admin_id: UserId,
    /// Insertion order; drives round-robin pairing order.
    pub teams: Vec<TeamId>,
    pub matches: Vec<Match>,
    pub scheduling_done: bool,
    pub invite_code: String,
}

impl Tournament {
    pub fn new(
        name: impl Into<String>,
        logo_url: Option<String>,
        admin_id: UserId,
        invite_code: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            logo_url,
            admin_id,
            teams: Vec::new(),
            matches: Vec::new(),
            scheduling_done: false,
            invite_code,
        }
    }

    pub fn has_team(&self, team: TeamId) -> bool {
        self.teams.contains(&team)
    }

    /// Enter a team. Pairing order follows entry order.
    pub fn add_team(&mut self, team: TeamId) -> Result<(), LeagueError> {
        if self.has_team(team) {
            return Err(LeagueError::TeamAlreadyEntered);
        }
        self.teams.push(team);
        Ok(())
    }

    pub fn match_ref(&self, id: MatchId) -> Result<&Match, LeagueError> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .ok_or(LeagueError::MatchNotFound)
    }

    pub fn match_mut(&mut self, id: MatchId) -> Result<&mut Match, LeagueError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(LeagueError::MatchNotFound)
    }
}
