//! In-memory league store: users, teams, tournaments, and bearer sessions.
//!
//! Every mutating method is a read-modify-write of exactly one aggregate
//! (a team or a tournament); the web layer wraps the registry in an RwLock
//! so each command sees and saves a consistent aggregate. Authorization is
//! checked here, before any mutation: team commands require the actor to be
//! a team admin, tournament commands require the single tournament owner.

use crate::error::LeagueError;
use crate::logic;
use crate::models::{
    Match, MatchId, ProfileUpdate, Team, TeamId, TeamRole, Tournament, TournamentId, User, UserId,
    UserView,
};
use chrono::NaiveDate;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

const TEAM_INVITE_CODE_LEN: usize = 8;
const TOURNAMENT_INVITE_CODE_LEN: usize = 10;
const SESSION_TOKEN_LEN: usize = 40;

const INVITE_CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random uppercase alphanumeric invite code. Best-effort uniqueness: no
/// collision retry, same as the original token generator.
fn generate_invite_code(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| INVITE_CODE_CHARSET[rng.gen_range(0..INVITE_CODE_CHARSET.len())] as char)
        .collect()
}

/// Opaque bearer credential. Resolved against the session map on every
/// authenticated request.
fn generate_session_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Credential plus user projection, returned from register and login.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub user: UserView,
}

/// The whole league state. Fields are private; all access goes through
/// methods so authorization and invariants cannot be bypassed.
#[derive(Debug, Default)]
pub struct LeagueRegistry {
    users: HashMap<UserId, User>,
    teams: HashMap<TeamId, Team>,
    tournaments: HashMap<TournamentId, Tournament>,
    /// Bearer token -> user. Multiple live tokens per user are allowed.
    sessions: HashMap<String, UserId>,
}

impl LeagueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // --- identity directory ---

    /// Register a new account. Email uniqueness is case-insensitive; the
    /// birthdate must be a real YYYY-MM-DD date (it is the login credential,
    /// stored and later compared as the exact string).
    pub fn register(&mut self, email: &str, name: &str, dob: &str) -> Result<AuthSession, LeagueError> {
        let email = email.trim().to_lowercase();
        let name = name.trim();
        let dob = dob.trim();
        if email.is_empty() {
            return Err(LeagueError::MissingField("email"));
        }
        if name.is_empty() {
            return Err(LeagueError::MissingField("name"));
        }
        if dob.is_empty() {
            return Err(LeagueError::MissingField("dob"));
        }
        if NaiveDate::parse_from_str(dob, "%Y-%m-%d").is_err() {
            return Err(LeagueError::InvalidBirthdate);
        }
        if self.users.values().any(|u| u.email == email) {
            return Err(LeagueError::EmailTaken);
        }
        let user = User::new(email, dob, name);
        let session = self.open_session(&user);
        self.users.insert(user.id, user);
        Ok(session)
    }

    /// Log in with email (case-insensitive) and exact birthdate string.
    /// Issues a fresh token; earlier tokens stay valid.
    pub fn login(&mut self, email: &str, dob: &str) -> Result<AuthSession, LeagueError> {
        let email = email.trim().to_lowercase();
        let user = self.users.values().find(|u| u.email == email).cloned();
        match user {
            Some(u) if u.dob == dob => Ok(self.open_session(&u)),
            _ => Err(LeagueError::InvalidCredentials),
        }
    }

    fn open_session(&mut self, user: &User) -> AuthSession {
        let token = generate_session_token();
        self.sessions.insert(token.clone(), user.id);
        AuthSession {
            token,
            user: user.view(),
        }
    }

    /// Resolve a bearer token to the user it was issued to.
    pub fn resolve_token(&self, token: &str) -> Option<UserId> {
        self.sessions.get(token).copied()
    }

    pub fn user_view(&self, id: UserId) -> Result<UserView, LeagueError> {
        self.users
            .get(&id)
            .map(User::view)
            .ok_or(LeagueError::UserNotFound)
    }

    pub fn update_profile(
        &mut self,
        user_id: UserId,
        update: &ProfileUpdate,
    ) -> Result<UserView, LeagueError> {
        let user = self.users.get_mut(&user_id).ok_or(LeagueError::UserNotFound)?;
        user.update_profile(update);
        Ok(user.view())
    }

    // --- roster registry ---

    /// Create a team; the creator becomes its sole member and admin.
    pub fn create_team(
        &mut self,
        actor: UserId,
        name: &str,
        logo_url: Option<String>,
    ) -> Result<Team, LeagueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeagueError::MissingField("name"));
        }
        let team = Team::new(name, logo_url, actor, generate_invite_code(TEAM_INVITE_CODE_LEN));
        let view = team.clone();
        self.teams.insert(team.id, team);
        Ok(view)
    }

    /// Join a team by invite code (case-insensitive).
    pub fn join_team(&mut self, actor: UserId, code: &str) -> Result<Team, LeagueError> {
        let code = code.trim().to_uppercase();
        let team = self
            .teams
            .values_mut()
            .find(|t| t.invite_code == code)
            .ok_or(LeagueError::TeamNotFound)?;
        team.add_member(actor)?;
        Ok(team.clone())
    }

    pub fn team_view(&self, id: TeamId) -> Result<Team, LeagueError> {
        self.teams.get(&id).cloned().ok_or(LeagueError::TeamNotFound)
    }

    pub fn list_teams(&self) -> Vec<Team> {
        self.teams.values().cloned().collect()
    }

    fn admin_team_mut(&mut self, actor: UserId, id: TeamId) -> Result<&mut Team, LeagueError> {
        let team = self.teams.get_mut(&id).ok_or(LeagueError::TeamNotFound)?;
        if !team.is_admin(actor) {
            return Err(LeagueError::NotTeamAdmin);
        }
        Ok(team)
    }

    pub fn update_team(
        &mut self,
        actor: UserId,
        id: TeamId,
        name: Option<String>,
        logo_url: Option<String>,
    ) -> Result<Team, LeagueError> {
        let team = self.admin_team_mut(actor, id)?;
        if let Some(name) = name {
            if !name.trim().is_empty() {
                team.name = name.trim().to_string();
            }
        }
        if let Some(logo_url) = logo_url {
            team.logo_url = Some(logo_url);
        }
        Ok(team.clone())
    }

    /// Add a registered user to the roster (team admins only).
    pub fn add_team_member(
        &mut self,
        actor: UserId,
        team_id: TeamId,
        member_id: UserId,
    ) -> Result<Team, LeagueError> {
        if !self.users.contains_key(&member_id) {
            return Err(LeagueError::UserNotFound);
        }
        let team = self.admin_team_mut(actor, team_id)?;
        team.add_member(member_id)?;
        Ok(team.clone())
    }

    /// Remove a user from the roster, stripping admin status and captain
    /// roles with the membership.
    pub fn remove_team_member(
        &mut self,
        actor: UserId,
        team_id: TeamId,
        member_id: UserId,
    ) -> Result<Team, LeagueError> {
        let team = self.admin_team_mut(actor, team_id)?;
        team.remove_member(member_id);
        Ok(team.clone())
    }

    /// Toggle a member's admin status. Returns the team and whether admin
    /// was granted (true) or removed (false).
    pub fn toggle_team_admin(
        &mut self,
        actor: UserId,
        team_id: TeamId,
        member_id: UserId,
    ) -> Result<(Team, bool), LeagueError> {
        let team = self.admin_team_mut(actor, team_id)?;
        let granted = team.toggle_admin(member_id)?;
        Ok((team.clone(), granted))
    }

    /// Toggle captain or vice-captain. Returns the team and whether the role
    /// was set (true) or cleared (false).
    pub fn set_team_role(
        &mut self,
        actor: UserId,
        team_id: TeamId,
        member_id: UserId,
        role: TeamRole,
    ) -> Result<(Team, bool), LeagueError> {
        let team = self.admin_team_mut(actor, team_id)?;
        let assigned = team.set_role(member_id, role)?;
        Ok((team.clone(), assigned))
    }

    // --- tournament engine ---

    /// Create a tournament owned by the actor.
    pub fn create_tournament(
        &mut self,
        actor: UserId,
        name: &str,
        logo_url: Option<String>,
    ) -> Result<Tournament, LeagueError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LeagueError::MissingField("name"));
        }
        let tournament = Tournament::new(
            name,
            logo_url,
            actor,
            generate_invite_code(TOURNAMENT_INVITE_CODE_LEN),
        );
        let view = tournament.clone();
        self.tournaments.insert(tournament.id, tournament);
        Ok(view)
    }

    pub fn tournament_view(&self, id: TournamentId) -> Result<Tournament, LeagueError> {
        self.tournaments
            .get(&id)
            .cloned()
            .ok_or(LeagueError::TournamentNotFound)
    }

    pub fn list_tournaments(&self) -> Vec<Tournament> {
        self.tournaments.values().cloned().collect()
    }

    /// Enter a team into a tournament by the tournament's invite code. Open
    /// to any authenticated caller holding the code.
    pub fn join_tournament(
        &mut self,
        invite_code: &str,
        team_id: TeamId,
    ) -> Result<TournamentId, LeagueError> {
        if !self.teams.contains_key(&team_id) {
            return Err(LeagueError::TeamNotFound);
        }
        let code = invite_code.trim().to_uppercase();
        let tournament = self
            .tournaments
            .values_mut()
            .find(|t| t.invite_code == code)
            .ok_or(LeagueError::TournamentNotFound)?;
        tournament.add_team(team_id)?;
        Ok(tournament.id)
    }

    /// The single-owner authorization gate every administrative tournament
    /// command goes through: missing tournament before wrong actor.
    fn admin_tournament_mut(
        &mut self,
        actor: UserId,
        id: TournamentId,
    ) -> Result<&mut Tournament, LeagueError> {
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or(LeagueError::TournamentNotFound)?;
        if tournament.admin_id != actor {
            return Err(LeagueError::NotTournamentAdmin);
        }
        Ok(tournament)
    }

    pub fn update_tournament(
        &mut self,
        actor: UserId,
        id: TournamentId,
        name: Option<String>,
        logo_url: Option<String>,
    ) -> Result<Tournament, LeagueError> {
        let tournament = self.admin_tournament_mut(actor, id)?;
        if let Some(name) = name {
            if !name.trim().is_empty() {
                tournament.name = name.trim().to_string();
            }
        }
        if let Some(logo_url) = logo_url {
            tournament.logo_url = Some(logo_url);
        }
        Ok(tournament.clone())
    }

    /// Enter a team by its id or its team invite code (admin only).
    pub fn add_tournament_team(
        &mut self,
        actor: UserId,
        id: TournamentId,
        team_code_or_id: &str,
    ) -> Result<(), LeagueError> {
        {
            let tournament = self
                .tournaments
                .get(&id)
                .ok_or(LeagueError::TournamentNotFound)?;
            if tournament.admin_id != actor {
                return Err(LeagueError::NotTournamentAdmin);
            }
        }
        let team_id = self
            .find_team_by_code_or_id(team_code_or_id)
            .ok_or(LeagueError::TeamNotFound)?;
        let tournament = self
            .tournaments
            .get_mut(&id)
            .ok_or(LeagueError::TournamentNotFound)?;
        tournament.add_team(team_id)
    }

    fn find_team_by_code_or_id(&self, code_or_id: &str) -> Option<TeamId> {
        if let Ok(id) = Uuid::parse_str(code_or_id) {
            if self.teams.contains_key(&id) {
                return Some(id);
            }
        }
        let code = code_or_id.trim().to_uppercase();
        self.teams.values().find(|t| t.invite_code == code).map(|t| t.id)
    }

    /// Generate the round-robin schedule. Destructive: discards existing
    /// matches and their recorded events. Returns the fixture count.
    pub fn schedule_matches(&mut self, actor: UserId, id: TournamentId) -> Result<usize, LeagueError> {
        let tournament = self.admin_tournament_mut(actor, id)?;
        logic::schedule_league_fixtures(tournament);
        Ok(tournament.matches.len())
    }

    pub fn add_match(
        &mut self,
        actor: UserId,
        id: TournamentId,
        team_a_id: TeamId,
        team_b_id: TeamId,
        round: &str,
        date: Option<String>,
        time: Option<String>,
    ) -> Result<Match, LeagueError> {
        let round = round.trim();
        if round.is_empty() {
            return Err(LeagueError::MissingField("round"));
        }
        let tournament = self.admin_tournament_mut(actor, id)?;
        logic::add_match(tournament, team_a_id, team_b_id, round, date, time)
    }

    /// Edit a fixture; returns the whole re-sorted, re-numbered fixture list.
    pub fn update_match(
        &mut self,
        actor: UserId,
        id: TournamentId,
        match_id: MatchId,
        update: logic::MatchUpdate,
    ) -> Result<Vec<Match>, LeagueError> {
        let tournament = self.admin_tournament_mut(actor, id)?;
        logic::update_match_details(tournament, match_id, update)?;
        Ok(tournament.matches.clone())
    }

    /// Delete a fixture; returns the renumbered remainder.
    pub fn delete_match(
        &mut self,
        actor: UserId,
        id: TournamentId,
        match_id: MatchId,
    ) -> Result<Vec<Match>, LeagueError> {
        let tournament = self.admin_tournament_mut(actor, id)?;
        logic::delete_match(tournament, match_id)?;
        Ok(tournament.matches.clone())
    }

    pub fn start_match(
        &mut self,
        actor: UserId,
        id: TournamentId,
        match_id: MatchId,
    ) -> Result<Match, LeagueError> {
        let tournament = self.admin_tournament_mut(actor, id)?;
        Ok(logic::start_match(tournament, match_id)?.clone())
    }

    pub fn end_match(
        &mut self,
        actor: UserId,
        id: TournamentId,
        match_id: MatchId,
        penalties: Option<logic::PenaltyScores>,
    ) -> Result<Match, LeagueError> {
        let tournament = self.admin_tournament_mut(actor, id)?;
        Ok(logic::end_match(tournament, match_id, penalties)?.clone())
    }

    pub fn record_goal(
        &mut self,
        actor: UserId,
        id: TournamentId,
        match_id: MatchId,
        event: logic::GoalEvent,
    ) -> Result<Match, LeagueError> {
        let tournament = self.admin_tournament_mut(actor, id)?;
        Ok(logic::record_goal(tournament, match_id, event)?.clone())
    }

    pub fn record_card(
        &mut self,
        actor: UserId,
        id: TournamentId,
        match_id: MatchId,
        event: logic::CardEvent,
    ) -> Result<Match, LeagueError> {
        let tournament = self.admin_tournament_mut(actor, id)?;
        Ok(logic::record_card(tournament, match_id, event)?.clone())
    }

    pub fn set_player_of_the_match(
        &mut self,
        actor: UserId,
        id: TournamentId,
        match_id: MatchId,
        player_id: UserId,
    ) -> Result<Match, LeagueError> {
        let tournament = self.admin_tournament_mut(actor, id)?;
        Ok(logic::set_player_of_the_match(tournament, match_id, player_id)?.clone())
    }
}
