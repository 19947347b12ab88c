//! League manager web app: library with models, scheduling logic, and the
//! in-memory registry behind the REST API.

pub mod error;
pub mod logic;
pub mod models;
pub mod registry;

pub use error::LeagueError;
pub use logic::{
    add_match, delete_match, end_match, record_card, record_goal, reorder_and_renumber,
    round_robin_fixtures, schedule_league_fixtures, set_player_of_the_match, start_match,
    update_match_details, CardEvent, GoalEvent, MatchUpdate, PenaltyScores, LEAGUE_STAGE_ROUND,
};
pub use models::{
    Card, CardType, Goal, Match, MatchId, MatchStatus, PlayerProfile, ProfileUpdate, Team, TeamId,
    TeamRole, Tournament, TournamentId, User, UserId, UserView,
};
pub use registry::{AuthSession, LeagueRegistry};
