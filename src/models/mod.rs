//! Data structures for the league: users, team rosters, tournaments.

mod team;
mod tournament;
mod user;

pub use team::{Team, TeamId, TeamRole};
pub use tournament::{
    Card, CardType, Goal, Match, MatchId, MatchStatus, Tournament, TournamentId,
};
pub use user::{PlayerProfile, ProfileUpdate, User, UserId, UserView};
