//! Business logic: fixture scheduling and the live match state machine.

mod live;
mod scheduler;

pub use live::{
    add_match, delete_match, end_match, record_card, record_goal, set_player_of_the_match,
    start_match, update_match_details, CardEvent, GoalEvent, MatchUpdate, PenaltyScores,
};
pub use scheduler::{
    remove_and_renumber, reorder_and_renumber, round_robin_fixtures, schedule_league_fixtures,
    LEAGUE_STAGE_ROUND,
};
