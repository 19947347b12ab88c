//! Domain errors and their HTTP mapping.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// Errors that can occur during league operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LeagueError {
    /// A required field is missing or empty.
    MissingField(&'static str),
    /// Birthdate is not a YYYY-MM-DD calendar date.
    InvalidBirthdate,
    /// Role is not one of captain / viceCaptain.
    InvalidRole,
    /// The benefiting team of a goal is neither side of the match.
    BenefitingTeamNotInMatch,
    /// The carded player's team is neither side of the match.
    CardTeamNotInMatch,
    /// A match needs two different teams.
    MatchTeamsIdentical,
    /// A match team is not entered in the tournament.
    TeamNotInTournament,
    /// Role or admin target is not a member of the team.
    NotATeamMember,
    /// Email/birthdate pair did not match any account.
    InvalidCredentials,
    /// No bearer token on the request.
    NotAuthenticated,
    /// Bearer token did not resolve to a session.
    InvalidToken,
    /// Actor is not an admin of the team.
    NotTeamAdmin,
    /// Actor is not the tournament admin.
    NotTournamentAdmin,
    UserNotFound,
    TeamNotFound,
    TournamentNotFound,
    MatchNotFound,
    /// An account with this email already exists.
    EmailTaken,
    /// User is already a member of the team.
    AlreadyTeamMember,
    /// Team is already entered in the tournament.
    TeamAlreadyEntered,
    /// The shared store could not be accessed.
    StoreUnavailable,
}

impl std::fmt::Display for LeagueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeagueError::MissingField(field) => write!(f, "{} is required", field),
            LeagueError::InvalidBirthdate => write!(f, "Birthdate must be a valid YYYY-MM-DD date"),
            LeagueError::InvalidRole => write!(f, "Invalid role specified"),
            LeagueError::BenefitingTeamNotInMatch => {
                write!(f, "Benefiting team is not in this match")
            }
            LeagueError::CardTeamNotInMatch => write!(f, "Player's team is not in this match"),
            LeagueError::MatchTeamsIdentical => write!(f, "A match needs two different teams"),
            LeagueError::TeamNotInTournament => {
                write!(f, "Team is not entered in this tournament")
            }
            LeagueError::NotATeamMember => write!(f, "User is not a member of this team"),
            LeagueError::InvalidCredentials => {
                write!(f, "Invalid credentials. Please check your email and date of birth.")
            }
            LeagueError::NotAuthenticated => write!(f, "Not authorized, no token"),
            LeagueError::InvalidToken => write!(f, "Not authorized, token failed"),
            LeagueError::NotTeamAdmin => write!(f, "Not authorized to manage this team"),
            LeagueError::NotTournamentAdmin => write!(f, "Not authorized"),
            LeagueError::UserNotFound => write!(f, "User not found"),
            LeagueError::TeamNotFound => write!(f, "Team not found"),
            LeagueError::TournamentNotFound => write!(f, "Tournament not found"),
            LeagueError::MatchNotFound => write!(f, "Match not found"),
            LeagueError::EmailTaken => write!(f, "User with this email already exists"),
            LeagueError::AlreadyTeamMember => write!(f, "Already a member of this team"),
            LeagueError::TeamAlreadyEntered => {
                write!(f, "This team is already in the tournament")
            }
            LeagueError::StoreUnavailable => write!(f, "Server error"),
        }
    }
}

impl LeagueError {
    /// Extra context for the response body, where a bare message is not actionable.
    fn detail(&self) -> Option<String> {
        match self {
            LeagueError::InvalidRole => {
                Some("expected one of: captain, viceCaptain".to_string())
            }
            LeagueError::MissingField(field) => {
                Some(format!("missing or empty field: {}", field))
            }
            _ => None,
        }
    }
}

/// JSON error body: `{ "message": ..., "detail"?: ... }`.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ResponseError for LeagueError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeagueError::MissingField(_)
            | LeagueError::InvalidBirthdate
            | LeagueError::InvalidRole
            | LeagueError::BenefitingTeamNotInMatch
            | LeagueError::CardTeamNotInMatch
            | LeagueError::MatchTeamsIdentical
            | LeagueError::TeamNotInTournament
            | LeagueError::NotATeamMember => StatusCode::BAD_REQUEST,
            LeagueError::InvalidCredentials
            | LeagueError::NotAuthenticated
            | LeagueError::InvalidToken => StatusCode::UNAUTHORIZED,
            LeagueError::NotTeamAdmin | LeagueError::NotTournamentAdmin => StatusCode::FORBIDDEN,
            LeagueError::UserNotFound
            | LeagueError::TeamNotFound
            | LeagueError::TournamentNotFound
            | LeagueError::MatchNotFound => StatusCode::NOT_FOUND,
            LeagueError::EmailTaken
            | LeagueError::AlreadyTeamMember
            | LeagueError::TeamAlreadyEntered => StatusCode::CONFLICT,
            LeagueError::StoreUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            message: self.to_string(),
            detail: self.detail(),
        })
    }
}
