//! Single binary web server: the league management REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::http::header::AUTHORIZATION;
use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, FromRequest, HttpRequest, HttpResponse, HttpServer,
};
use league_manager_web::{
    CardEvent, GoalEvent, LeagueError, LeagueRegistry, MatchUpdate, PenaltyScores, ProfileUpdate,
    TeamId, TeamRole, UserId,
};
use serde::Deserialize;
use std::future::{ready, Ready};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// Shared state: the whole league registry behind one lock. Mutating
/// handlers take the write lock for their entire read-modify-write, which
/// keeps each aggregate save atomic.
type AppState = Data<RwLock<LeagueRegistry>>;

fn read_state(state: &AppState) -> Result<RwLockReadGuard<'_, LeagueRegistry>, LeagueError> {
    state.read().map_err(|_| LeagueError::StoreUnavailable)
}

fn write_state(state: &AppState) -> Result<RwLockWriteGuard<'_, LeagueRegistry>, LeagueError> {
    state.write().map_err(|_| LeagueError::StoreUnavailable)
}

/// The authenticated caller, extracted from the `Authorization: Bearer`
/// header and resolved against the session map before the handler runs.
struct Authed {
    user_id: UserId,
}

fn authenticate(req: &HttpRequest) -> Result<Authed, LeagueError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(LeagueError::NotAuthenticated)?;
    let state = req
        .app_data::<AppState>()
        .ok_or(LeagueError::StoreUnavailable)?;
    let guard = read_state(state)?;
    let user_id = guard.resolve_token(token).ok_or(LeagueError::InvalidToken)?;
    Ok(Authed { user_id })
}

impl FromRequest for Authed {
    type Error = LeagueError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    name: String,
    dob: String,
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    dob: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTeamBody {
    name: String,
    logo_url: Option<String>,
}

#[derive(Deserialize)]
struct JoinTeamBody {
    code: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTeamBody {
    name: Option<String>,
    logo_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddMemberBody {
    member_id: UserId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetRoleBody {
    member_id: UserId,
    role: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTournamentBody {
    name: String,
    logo_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JoinTournamentBody {
    invite_code: String,
    team_id: TeamId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTournamentBody {
    name: Option<String>,
    logo_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddTournamentTeamBody {
    team_code_or_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewMatchBody {
    team_a_id: TeamId,
    team_b_id: TeamId,
    round: String,
    date: Option<String>,
    time: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndMatchBody {
    penalty_scores: Option<PenaltyScores>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PotmBody {
    player_id: UserId,
}

/// Path segment: user id (e.g. /api/users/{id})
#[derive(Deserialize)]
struct UserPath {
    id: UserId,
}

/// Path segment: team or tournament id
#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

/// Path segments: team id and member id
#[derive(Deserialize)]
struct TeamMemberPath {
    id: TeamId,
    member_id: UserId,
}

/// Path segments: tournament id and match id
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: Uuid,
    match_id: Uuid,
}

#[get("/api/health")]
async fn api_health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "league-manager-web",
    })
}

// --- auth ---

/// Register a new account; responds with a bearer token and the user view.
#[post("/api/auth/register")]
async fn api_register(state: AppState, body: Json<RegisterBody>) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let session = g.register(&body.email, &body.name, &body.dob)?;
    Ok(HttpResponse::Created().json(session))
}

/// Log in with email + birthdate; responds with a fresh bearer token.
#[post("/api/auth/login")]
async fn api_login(state: AppState, body: Json<LoginBody>) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let session = g.login(&body.email, &body.dob)?;
    Ok(HttpResponse::Ok().json(session))
}

// --- users ---

#[get("/api/users/profile")]
async fn api_my_profile(state: AppState, auth: Authed) -> Result<HttpResponse, LeagueError> {
    let g = read_state(&state)?;
    Ok(HttpResponse::Ok().json(g.user_view(auth.user_id)?))
}

#[put("/api/users/profile")]
async fn api_update_profile(
    state: AppState,
    auth: Authed,
    body: Json<ProfileUpdate>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    Ok(HttpResponse::Ok().json(g.update_profile(auth.user_id, &body)?))
}

#[get("/api/users/{id}")]
async fn api_get_user(
    state: AppState,
    _auth: Authed,
    path: Path<UserPath>,
) -> Result<HttpResponse, LeagueError> {
    let g = read_state(&state)?;
    Ok(HttpResponse::Ok().json(g.user_view(path.id)?))
}

// --- teams ---

#[get("/api/teams")]
async fn api_list_teams(state: AppState, _auth: Authed) -> Result<HttpResponse, LeagueError> {
    let g = read_state(&state)?;
    Ok(HttpResponse::Ok().json(g.list_teams()))
}

#[post("/api/teams")]
async fn api_create_team(
    state: AppState,
    auth: Authed,
    body: Json<CreateTeamBody>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let team = g.create_team(auth.user_id, &body.name, body.logo_url.clone())?;
    Ok(HttpResponse::Created().json(team))
}

#[post("/api/teams/join")]
async fn api_join_team(
    state: AppState,
    auth: Authed,
    body: Json<JoinTeamBody>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    Ok(HttpResponse::Ok().json(g.join_team(auth.user_id, &body.code)?))
}

#[get("/api/teams/{id}")]
async fn api_get_team(
    state: AppState,
    _auth: Authed,
    path: Path<IdPath>,
) -> Result<HttpResponse, LeagueError> {
    let g = read_state(&state)?;
    Ok(HttpResponse::Ok().json(g.team_view(path.id)?))
}

#[put("/api/teams/{id}")]
async fn api_update_team(
    state: AppState,
    auth: Authed,
    path: Path<IdPath>,
    body: Json<UpdateTeamBody>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let body = body.into_inner();
    Ok(HttpResponse::Ok().json(g.update_team(auth.user_id, path.id, body.name, body.logo_url)?))
}

#[post("/api/teams/{id}/members")]
async fn api_add_member(
    state: AppState,
    auth: Authed,
    path: Path<IdPath>,
    body: Json<AddMemberBody>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let team = g.add_team_member(auth.user_id, path.id, body.member_id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Member added successfully",
        "team": team,
    })))
}

#[delete("/api/teams/{id}/members/{member_id}")]
async fn api_remove_member(
    state: AppState,
    auth: Authed,
    path: Path<TeamMemberPath>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let team = g.remove_team_member(auth.user_id, path.id, path.member_id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Member removed successfully",
        "team": team,
    })))
}

#[put("/api/teams/{id}/admins/{member_id}")]
async fn api_toggle_admin(
    state: AppState,
    auth: Authed,
    path: Path<TeamMemberPath>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let (team, granted) = g.toggle_team_admin(auth.user_id, path.id, path.member_id)?;
    let message = if granted {
        "Admin status granted"
    } else {
        "Admin status removed"
    };
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": message,
        "team": team,
    })))
}

#[put("/api/teams/{id}/roles")]
async fn api_set_role(
    state: AppState,
    auth: Authed,
    path: Path<IdPath>,
    body: Json<SetRoleBody>,
) -> Result<HttpResponse, LeagueError> {
    let role = match body.role.as_str() {
        "captain" => TeamRole::Captain,
        "viceCaptain" => TeamRole::ViceCaptain,
        _ => return Err(LeagueError::InvalidRole),
    };
    let mut g = write_state(&state)?;
    let (team, assigned) = g.set_team_role(auth.user_id, path.id, body.member_id, role)?;
    let message = match (role, assigned) {
        (TeamRole::Captain, true) => "Captain set",
        (TeamRole::Captain, false) => "Captain removed",
        (TeamRole::ViceCaptain, true) => "Vice-Captain set",
        (TeamRole::ViceCaptain, false) => "Vice-Captain removed",
    };
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": message,
        "team": team,
    })))
}

// --- tournaments ---

#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState, _auth: Authed) -> Result<HttpResponse, LeagueError> {
    let g = read_state(&state)?;
    Ok(HttpResponse::Ok().json(g.list_tournaments()))
}

#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    auth: Authed,
    body: Json<CreateTournamentBody>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let tournament = g.create_tournament(auth.user_id, &body.name, body.logo_url.clone())?;
    Ok(HttpResponse::Created().json(tournament))
}

#[post("/api/tournaments/join")]
async fn api_join_tournament(
    state: AppState,
    _auth: Authed,
    body: Json<JoinTournamentBody>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let tournament_id = g.join_tournament(&body.invite_code, body.team_id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Successfully joined tournament!",
        "tournamentId": tournament_id,
    })))
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(
    state: AppState,
    _auth: Authed,
    path: Path<IdPath>,
) -> Result<HttpResponse, LeagueError> {
    let g = read_state(&state)?;
    Ok(HttpResponse::Ok().json(g.tournament_view(path.id)?))
}

#[put("/api/tournaments/{id}")]
async fn api_update_tournament(
    state: AppState,
    auth: Authed,
    path: Path<IdPath>,
    body: Json<UpdateTournamentBody>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let body = body.into_inner();
    Ok(HttpResponse::Ok().json(g.update_tournament(
        auth.user_id,
        path.id,
        body.name,
        body.logo_url,
    )?))
}

#[post("/api/tournaments/{id}/teams")]
async fn api_add_tournament_team(
    state: AppState,
    auth: Authed,
    path: Path<IdPath>,
    body: Json<AddTournamentTeamBody>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    g.add_tournament_team(auth.user_id, path.id, &body.team_code_or_id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Team added",
    })))
}

/// Generate the round-robin schedule. Destructive: replaces all matches.
#[post("/api/tournaments/{id}/schedule")]
async fn api_schedule_matches(
    state: AppState,
    auth: Authed,
    path: Path<IdPath>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    g.schedule_matches(auth.user_id, path.id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Matches scheduled",
    })))
}

#[post("/api/tournaments/{id}/matches")]
async fn api_add_match(
    state: AppState,
    auth: Authed,
    path: Path<IdPath>,
    body: Json<NewMatchBody>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let body = body.into_inner();
    let fixture = g.add_match(
        auth.user_id,
        path.id,
        body.team_a_id,
        body.team_b_id,
        &body.round,
        body.date,
        body.time,
    )?;
    Ok(HttpResponse::Created().json(fixture))
}

/// Edit a fixture; responds with the whole re-sorted, re-numbered list.
#[put("/api/tournaments/{id}/matches/{match_id}")]
async fn api_update_match(
    state: AppState,
    auth: Authed,
    path: Path<TournamentMatchPath>,
    body: Json<MatchUpdate>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let matches = g.update_match(auth.user_id, path.id, path.match_id, body.into_inner())?;
    Ok(HttpResponse::Ok().json(matches))
}

#[delete("/api/tournaments/{id}/matches/{match_id}")]
async fn api_delete_match(
    state: AppState,
    auth: Authed,
    path: Path<TournamentMatchPath>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    let matches = g.delete_match(auth.user_id, path.id, path.match_id)?;
    Ok(HttpResponse::Ok().json(matches))
}

#[put("/api/tournaments/{id}/matches/{match_id}/start")]
async fn api_start_match(
    state: AppState,
    auth: Authed,
    path: Path<TournamentMatchPath>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    Ok(HttpResponse::Ok().json(g.start_match(auth.user_id, path.id, path.match_id)?))
}

#[put("/api/tournaments/{id}/matches/{match_id}/end")]
async fn api_end_match(
    state: AppState,
    auth: Authed,
    path: Path<TournamentMatchPath>,
    body: Option<Json<EndMatchBody>>,
) -> Result<HttpResponse, LeagueError> {
    let penalties = body.as_ref().and_then(|b| b.penalty_scores);
    let mut g = write_state(&state)?;
    Ok(HttpResponse::Ok().json(g.end_match(auth.user_id, path.id, path.match_id, penalties)?))
}

#[post("/api/tournaments/{id}/matches/{match_id}/goals")]
async fn api_record_goal(
    state: AppState,
    auth: Authed,
    path: Path<TournamentMatchPath>,
    body: Json<GoalEvent>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    Ok(HttpResponse::Ok().json(g.record_goal(
        auth.user_id,
        path.id,
        path.match_id,
        body.into_inner(),
    )?))
}

#[post("/api/tournaments/{id}/matches/{match_id}/cards")]
async fn api_record_card(
    state: AppState,
    auth: Authed,
    path: Path<TournamentMatchPath>,
    body: Json<CardEvent>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    Ok(HttpResponse::Ok().json(g.record_card(
        auth.user_id,
        path.id,
        path.match_id,
        body.into_inner(),
    )?))
}

#[put("/api/tournaments/{id}/matches/{match_id}/potm")]
async fn api_set_potm(
    state: AppState,
    auth: Authed,
    path: Path<TournamentMatchPath>,
    body: Json<PotmBody>,
) -> Result<HttpResponse, LeagueError> {
    let mut g = write_state(&state)?;
    Ok(HttpResponse::Ok().json(g.set_player_of_the_match(
        auth.user_id,
        path.id,
        path.match_id,
        body.player_id,
    )?))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(LeagueRegistry::new()));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_register)
            .service(api_login)
            // fixed paths before {id} captures
            .service(api_my_profile)
            .service(api_update_profile)
            .service(api_get_user)
            .service(api_list_teams)
            .service(api_create_team)
            .service(api_join_team)
            .service(api_get_team)
            .service(api_update_team)
            .service(api_add_member)
            .service(api_remove_member)
            .service(api_toggle_admin)
            .service(api_set_role)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_join_tournament)
            .service(api_get_tournament)
            .service(api_update_tournament)
            .service(api_add_tournament_team)
            .service(api_schedule_matches)
            .service(api_add_match)
            .service(api_update_match)
            .service(api_delete_match)
            .service(api_start_match)
            .service(api_end_match)
            .service(api_record_goal)
            .service(api_record_card)
            .service(api_set_potm)
    })
    .bind(bind)?
    .run()
    .await
}
