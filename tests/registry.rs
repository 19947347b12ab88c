//! Integration tests for the registry: accounts and sessions, team rosters,
//! and tournament commands with their authorization checks.

use league_manager_web::{
    GoalEvent, LeagueError, LeagueRegistry, ProfileUpdate, TeamRole, UserId,
};
use uuid::Uuid;

fn registry_with_user(email: &str) -> (LeagueRegistry, UserId) {
    let mut reg = LeagueRegistry::new();
    let session = reg.register(email, "Alex", "1990-01-01").unwrap();
    (reg, session.user.id)
}

#[test]
fn register_issues_a_resolvable_token() {
    let mut reg = LeagueRegistry::new();
    let session = reg.register("Alex@Example.com", "Alex", "1990-01-01").unwrap();

    assert_eq!(session.user.email, "alex@example.com");
    assert_eq!(session.user.profile.name, "Alex");
    assert_eq!(reg.resolve_token(&session.token), Some(session.user.id));
    assert_eq!(reg.resolve_token("bogus"), None);
}

#[test]
fn duplicate_email_is_rejected_case_insensitively() {
    let (mut reg, _) = registry_with_user("alex@example.com");
    let err = reg.register("ALEX@example.com", "Other", "1991-02-02").unwrap_err();
    assert_eq!(err, LeagueError::EmailTaken);
}

#[test]
fn register_validates_the_birthdate_shape() {
    let mut reg = LeagueRegistry::new();
    assert_eq!(
        reg.register("a@b.com", "A", "01/01/1990").unwrap_err(),
        LeagueError::InvalidBirthdate
    );
    assert_eq!(
        reg.register("a@b.com", "A", "1990-02-30").unwrap_err(),
        LeagueError::InvalidBirthdate
    );
    assert_eq!(
        reg.register("a@b.com", "A", "").unwrap_err(),
        LeagueError::MissingField("dob")
    );
}

#[test]
fn login_compares_the_exact_birthdate_string() {
    let (mut reg, user_id) = registry_with_user("alex@example.com");

    let err = reg.login("alex@example.com", "1990-01-02").unwrap_err();
    assert_eq!(err, LeagueError::InvalidCredentials);

    let session = reg.login("ALEX@EXAMPLE.COM", "1990-01-01").unwrap();
    assert_eq!(session.user.id, user_id);
    assert_eq!(reg.resolve_token(&session.token), Some(user_id));
}

#[test]
fn profile_update_only_touches_provided_fields() {
    let (mut reg, user_id) = registry_with_user("alex@example.com");
    let view = reg
        .update_profile(
            user_id,
            &ProfileUpdate {
                position: Some("Keeper".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(view.profile.position.as_deref(), Some("Keeper"));
    assert_eq!(view.profile.name, "Alex");
    assert!(view.profile.mobile.is_none());
}

#[test]
fn team_creator_is_sole_member_and_admin() {
    let (mut reg, user_id) = registry_with_user("alex@example.com");
    let team = reg.create_team(user_id, "Rovers", None).unwrap();

    assert_eq!(team.members, vec![user_id]);
    assert_eq!(team.admin_ids, vec![user_id]);
    assert_eq!(team.invite_code.len(), 8);
    assert!(team
        .invite_code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
}

#[test]
fn join_by_code_is_case_insensitive_and_single_shot() {
    let (mut reg, owner) = registry_with_user("owner@example.com");
    let joiner = reg.register("j@example.com", "Jo", "1992-03-03").unwrap().user.id;
    let team = reg.create_team(owner, "Rovers", None).unwrap();

    let joined = reg.join_team(joiner, &team.invite_code.to_lowercase()).unwrap();
    assert!(joined.members.contains(&joiner));
    assert!(!joined.admin_ids.contains(&joiner));

    let err = reg.join_team(joiner, &team.invite_code).unwrap_err();
    assert_eq!(err, LeagueError::AlreadyTeamMember);

    let err = reg.join_team(joiner, "NOSUCHCD").unwrap_err();
    assert_eq!(err, LeagueError::TeamNotFound);
}

#[test]
fn removing_a_member_strips_admin_and_captain_roles() {
    let (mut reg, owner) = registry_with_user("owner@example.com");
    let member = reg.register("m@example.com", "Max", "1993-04-04").unwrap().user.id;
    let team = reg.create_team(owner, "Rovers", None).unwrap();

    reg.add_team_member(owner, team.id, member).unwrap();
    reg.toggle_team_admin(owner, team.id, member).unwrap();
    reg.set_team_role(owner, team.id, member, TeamRole::Captain).unwrap();
    reg.set_team_role(owner, team.id, member, TeamRole::ViceCaptain).unwrap();

    let after = reg.remove_team_member(owner, team.id, member).unwrap();
    assert!(!after.members.contains(&member));
    assert!(!after.admin_ids.contains(&member));
    assert_eq!(after.captain_id, None);
    assert_eq!(after.vice_captain_id, None);
}

#[test]
fn admin_toggle_requires_membership_and_round_trips() {
    let (mut reg, owner) = registry_with_user("owner@example.com");
    let outsider = reg.register("o@example.com", "Out", "1994-05-05").unwrap().user.id;
    let team = reg.create_team(owner, "Rovers", None).unwrap();

    let err = reg.toggle_team_admin(owner, team.id, outsider).unwrap_err();
    assert_eq!(err, LeagueError::NotATeamMember);

    reg.add_team_member(owner, team.id, outsider).unwrap();
    let (after, granted) = reg.toggle_team_admin(owner, team.id, outsider).unwrap();
    assert!(granted);
    assert!(after.admin_ids.contains(&outsider));
    let (after, granted) = reg.toggle_team_admin(owner, team.id, outsider).unwrap();
    assert!(!granted);
    assert!(!after.admin_ids.contains(&outsider));
}

#[test]
fn role_assignment_toggles() {
    let (mut reg, owner) = registry_with_user("owner@example.com");
    let team = reg.create_team(owner, "Rovers", None).unwrap();

    let (after, assigned) = reg.set_team_role(owner, team.id, owner, TeamRole::Captain).unwrap();
    assert!(assigned);
    assert_eq!(after.captain_id, Some(owner));

    let (after, assigned) = reg.set_team_role(owner, team.id, owner, TeamRole::Captain).unwrap();
    assert!(!assigned);
    assert_eq!(after.captain_id, None);
}

#[test]
fn non_admin_roster_mutations_are_rejected_and_change_nothing() {
    let (mut reg, owner) = registry_with_user("owner@example.com");
    let member = reg.register("m@example.com", "Max", "1993-04-04").unwrap().user.id;
    let team = reg.create_team(owner, "Rovers", None).unwrap();
    reg.add_team_member(owner, team.id, member).unwrap();
    let before = reg.team_view(team.id).unwrap();

    // A plain member is not an admin.
    assert_eq!(
        reg.add_team_member(member, team.id, member).unwrap_err(),
        LeagueError::NotTeamAdmin
    );
    assert_eq!(
        reg.remove_team_member(member, team.id, owner).unwrap_err(),
        LeagueError::NotTeamAdmin
    );
    assert_eq!(
        reg.set_team_role(member, team.id, member, TeamRole::Captain).unwrap_err(),
        LeagueError::NotTeamAdmin
    );
    assert_eq!(reg.team_view(team.id).unwrap(), before);
}

#[test]
fn tournament_join_validates_code_team_and_duplicates() {
    let (mut reg, owner) = registry_with_user("owner@example.com");
    let tournament = reg.create_tournament(owner, "Spring Cup", None).unwrap();
    assert_eq!(tournament.invite_code.len(), 10);
    let team = reg.create_team(owner, "Rovers", None).unwrap();

    assert_eq!(
        reg.join_tournament(&tournament.invite_code, Uuid::new_v4()).unwrap_err(),
        LeagueError::TeamNotFound
    );
    assert_eq!(
        reg.join_tournament("WRONGCODE1", team.id).unwrap_err(),
        LeagueError::TournamentNotFound
    );

    let joined = reg.join_tournament(&tournament.invite_code, team.id).unwrap();
    assert_eq!(joined, tournament.id);
    assert_eq!(
        reg.join_tournament(&tournament.invite_code, team.id).unwrap_err(),
        LeagueError::TeamAlreadyEntered
    );
}

#[test]
fn teams_enter_by_id_or_invite_code() {
    let (mut reg, owner) = registry_with_user("owner@example.com");
    let tournament = reg.create_tournament(owner, "Spring Cup", None).unwrap();
    let rovers = reg.create_team(owner, "Rovers", None).unwrap();
    let united = reg.create_team(owner, "United", None).unwrap();

    reg.add_tournament_team(owner, tournament.id, &rovers.id.to_string()).unwrap();
    reg.add_tournament_team(owner, tournament.id, &united.invite_code.to_lowercase())
        .unwrap();
    assert_eq!(
        reg.add_tournament_team(owner, tournament.id, &rovers.id.to_string())
            .unwrap_err(),
        LeagueError::TeamAlreadyEntered
    );
    assert_eq!(
        reg.add_tournament_team(owner, tournament.id, "MISSING1").unwrap_err(),
        LeagueError::TeamNotFound
    );

    let view = reg.tournament_view(tournament.id).unwrap();
    assert_eq!(view.teams, vec![rovers.id, united.id]);
}

#[test]
fn only_the_owner_may_run_tournament_commands() {
    let (mut reg, owner) = registry_with_user("owner@example.com");
    let rival = reg.register("r@example.com", "Riv", "1995-06-06").unwrap().user.id;
    let tournament = reg.create_tournament(owner, "Spring Cup", None).unwrap();
    let team = reg.create_team(owner, "Rovers", None).unwrap();
    reg.add_tournament_team(owner, tournament.id, &team.id.to_string()).unwrap();

    assert_eq!(
        reg.schedule_matches(rival, tournament.id).unwrap_err(),
        LeagueError::NotTournamentAdmin
    );
    assert_eq!(
        reg.add_tournament_team(rival, tournament.id, &team.id.to_string())
            .unwrap_err(),
        LeagueError::NotTournamentAdmin
    );
    // Rejected commands leave the aggregate untouched.
    let view = reg.tournament_view(tournament.id).unwrap();
    assert!(view.matches.is_empty());
    assert!(!view.scheduling_done);

    // Unknown tournament reports missing before unauthorized.
    assert_eq!(
        reg.schedule_matches(rival, Uuid::new_v4()).unwrap_err(),
        LeagueError::TournamentNotFound
    );
}

#[test]
fn full_round_robin_and_scoring_flow() {
    let (mut reg, owner) = registry_with_user("owner@example.com");
    let tournament = reg.create_tournament(owner, "Spring Cup", None).unwrap();
    let mut team_ids = Vec::new();
    for name in ["Rovers", "United", "Albion", "County"] {
        let team = reg.create_team(owner, name, None).unwrap();
        reg.add_tournament_team(owner, tournament.id, &team.id.to_string()).unwrap();
        team_ids.push(team.id);
    }

    let count = reg.schedule_matches(owner, tournament.id).unwrap();
    assert_eq!(count, 6);
    let view = reg.tournament_view(tournament.id).unwrap();
    assert!(view.scheduling_done);
    assert_eq!(view.matches[0].team_a_id, team_ids[0]);
    assert_eq!(view.matches[0].team_b_id, team_ids[1]);

    let match_id = view.matches[0].id;
    reg.start_match(owner, tournament.id, match_id).unwrap();
    let m = reg
        .record_goal(
            owner,
            tournament.id,
            match_id,
            GoalEvent {
                scorer_id: Some(owner),
                scorer_name: None,
                assist_id: None,
                assist_name: None,
                minute: 63,
                is_own_goal: false,
                benefiting_team_id: team_ids[0],
            },
        )
        .unwrap();
    assert_eq!(m.score_a, 1);

    let ended = reg.end_match(owner, tournament.id, match_id, None).unwrap();
    assert_eq!(ended.winner_id, Some(team_ids[0]));
}
