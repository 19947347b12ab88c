//! Integration tests for fixture scheduling: round-robin generation and
//! chronological re-ordering.

use league_manager_web::{
    reorder_and_renumber, round_robin_fixtures, schedule_league_fixtures, update_match_details,
    MatchStatus, MatchUpdate, TeamId, Tournament, LEAGUE_STAGE_ROUND,
};
use std::collections::HashSet;
use uuid::Uuid;

fn team_ids(n: usize) -> Vec<TeamId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn league_with_teams(teams: &[TeamId]) -> Tournament {
    let mut t = Tournament::new("Sunday League", None, Uuid::new_v4(), "CODE123456".to_string());
    for &id in teams {
        t.add_team(id).unwrap();
    }
    t
}

#[test]
fn four_teams_produce_six_fixtures_in_pair_order() {
    let teams = team_ids(4);
    let fixtures = round_robin_fixtures(&teams);

    assert_eq!(fixtures.len(), 6);
    let expected_pairs = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
    for (index, (i, j)) in expected_pairs.iter().enumerate() {
        let m = &fixtures[index];
        assert_eq!(m.match_number, (index + 1) as u32);
        assert_eq!(m.team_a_id, teams[*i]);
        assert_eq!(m.team_b_id, teams[*j]);
        assert_eq!(m.round, LEAGUE_STAGE_ROUND);
        assert_eq!(m.status, MatchStatus::Scheduled);
    }
}

#[test]
fn every_unordered_pair_appears_exactly_once() {
    let teams = team_ids(6);
    let fixtures = round_robin_fixtures(&teams);

    assert_eq!(fixtures.len(), 15); // 6 * 5 / 2
    let mut seen = HashSet::new();
    for m in &fixtures {
        assert_ne!(m.team_a_id, m.team_b_id);
        let pair = if m.team_a_id < m.team_b_id {
            (m.team_a_id, m.team_b_id)
        } else {
            (m.team_b_id, m.team_a_id)
        };
        assert!(seen.insert(pair), "pair scheduled twice");
    }
}

#[test]
fn scheduling_is_destructive_and_sets_flag() {
    let teams = team_ids(3);
    let mut t = league_with_teams(&teams);

    schedule_league_fixtures(&mut t);
    assert_eq!(t.matches.len(), 3);
    assert!(t.scheduling_done);

    // Record a score, then reschedule: everything is regenerated from scratch.
    let id = t.matches[0].id;
    t.match_mut(id).unwrap().score_a = 4;
    schedule_league_fixtures(&mut t);
    assert_eq!(t.matches.len(), 3);
    assert!(t.matches.iter().all(|m| m.score_a == 0 && m.score_b == 0));
}

#[test]
fn reorder_is_idempotent() {
    let teams = team_ids(4);
    let mut fixtures = round_robin_fixtures(&teams);
    fixtures[0].date = Some("2025-06-03".to_string());
    fixtures[2].date = Some("2025-06-01".to_string());
    fixtures[4].time = Some("18:30".to_string());

    reorder_and_renumber(&mut fixtures);
    let once = fixtures.clone();
    reorder_and_renumber(&mut fixtures);
    assert_eq!(fixtures, once);
}

#[test]
fn dated_fixtures_sort_before_undated_regardless_of_time() {
    let teams = team_ids(3);
    let mut fixtures = round_robin_fixtures(&teams);
    // Undated match with an early kick-off time must still sort after the
    // dated one.
    fixtures[0].time = Some("08:00".to_string());
    fixtures[2].date = Some("2025-09-20".to_string());

    reorder_and_renumber(&mut fixtures);
    assert_eq!(fixtures[0].date.as_deref(), Some("2025-09-20"));
    assert!(fixtures[1].date.is_none());
    assert!(fixtures[2].date.is_none());
}

#[test]
fn timed_fixtures_sort_before_untimed_within_a_date() {
    let teams = team_ids(3);
    let mut fixtures = round_robin_fixtures(&teams);
    for m in fixtures.iter_mut() {
        m.date = Some("2025-09-20".to_string());
    }
    fixtures[2].time = Some("10:00".to_string());
    fixtures[1].time = Some("14:00".to_string());

    reorder_and_renumber(&mut fixtures);
    assert_eq!(fixtures[0].time.as_deref(), Some("10:00"));
    assert_eq!(fixtures[1].time.as_deref(), Some("14:00"));
    assert!(fixtures[2].time.is_none());
    assert_eq!(
        fixtures.iter().map(|m| m.match_number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn equal_keys_keep_original_match_number_order() {
    let teams = team_ids(4);
    let mut fixtures = round_robin_fixtures(&teams);
    let original: Vec<_> = fixtures.iter().map(|m| m.id).collect();

    // No dates or times anywhere: the reorder must be a no-op.
    reorder_and_renumber(&mut fixtures);
    let after: Vec<_> = fixtures.iter().map(|m| m.id).collect();
    assert_eq!(after, original);
}

#[test]
fn date_edit_resorts_the_whole_schedule() {
    let teams = team_ids(4);
    let mut t = league_with_teams(&teams);
    schedule_league_fixtures(&mut t);
    assert_eq!(t.matches.len(), 6);

    // Date the first five matches in June; the sixth stays undated and last.
    for (index, day) in ["01", "02", "03", "04", "05"].iter().enumerate() {
        let id = t.matches[index].id;
        update_match_details(
            &mut t,
            id,
            MatchUpdate {
                date: Some(format!("2025-06-{day}")),
                ..MatchUpdate::default()
            },
        )
        .unwrap();
    }
    let last = t.matches.last().unwrap();
    assert!(last.date.is_none());
    assert_eq!(last.match_number, 6);
    let last_id = last.id;

    // The undated straggler acquires the earliest date and must become
    // match 1, shifting every other match up by one.
    update_match_details(
        &mut t,
        last_id,
        MatchUpdate {
            date: Some("2025-05-01".to_string()),
            ..MatchUpdate::default()
        },
    )
    .unwrap();

    assert_eq!(t.matches[0].id, last_id);
    assert_eq!(t.matches[0].match_number, 1);
    assert_eq!(
        t.matches.iter().map(|m| m.match_number).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5, 6]
    );
    assert_eq!(t.matches[1].date.as_deref(), Some("2025-06-01"));
}

#[test]
fn empty_date_string_clears_the_field() {
    let teams = team_ids(2);
    let mut t = league_with_teams(&teams);
    schedule_league_fixtures(&mut t);
    let id = t.matches[0].id;

    update_match_details(
        &mut t,
        id,
        MatchUpdate {
            date: Some("2025-06-01".to_string()),
            time: Some("12:00".to_string()),
            ..MatchUpdate::default()
        },
    )
    .unwrap();
    assert_eq!(t.match_ref(id).unwrap().date.as_deref(), Some("2025-06-01"));

    update_match_details(
        &mut t,
        id,
        MatchUpdate {
            date: Some(String::new()),
            ..MatchUpdate::default()
        },
    )
    .unwrap();
    let m = t.match_ref(id).unwrap();
    assert!(m.date.is_none());
    // Time was not part of the second edit and is untouched.
    assert_eq!(m.time.as_deref(), Some("12:00"));
}
