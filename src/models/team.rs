//! Team rosters: membership, admins, and captain roles.

use crate::error::LeagueError;
use crate::models::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// Assignable roster roles. Admin status is tracked separately in `admin_ids`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TeamRole {
    Captain,
    ViceCaptain,
}

/// A team: members, admins (a subset of members), optional captain and
/// vice-captain (members as well), and a shared invite code.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub logo_url: Option<String>,
    pub admin_ids: Vec<UserId>,
    pub captain_id: Option<UserId>,
    pub vice_captain_id: Option<UserId>,
    pub members: Vec<UserId>,
    pub invite_code: String,
}

impl Team {
    /// Create a team; the creator starts as its only member and admin.
    pub fn new(
        name: impl Into<String>,
        logo_url: Option<String>,
        creator: UserId,
        invite_code: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            logo_url,
            admin_ids: vec![creator],
            captain_id: None,
            vice_captain_id: None,
            members: vec![creator],
            invite_code,
        }
    }

    pub fn is_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }

    pub fn is_admin(&self, user: UserId) -> bool {
        self.admin_ids.contains(&user)
    }

    /// Add a user to the roster.
    pub fn add_member(&mut self, user: UserId) -> Result<(), LeagueError> {
        if self.is_member(user) {
            return Err(LeagueError::AlreadyTeamMember);
        }
        self.members.push(user);
        Ok(())
    }

    /// Remove a user from the roster, stripping admin status and any captain
    /// role in the same mutation. Removing a non-member is a no-op.
    pub fn remove_member(&mut self, user: UserId) {
        self.members.retain(|id| *id != user);
        self.admin_ids.retain(|id| *id != user);
        if self.captain_id == Some(user) {
            self.captain_id = None;
        }
        if self.vice_captain_id == Some(user) {
            self.vice_captain_id = None;
        }
    }

    /// Toggle a member's admin status. Returns true when admin was granted,
    /// false when it was removed. The target must be a current member.
    pub fn toggle_admin(&mut self, member: UserId) -> Result<bool, LeagueError> {
        if !self.is_member(member) {
            return Err(LeagueError::NotATeamMember);
        }
        if let Some(pos) = self.admin_ids.iter().position(|id| *id == member) {
            self.admin_ids.remove(pos);
            Ok(false)
        } else {
            self.admin_ids.push(member);
            Ok(true)
        }
    }

    /// Toggle a roster role: assigning the current holder clears the role,
    /// anyone else takes it over. The target must be a current member.
    /// Returns true when the role was set, false when it was cleared.
    pub fn set_role(&mut self, member: UserId, role: TeamRole) -> Result<bool, LeagueError> {
        if !self.is_member(member) {
            return Err(LeagueError::NotATeamMember);
        }
        let slot = match role {
            TeamRole::Captain => &mut self.captain_id,
            TeamRole::ViceCaptain => &mut self.vice_captain_id,
        };
        if *slot == Some(member) {
            *slot = None;
            Ok(false)
        } else {
            *slot = Some(member);
            Ok(true)
        }
    }
}
