use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    constants::{PermissionEntity, PosState},
    parsing::EntityRef,
};

/// Standing of the corporation towards one NPC entity.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub id: i64,
    pub name: String,
    pub standing: f64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NpcStandings {
    pub agents: HashMap<i64, Standing>,
    /// NPC corporations.
    pub corps: HashMap<i64, Standing>,
    pub factions: HashMap<i64, Standing>,
}

/// One of the corporation's wallet divisions.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wallet {
    pub balance: f64,
    pub id: i64,
    /// Division key, 1000 to 1006.
    pub key: i64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarfareTally {
    pub yesterday: i64,
    pub week: i64,
    pub total: i64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactionWarfareStats {
    pub faction: EntityRef,
    /// When the corporation enlisted.
    pub start_ts: DateTime<Utc>,
    pub pilots: i64,
    pub kills: WarfareTally,
    pub points: WarfareTally,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterShareholder {
    pub id: i64,
    pub name: String,
    /// The corporation the character belongs to.
    pub corp: EntityRef,
    pub shares: i64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpShareholder {
    pub id: i64,
    pub name: String,
    pub shares: i64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Shareholders {
    pub char: HashMap<i64, CharacterShareholder>,
    pub corp: HashMap<i64, CorpShareholder>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A value per location scope a corporation role can apply to.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleScopes<T> {
    pub global: T,
    pub at_hq: T,
    pub at_base: T,
    pub at_other: T,
}

impl<T> RoleScopes<T> {
    /// Apply a fallible function to every scope, stopping at the first error.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<RoleScopes<U>, E> {
        Ok(RoleScopes {
            global: f(self.global)?,
            at_hq: f(self.at_hq)?,
            at_base: f(self.at_base)?,
            at_other: f(self.at_other)?,
        })
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub id: i64,
    pub name: String,
    /// Roles held by members with this title, keyed by role id.
    pub roles: RoleScopes<HashMap<i64, Role>>,
    /// Roles members with this title may grant to others, keyed by role id.
    pub can_grant: RoleScopes<HashMap<i64, Role>>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Starbase {
    pub id: i64,
    pub type_id: i64,
    /// Solar system id.
    pub location_id: i64,
    pub moon_id: i64,
    pub state: PosState,
    pub state_ts: Option<DateTime<Utc>>,
    pub online_ts: Option<DateTime<Utc>>,
    pub standings_owner_id: i64,
}

/// Who may view and take from the fuel bay.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FuelBayPermissions {
    pub view: PermissionEntity,
    pub take: PermissionEntity,
}

/// Who may anchor, unanchor, online and offline structures.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeployPermissions {
    pub anchor: PermissionEntity,
    pub unanchor: PermissionEntity,
    pub online: PermissionEntity,
    pub offline: PermissionEntity,
}

/// Who may pass through the force field.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForcefieldPermissions {
    pub corp: bool,
    pub alliance: bool,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StarbasePermissions {
    pub fuel: FuelBayPermissions,
    pub deploy: DeployPermissions,
    pub forcefield: ForcefieldPermissions,
}

/// A hostility trigger with a threshold (standing or security status).
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdSetting {
    pub threshold: f64,
    pub enabled: bool,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToggleSetting {
    pub enabled: bool,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hostility {
    pub standing: ThresholdSetting,
    pub sec_status: ThresholdSetting,
    pub aggression: ToggleSetting,
    pub war: ToggleSetting,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombatSettings {
    pub standings_owner_id: i64,
    pub hostility: Hostility,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarbaseDetails {
    pub state: PosState,
    pub state_ts: Option<DateTime<Utc>>,
    pub online_ts: Option<DateTime<Utc>>,
    pub permissions: StarbasePermissions,
    pub combat: CombatSettings,
    /// Fuel bay contents: quantity keyed by type id.
    pub fuel: HashMap<i64, i64>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipType {
    /// `None` when the member's ship is not available.
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Member tracking data only returned by extended queries.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberActivity {
    pub logon_ts: Option<DateTime<Utc>>,
    pub logoff_ts: Option<DateTime<Utc>>,
    pub location: EntityRef,
    pub ship_type: ShipType,
    /// Role bitmask.
    pub roles: i64,
    /// Grantable role bitmask.
    pub can_grant: i64,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub join_ts: DateTime<Utc>,
    pub base: EntityRef,
    /// Does not include role titles, only ones like "CEO".
    pub title: String,
    #[serde(flatten)]
    pub extended: Option<MemberActivity>,
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reprocessing {
    pub efficiency: f64,
    /// Fraction of the output the station keeps.
    pub cut: f64,
}

/// A player-owned outpost.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub system_id: i64,
    pub docking_fee_per_volume: f64,
    pub office_fee: i64,
    pub type_id: i64,
    pub reprocessing: Reprocessing,
    pub standing_owner_id: i64,
}
