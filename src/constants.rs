//! Lookup tables for numeric codes returned by the API.
use derive_more::Display;
use serde::Serialize;

use crate::{corp::RoleScopes, Error, Result};

fn lookup<T: Copy>(kind: &'static str, table: &[T], code: i64) -> Result<T> {
    usize::try_from(code)
        .ok()
        .and_then(|index| table.get(index))
        .copied()
        .ok_or(Error::UnknownEnumValue { kind, value: code })
}

/// State of a starbase (POS).
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PosState {
    #[display(fmt = "unanchored")]
    Unanchored,
    #[display(fmt = "anchored")]
    Anchored,
    #[display(fmt = "onlining")]
    Onlining,
    #[display(fmt = "reinforced")]
    Reinforced,
    #[display(fmt = "online")]
    Online,
}

impl PosState {
    const TABLE: [PosState; 5] = [
        Self::Unanchored,
        Self::Anchored,
        Self::Onlining,
        Self::Reinforced,
        Self::Online,
    ];

    /// Look up the state for a numeric API code.
    pub fn from_code(code: i64) -> Result<Self> {
        lookup("starbase state", &Self::TABLE, code)
    }
}

/// Group of characters a starbase permission is granted to.
///
/// Encoded in two bits inside the `usageFlags` and `deployFlags` bit-fields.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
pub enum PermissionEntity {
    #[display(fmt = "Starbase Config")]
    #[serde(rename = "Starbase Config")]
    StarbaseConfig,
    #[display(fmt = "Starbase Fuel Tech")]
    #[serde(rename = "Starbase Fuel Tech")]
    StarbaseFuelTech,
    #[display(fmt = "Corporation Members")]
    #[serde(rename = "Corporation Members")]
    CorporationMembers,
    #[display(fmt = "Alliance Members")]
    #[serde(rename = "Alliance Members")]
    AllianceMembers,
}

impl PermissionEntity {
    const TABLE: [PermissionEntity; 4] = [
        Self::StarbaseConfig,
        Self::StarbaseFuelTech,
        Self::CorporationMembers,
        Self::AllianceMembers,
    ];

    /// Decode the two-bit subfield of `flags` starting at bit `shift`.
    pub fn from_flags(flags: i64, shift: u32) -> Result<Self> {
        lookup("permission entity", &Self::TABLE, (flags >> shift).rem_euclid(4))
    }
}

/// State of a market order.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[display(fmt = "active")]
    Active,
    #[display(fmt = "closed")]
    Closed,
    #[display(fmt = "expired")]
    Expired,
    #[display(fmt = "cancelled")]
    Cancelled,
    #[display(fmt = "pending")]
    Pending,
    #[display(fmt = "deleted")]
    Deleted,
}

impl OrderStatus {
    const TABLE: [OrderStatus; 6] = [
        Self::Active,
        Self::Closed,
        Self::Expired,
        Self::Cancelled,
        Self::Pending,
        Self::Deleted,
    ];

    /// Look up the status for a numeric API code.
    pub fn from_code(code: i64) -> Result<Self> {
        lookup("order status", &Self::TABLE, code)
    }
}

/// Completion status of an industry job.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobStatus {
    #[display(fmt = "failed")]
    Failed,
    #[display(fmt = "delivered")]
    Delivered,
    #[display(fmt = "aborted")]
    Aborted,
    #[display(fmt = "gm-aborted")]
    GmAborted,
    #[display(fmt = "inflight-unanchored")]
    InflightUnanchored,
    #[display(fmt = "destroyed")]
    Destroyed,
}

impl JobStatus {
    const TABLE: [JobStatus; 6] = [
        Self::Failed,
        Self::Delivered,
        Self::Aborted,
        Self::GmAborted,
        Self::InflightUnanchored,
        Self::Destroyed,
    ];

    /// Look up the status for a numeric API code.
    pub fn from_code(code: i64) -> Result<Self> {
        lookup("industry job status", &Self::TABLE, code)
    }
}

/// Rowsets holding the roles a title grants, per location scope.
pub const ROLE_ROWSETS: RoleScopes<&str> = RoleScopes {
    global: "roles",
    at_hq: "rolesAtHQ",
    at_base: "rolesAtBase",
    at_other: "rolesAtOther",
};

/// Rowsets holding the roles a title may grant to others, per location scope.
pub const GRANTABLE_ROWSETS: RoleScopes<&str> = RoleScopes {
    global: "grantableRoles",
    at_hq: "grantableRolesAtHQ",
    at_base: "grantableRolesAtBase",
    at_other: "grantableRolesAtOther",
};

#[cfg(test)]
mod tests {
    use crate::Error;

    use super::{JobStatus, OrderStatus, PermissionEntity, PosState};

    #[test]
    fn looks_up_codes() {
        assert_eq!(PosState::from_code(0).unwrap(), PosState::Unanchored);
        assert_eq!(PosState::from_code(4).unwrap(), PosState::Online);
        assert_eq!(OrderStatus::from_code(3).unwrap(), OrderStatus::Cancelled);
        assert_eq!(JobStatus::from_code(3).unwrap(), JobStatus::GmAborted);
    }

    #[test]
    fn rejects_unknown_codes() {
        assert!(matches!(
            PosState::from_code(5),
            Err(Error::UnknownEnumValue { value: 5, .. })
        ));
        assert!(matches!(
            OrderStatus::from_code(-1),
            Err(Error::UnknownEnumValue { value: -1, .. })
        ));
    }

    #[test]
    fn displays_api_names() {
        assert_eq!(PosState::Reinforced.to_string(), "reinforced");
        assert_eq!(JobStatus::InflightUnanchored.to_string(), "inflight-unanchored");
        assert_eq!(
            PermissionEntity::StarbaseFuelTech.to_string(),
            "Starbase Fuel Tech"
        );
    }

    #[test]
    fn decodes_two_bit_subfields() {
        // 0b10_01_11_00
        let flags = 0b1001_1100;
        assert_eq!(
            PermissionEntity::from_flags(flags, 6).unwrap(),
            PermissionEntity::CorporationMembers
        );
        assert_eq!(
            PermissionEntity::from_flags(flags, 4).unwrap(),
            PermissionEntity::StarbaseFuelTech
        );
        assert_eq!(
            PermissionEntity::from_flags(flags, 2).unwrap(),
            PermissionEntity::AllianceMembers
        );
        assert_eq!(
            PermissionEntity::from_flags(flags, 0).unwrap(),
            PermissionEntity::StarbaseConfig
        );
    }
    #[test]
    fn negative_flags_wrap_into_table() {
        assert_eq!(
            PermissionEntity::from_flags(-1, 0).unwrap(),
            PermissionEntity::AllianceMembers
        );
        // -8 >> 2 == -2
        assert_eq!(
            PermissionEntity::from_flags(-8, 2).unwrap(),
            PermissionEntity::CorporationMembers
        );
    }
}
