//! The closed set of account roles and their capabilities.
//!
//! A profile's role is fixed at signup and stored as one of the
//! well-known strings below (CHECK-constrained in the `profiles` table).
//! Handlers never branch on raw role strings; they parse into [`Role`]
//! at the authentication boundary and use the capability predicates.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_TENANT: &str = "tenant";
pub const ROLE_AGENT: &str = "agent";
pub const ROLE_LANDLORD: &str = "landlord";

/// All valid role strings, in seed order.
pub const VALID_ROLES: &[&str] = &[ROLE_TENANT, ROLE_AGENT, ROLE_LANDLORD];

/// Account role, fixed per profile at signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tenant,
    Agent,
    Landlord,
}

impl Role {
    /// The database/API string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Tenant => ROLE_TENANT,
            Role::Agent => ROLE_AGENT,
            Role::Landlord => ROLE_LANDLORD,
        }
    }

    /// Parse a role string. Unknown strings are a validation error, not
    /// a fall-through branch.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            ROLE_TENANT => Ok(Role::Tenant),
            ROLE_AGENT => Ok(Role::Agent),
            ROLE_LANDLORD => Ok(Role::Landlord),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }

    /// Tenants open maintenance requests against their leased property.
    pub fn can_submit_requests(self) -> bool {
        self == Role::Tenant
    }

    /// Agents run the operational side: properties, tenancy, the worker
    /// roster, assignment, and completion.
    pub fn can_manage_operations(self) -> bool {
        self == Role::Agent
    }

    /// Landlords approve or deny spend on their own properties.
    pub fn can_decide_spend(self) -> bool {
        self == Role::Landlord
    }

    /// Tenants and landlords rate workers; agents do not.
    pub fn can_rate_workers(self) -> bool {
        matches!(self, Role::Tenant | Role::Landlord)
    }

    /// Agents and landlords may register properties.
    pub fn can_create_properties(self) -> bool {
        matches!(self, Role::Agent | Role::Landlord)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_all_roles() {
        for &name in VALID_ROLES {
            let role = Role::parse(name).expect("valid role should parse");
            assert_eq!(role.as_str(), name);
        }
    }

    #[test]
    fn parse_rejects_unknown_role() {
        let err = Role::parse("admin").unwrap_err();
        assert!(err.to_string().contains("Invalid role"));
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(Role::parse("Tenant").is_err());
    }

    #[test]
    fn rating_capability_excludes_agents() {
        assert!(Role::Tenant.can_rate_workers());
        assert!(Role::Landlord.can_rate_workers());
        assert!(!Role::Agent.can_rate_workers());
    }

    #[test]
    fn only_tenants_submit_requests() {
        assert!(Role::Tenant.can_submit_requests());
        assert!(!Role::Agent.can_submit_requests());
        assert!(!Role::Landlord.can_submit_requests());
    }
}
