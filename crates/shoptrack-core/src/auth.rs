//! # Roles & Authorization
//!
//! Role claims and the capability checks run at the top of every shop
//! operation.
//!
//! The core never authenticates beyond a username/password match against
//! the persisted accounts; everything else is authorization against the
//! role claim carried by an explicit [`Actor`] parameter. There is no
//! global "active session" — whoever calls, passes who they are.

use serde::{Deserialize, Serialize};

// =============================================================================
// Role
// =============================================================================

/// The two roles in this shop.
///
/// A tagged variant rather than a type hierarchy: no behavior differs by
/// role beyond what [`Role::allows`] answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Till staff: records sales, views stock.
    Staff,
    /// Shop manager: everything staff can do, plus purchasing,
    /// inventory management and reporting.
    Manager,
}

impl Role {
    /// Human-readable role label for error messages and logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Manager => "manager",
        }
    }

    /// Checks whether this role is permitted the given capability.
    pub const fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::RecordSale => true,
            Capability::RecordPurchase
            | Capability::ManageInventory
            | Capability::GenerateReports => matches!(self, Role::Manager),
        }
    }
}

// =============================================================================
// Capability
// =============================================================================

/// Operations gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Commit a multi-line sale.
    RecordSale,
    /// Record a supplier purchase.
    RecordPurchase,
    /// Add, update or remove products.
    ManageInventory,
    /// Generate P&L and best-seller reports.
    GenerateReports,
}

impl Capability {
    /// The least-privileged role that is granted this capability.
    /// Used to phrase access-denied errors.
    pub const fn minimum_role(&self) -> Role {
        match self {
            Capability::RecordSale => Role::Staff,
            Capability::RecordPurchase
            | Capability::ManageInventory
            | Capability::GenerateReports => Role::Manager,
        }
    }
}

// =============================================================================
// Actor
// =============================================================================

/// The opaque role claim threaded through every core call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub username: String,
    pub role: Role,
}

impl Actor {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Actor {
            username: username.into(),
            role,
        }
    }
}

// =============================================================================
// User Accounts
// =============================================================================

/// A persisted login account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    /// Stored in the clear for this offline single-shop tool.
    pub password: String,
    pub role: Role,
}

/// Resolves a username/password pair against the account list.
///
/// Returns the matching actor, or `None` on unknown user or wrong password
/// (indistinguishable on purpose).
pub fn authenticate(accounts: &[UserAccount], username: &str, password: &str) -> Option<Actor> {
    accounts
        .iter()
        .find(|a| a.username == username && a.password == password)
        .map(|a| Actor::new(a.username.clone(), a.role))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_capabilities() {
        assert!(Role::Staff.allows(Capability::RecordSale));

        assert!(!Role::Staff.allows(Capability::RecordPurchase));
        assert!(!Role::Staff.allows(Capability::ManageInventory));
        assert!(!Role::Staff.allows(Capability::GenerateReports));
    }

    #[test]
    fn test_manager_allows_everything() {
        for cap in [
            Capability::RecordSale,
            Capability::RecordPurchase,
            Capability::ManageInventory,
            Capability::GenerateReports,
        ] {
            assert!(Role::Manager.allows(cap));
        }
    }

    #[test]
    fn test_minimum_roles() {
        assert_eq!(Capability::RecordSale.minimum_role(), Role::Staff);
        assert_eq!(Capability::GenerateReports.minimum_role(), Role::Manager);
    }

    #[test]
    fn test_authenticate() {
        let accounts = vec![
            UserAccount {
                username: "amira".to_string(),
                password: "till123".to_string(),
                role: Role::Staff,
            },
            UserAccount {
                username: "omar".to_string(),
                password: "keys456".to_string(),
                role: Role::Manager,
            },
        ];

        let actor = authenticate(&accounts, "omar", "keys456").unwrap();
        assert_eq!(actor.role, Role::Manager);

        assert!(authenticate(&accounts, "omar", "wrong").is_none());
        assert!(authenticate(&accounts, "nobody", "keys456").is_none());
    }
}
