//! Well-known role name constants.
//!
//! Role names arrive in the `role` claim of access tokens issued by the
//! identity service.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEMBER: &str = "member";

/// Returns `true` when `role` carries the administrative capability that
/// lets an actor review applications on projects they do not own.
pub fn is_admin(role: &str) -> bool {
    role == ROLE_ADMIN
}
