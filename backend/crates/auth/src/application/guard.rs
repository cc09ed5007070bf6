//! Access Guard
//!
//! Route-level policy as plain decisions. The presentation layer turns a
//! [`GuardDecision`] into a redirect or an Unauthorized response.

use crate::domain::entity::identity::Identity;

/// How a route reacts to an anonymous caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Rendered pages: redirect to the login page
    Page,
    /// State-changing endpoints (like, follow, delete): answer Unauthorized
    Action,
}

/// Outcome of a policy check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Pass,
    RedirectToLogin,
    RedirectHome,
    Deny { not_logged_in: bool },
}

/// Authentication requirement
pub fn require_login(identity: &Identity, class: RouteClass) -> GuardDecision {
    if !identity.is_anonymous() && identity.is_authenticated() {
        return GuardDecision::Pass;
    }
    match class {
        RouteClass::Page => GuardDecision::RedirectToLogin,
        RouteClass::Action => GuardDecision::Deny {
            not_logged_in: true,
        },
    }
}

/// Admin requirement
///
/// Anonymous and non-admin callers converge on the same denial, told apart
/// only by `not_logged_in`.
pub fn require_admin(identity: &Identity) -> GuardDecision {
    if identity.is_authenticated() && identity.is_admin() {
        GuardDecision::Pass
    } else {
        GuardDecision::Deny {
            not_logged_in: !identity.is_authenticated(),
        }
    }
}

/// Login and signup forms are unreachable while logged in
pub fn require_anonymous(identity: &Identity) -> GuardDecision {
    if identity.is_authenticated() {
        GuardDecision::RedirectHome
    } else {
        GuardDecision::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::identity::UserRecord;
    use kernel::id::UserId;

    fn user(is_admin: bool) -> Identity {
        Identity::User(UserRecord::new(UserId::from(3), "Bob", is_admin).authenticated())
    }

    #[test]
    fn test_anonymous_page_redirects_action_denies() {
        let anonymous = Identity::Anonymous;
        assert_eq!(
            require_login(&anonymous, RouteClass::Page),
            GuardDecision::RedirectToLogin
        );
        assert_eq!(
            require_login(&anonymous, RouteClass::Action),
            GuardDecision::Deny {
                not_logged_in: true
            }
        );
    }

    #[test]
    fn test_authenticated_passes_both_classes() {
        let identity = user(false);
        assert_eq!(require_login(&identity, RouteClass::Page), GuardDecision::Pass);
        assert_eq!(
            require_login(&identity, RouteClass::Action),
            GuardDecision::Pass
        );
    }

    #[test]
    fn test_unregistered_record_is_not_logged_in() {
        let identity = Identity::User(UserRecord::new(UserId::from(3), "Bob", true));
        assert_eq!(
            require_login(&identity, RouteClass::Page),
            GuardDecision::RedirectToLogin
        );
        assert_eq!(
            require_admin(&identity),
            GuardDecision::Deny {
                not_logged_in: true
            }
        );
    }

    #[test]
    fn test_admin_denials_converge() {
        assert_eq!(
            require_admin(&Identity::Anonymous),
            GuardDecision::Deny {
                not_logged_in: true
            }
        );
        assert_eq!(
            require_admin(&user(false)),
            GuardDecision::Deny {
                not_logged_in: false
            }
        );
        assert_eq!(require_admin(&user(true)), GuardDecision::Pass);
    }

    #[test]
    fn test_forms_redirect_logged_in_callers_home() {
        assert_eq!(require_anonymous(&user(false)), GuardDecision::RedirectHome);
        assert_eq!(require_anonymous(&Identity::Anonymous), GuardDecision::Pass);
    }
}
