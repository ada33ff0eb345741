//! Admission decisions for navigation between views.

use crate::{dto::auth::Identity, state::SharedSession};

/// Window title prefix shared by every view.
const DEFAULT_TITLE: &str = "Reaction";

/// Views the application can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The playfield. Open to everyone.
    Game,
    /// Per-user statistics and recent activity.
    Profile,
    /// Login form.
    Login,
    /// Registration form.
    Register,
}

impl Route {
    /// True when the view shows per-user data and needs a session.
    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Profile)
    }

    /// True for views that only make sense without a session.
    pub fn auth_only(self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }

    /// Path of the view.
    pub fn path(self) -> &'static str {
        match self {
            Route::Game => "/game",
            Route::Profile => "/profile",
            Route::Login => "/login",
            Route::Register => "/register",
        }
    }

    /// Title shown for the view when no user is signed in.
    pub fn title(self) -> &'static str {
        match self {
            Route::Game => "Play!",
            Route::Profile => "Profile",
            Route::Login => "Login",
            Route::Register => "Register",
        }
    }
}

/// Outcome of an admission decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Navigate to the requested view.
    Admit,
    /// Navigate somewhere else instead.
    RedirectTo(Route),
}

/// Pure admission decision over the target view and the session state.
pub fn admit(target: Route, authenticated: bool) -> Admission {
    if target.requires_auth() && !authenticated {
        return Admission::RedirectTo(Route::Login);
    }
    if target.auth_only() && authenticated {
        return Admission::RedirectTo(Route::Profile);
    }
    Admission::Admit
}

/// Compose the window title for a view.
pub fn page_title(target: Route, identity: Option<&Identity>) -> String {
    match identity {
        Some(user) => format!("{DEFAULT_TITLE} | {}", user.username),
        None => format!("{DEFAULT_TITLE} | {}", target.title()),
    }
}

/// Gatekeeper run before each navigation.
///
/// Holds no state of its own; it only reads the session store.
pub struct NavigationGuard {
    session: SharedSession,
}

impl NavigationGuard {
    /// Build a guard over the shared session store.
    pub fn new(session: SharedSession) -> Self {
        Self { session }
    }

    /// Decide whether the navigation may proceed.
    ///
    /// When the advisory "previously authorized" hint is set, the session is
    /// re-checked first and the decision waits for the fresh state; deciding
    /// on stale state would flash the wrong view before redirecting.
    pub async fn before_navigate(&self, target: Route) -> Admission {
        if self.session.previously_authorized() {
            self.session.initialize_session().await;
        }
        admit(target, self.session.is_authenticated().await)
    }

    /// Window title for the target view under the current session.
    pub async fn title_for(&self, target: Route) -> String {
        page_title(target, self.session.identity().await.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, atomic::Ordering};

    use crate::{
        api::stub::StubRemote,
        dto::auth::{SessionProbe, UserId},
        settings::SettingsCache,
        state::SessionStore,
    };

    use super::*;

    fn guard_with(remote: StubRemote, hint: bool) -> (NavigationGuard, Arc<StubRemote>) {
        let remote = Arc::new(remote);
        let settings = SettingsCache::new(remote.clone());
        let session = SessionStore::new(remote.clone(), settings, hint);
        (NavigationGuard::new(session), remote)
    }

    fn ada() -> Identity {
        Identity {
            id: UserId::new("u-1"),
            username: "ada".into(),
        }
    }

    fn live_probe() -> SessionProbe {
        SessionProbe {
            authenticated: true,
            user: Some(ada()),
            ..SessionProbe::default()
        }
    }

    #[test]
    fn protected_views_redirect_to_login_without_a_session() {
        assert_eq!(admit(Route::Profile, false), Admission::RedirectTo(Route::Login));
        assert_eq!(admit(Route::Profile, true), Admission::Admit);
    }

    #[test]
    fn auth_only_views_redirect_signed_in_users_to_the_profile() {
        assert_eq!(admit(Route::Login, true), Admission::RedirectTo(Route::Profile));
        assert_eq!(admit(Route::Register, true), Admission::RedirectTo(Route::Profile));
        assert_eq!(admit(Route::Login, false), Admission::Admit);
        assert_eq!(admit(Route::Register, false), Admission::Admit);
    }

    #[test]
    fn public_views_are_always_admitted() {
        assert_eq!(admit(Route::Game, false), Admission::Admit);
        assert_eq!(admit(Route::Game, true), Admission::Admit);
    }

    #[test]
    fn titles_prefer_the_signed_in_username() {
        assert_eq!(page_title(Route::Game, None), "Reaction | Play!");
        assert_eq!(page_title(Route::Game, Some(&ada())), "Reaction | ada");
    }

    #[tokio::test]
    async fn hint_triggers_a_session_check_before_the_decision() {
        let (guard, remote) = guard_with(
            StubRemote {
                check_reply: Ok(live_probe()),
                ..StubRemote::default()
            },
            true,
        );

        let admission = guard.before_navigate(Route::Login).await;

        // the fresh check ran first, so the decision sees the live session
        assert_eq!(remote.calls.check.load(Ordering::SeqCst), 1);
        assert_eq!(admission, Admission::RedirectTo(Route::Profile));
    }

    #[tokio::test]
    async fn no_hint_means_no_session_check() {
        let (guard, remote) = guard_with(StubRemote::default(), false);

        let admission = guard.before_navigate(Route::Profile).await;

        assert_eq!(remote.calls.check.load(Ordering::SeqCst), 0);
        assert_eq!(admission, Admission::RedirectTo(Route::Login));
    }

    #[tokio::test]
    async fn expired_hint_falls_back_to_the_login_redirect() {
        // authority reports no valid session; the stale hint must not admit
        let (guard, remote) = guard_with(StubRemote::default(), true);

        let admission = guard.before_navigate(Route::Profile).await;

        assert_eq!(remote.calls.check.load(Ordering::SeqCst), 1);
        assert_eq!(admission, Admission::RedirectTo(Route::Login));
    }
}
