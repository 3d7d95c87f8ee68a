use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, error, info, warn};

use super::state::SessionPhase;
use super::store::SessionStore;
use crate::api::{AccountApi, BearerToken, LoginRequest, User};
use crate::constants::{ROUTE_HOME, ROUTE_LOGIN};
use crate::routing::Router;
use crate::signals::{LoadingSignal, Notifier};
use crate::utils::StackError;

const RESTORE_PROGRESS_TITLE: &str = "Restoring session";
const LOGIN_PROGRESS_TITLE: &str = "Logging in";
/// Read the stored user, then validate it with the server
const RESTORE_STEPS: u64 = 2;

#[derive(Default)]
struct AccountState {
    phase: SessionPhase,
    user: Option<User>,
    initialized: bool,
}

/// Single source of truth for who is logged in.
///
/// Keeps the in-memory user, the persisted copy, the client's bearer header
/// and the router's view of the user in step.
pub struct Account {
    api: Arc<dyn AccountApi>,
    bearer: BearerToken,
    store: SessionStore,
    router: Arc<Router>,
    notifier: Arc<Notifier>,
    loading: Arc<LoadingSignal>,
    state: RwLock<AccountState>,
    login_gate: AsyncMutex<()>,
}

impl Account {
    pub fn new(
        api: Arc<dyn AccountApi>,
        bearer: BearerToken,
        store: SessionStore,
        router: Arc<Router>,
        notifier: Arc<Notifier>,
        loading: Arc<LoadingSignal>,
    ) -> Self {
        Self {
            api,
            bearer,
            store,
            router,
            notifier,
            loading,
            state: RwLock::new(AccountState::default()),
            login_gate: AsyncMutex::new(()),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.read().phase
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().initialized
    }

    /// Restore the persisted session and validate it against the server.
    ///
    /// Failures are silent and leave the session logged out. Runs once; later
    /// calls return the current phase.
    pub async fn restore(&self) -> SessionPhase {
        {
            let mut state = self.state.write();
            if state.initialized || state.phase == SessionPhase::Initializing {
                return state.phase;
            }
            state.phase = SessionPhase::Initializing;
        }

        self.loading.set_progress(RESTORE_PROGRESS_TITLE, RESTORE_STEPS, 0);
        match self.store.load() {
            None => {
                debug!("no stored session");
                self.clear_user();
            }
            Some(user) => {
                self.loading
                    .set_progress(RESTORE_PROGRESS_TITLE, RESTORE_STEPS, 1);
                self.validate_stored(user).await;
            }
        }

        self.loading.set_progress("", 0, 0);
        self.loading.set_loading(false);
        let mut state = self.state.write();
        state.initialized = true;
        state.phase
    }

    async fn validate_stored(&self, user: User) {
        match self.api.user_status(&user.token).await {
            Ok(_) => {
                info!(email = %user.email, "restored stored session");
                self.handle_user_loaded(user);
            }
            Err(e) => {
                warn!(error = %e.user_message(), "stored session rejected");
                self.clear_user();
            }
        }
    }

    /// Log in: authenticate, validate the new token, then adopt the session.
    ///
    /// Failures are surfaced through the notifier and also returned. Only one
    /// login may be in flight; a concurrent call is rejected untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, StackError> {
        let Ok(_gate) = self.login_gate.try_lock() else {
            warn!(email, "login already in progress");
            return Err(StackError::LoginInProgress);
        };

        self.loading.set_progress(LOGIN_PROGRESS_TITLE, 0, 0);
        self.loading.set_loading(true);
        let outcome = match self.authenticate(email, password).await {
            Ok(user) => {
                info!(email, user_id = %user.user_id, "user logged in");
                self.handle_user_loaded(user.clone());
                self.notifier.success(format!("Logged in as {}", email));
                Ok(user)
            }
            Err(e) => {
                let message = e.user_message();
                error!(email, error = %message, "login failed");
                self.notifier.error(message);
                self.clear_user();
                Err(e)
            }
        };
        self.loading.set_loading(false);
        self.loading.set_progress("", 0, 0);
        outcome
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, StackError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let login = self.api.login(&request).await?;
        let status = self.api.user_status(&login.token).await?;

        Ok(User {
            user_id: status.user_id,
            email: email.to_string(),
            token: login.token,
        })
    }

    /// Log out locally, telling the server on a best-effort basis
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            debug!(error = %e, "logout request failed, ignoring");
        }
        self.clear_user();
        self.notifier.success("Logged out");
        info!("user logged out");
    }

    fn handle_user_loaded(&self, user: User) {
        self.assign_user(user);
        let on_login = self
            .router
            .current_name()
            .map_or(true, |name| name == ROUTE_LOGIN);
        if on_login {
            self.router.navigate(ROUTE_HOME);
        }
    }

    fn assign_user(&self, user: User) {
        if let Err(e) = self.store.save(&user) {
            warn!(error = %e, "failed to persist session");
        }
        self.bearer.attach(&user.token);
        self.router.set_current_user(Some(user.clone()));

        let mut state = self.state.write();
        state.user = Some(user);
        state.phase = SessionPhase::Authenticated;
    }

    fn clear_user(&self) {
        {
            let mut state = self.state.write();
            state.user = None;
            state.phase = SessionPhase::Unauthenticated;
        }
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "failed to clear stored session");
        }
        self.bearer.detach();
        self.router.set_current_user(None);
        self.router.navigate(ROUTE_LOGIN);
    }
}
