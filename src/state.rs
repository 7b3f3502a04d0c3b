//! Application state management.

use crate::auth::{PasswordEncoder, Role, SessionStore};
use crate::config::{BootstrapAdmin, SecurityConfig};
use crate::db::{DatabasePool, InMemoryRepository, PgRepository, Repository, UserRepository};
use crate::error::AppResult;
use crate::models::{BidList, CurvePoint, Rating, RuleName, Trade, User};
use crate::service::{CrudService, UserService};
use std::sync::Arc;
use tracing::info;

/// One repository per record kind.
pub struct Repositories {
    pub bid_lists: Arc<dyn Repository<BidList>>,
    pub curve_points: Arc<dyn Repository<CurvePoint>>,
    pub ratings: Arc<dyn Repository<Rating>>,
    pub rule_names: Arc<dyn Repository<RuleName>>,
    pub trades: Arc<dyn Repository<Trade>>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    /// Process-local repositories; contents are lost on restart.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            bid_lists: Arc::new(InMemoryRepository::<BidList>::new()),
            curve_points: Arc::new(InMemoryRepository::<CurvePoint>::new()),
            ratings: Arc::new(InMemoryRepository::<Rating>::new()),
            rule_names: Arc::new(InMemoryRepository::<RuleName>::new()),
            trades: Arc::new(InMemoryRepository::<Trade>::new()),
            users: Arc::new(InMemoryRepository::<User>::new()),
        }
    }

    /// Repositories backed by PostgreSQL tables.
    #[must_use]
    pub fn postgres(db: &DatabasePool) -> Self {
        Self {
            bid_lists: Arc::new(PgRepository::<BidList>::new(db)),
            curve_points: Arc::new(PgRepository::<CurvePoint>::new(db)),
            ratings: Arc::new(PgRepository::<Rating>::new(db)),
            rule_names: Arc::new(PgRepository::<RuleName>::new(db)),
            trades: Arc::new(PgRepository::<Trade>::new(db)),
            users: Arc::new(PgRepository::<User>::new(db)),
        }
    }
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub bid_lists: CrudService<BidList>,
    pub curve_points: CrudService<CurvePoint>,
    pub ratings: CrudService<Rating>,
    pub rule_names: CrudService<RuleName>,
    pub trades: CrudService<Trade>,
    pub users: UserService,
    /// Open login sessions.
    pub sessions: Arc<SessionStore>,
    /// Hashes passwords on save and verifies them on login.
    pub passwords: PasswordEncoder,
    /// Optional database pool.
    pub db: Option<DatabasePool>,
}

impl AppState {
    /// Creates a new application state on the in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::from_repositories(Repositories::in_memory(), &SecurityConfig::default())
    }

    /// Creates a new application state on the given repositories.
    #[must_use]
    pub fn from_repositories(repositories: Repositories, security: &SecurityConfig) -> Self {
        Self {
            bid_lists: CrudService::new(repositories.bid_lists),
            curve_points: CrudService::new(repositories.curve_points),
            ratings: CrudService::new(repositories.ratings),
            rule_names: CrudService::new(repositories.rule_names),
            trades: CrudService::new(repositories.trades),
            users: CrudService::new(repositories.users),
            sessions: Arc::new(
                SessionStore::new(security.session_cookie.clone())
                    .with_idle_timeout(security.session_timeout()),
            ),
            passwords: PasswordEncoder::new(),
            db: None,
        }
    }

    /// Creates a new application state with database.
    #[must_use]
    pub fn with_database(db: DatabasePool, security: &SecurityConfig) -> Self {
        let mut state = Self::from_repositories(Repositories::postgres(&db), security);
        state.db = Some(db);
        state
    }

    /// Replaces the password encoder.
    #[must_use]
    pub fn with_password_encoder(mut self, passwords: PasswordEncoder) -> Self {
        self.passwords = passwords;
        self
    }

    /// Creates the bootstrap administrator unless a user with that name exists.
    ///
    /// Returns true if a user was created.
    ///
    /// # Errors
    /// Returns an error if the store or the password hashing fails.
    pub async fn ensure_admin(&self, admin: &BootstrapAdmin) -> AppResult<bool> {
        if self.users.find_by_username(&admin.username).await?.is_some() {
            return Ok(false);
        }

        let user = User {
            id: None,
            username: admin.username.clone(),
            password: self.passwords.encode(&admin.password)?,
            fullname: admin.fullname.clone(),
            role: Role::Admin,
        };
        let saved = self.users.save(user).await?;
        info!("Created bootstrap administrator {} (id {:?})", saved.username, saved.id);
        Ok(true)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
