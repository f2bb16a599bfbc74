use crate::utils::error::Result;
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

pub const ACCESS_DENIED: &str = "Error: you do not have permission to run this query.";

pub trait DatabaseService: Send + Sync {
    fn request_data(&self, query: &str) -> String;
}

/// The expensive real subject.
#[derive(Debug)]
pub struct RealDatabaseService {
    latency: Duration,
    executed: AtomicUsize,
}

impl RealDatabaseService {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            executed: AtomicUsize::new(0),
        }
    }

    /// Number of queries that actually reached the database.
    pub fn executed_queries(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }
}

impl Default for RealDatabaseService {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

impl DatabaseService for RealDatabaseService {
    fn request_data(&self, query: &str) -> String {
        tracing::debug!("RealDatabaseService: running an expensive query");
        thread::sleep(self.latency);
        self.executed.fetch_add(1, Ordering::SeqCst);
        format!("Data for the query '{}'", query)
    }
}

pub struct DatabaseProxy {
    real_service: Arc<dyn DatabaseService>,
    role: String,
    cache: Mutex<HashMap<String, String>>,
}

impl DatabaseProxy {
    pub fn new(real_service: Arc<dyn DatabaseService>, role: impl Into<String>) -> Self {
        Self {
            real_service,
            role: role.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Only administrators may query.
    pub fn check_access(&self) -> bool {
        let allowed = self.role == "admin";
        if !allowed {
            tracing::warn!("Proxy: access denied for role '{}'", self.role);
        }
        allowed
    }

    fn cached(&self, query: &str) -> Option<String> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(query)
            .cloned()
    }
}

impl DatabaseService for DatabaseProxy {
    fn request_data(&self, query: &str) -> String {
        if !self.check_access() {
            return ACCESS_DENIED.to_string();
        }

        if let Some(hit) = self.cached(query) {
            tracing::debug!("Proxy: returning the cached result for '{}'", query);
            return hit;
        }

        // The lock is not held while the real service runs.
        tracing::debug!("Proxy: '{}' is not cached, delegating", query);
        let result = self.real_service.request_data(query);
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(query.to_string())
            .or_insert(result)
            .clone()
    }
}

fn client_code(service: &dyn DatabaseService, query: &str, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "\nClient: running the query '{}'...", query)?;
    writeln!(out, "Client: received -> {}", service.request_data(query))?;
    Ok(())
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    let real_service = Arc::new(RealDatabaseService::new(Duration::from_millis(200)));
    let shared: Arc<dyn DatabaseService> = real_service.clone();

    writeln!(out, "--- Trying with a user without admin rights ---")?;
    let user_proxy = DatabaseProxy::new(Arc::clone(&shared), "user");
    client_code(&user_proxy, "SELECT * FROM users", out)?;

    writeln!(out, "\n--- Trying with an administrator ---")?;
    let admin_proxy = DatabaseProxy::new(shared, "admin");
    client_code(&admin_proxy, "SELECT * FROM products", out)?;
    client_code(&admin_proxy, "SELECT * FROM products", out)?;

    writeln!(
        out,
        "\nQueries that reached the real database: {}",
        real_service.executed_queries()
    )?;
    Ok(())
}
