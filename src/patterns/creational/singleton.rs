use crate::utils::error::Result;
use rand::Rng;
use std::io::Write;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};
use std::thread;
use std::time::Duration;

static INSTANCE: OnceLock<DatabaseConnection> = OnceLock::new();
static CONSTRUCTION_LOCK: Mutex<()> = Mutex::new(());
static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);
static CONNECT_DELAY_MS: AtomicU64 = AtomicU64::new(1000);

#[derive(Debug)]
pub struct DatabaseConnection {
    connection_id: u32,
}

impl DatabaseConnection {
    /// The shared connection, connecting on first use.
    pub fn instance() -> &'static DatabaseConnection {
        if let Some(connection) = INSTANCE.get() {
            return connection;
        }

        let _guard = CONSTRUCTION_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(connection) = INSTANCE.get() {
            return connection;
        }

        let connection = Self::connect();
        INSTANCE.get_or_init(|| connection)
    }

    /// Sets how long the simulated connect takes. Only affects a connection
    /// that has not been built yet.
    pub fn set_connect_delay(delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        CONNECT_DELAY_MS.store(millis, Ordering::SeqCst);
    }

    /// How many times the connection has been built. Stays at 1.
    pub fn construction_count() -> usize {
        CONSTRUCTIONS.load(Ordering::SeqCst)
    }

    pub fn connection_id(&self) -> u32 {
        self.connection_id
    }

    pub fn query(&self, sql: &str) -> String {
        format!(
            "Running query '{}' on connection {}",
            sql, self.connection_id
        )
    }

    fn connect() -> Self {
        thread::sleep(Duration::from_millis(CONNECT_DELAY_MS.load(Ordering::SeqCst)));
        CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
        let connection_id = rand::thread_rng().gen_range(1000..=9999);
        tracing::info!("New database connection established. ID: {}", connection_id);
        Self { connection_id }
    }
}

pub fn run_demo(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "1. Single-threaded run:")?;
    let db1 = DatabaseConnection::instance();
    let db2 = DatabaseConnection::instance();
    if std::ptr::eq(db1, db2) {
        writeln!(out, "   - Both handles point to the same database connection.")?;
        writeln!(out, "   {}", db1.query("SELECT * FROM users"))?;
        writeln!(out, "   {}", db2.query("SELECT * FROM products"))?;
    } else {
        writeln!(out, "   - Two different connections were created.")?;
    }

    writeln!(out, "\n2. Multi-threaded run:")?;
    let ids: Vec<u32> = thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|_| scope.spawn(|| DatabaseConnection::instance().connection_id()))
            .collect();
        handles
            .into_iter()
            .filter_map(|handle| handle.join().ok())
            .collect()
    });
    for (index, id) in ids.iter().enumerate() {
        writeln!(out, "   - Thread {} got connection {}", index + 1, id)?;
    }
    writeln!(
        out,
        "   - Connections built: {}",
        DatabaseConnection::construction_count()
    )?;
    Ok(())
}
