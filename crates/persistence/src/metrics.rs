//! Query timing and pool gauges.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Times one repository call.
///
/// ```ignore
/// let timer = QueryTimer::new("find_program_by_slug");
/// let result = sqlx::query_as::<_, ProgramEntity>(...).fetch_optional(&pool).await;
/// timer.record();
/// result
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    /// Records the elapsed time and bumps the per-query counter.
    pub fn record(self) {
        let elapsed = self.start.elapsed().as_secs_f64();
        histogram!("database_query_duration_seconds", "query" => self.query_name).record(elapsed);
        counter!("database_queries_total", "query" => self.query_name).increment(1);
    }
}

/// Publishes pool occupancy gauges; called from the readiness probe.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("database_connections_active").set(size.saturating_sub(idle) as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}
