/*!
 * Monitoring
 * Logging setup for the simulator
 */

mod tracer;

pub use tracer::{init_tracing, TRACE_JSON_ENV};
