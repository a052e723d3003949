/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Discrete simulation time unit
pub type Tick = u32;

/// Priority level (lower value is served first)
pub type Priority = u32;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimulationError>;
