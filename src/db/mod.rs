//! Data-access layer: per-request connections, the query executor, schema
//! introspection, and the read-only guard for operator SQL.
//!
//! Nothing in here caches anything: every call re-reads the live database,
//! so schema changes are visible on the next request with no invalidation.

pub mod connection;
pub mod executor;
pub mod guard;
pub mod introspect;

pub use executor::{ResultSet, SqlValue};
pub use introspect::{ColumnDescriptor, TypeBucket};
