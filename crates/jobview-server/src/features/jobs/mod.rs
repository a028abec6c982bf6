//! Jobs feature module
//!
//! Read-only listing over the job table ingested at startup.
//! Nothing here writes, and nothing triggers jobs.

pub mod catalog;
pub mod queries;
pub mod record;
pub mod routes;
pub mod schema;


pub use catalog::{DatasetStatus, JobCatalog};
pub use record::JobRecord;
pub use routes::jobs_routes;
pub use schema::{JobField, JobSchema};
