//! Branch statistics data model.
//!
//! A [`RouteSnapshot`] is what one fetch of one [`Route`] returns: the full,
//! ordered list of [`BranchRecord`] rows. Snapshots compare by deep structural
//! equality, which is what the refresh engine diffs on.

mod lenient;
mod record;
mod route;

pub use record::{BranchRecord, RouteSnapshot};
pub use route::{Route, UnknownRoute};
