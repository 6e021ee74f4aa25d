//! High-level operations.
//!
//! Everything that sits between a resolution and the outside world:
//! rendering it for CMake, reusing or building packages, batch resolution
//! and lock file I/O.

pub mod batch;
pub mod emit;
pub mod lockfile;
pub mod plan;

pub use batch::resolve_batch;
pub use emit::{cmake_args, cmake_cache_script, dependency_references, option_lines};
pub use lockfile::{load_package_states, save_package_states};
pub use plan::{
    execute, BuildInvocation, BuildInvoker, BuildOutput, PackageStore, PlanOutcome, StoredPackage,
};
