//! Parallel resolution of independent requests.

use rayon::prelude::*;

use crate::resolver::{ResolveError, ResolveRequest, Resolution, Resolver};

/// Resolve every request, in parallel. Results keep the input order and
/// a failing request does not affect the others.
pub fn resolve_batch(
    resolver: &Resolver<'_>,
    requests: &[ResolveRequest],
) -> Vec<Result<Resolution, ResolveError>> {
    tracing::debug!("resolving {} requests", requests.len());

    requests
        .par_iter()
        .map(|request| resolver.resolve(request))
        .collect()
}
