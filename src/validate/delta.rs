//! Update requests may only change mutable fields.

use tracing::debug;

use super::ValidationContext;
use crate::error::{CloudError, CloudErrorCode, ErrorKind, Result};
use crate::immutable;

pub fn validate(ctx: &ValidationContext<'_>) -> Result<()> {
    let Some(current) = ctx.current else {
        return Ok(());
    };

    immutable::validate("", ctx.cluster, current).map_err(|e| {
        debug!(target_path = %e.target, "Immutable property changed");
        CloudError::bad_request(
            CloudErrorCode::PropertyChangeNotAllowed,
            ErrorKind::ImmutabilityViolation,
            e.target,
            e.message,
        )
    })
}
