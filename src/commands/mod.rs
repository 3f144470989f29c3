/// Command dispatch: routes parsed arguments to their implementation.
pub mod view;

use crate::cli::{OutputCtx, ViewArgs};
use crate::measure::ViewerError;

/// Dispatch parsed view arguments to the viewer.
///
/// # Errors
///
/// Returns `ViewerError` on any load or output failure.
pub fn dispatch(args: &ViewArgs, ctx: &OutputCtx) -> Result<(), ViewerError> {
    view::run(args, ctx)
}
