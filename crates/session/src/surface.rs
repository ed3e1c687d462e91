// Moving an engine between surfaces

use reel_core::Surface;
use std::sync::Arc;

/// Bind `engine` to `next` and unbind it from `previous`.
///
/// The new surface is bound first so the engine never renders to nothing
/// while a list item is being re-targeted.
pub fn switch_surface<E, V>(engine: &Arc<E>, previous: Option<&V>, next: &V)
where
    V: Surface<E>,
{
    if previous.is_some_and(|previous| previous.is_same_surface(next)) {
        return;
    }

    next.bind(Some(engine.clone()));
    if let Some(previous) = previous {
        previous.bind(None);
    }
}
