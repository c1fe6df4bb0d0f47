//! Removal of service definitions left behind by earlier releases.

use tracing::debug;

use crate::errors::EnsureError;
use crate::service::service_name;
use crate::Supervisor;

/// The versioned `<base>-v<N>` naming scheme began at this version.
/// Before it, the single definition was named by the bare base name.
const VERSIONED_NAMES_SINCE: u32 = 2;

/// Every service name an older release could have installed, in removal
/// order: the pre-versioning legacy name first, then each versioned name
/// below `current_version`.
pub fn stale_service_names(base: &str, current_version: u32) -> Vec<String> {
    let mut names = vec![base.to_string()];
    for v in VERSIONED_NAMES_SINCE..current_version {
        names.push(service_name(base, v));
    }
    names
}

/// Stop and remove every stale service definition.
///
/// Removing a definition that does not exist is a no-op, so this is safe
/// to run on every convergence pass and safe to retry after a partial
/// failure. Any real removal failure (e.g. the process cannot be stopped)
/// is fatal and aborts convergence.
pub async fn remove_stale_services<S>(
    supervisor: &mut S,
    base: &str,
    current_version: u32,
) -> Result<(), EnsureError>
where
    S: Supervisor,
{
    for name in stale_service_names(base, current_version) {
        debug!("removing stale service definition {:?}", name);

        supervisor.stop_and_remove(&name).await.map_err(|e| {
            EnsureError::Migration {
                name: name.clone(),
                source: e.into_any(),
            }
        })?;
    }
    Ok(())
}
