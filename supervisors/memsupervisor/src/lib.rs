use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use mongoward::errors::SupervisorError;
use mongoward::AnyError;
use mongoward::ServiceDefinition;
use mongoward::Supervisor;
use tracing::debug;

/// A mutation the supervisor has actually performed, in order.
///
/// Precondition checks and no-op removals are not recorded, so tests can
/// assert that a repeated convergence pass performs zero operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Install(String),
    Start(String),
    Stop(String),
    Remove(String),
}

/// One installed service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub def: ServiceDefinition,
    pub running: bool,
}

#[derive(Debug, Default)]
struct Inner {
    services: BTreeMap<String, Service>,
    ops: Vec<Op>,

    fail_install: bool,
    fail_start: bool,
    fail_remove: bool,
}

/// An in-memory supervisor implementing the [`Supervisor`] trait.
///
/// Cloning shares the underlying state, so a test can keep a handle for
/// assertions while the orchestrator consumes another.
#[derive(Debug, Clone, Default)]
pub struct MemSupervisor {
    inner: Arc<Mutex<Inner>>,
}

impl MemSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an installed service, e.g. a definition left by an earlier
    /// release. Not recorded as an [`Op`].
    pub fn seed_service(&self, def: ServiceDefinition, running: bool) {
        let mut inner = self.inner.lock().unwrap();
        inner.services.insert(def.name.clone(), Service { def, running });
    }

    /// Make the next and all further `install` calls fail.
    pub fn fail_install(&self) {
        self.inner.lock().unwrap().fail_install = true;
    }

    /// Make the next and all further `start` calls fail.
    pub fn fail_start(&self) {
        self.inner.lock().unwrap().fail_start = true;
    }

    /// Make `stop_and_remove` fail for services that exist, as if the
    /// process could not be stopped. Removal of a nonexistent service
    /// stays a no-op success.
    pub fn fail_remove(&self) {
        self.inner.lock().unwrap().fail_remove = true;
    }

    /// Every mutation performed so far, in order.
    pub fn ops(&self) -> Vec<Op> {
        self.inner.lock().unwrap().ops.clone()
    }

    /// Names of all installed services.
    pub fn names(&self) -> Vec<String> {
        self.inner.lock().unwrap().services.keys().cloned().collect()
    }

    pub fn service(&self, name: &str) -> Option<Service> {
        self.inner.lock().unwrap().services.get(name).cloned()
    }
}

impl Supervisor for MemSupervisor {
    async fn installed(
        &mut self,
        name: &str,
    ) -> Result<bool, SupervisorError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.services.contains_key(name))
    }

    async fn running(&mut self, name: &str) -> Result<bool, SupervisorError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.services.get(name).map(|s| s.running).unwrap_or(false))
    }

    async fn install(
        &mut self,
        def: &ServiceDefinition,
    ) -> Result<(), SupervisorError> {
        debug!("MemSupervisor::install: {}", def.name);

        let mut inner = self.inner.lock().unwrap();
        if inner.fail_install {
            return Err(AnyError::error("injected install failure").into());
        }
        if inner.services.contains_key(&def.name) {
            return Err(AnyError::error(format!(
                "service {:?} is already installed",
                def.name
            ))
            .into());
        }

        inner.services.insert(def.name.clone(), Service {
            def: def.clone(),
            running: false,
        });
        inner.ops.push(Op::Install(def.name.clone()));
        Ok(())
    }

    async fn start(&mut self, name: &str) -> Result<(), SupervisorError> {
        debug!("MemSupervisor::start: {}", name);

        let mut inner = self.inner.lock().unwrap();
        if inner.fail_start {
            return Err(AnyError::error("injected start failure").into());
        }

        match inner.services.get_mut(name) {
            Some(s) => s.running = true,
            None => {
                return Err(AnyError::error(format!(
                    "cannot start unknown service {:?}",
                    name
                ))
                .into());
            }
        }
        inner.ops.push(Op::Start(name.to_string()));
        Ok(())
    }

    async fn stop(&mut self, name: &str) -> Result<(), SupervisorError> {
        debug!("MemSupervisor::stop: {}", name);

        let mut inner = self.inner.lock().unwrap();
        match inner.services.get_mut(name) {
            Some(s) => s.running = false,
            None => {
                return Err(AnyError::error(format!(
                    "cannot stop unknown service {:?}",
                    name
                ))
                .into());
            }
        }
        inner.ops.push(Op::Stop(name.to_string()));
        Ok(())
    }

    async fn stop_and_remove(
        &mut self,
        name: &str,
    ) -> Result<(), SupervisorError> {
        let mut inner = self.inner.lock().unwrap();

        if !inner.services.contains_key(name) {
            // Removing a nonexistent service is a successful no-op.
            return Ok(());
        }
        if inner.fail_remove {
            return Err(AnyError::error(format!(
                "cannot stop service {:?}",
                name
            ))
            .into());
        }

        debug!("MemSupervisor::stop_and_remove: {}", name);
        inner.services.remove(name);
        inner.ops.push(Op::Remove(name.to_string()));
        Ok(())
    }
}
