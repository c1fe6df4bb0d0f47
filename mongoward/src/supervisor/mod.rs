//! The process-supervisor interface consumed by the convergence engine.
//!
//! The supervisor that actually installs and runs services on a node is an
//! external collaborator. This crate only needs the narrow contract below,
//! which also makes the orchestrator testable without mutable global
//! state: tests substitute an in-memory implementation (see the
//! `memsupervisor` workspace crate).

mod definition;

use openraft_macros::add_async_trait;

pub use self::definition::Limits;
pub use self::definition::ServiceDefinition;
use crate::errors::SupervisorError;
use crate::OptionalSend;
use crate::OptionalSync;

/// A named-service process supervisor.
///
/// Implementations are expected to make `install` and `start` individually
/// atomic; the orchestrator adds no cross-process locking of its own.
#[add_async_trait]
pub trait Supervisor: OptionalSend + OptionalSync + 'static {
    /// Whether a definition with this name is currently installed.
    async fn installed(&mut self, name: &str) -> Result<bool, SupervisorError>;

    /// Whether the named service is currently running.
    async fn running(&mut self, name: &str) -> Result<bool, SupervisorError>;

    /// Register a new service definition.
    ///
    /// Installing a name that is already installed is an error; callers
    /// gate this behind [`installed`](Supervisor::installed).
    async fn install(
        &mut self,
        def: &ServiceDefinition,
    ) -> Result<(), SupervisorError>;

    /// Transition the named service to running.
    async fn start(&mut self, name: &str) -> Result<(), SupervisorError>;

    /// Stop the named service, leaving its definition installed.
    async fn stop(&mut self, name: &str) -> Result<(), SupervisorError>;

    /// Stop the named service if it is running and delete its definition.
    ///
    /// Removing a service that does not exist is a successful no-op, which
    /// is what makes legacy migration idempotent.
    async fn stop_and_remove(
        &mut self,
        name: &str,
    ) -> Result<(), SupervisorError>;
}
