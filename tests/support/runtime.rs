//! Tokio runtime and Wiremock server shared by the synchronous BDD steps.

use std::cell::RefCell;
use std::rc::Rc;

use prmonitor::MonitorError;
use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Runtime handle that can live in an `rstest-bdd` slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Starts the runtime and mock server on first use and returns the runtime.
///
/// # Errors
///
/// Returns [`MonitorError::Io`] when the Tokio runtime cannot be created.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, MonitorError> {
    if runtime.with_ref(|_| ()).is_none() {
        let created = Runtime::new().map_err(|error| MonitorError::Io {
            message: format!("failed to create Tokio runtime: {error}"),
        })?;
        runtime.set(SharedRuntime::new(created));
    }

    let shared = runtime.get().ok_or_else(|| MonitorError::Io {
        message: "runtime not initialised after set".to_owned(),
    })?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared.block_on(MockServer::start()));
    }

    Ok(shared)
}

/// Mounts `mock` on the server held in `server`.
///
/// # Errors
///
/// Returns [`MonitorError::Io`] when the runtime or server has not been
/// started.
pub fn mount(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
    mock: Mock,
) -> Result<(), MonitorError> {
    let shared = ensure_runtime_and_server(runtime, server)?;
    server
        .with_ref(|mock_server| shared.block_on(mock.mount(mock_server)))
        .ok_or_else(|| MonitorError::Io {
            message: "mock server not initialised".to_owned(),
        })
}
