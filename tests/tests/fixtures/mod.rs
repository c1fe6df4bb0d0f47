//! Shared scaffolding for the integration tests.

use std::future::Future;
use std::path::Path;

use mongoward::testing::local_dial;
use mongoward::BootstrapRequest;
use mongoward::Config;

/// Test harness: initialize tracing, build a runtime, run the test.
pub fn ut_harness<Fut>(test: impl FnOnce() -> Fut) -> anyhow::Result<()>
where Fut: Future<Output = anyhow::Result<()>> {
    init_ut_tracing();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()?;
    rt.block_on(test())
}

fn init_ut_tracing() {
    use tracing_subscriber::EnvFilter;

    // Several tests share one process; only the first init wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A validated config whose service base name is `base`.
pub fn config(base: &str) -> Config {
    let config = Config {
        service_base: base.to_string(),
        ..Config::default()
    };
    config.validate().unwrap()
}

/// A bootstrap request dialing the local endpoint on `port`.
pub fn request(
    address: &str,
    data_dir: &Path,
    port: u16,
) -> BootstrapRequest {
    BootstrapRequest {
        address: address.to_string(),
        data_dir: data_dir.to_path_buf(),
        port,
        dial: local_dial(port),
    }
}
