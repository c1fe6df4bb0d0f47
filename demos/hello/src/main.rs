mod logging;

use memsupervisor::MemSupervisor;
use mongoward::ensure_server;
use mongoward::BootstrapRequest;
use mongoward::Config;
use mongoward::DialParams;
use pseudomongo::PseudoMongo;

use crate::logging::init_logging;

/// Runs two convergence passes against the in-memory supervisor and
/// cluster: the first bootstraps everything, the second is a no-op.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let g = init_logging("mongoward", "_log", "DEBUG");
    Box::leak(Box::new(g));

    let tmp = tempfile::tempdir()?;
    let config = Config::default();

    let supervisor = MemSupervisor::new();
    let cluster = PseudoMongo::new();

    let req = BootstrapRequest {
        address: "10.0.0.1".to_string(),
        data_dir: tmp.path().to_path_buf(),
        port: 37017,
        dial: DialParams::new(
            vec!["127.0.0.1:37017".to_string()],
            config.dial_timeout(),
        ),
    };

    let mut sup = supervisor.clone();
    let mut cl = cluster.clone();

    ensure_server(&config, &mut sup, &mut cl, &req).await?;
    println!("first pass done");

    println!("installed services: {:?}", supervisor.names());
    for name in supervisor.names() {
        let service = supervisor.service(&name).unwrap();
        println!("  {} running={}", service.def, service.running);
    }
    println!(
        "replica set config: {}",
        serde_json::to_string_pretty(&cluster.config())?
    );

    // The second pass finds everything converged and changes nothing.
    ensure_server(&config, &mut sup, &mut cl, &req).await?;
    println!("second pass done");

    println!("operations after two passes: {:?}", supervisor.ops());
    println!("cluster counters after two passes: {:?}", cluster.counts());

    Ok(())
}
