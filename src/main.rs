use std::time::Duration;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(cinemanager::run());

    // A pending stdin read would otherwise keep the runtime alive.
    runtime.shutdown_timeout(Duration::from_secs(1));
    result
}
