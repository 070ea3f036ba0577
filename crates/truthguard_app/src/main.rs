mod logging;
mod render;
mod runner;

use truthguard_client::DEFAULT_BASE_URL;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);

    let base_url =
        std::env::var("TRUTHGUARD_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    runner::run(base_url)
}
