use solus_utils::Singleton;
use tracing_subscriber::EnvFilter;

use crate::{
    demo::{DemoService, Reporter},
    settings::AppSettings,
};

mod demo;
mod settings;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = match AppSettings::try_instance() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Unable to load settings: {}", e);
            std::process::exit(1);
        }
    };

    let reporter = Reporter::new(settings.greeting.clone());
    for _ in 0..settings.repeat {
        reporter.some_method();
        DemoService::instance().do_something();
    }

    log::info!(
        "DemoService handled {} calls from every call site.",
        DemoService::instance().calls()
    );
}
