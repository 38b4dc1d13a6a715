//! 라이브러리 모듈(`my_module`)을 가져와 사용하는 쪽.
//!
//! ```not_rust
//! cargo run -p example-module-practise
//! ```

use my_module::{generate_sentence, uptime};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "example_module_practise=debug,my_module=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("{}", generate_sentence());

    match uptime() {
        Ok(uptime) => tracing::info!("system uptime: {}s", uptime.as_secs()),
        Err(err) => tracing::error!(%err, "could not read system uptime"),
    }
}
