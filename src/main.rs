use cssalpha::{print_usage, run_from_env};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run_from_env() {
        if err.show_usage {
            eprintln!("  Error: {}", err.message);
            print_usage();
        } else {
            eprintln!("Error: {}", err.message);
        }
        std::process::exit(1);
    }
}
