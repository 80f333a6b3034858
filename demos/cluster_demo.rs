use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    crosslink::example_apps::run_cluster_demo(std::env::args().skip(1))
}
