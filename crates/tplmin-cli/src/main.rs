use clap::Parser;

fn main() {
    let args = tplmin_cli::Args::parse();
    tplmin_cli::init_logging(&args);
    if let Err(err) = tplmin_cli::run(&args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
