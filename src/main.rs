use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = awu::cli::Cli::parse();
    awu::logging::init(cli.verbose);

    if let Err(err) = awu::run(cli).await {
        tracing::debug!(?err, "command failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
