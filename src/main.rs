fn main() -> anyhow::Result<()> {
    minirouter::cli::run_cli()
}
