fn main() -> anyhow::Result<()> {
    roster::cli::run_cli()
}
