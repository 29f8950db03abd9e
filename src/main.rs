fn main() -> anyhow::Result<()> {
    kittymux::cli::run_cli()
}
