fn main() -> anyhow::Result<()> {
    let command_line_interface = tybridge::cli::CommandLineInterface::load();
    command_line_interface.run()
}
