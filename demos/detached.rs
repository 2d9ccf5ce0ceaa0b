use argtree::{ArgumentBuilder, CommandBuilder, ConfigError, OptionBuilder, ParserBuilder};

fn main() -> Result<(), ConfigError> {
    // Entities may be finished on their own, and declared later.
    let source = ArgumentBuilder::new("source")
        .description("The file to copy.")
        .build_and_get()?;
    let force = OptionBuilder::new('f', "force")
        .long_key("force")
        .description("Overwrite an existing target.")
        .build_and_get()?;
    let target = ParserBuilder::new()
        .add_argument("target")
        .build_and_get()?;
    let copy = CommandBuilder::new("copy")
        .description("Copy the source to a target.")
        .parser(target)
        .build_and_get()?;

    let parser = ParserBuilder::new()
        .add(force)
        .add(source)
        .add(copy)
        .build_and_get()?;

    parser.print_help("detached");
    let model = parser.parse();

    match model.command("copy") {
        Some(copy) => println!(
            "Copying {} to {} (force: {}).",
            model.argument("source").unwrap_or_default(),
            copy.argument("target").unwrap_or_default(),
            model.is_option_present('f')
        ),
        None => println!("Nothing to do for {}.", model.argument("source").unwrap_or_default()),
    }

    Ok(())
}
