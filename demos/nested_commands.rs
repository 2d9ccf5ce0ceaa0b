use argtree::{ConfigError, ParserBuilder};

fn main() -> Result<(), ConfigError> {
    let parser = ParserBuilder::new()
        .build_option('v', "verbose")
        .description("Report every binding.")
        .build()?
        .build_command("remote")
        .description("Manage the tracked remotes.")
        .mandatory(true)
        .build_parser()
        .build_command("add")
        .description("Track a new remote.")
        .build_parser()
        .add_argument("name")
        .add_argument("url")
        .build_option('f', "fetch")
        .long_key("fetch")
        .description("Fetch the remote once added.")
        .build()?
        .build()?
        .build()?
        .build_command("remove")
        .description("Forget a remote.")
        .build_parser()
        .add_argument("name")
        .build()?
        .build()?
        .build()?
        .build()?
        .build_and_get()?;

    let model = parser.parse();

    if model.is_option_present('v') {
        for (expected, binding) in model.bindings() {
            match binding.value() {
                Some(value) => println!("{} = {value}", expected.syntax()),
                None => println!("{}", expected.syntax()),
            }
        }
    }

    if let Some((_, remote)) = model.invoked_command() {
        match remote.invoked_command() {
            Some(("add", add)) => println!(
                "Adding '{}' at {} (fetch: {}).",
                add.argument("name").unwrap_or_default(),
                add.argument("url").unwrap_or_default(),
                add.is_option_present("fetch")
            ),
            Some(("remove", remove)) => {
                println!("Removing '{}'.", remove.argument("name").unwrap_or_default())
            }
            _ => println!("usage: {}", parser.syntax()),
        }
    }

    Ok(())
}
