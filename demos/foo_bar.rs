use argtree::{ConfigError, ParserBuilder};

fn main() -> Result<(), ConfigError> {
    let parser = ParserBuilder::new()
        .build_argument("foo")
        .description("The name to greet.")
        .build()?
        .build_option('b', "bar")
        .long_key("bar")
        .description("Shout the greeting.")
        .build()?
        .build_option('x', "extra")
        .long_key("extra")
        .expects_value(true)
        .description("A word to append to the greeting.")
        .build()?
        .build_and_get()?;

    let model = parser.parse();
    let mut greeting = format!("Hello {}", model.argument("foo").unwrap_or_default());

    if let Some(extra) = model.option_value("extra") {
        greeting.push(' ');
        greeting.push_str(extra);
    }

    if model.is_option_present("bar") {
        greeting = greeting.to_uppercase();
    }

    println!("{greeting}");
    Ok(())
}
