use cacti_core::{
	environment::prelude::{Environment, Object},
	evaluate,
	parser::prelude::parse_source
};

use crate::cli::read_line;

const PROMPT: &str = ">> ";

/// Every line is evaluated in the same environment, so bindings persist.
pub fn start() -> std::io::Result<()> {
	let mut env = Environment::new();

	while let Some(input) = read_line(PROMPT)? {
		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let parsed = parse_source(&input);

				if !parsed.is_ok() {
					println!("Parse errors:\n\t{}", parsed.messages().join("\n\t"));
					continue;
				}

				match evaluate(&parsed.program, &mut env) {
					Object::Null => {},
					value => println!("{value}")
				}
			}
		}
	}

	Ok(())
}
