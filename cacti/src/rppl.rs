use cacti_core::parser::prelude::parse_source;

use crate::cli::read_line;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	while let Some(input) = read_line(PROMPT)? {
		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let parsed = parse_source(&input);

				if parsed.is_ok() {
					println!("{}", parsed.program);
				} else {
					println!("Parse errors:\n\t{}", parsed.messages().join("\n\t"));
				}
			}
		}
	}

	Ok(())
}
