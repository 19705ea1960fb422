use cacti_core::lexer::prelude::Lexer;

use crate::cli::read_line;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	while let Some(input) = read_line(PROMPT)? {
		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				for (start, token, end) in Lexer::from_source(&input) {
					println!("[{start}..{end}] {token}");
				}
			}
		}
	}

	Ok(())
}
