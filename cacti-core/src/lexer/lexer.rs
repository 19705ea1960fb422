use super::token::{lookup_ident, Token, TokenKind};

pub type Spanned = (u32, Token, u32);

fn is_letter(ch: char) -> bool {
	ch.is_ascii_alphabetic() || ch == '_'
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,

	exhausted: bool,
}

pub type SourceChars<'a> = std::iter::Map<std::str::CharIndices<'a>, fn((usize, char)) -> (u32, char)>;

impl<'a> Lexer<SourceChars<'a>> {
	pub fn from_source(src: &'a str) -> Self {
		fn offset((i, c): (usize, char)) -> (u32, char) {
			(i as u32, c)
		}

		Lexer::new(src.char_indices().map(offset as fn((usize, char)) -> (u32, char)))
	}
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
        let mut lexer = Self {
            position: 0,
            next_position: 0,
            ch: None,
			next_ch: None,
            input,

			exhausted: false,
        };

        lexer.next_char();
        lexer.next_char();

        lexer
    }

    pub fn next_token(&mut self) -> Spanned {
		self.skip_whitespace();

		match self.ch {
			Some(ch) => match ch {
				'=' => self.eat_pair('=', TokenKind::Equal, TokenKind::Assign),
				'!' => self.eat_pair('=', TokenKind::NotEqual, TokenKind::Bang),
				';' => self.eat_one_char(TokenKind::Semicolon),
				'(' => self.eat_one_char(TokenKind::LParen),
				')' => self.eat_one_char(TokenKind::RParen),
				',' => self.eat_one_char(TokenKind::Comma),
				'+' => self.eat_one_char(TokenKind::Plus),
				'-' => self.eat_one_char(TokenKind::Minus),
				'*' => self.eat_one_char(TokenKind::Asterisk),
				'/' => self.eat_one_char(TokenKind::Slash),
				'<' => self.eat_one_char(TokenKind::LessThan),
				'>' => self.eat_one_char(TokenKind::GreaterThan),
				'{' => self.eat_one_char(TokenKind::LBrace),
				'}' => self.eat_one_char(TokenKind::RBrace),
				'"' => self.lex_string(),
				c if is_letter(c) => self.lex_ident(),
				c if c.is_ascii_digit() => self.lex_number(),
				c => {
					log::warn!("illegal character `{}` at offset {}", c.escape_default(), self.position);

					self.eat_one_char(TokenKind::Illegal)
				}
			},
			None => (self.position, Token::eof(), self.position)
		}
    }

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				if self.next_ch.is_some() {
					self.next_position += self.next_ch.map_or(1, |c| c.len_utf8() as u32);
				}

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn skip_whitespace(&mut self) {
		while matches!(self.ch, Some(' ' | '\t' | '\n' | '\r')) {
			self.next_char();
		}
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Spanned {
		let start_pos = self.position;
		let literal = self.next_char().map(String::from).unwrap_or_default();
		let end_pos = self.position;

		(start_pos, Token::new(kind, literal), end_pos)
	}

	/// Two-character operator when the lookahead matches `second`, the
	/// single-character fallback otherwise.
	fn eat_pair(&mut self, second: char, pair: TokenKind, single: TokenKind) -> Spanned {
		if self.next_ch != Some(second) {
			return self.eat_one_char(single);
		}

		let start_pos = self.position;
		let mut literal = String::with_capacity(2);
		literal.extend(self.next_char());
		literal.extend(self.next_char());
		let end_pos = self.position;

		(start_pos, Token::new(pair, literal), end_pos)
	}

	fn lex_ident(&mut self) -> Spanned {
        let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch.filter(|ch| is_letter(*ch)) {
			ident.push(ch);
			self.next_char();
		}

        let end_pos = self.position;

		(start_pos, Token::new(lookup_ident(&ident), ident), end_pos)
	}

	fn lex_number(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut value = String::new();

		while let Some(ch) = self.ch.filter(char::is_ascii_digit) {
			value.push(ch);
			self.next_char();
		}

		let end_pos = self.position;

		(start_pos, Token::new(TokenKind::Int, value), end_pos)
	}

	fn lex_string(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut value = String::new();

		self.next_char(); // skip opening quote

		loop {
			match self.ch {
				Some('"') => {
					self.next_char(); // skip closing quote
					break;
				},
				Some(ch) => {
					value.push(ch);
					self.next_char();
				},
				None => break
			}
		}

		let end_pos = self.position;

		(start_pos, Token::new(TokenKind::String, value), end_pos)
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = Spanned;

	fn next(&mut self) -> Option<Self::Item> {
		if self.exhausted {
			return None;
		}

		let token = self.next_token();

		if token.1.is(TokenKind::Eof) {
			self.exhausted = true;
		}

		Some(token)
	}
}
