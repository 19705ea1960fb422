use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::parser::prelude::ParseError;
use super::diagnostic::{Diagnostic, Label};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        errors: Vec<ParseError>
    },
    #[error("{message}")]
    Runtime {
        path: PathBuf,
        src: String,
        message: String
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    },
    #[error("file does not end with .cacti")]
    Extension {
        path: PathBuf
    }
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic<'_>> {
        match self {
            Error::Parse { path, src, errors } => {
                errors.iter()
                    .map(|error| {
                        let (label, hints) = error.details();

                        let diagnostic = Diagnostic::new(error.to_string())
                            .with_source(path.clone(), src)
                            .with_label(Label::primary(error.span, label))
                            .with_notes(hints);

                        match error.opened {
                            Some(opened) => diagnostic.with_label(
                                Label::secondary(opened, "unclosed delimiter opened here")
                            ),
                            None => diagnostic
                        }
                    })
                    .collect()
            },
            Error::Runtime { path, message, .. } => {
                vec![Diagnostic::new(message.clone())
                    .with_notes([format!("while evaluating {}", path.display())])]
            },
            Error::StdIo { err } => {
                vec![Diagnostic::new("Standard IO error")
                    .with_notes([err.to_string()])]
            },
            Error::Extension { path } => {
                vec![Diagnostic::new(self.to_string())
                    .with_notes([format!("{} is not a cacti source file", path.display())])]
            }
        }
    }
}
