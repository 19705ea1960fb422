use std::path::PathBuf;

use codespan_reporting::{
    diagnostic::{Diagnostic as CodespanDiagnostic, Label as CodespanLabel, LabelStyle, Severity},
    files::SimpleFiles,
    term::{self, Config},
};
use termcolor::Buffer;

use super::src_span::SrcSpan;

pub struct Label {
    pub style: LabelStyle,
    pub text: String,
    pub span: SrcSpan
}

impl Label {
    pub fn primary(span: SrcSpan, text: impl Into<String>) -> Self {
        Self { style: LabelStyle::Primary, text: text.into(), span }
    }

    pub fn secondary(span: SrcSpan, text: impl Into<String>) -> Self {
        Self { style: LabelStyle::Secondary, text: text.into(), span }
    }

    fn to_codespan_label(&self, file_id: usize) -> CodespanLabel<usize> {
        CodespanLabel::new(self.style, file_id, (self.span.start as usize)..(self.span.end as usize))
            .with_message(self.text.clone())
    }
}

/// Source text the labels of a diagnostic point into.
pub struct Source<'a> {
    pub path: PathBuf,
    pub src: &'a str,
}

/// Error report rendered by `codespan-reporting`. Without a source only the
/// title and notes are printed.
pub struct Diagnostic<'a> {
    pub title: String,
    pub notes: Vec<String>,
    pub labels: Vec<Label>,
    pub source: Option<Source<'a>>,
}

impl<'a> Diagnostic<'a> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            notes: vec![],
            labels: vec![],
            source: None,
        }
    }

    pub fn with_source(mut self, path: PathBuf, src: &'a str) -> Self {
        self.source = Some(Source { path, src });
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn with_notes(mut self, notes: impl IntoIterator<Item = String>) -> Self {
        self.notes.extend(notes);
        self
    }

    pub fn write(&self, buf: &mut Buffer) {
        let mut files: SimpleFiles<String, &str> = SimpleFiles::new();

        let mut diagnostic = CodespanDiagnostic::new(Severity::Error)
            .with_message(&self.title)
            .with_notes(self.notes.clone());

        if let Some(source) = &self.source {
            let file_id = files.add(source.path.display().to_string(), source.src);

            diagnostic = diagnostic.with_labels(
                self.labels.iter()
                    .map(|label| label.to_codespan_label(file_id))
                    .collect()
            );
        }

        term::emit(buf, &Config::default(), &files, &diagnostic)
            .expect("write_diagnostic");
    }
}
