use crate::corpus::CorpusError;
use crate::dictionary::store::StoreError;
use crate::source::SourceError;

/// Failures surfaced to the command line, with a hint where one helps.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

impl CliError {
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Source(SourceError::UnknownEncoding(_)) => {
                Some("use a WHATWG label such as utf-8, windows-1252 or utf-16le")
            }
            Self::Store(StoreError::Io { .. }) => {
                Some(
                    "run `gramble build` first or point --dict (GRAMBLE_DICT) \
                     at an existing entry store",
                )
            }
            Self::Store(StoreError::Malformed(_)) => {
                Some("the entry store was not written by `gramble build`; rebuild it")
            }
            Self::Corpus(CorpusError::MissingColumn { .. }) => {
                Some("pick the column with --source-col / --id-col")
            }
            Self::Corpus(CorpusError::LengthMismatch { .. }) => {
                Some("hypotheses and references must come from the same split, in the same order")
            }
            _ => None,
        }
    }
}

/// The error message followed by its hint, if any.
pub fn render(e: &CliError) -> String {
    match e.hint() {
        Some(hint) => format!("{e} ({hint})"),
        None => e.to_string(),
    }
}
