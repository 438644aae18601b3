use thiserror::Error;

/// Everything that can abort a single scheme's parse-build-emit pass. The
/// driver's main loop catches this per scheme and continues to the next one.
#[derive(Debug, Error)]
pub enum SchemeError {
    #[error("scheme `{message}` has no `excel` or `sheet` option")]
    MissingWorkbookOptions { message: String },
    #[error(
        "scheme `{message}` has mismatched `excel`/`sheet` list lengths ({excel_len} vs {sheet_len}); one must be 1 or they must be equal"
    )]
    MismatchedWorkbookSheetLists {
        message: String,
        excel_len: usize,
        sheet_len: usize,
    },
    #[error("scheme `{message}` declares no `key` option")]
    MissingKeyOption { message: String },
    #[error(transparent)]
    Schema(#[from] sheetyield_descriptor::ValidationError),
    #[error(transparent)]
    Parse(#[from] sheetyield_parse::ParseError),
    #[error(transparent)]
    Store(#[from] sheetyield_store::SchemaError),
    #[error(transparent)]
    Encode(#[from] sheetyield_codec::EncodeError),
    #[error(transparent)]
    IO(#[from] sheetyield_codec::IOError),
}

impl SchemeError {
    /// Whether this failure is purely an I/O problem writing the output
    /// artifacts, used to pick between the two "export failure" exit codes.
    pub fn is_io(&self) -> bool {
        matches!(self, SchemeError::IO(_))
    }
}

impl From<sheetyield_parse::InputError> for SchemeError {
    fn from(err: sheetyield_parse::InputError) -> Self {
        SchemeError::Parse(sheetyield_parse::ParseError::Input(err))
    }
}

impl From<sheetyield_parse::CellError> for SchemeError {
    fn from(err: sheetyield_parse::CellError) -> Self {
        SchemeError::Parse(sheetyield_parse::ParseError::Cell(err))
    }
}
