#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("instruction operator must not be empty")]
    EmptyOperator,

    #[error("operation {key} is already registered")]
    DuplicateKey { key: String },

    #[error("operation {key} has the same canonical bytecode {bytecode} as {existing}")]
    DuplicateCanonical {
        key: String,
        existing: String,
        bytecode: String,
    },

    #[error("unknown response status code: {code}")]
    UnknownStatusCode { code: u16 },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
