use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A declared series lacks one of its required accessor functions.
    #[error("series `{series}` is missing its `{accessor}` accessor")]
    MissingAccessor {
        series: String,
        accessor: &'static str,
    },

    #[error("series key `{0}` is declared more than once")]
    DuplicateSeries(String),

    #[error("unknown series key `{0}`")]
    UnknownSeries(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
