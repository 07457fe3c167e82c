use fleet_dispatch::DispatchError;
use fleet_events::EventError;
use fleet_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("fleet configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Events(#[from] EventError),

    #[error("scenario parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("scenario I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
