use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartaError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}
