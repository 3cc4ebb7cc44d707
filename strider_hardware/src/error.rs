use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("spi error: {0}")]
    Spi(String),
    #[error("unsupported spi {what}: {value}")]
    UnsupportedBus { what: &'static str, value: u8 },
    #[error("gyro WHO_AM_I mismatch (got {0:#04x})")]
    UnknownDevice(u8),
}

#[cfg(all(feature = "hardware", target_os = "linux"))]
impl From<rppal::spi::Error> for HwError {
    fn from(e: rppal::spi::Error) -> Self {
        HwError::Spi(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HwError>;
