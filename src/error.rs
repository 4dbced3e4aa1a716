use core::fmt::{Debug, Display, Formatter};

use embedded_hal::digital::{self, Error as _};
use embedded_hal::spi::{self, Error as _};

use crate::encoder::EncodeError;
use crate::gdey075z08::{Operation, Phase};

/// Epd error type
///
/// Hardware errors are passed on unchanged from the HAL, nothing is retried.
pub enum ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
    RST: digital::ErrorType,
{
    /// Encountered an SPI error
    SpiError(SPI::Error),

    /// Encountered an error on Busy GPIO
    BusyError(BUSY::Error),

    /// Encountered an error on DC GPIO
    DcError(DC::Error),

    /// Encountered an error on RST GPIO
    RstError(RST::Error),

    /// A bitplane doesn't have the size of a full frame. Nothing was sent.
    BufferSizeMismatch {
        /// Bytes of a full frame
        expected: usize,
        /// Bytes of the offending plane
        actual: usize,
    },

    /// The operation isn't allowed in the current phase. Nothing was sent.
    IllegalStateTransition {
        /// Phase the driver was in
        phase: Phase,
        /// The rejected operation
        operation: Operation,
    },

    /// The busy line didn't clear within the configured timeout
    PanelNotResponding {
        /// Time spent polling in ms
        waited_ms: u32,
    },

    /// The image couldn't be turned into bitplanes
    Encode(EncodeError),
}

impl<SPI, BUSY, DC, RST> From<EncodeError> for ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
    RST: digital::ErrorType,
{
    fn from(err: EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl<SPI, BUSY, DC, RST> Display for ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
    RST: digital::ErrorType,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => write!(f, "spi: {}", err.kind()),
            Self::BusyError(err) => write!(f, "busy pin: {}", err.kind()),
            Self::DcError(err) => write!(f, "dc pin: {}", err.kind()),
            Self::RstError(err) => write!(f, "rst pin: {}", err.kind()),
            Self::BufferSizeMismatch { expected, actual } => write!(
                f,
                "bitplane has {actual} bytes, a full frame needs {expected}"
            ),
            Self::IllegalStateTransition { phase, operation } => {
                write!(f, "{operation:?} is not allowed while {phase:?}")
            }
            Self::PanelNotResponding { waited_ms } => {
                write!(f, "panel still busy after {waited_ms}ms")
            }
            Self::Encode(err) => Display::fmt(err, f),
        }
    }
}

impl<SPI, BUSY, DC, RST> Debug for ErrorKind<SPI, BUSY, DC, RST>
where
    SPI: spi::ErrorType,
    BUSY: digital::ErrorType,
    DC: digital::ErrorType,
    RST: digital::ErrorType,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiError(err) => f.debug_tuple("SpiError").field(err).finish(),
            Self::BusyError(err) => f.debug_tuple("BusyError").field(err).finish(),
            Self::DcError(err) => f.debug_tuple("DcError").field(err).finish(),
            Self::RstError(err) => f.debug_tuple("RstError").field(err).finish(),
            Self::BufferSizeMismatch { expected, actual } => f
                .debug_struct("BufferSizeMismatch")
                .field("expected", expected)
                .field("actual", actual)
                .finish(),
            Self::IllegalStateTransition { phase, operation } => f
                .debug_struct("IllegalStateTransition")
                .field("phase", phase)
                .field("operation", operation)
                .finish(),
            Self::PanelNotResponding { waited_ms } => f
                .debug_struct("PanelNotResponding")
                .field("waited_ms", waited_ms)
                .finish(),
            Self::Encode(err) => f.debug_tuple("Encode").field(err).finish(),
        }
    }
}
