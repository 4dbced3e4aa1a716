//! A simple Driver for the Good Display GDEY075Z08 7.5" black/white/red E-Ink Display via SPI
//!
//! 800x480 pixels, UC8179 compatible controller. The panel takes two full-frame
//! bitplanes: one for black/white, one for red.
//!
//! # Example
//!
//!```rust, no_run
//!# use embedded_hal_mock::eh1::{delay::NoopDelay, digital, spi};
//!use embedded_graphics::{
//!    pixelcolor::Gray8,
//!    prelude::*,
//!    primitives::{Line, PrimitiveStyle},
//!};
//!use epd_gdey075z08::{gdey075z08::*, graphics::GrayDisplay, prelude::*};
//!#
//!# type Error = ErrorKind<spi::Mock<u8>, digital::Mock, digital::Mock, digital::Mock>;
//!# fn main() -> Result<(), Error> {
//!# let transfers: [spi::Transaction<u8>; 0] = [];
//!# let pin_changes: [digital::Transaction; 0] = [];
//!# let mut spi = spi::Mock::new(&transfers);
//!# let busy_in = digital::Mock::new(&pin_changes);
//!# let dc = digital::Mock::new(&pin_changes);
//!# let rst = digital::Mock::new(&pin_changes);
//!# let mut delay = NoopDelay::new();
//!
//!// Setup EPD
//!let mut epd = Gdey075z08::new(busy_in, dc, rst, Config::default())
//!    .expect("the default configuration is valid");
//!epd.initialize(&mut spi, &mut delay)?;
//!
//!// Draw in grayscale, mid gray ends up red
//!let mut buffer = vec![0u8; (WIDTH * HEIGHT) as usize];
//!let mut display = GrayDisplay::new(WIDTH, HEIGHT, &mut buffer).expect("buffer is large enough");
//!let _ = display.clear(Gray8::WHITE);
//!let _ = Line::new(Point::new(0, 120), Point::new(0, 200))
//!    .into_styled(PrimitiveStyle::with_stroke(Gray8::BLACK, 1))
//!    .draw(&mut display);
//!let _ = Line::new(Point::new(15, 120), Point::new(15, 200))
//!    .into_styled(PrimitiveStyle::with_stroke(Gray8::new(128), 1))
//!    .draw(&mut display);
//!
//!// Encode and refresh, blocks until the panel is done
//!epd.display_image(&mut spi, &mut delay, &display)?;
//!
//!// Set the EPD to sleep
//!epd.sleep(&mut spi, &mut delay)?;
//!# Ok(())
//!# }
//!```

use embedded_hal::{delay::*, digital::*, spi::SpiDevice};
use log::{debug, warn};

use crate::config::{Config, ConfigError};
use crate::encoder::buffer_len;
use crate::error::ErrorKind;
use crate::interface::DisplayInterface;
use crate::traits::Command as _;

#[cfg(feature = "alloc")]
use crate::{encoder::encode_frame, traits::GrayscaleSource};

pub(crate) mod command;
use self::command::Command;

/// Width of the display in pixels
pub const WIDTH: u32 = 800;
/// Height of the display in pixels
pub const HEIGHT: u32 = 480;
/// Bytes of one bitplane
pub const BUFFER_SIZE: usize = buffer_len(WIDTH, HEIGHT);

const IS_BUSY_LOW: bool = true;
/// Reset low time and the time given to come back up afterwards
const RESET_DELAY_MS: u32 = 200;
/// Pause between `DISPLAY_REFRESH` and the first busy poll
const REFRESH_DELAY_MS: u32 = 100;

/// Lifecycle of the panel as tracked by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing was sent yet
    PoweredOff,
    /// Hardware reset in progress, also where a failed initialization ends up
    Resetting,
    /// Power and panel settings are being sent
    Initializing,
    /// Ready for a frame or for sleep
    Idle,
    /// Bitplanes are being written
    Transmitting,
    /// The panel is redrawing
    Refreshing,
    /// Powered off or in deep sleep, only [Gdey075z08::initialize] gets out of here
    Sleeping,
}

/// Operations that are only allowed in some phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// [Gdey075z08::render_frame]
    RenderFrame,
    /// [Gdey075z08::sleep]
    Sleep,
    /// [Gdey075z08::display_image]
    DisplayImage,
    /// [Gdey075z08::wait_until_idle]
    WaitUntilIdle,
}

/// Gdey075z08 driver
///
/// Owns the control lines. The SPI device and the delay are borrowed per call, so they
/// can be shared with other peripherals in between.
pub struct Gdey075z08<SPI, BUSY, DC, RST> {
    /// Connection Interface
    interface: DisplayInterface<SPI, BUSY, DC, RST>,
    config: Config,
    phase: Phase,
}

impl<SPI, BUSY, DC, RST> Gdey075z08<SPI, BUSY, DC, RST>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Creates the driver without touching the hardware
    ///
    /// Call [initialize](Self::initialize) before anything else.
    pub fn new(busy: BUSY, dc: DC, rst: RST, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let interface = DisplayInterface::new(busy, dc, rst, config.busy_wait);
        Ok(Gdey075z08 {
            interface,
            config,
            phase: Phase::PoweredOff,
        })
    }

    /// Resets the panel and sends the power and panel settings
    ///
    /// Allowed in every phase, this is also how the panel wakes up from deep sleep
    /// and how the driver recovers after an error. If it fails the phase stays
    /// [Phase::Resetting].
    pub fn initialize<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.set_phase(Phase::Resetting);
        match self.init(spi, delay) {
            Ok(()) => {
                self.set_phase(Phase::Idle);
                Ok(())
            }
            Err(err) => {
                warn!("initialization failed: {}", err);
                self.set_phase(Phase::Resetting);
                Err(err)
            }
        }
    }

    fn init<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.interface.reset(delay, RESET_DELAY_MS)?;
        self.set_phase(Phase::Initializing);

        // VGH/VGL 20V, VDH 15V, VDL -15V
        self.interface
            .cmd_with_data(spi, Command::POWER_SETTING, &[0x07, 0x07, 0x3F, 0x3F])?;

        self.interface.cmd(spi, Command::POWER_ON)?;
        self.busy_wait(spi, delay)?;

        // KW-3f KWR-2F BWROTP 0f BWOTP 1f
        self.interface
            .cmd_with_data(spi, Command::PANEL_SETTING, &[0x0F])?;

        self.interface.cmd_with_data(spi, Command::DUAL_SPI, &[0x00])?;

        self.interface
            .cmd_with_data(spi, Command::VCOM_AND_DATA_INTERVAL_SETTING, &[0x11, 0x07])?;

        self.interface
            .cmd_with_data(spi, Command::TCON_SETTING, &[Command::LUT_WHITE.address()])?;

        Ok(())
    }

    /// Blocks until the busy line is released
    ///
    /// Sends `GET_STATUS` before every sample. Gives up with
    /// [ErrorKind::PanelNotResponding] once the configured timeout is reached.
    ///
    /// Needs a powered panel: rejected before [initialize](Self::initialize) and
    /// after [sleep](Self::sleep). Useful to wait out a refresh that timed out.
    pub fn wait_until_idle<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        if matches!(self.phase, Phase::PoweredOff | Phase::Sleeping) {
            return Err(self.reject(Operation::WaitUntilIdle));
        }
        self.busy_wait(spi, delay)
    }

    fn busy_wait<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.interface
            .wait_until_idle_with_cmd(spi, delay, IS_BUSY_LOW, Command::GET_STATUS)
    }

    /// Transmits both bitplanes and refreshes the panel
    ///
    /// `white` has a 0 bit for every black pixel, `red` a 1 bit for every red one.
    /// Both need exactly [BUFFER_SIZE] bytes, anything else is rejected before a
    /// single byte is sent. Returns after the refresh is done.
    pub fn render_frame<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        white: &[u8],
        red: &[u8],
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.require_idle(Operation::RenderFrame)?;
        for plane in [white, red] {
            if plane.len() != BUFFER_SIZE {
                return Err(ErrorKind::BufferSizeMismatch {
                    expected: BUFFER_SIZE,
                    actual: plane.len(),
                });
            }
        }

        self.set_phase(Phase::Transmitting);
        self.interface
            .cmd_with_data(spi, Command::DATA_START_TRANSMISSION_1, white)?;
        self.interface
            .cmd_with_data(spi, Command::DATA_START_TRANSMISSION_2, red)?;

        self.set_phase(Phase::Refreshing);
        self.interface.cmd(spi, Command::DISPLAY_REFRESH)?;
        delay.delay_ms(REFRESH_DELAY_MS);
        self.busy_wait(spi, delay)?;

        self.set_phase(Phase::Idle);
        Ok(())
    }

    /// Encodes `source` with the configured red bounds and renders it
    ///
    /// The source must be exactly [WIDTH] x [HEIGHT].
    #[cfg(feature = "alloc")]
    pub fn display_image<DELAY: DelayNs, S: GrayscaleSource + ?Sized>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        source: &S,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.require_idle(Operation::DisplayImage)?;
        let planes = encode_frame(source, self.config.red_bounds, WIDTH, HEIGHT)?;
        self.render_frame(spi, delay, planes.white(), planes.red())
    }

    /// Powers the panel off and puts the controller into deep sleep
    ///
    /// The picture stays visible. Use [initialize](Self::initialize) to wake it up again.
    pub fn sleep<DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.require_idle(Operation::Sleep)?;

        self.interface.cmd(spi, Command::POWER_OFF)?;
        self.set_phase(Phase::Sleeping);
        self.busy_wait(spi, delay)?;

        // check code
        self.interface
            .cmd_with_data(spi, Command::DEEP_SLEEP, &[0xA5])?;
        Ok(())
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Configuration the driver was created with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        WIDTH
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        HEIGHT
    }

    /// Destroys the driver and gives back busy, dc and rst
    pub fn release(self) -> (BUSY, DC, RST) {
        self.interface.release()
    }

    fn require_idle(&self, operation: Operation) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        if self.phase != Phase::Idle {
            return Err(self.reject(operation));
        }
        Ok(())
    }

    fn reject(&self, operation: Operation) -> ErrorKind<SPI, BUSY, DC, RST> {
        warn!("{:?} rejected while {:?}", operation, self.phase);
        ErrorKind::IllegalStateTransition {
            phase: self.phase,
            operation,
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!("{:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}
