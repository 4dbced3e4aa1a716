use crate::config::BusyWait;
use crate::error::ErrorKind;
use crate::traits::Command;
use core::marker::PhantomData;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};
use log::{trace, warn};

/// Linux spidev refuses transfers above 4096 bytes by default
const LINUX_MAX_TRANSFER: usize = 4096;

/// The Connection Interface of the panel
///
/// Owns the control lines. Chip select is part of the [SpiDevice], so every
/// command and every data block is framed by it.
pub(crate) struct DisplayInterface<SPI, BUSY, DC, RST> {
    /// SPI
    _spi: PhantomData<SPI>,
    /// Low for busy, Wait until display is ready!
    busy: BUSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Resetting
    rst: RST,
    /// How long to sleep between busy polls and when to give up
    busy_wait: BusyWait,
}

impl<SPI, BUSY, DC, RST> DisplayInterface<SPI, BUSY, DC, RST>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Creates a new `DisplayInterface` struct
    pub fn new(busy: BUSY, dc: DC, rst: RST, busy_wait: BusyWait) -> Self {
        DisplayInterface {
            _spi: PhantomData,
            busy,
            dc,
            rst,
            busy_wait,
        }
    }

    /// Gives back the owned pins
    pub fn release(self) -> (BUSY, DC, RST) {
        (self.busy, self.dc, self.rst)
    }

    /// Basic function for sending [Commands](Command).
    ///
    /// Enables direct interaction with the device with the help of [data()](DisplayInterface::data())
    pub(crate) fn cmd<T: Command>(
        &mut self,
        spi: &mut SPI,
        command: T,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        trace!("cmd {:#04x}", command.address());
        // low for commands
        self.dc.set_low().map_err(ErrorKind::DcError)?;

        // Transfer the command over spi
        self.write(spi, &[command.address()])
    }

    /// Basic function for sending an array of u8-values of data over spi
    ///
    /// The whole block goes out as one write, only split where the platform needs it.
    pub(crate) fn data(
        &mut self,
        spi: &mut SPI,
        data: &[u8],
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        // high for data
        self.dc.set_high().map_err(ErrorKind::DcError)?;

        self.write(spi, data)
    }

    /// Basic function for sending [Commands](Command) and the data belonging to it.
    pub(crate) fn cmd_with_data<T: Command>(
        &mut self,
        spi: &mut SPI,
        command: T,
        data: &[u8],
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.cmd(spi, command)?;
        self.data(spi, data)
    }

    // spi write helper/abstraction function
    fn write(&mut self, spi: &mut SPI, data: &[u8]) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        if cfg!(target_os = "linux") {
            for data_chunk in data.chunks(LINUX_MAX_TRANSFER) {
                spi.write(data_chunk).map_err(ErrorKind::SpiError)?;
            }
            Ok(())
        } else {
            spi.write(data).map_err(ErrorKind::SpiError)
        }
    }

    /// Samples the busy line once
    ///
    /// is_busy_low is TRUE for this panel: low means the controller is still working.
    pub(crate) fn is_busy(
        &mut self,
        is_busy_low: bool,
    ) -> Result<bool, ErrorKind<SPI, BUSY, DC, RST>> {
        if is_busy_low {
            self.busy.is_low().map_err(ErrorKind::BusyError)
        } else {
            self.busy.is_high().map_err(ErrorKind::BusyError)
        }
    }

    /// Waits until the device isn't busy anymore, for devices that need a command to
    /// refresh their busy pin
    ///
    /// Each poll sends `status_command` and then samples the line. Between polls the
    /// configured interval is slept. Once the time slept reaches the timeout this gives
    /// up with [ErrorKind::PanelNotResponding], without a timeout it never returns
    /// while the line stays busy.
    pub(crate) fn wait_until_idle_with_cmd<T: Command, DELAY: DelayNs>(
        &mut self,
        spi: &mut SPI,
        delay: &mut DELAY,
        is_busy_low: bool,
        status_command: T,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        let BusyWait {
            poll_interval_us,
            timeout_ms,
        } = self.busy_wait;
        let mut waited_us: u64 = 0;

        loop {
            self.cmd(spi, status_command)?;
            if !self.is_busy(is_busy_low)? {
                trace!("idle after {}us", waited_us);
                return Ok(());
            }

            if let Some(timeout_ms) = timeout_ms {
                if waited_us >= u64::from(timeout_ms) * 1000 {
                    let waited_ms = u32::try_from(waited_us / 1000).unwrap_or(u32::MAX);
                    warn!("panel still busy after {}ms, giving up", waited_ms);
                    return Err(ErrorKind::PanelNotResponding { waited_ms });
                }
            }

            if poll_interval_us > 0 {
                delay.delay_us(poll_interval_us);
                waited_us += u64::from(poll_interval_us);
            }
        }
    }

    /// Resets the device.
    ///
    /// Pulls reset low for `duration_ms` and gives the controller the same time to
    /// come back up afterwards. Also the only way out of deep sleep.
    pub(crate) fn reset<DELAY: DelayNs>(
        &mut self,
        delay: &mut DELAY,
        duration_ms: u32,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.rst.set_low().map_err(ErrorKind::RstError)?;
        delay.delay_ms(duration_ms);
        self.rst.set_high().map_err(ErrorKind::RstError)?;
        delay.delay_ms(duration_ms);
        Ok(())
    }
}
