//! SPI Commands for the GDEY075Z08 7.5" black/white/red E-Ink Display

use crate::traits;

/// GDEY075Z08 commands
///
/// The panel uses a UC8179 compatible controller. Most of these are never sent by the
/// driver but are listed for completeness.
#[allow(dead_code)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Resolution, LUT source, black/white/red mode, scan directions, soft reset
    PANEL_SETTING = 0x00,
    /// Internal/external power selection and the VGH/VGL/VDH/VDL levels
    POWER_SETTING = 0x01,
    /// Powers down the charge pump, T-con and drivers. Busy drops until done.
    POWER_OFF = 0x02,
    POWER_OFF_SEQUENCE_SETTING = 0x03,
    /// Powers up following the power on sequence. Busy drops until done.
    POWER_ON = 0x04,
    POWER_ON_MEASURE = 0x05,
    BOOSTER_SOFT_START = 0x06,
    /// Enters deep sleep. Only executed with the check code 0xA5, leaving it
    /// requires a hardware reset.
    DEEP_SLEEP = 0x07,
    /// Starts writing the black/white plane into SRAM
    DATA_START_TRANSMISSION_1 = 0x10,
    DATA_STOP = 0x11,
    /// Drives the panel from SRAM. Busy drops until the refresh is finished.
    DISPLAY_REFRESH = 0x12,
    /// Starts writing the red plane into SRAM
    DATA_START_TRANSMISSION_2 = 0x13,
    /// Dual SPI mode selection
    DUAL_SPI = 0x15,

    LUT_FOR_VCOM = 0x20,
    LUT_BLUE = 0x21,
    LUT_WHITE = 0x22,
    LUT_GRAY_1 = 0x23,
    LUT_GRAY_2 = 0x24,
    LUT_RED_0 = 0x25,
    LUT_RED_1 = 0x26,
    LUT_RED_2 = 0x27,
    LUT_RED_3 = 0x28,
    LUT_XON = 0x29,

    /// Frame rate
    PLL_CONTROL = 0x30,

    TEMPERATURE_SENSOR_COMMAND = 0x40,
    TEMPERATURE_CALIBRATION = 0x41,
    TEMPERATURE_SENSOR_WRITE = 0x42,
    TEMPERATURE_SENSOR_READ = 0x43,

    /// Border output and the interval between VCOM and data
    VCOM_AND_DATA_INTERVAL_SETTING = 0x50,
    LOW_POWER_DETECTION = 0x51,

    /// Non-overlap period of gate and source
    TCON_SETTING = 0x60,
    TCON_RESOLUTION = 0x61,
    SPI_FLASH_CONTROL = 0x65,

    REVISION = 0x70,
    /// Reads the status flags. Also makes the controller refresh the busy line.
    GET_STATUS = 0x71,

    AUTO_MEASUREMENT_VCOM = 0x80,
    READ_VCOM_VALUE = 0x81,
    VCM_DC_SETTING = 0x82,
}

impl traits::Command for Command {
    /// Returns the address of the command
    fn address(self) -> u8 {
        self as u8
    }
}
