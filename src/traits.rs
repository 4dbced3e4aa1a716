/// All commands need to have this trait which gives the address of the command
/// which needs to be send via SPI with activated CommandsPin (Data/Command Pin in CommandMode)
pub(crate) trait Command: Copy {
    fn address(self) -> u8;
}

/// Anything that can hand out 8-bit grayscale pixels
///
/// Palette or higher bit-depth images need to be converted to 8-bit luma by the
/// implementor, the encoder only ever sees values in `0..=255`.
pub trait GrayscaleSource {
    /// Width of the image in pixels
    fn width(&self) -> u32;

    /// Height of the image in pixels
    fn height(&self) -> u32;

    /// Luma of the pixel at (x, y), 0 is black and 255 is white
    ///
    /// Only called with `x < width()` and `y < height()`.
    fn luma(&self, x: u32, y: u32) -> u8;
}

impl<T: GrayscaleSource + ?Sized> GrayscaleSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn luma(&self, x: u32, y: u32) -> u8 {
        (**self).luma(x, y)
    }
}
