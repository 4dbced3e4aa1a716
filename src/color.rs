//! The three pixel classes the panel can show

/// Classification of a single pixel
///
/// The panel takes two planes: the black/white plane (1 = white) and the red plane
/// (1 = red). Red wins over whatever is set in the black/white plane.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum PixelClass {
    /// Black pixel
    Black,
    /// Red pixel
    Red,
    /// White pixel, also the background
    #[default]
    White,
}

impl PixelClass {
    /// Bit of this class in the black/white plane
    pub fn white_bit(self) -> bool {
        !matches!(self, PixelClass::Black)
    }

    /// Bit of this class in the red plane
    pub fn red_bit(self) -> bool {
        matches!(self, PixelClass::Red)
    }

    /// A full byte of this class for the black/white plane
    pub fn white_byte(self) -> u8 {
        if self.white_bit() {
            0xff
        } else {
            0x00
        }
    }

    /// A full byte of this class for the red plane
    pub fn red_byte(self) -> u8 {
        if self.red_bit() {
            0xff
        } else {
            0x00
        }
    }

    /// Reads the class back from the bits of both planes
    pub fn from_bits(white: bool, red: bool) -> Self {
        match (white, red) {
            (_, true) => PixelClass::Red,
            (false, false) => PixelClass::Black,
            (true, false) => PixelClass::White,
        }
    }
}
