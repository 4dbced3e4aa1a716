//! Recording fakes for the hardware traits
//!
//! Every pin change, SPI write, busy sample and delay lands in one shared log, so
//! tests can assert on the exact order of what reached the panel.

use core::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, Operation, SpiBus, SpiDevice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Dc(bool),
    Rst(bool),
    Cs(bool),
    /// Level sampled on the busy line
    Busy(bool),
    Write(Vec<u8>),
    DelayNs(u32),
    DelayUs(u32),
    DelayMs(u32),
}

/// What the controller saw: commands and the data blocks following them
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Frame {
    Command(u8),
    Data(Vec<u8>),
}

#[derive(Clone, Default)]
pub(crate) struct Harness {
    log: Rc<RefCell<Vec<Event>>>,
    writes: Rc<Cell<usize>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    /// Commands and data blocks in the order they went out
    ///
    /// Consecutive data writes are merged, so chunked transfers show up as one block.
    pub fn frames(&self) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut dc_high = false;
        let mut continues_write = false;
        for event in self.log.borrow().iter() {
            match event {
                Event::Dc(level) => {
                    dc_high = *level;
                    continues_write = false;
                }
                Event::Write(bytes) if !dc_high => {
                    frames.extend(bytes.iter().copied().map(Frame::Command));
                    continues_write = true;
                }
                Event::Write(bytes) => {
                    let merged = match frames.last_mut() {
                        Some(Frame::Data(block)) if continues_write => {
                            block.extend_from_slice(bytes);
                            true
                        }
                        _ => false,
                    };
                    if !merged {
                        frames.push(Frame::Data(bytes.clone()));
                    }
                    continues_write = true;
                }
                _ => continues_write = false,
            }
        }
        frames
    }

    /// Number of busy samples taken so far
    pub fn busy_reads(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|event| matches!(event, Event::Busy(_)))
            .count()
    }

    pub fn spi(&self) -> RecordingSpi {
        RecordingSpi {
            harness: self.clone(),
            fail_at: None,
        }
    }

    /// A SPI device whose `n`th write (counting from 0) fails
    pub fn failing_spi(&self, n: usize) -> RecordingSpi {
        RecordingSpi {
            harness: self.clone(),
            fail_at: Some(n),
        }
    }

    pub fn spi_bus(&self) -> RecordingBus {
        RecordingBus {
            harness: self.clone(),
        }
    }

    pub fn dc(&self) -> RecordingPin {
        RecordingPin {
            harness: self.clone(),
            event: Event::Dc,
        }
    }

    pub fn rst(&self) -> RecordingPin {
        RecordingPin {
            harness: self.clone(),
            event: Event::Rst,
        }
    }

    pub fn cs(&self) -> RecordingPin {
        RecordingPin {
            harness: self.clone(),
            event: Event::Cs,
        }
    }

    /// A busy line returning the given levels, then panicking on further reads
    pub fn busy<I: IntoIterator<Item = bool>>(&self, levels: I) -> ScriptedBusy {
        ScriptedBusy {
            harness: self.clone(),
            script: levels.into_iter().collect(),
            fallback: None,
        }
    }

    /// A busy line returning the given levels, then `level` forever
    pub fn busy_then<I: IntoIterator<Item = bool>>(&self, levels: I, level: bool) -> ScriptedBusy {
        ScriptedBusy {
            harness: self.clone(),
            script: levels.into_iter().collect(),
            fallback: Some(level),
        }
    }

    /// A busy line that always reads high, which is idle for this panel
    pub fn idle_busy(&self) -> ScriptedBusy {
        self.stuck_busy(true)
    }

    pub fn stuck_busy(&self, level: bool) -> ScriptedBusy {
        self.busy_then([], level)
    }

    pub fn delay(&self) -> RecordingDelay {
        RecordingDelay {
            harness: self.clone(),
        }
    }
}

pub(crate) struct RecordingSpi {
    harness: Harness,
    fail_at: Option<usize>,
}

impl spi::ErrorType for RecordingSpi {
    type Error = spi::ErrorKind;
}

impl SpiDevice for RecordingSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let index = self.harness.writes.get();
                    self.harness.writes.set(index + 1);
                    if self.fail_at == Some(index) {
                        return Err(spi::ErrorKind::Other);
                    }
                    self.harness.push(Event::Write(bytes.to_vec()));
                }
                _ => panic!("the panel is write only"),
            }
        }
        Ok(())
    }
}

/// Bare bus for use behind `embedded-hal-bus` devices
pub(crate) struct RecordingBus {
    harness: Harness,
}

impl spi::ErrorType for RecordingBus {
    type Error = spi::ErrorKind;
}

impl SpiBus for RecordingBus {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        panic!("the panel is write only")
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.harness.push(Event::Write(words.to_vec()));
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        panic!("the panel is write only")
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        panic!("the panel is write only")
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub(crate) struct RecordingPin {
    harness: Harness,
    event: fn(bool) -> Event,
}

impl digital::ErrorType for RecordingPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.harness.push((self.event)(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.harness.push((self.event)(true));
        Ok(())
    }
}

pub(crate) struct ScriptedBusy {
    harness: Harness,
    script: VecDeque<bool>,
    fallback: Option<bool>,
}

impl ScriptedBusy {
    fn sample(&mut self) -> bool {
        let level = match self.script.pop_front() {
            Some(level) => level,
            None => self.fallback.expect("unexpected read of the busy line"),
        };
        self.harness.push(Event::Busy(level));
        level
    }
}

impl digital::ErrorType for ScriptedBusy {
    type Error = digital::ErrorKind;
}

impl InputPin for ScriptedBusy {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.sample())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.sample())
    }
}

pub(crate) struct RecordingDelay {
    harness: Harness,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.harness.push(Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.harness.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.harness.push(Event::DelayMs(ms));
    }
}
