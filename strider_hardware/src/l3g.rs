//! SPI driver for the L3G4250D / I3G4250D single-chip gyro family.
//!
//! Only the X axis is read. The chip select line is driven by the SPI
//! peripheral; each register access is a single transfer.

use rppal::spi::{Bus, Mode, SlaveSelect, Spi};
use strider_traits::{MonotonicClock, NotReady, RateReader, RawSample};
use tracing::{debug, trace, warn};

use crate::error::{HwError, Result};
use crate::util::IntervalTimer;

const REG_WHO_AM_I: u8 = 0x0F;
const REG_CTRL1: u8 = 0x20;
const REG_STATUS: u8 = 0x27;
const REG_OUT_X_L: u8 = 0x28;

const READ_FLAG: u8 = 0x80;
const AUTO_INCREMENT_FLAG: u8 = 0x40;

/// Power on, X/Y/Z enabled, highest output data rate.
const CTRL1_NORMAL_XYZ: u8 = 0b1100_1111;
/// ZYXDA: new data available on all axes.
const STATUS_DATA_READY: u8 = 0b0000_1000;

/// WHO_AM_I values of the parts this driver speaks to.
const KNOWN_IDS: [u8; 3] = [0xD3, 0xD4, 0xD7];

pub struct L3gGyro {
    spi: Spi,
    timer: IntervalTimer<MonotonicClock>,
}

impl L3gGyro {
    /// Open the bus and switch the sensor from power-down to normal mode.
    pub fn open(bus: u8, slave_select: u8, clock_hz: u32) -> Result<Self> {
        let bus = match bus {
            0 => Bus::Spi0,
            1 => Bus::Spi1,
            2 => Bus::Spi2,
            other => {
                return Err(HwError::UnsupportedBus {
                    what: "bus",
                    value: other,
                });
            }
        };
        let ss = match slave_select {
            0 => SlaveSelect::Ss0,
            1 => SlaveSelect::Ss1,
            2 => SlaveSelect::Ss2,
            other => {
                return Err(HwError::UnsupportedBus {
                    what: "slave select",
                    value: other,
                });
            }
        };
        // 8-bit words, clock idle high, sample on the second edge.
        let spi = Spi::new(bus, ss, clock_hz, Mode::Mode3)?;
        let mut gyro = Self {
            spi,
            timer: IntervalTimer::start(MonotonicClock::new()),
        };
        gyro.write_reg(REG_CTRL1, CTRL1_NORMAL_XYZ)?;
        debug!(clock_hz, "l3g gyro powered up");
        Ok(gyro)
    }

    /// Read WHO_AM_I and reject parts this driver does not know.
    pub fn identify(&mut self) -> Result<u8> {
        let id = self.read_reg(REG_WHO_AM_I)?;
        if KNOWN_IDS.contains(&id) {
            Ok(id)
        } else {
            Err(HwError::UnknownDevice(id))
        }
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<()> {
        self.spi.write(&[reg, value])?;
        Ok(())
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8> {
        let mut rx = [0u8; 2];
        self.spi.transfer(&mut rx, &[READ_FLAG | reg, 0x00])?;
        Ok(rx[1])
    }

    fn read_x(&mut self) -> Result<i16> {
        let mut rx = [0u8; 3];
        self.spi
            .transfer(&mut rx, &[READ_FLAG | AUTO_INCREMENT_FLAG | REG_OUT_X_L, 0x00, 0x00])?;
        Ok(i16::from_le_bytes([rx[1], rx[2]]))
    }

    fn try_poll(&mut self) -> Result<Option<i16>> {
        let status = self.read_reg(REG_STATUS)?;
        trace!(status, "l3g status register");
        if status & STATUS_DATA_READY == 0 {
            return Ok(None);
        }
        self.read_x().map(Some)
    }
}

impl RateReader for L3gGyro {
    fn poll(&mut self) -> std::result::Result<RawSample, NotReady> {
        match self.try_poll() {
            Ok(Some(rate)) => {
                let interval_ms = self.timer.lap_ms();
                trace!(rate, interval_ms, "l3g sample");
                Ok(RawSample::new(rate, interval_ms))
            }
            Ok(None) => Err(NotReady),
            Err(e) => {
                warn!(error = %e, "l3g read failed; treating as not ready");
                Err(NotReady)
            }
        }
    }
}
