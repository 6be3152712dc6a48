use crate::DecodeError;

pub const REG_CRC: u8 = 0;
pub const REG_FAR: u8 = 1;
pub const REG_FDRI: u8 = 2;
pub const REG_CMD: u8 = 4;
pub const REG_CTL0: u8 = 5;
pub const REG_COR0: u8 = 9;
pub const REG_IDCODE: u8 = 12;
pub const REG_COR1: u8 = 14;

/// Configuration register map, indexed by the 5-bit Type 1 address field.
pub const REG_NAMES: [&str; 32] = [
    "CRC", "FAR", "FDRI", "FDRO", "CMD", "CTL0", "MASK", "STAT", "LOUT", "COR0", "MFWR", "CBC",
    "IDCODE", "AXSS", "COR1", "--------", "WBSTAR", "TIMER", "--------", "RBCRC_SW", "--------",
    "--------", "BOOTSTS", "--------", "CTL1", "--------", "--------", "--------", "--------",
    "--------", "--------", "BSPI",
];

/// Values accepted by the CMD register.
pub const CMD_NAMES: [&str; 20] = [
    "NULL",
    "WCFG",
    "MFW",
    "DGHIGH",
    "RCFG",
    "START",
    "RCAP",
    "RCRC",
    "AGHIGH",
    "SWITCH",
    "GRESTORE",
    "SHUTDOWN",
    "GCAPTURE",
    "DESYNC",
    "---------",
    "IPROG",
    "CRCC",
    "LTIMER",
    "BSPI_READ",
    "FALL_EDGE",
];

pub fn register_name(addr: u8) -> Result<&'static str, DecodeError> {
    REG_NAMES
        .get(addr as usize)
        .copied()
        .ok_or(DecodeError::OutOfRange {
            table: "register",
            index: addr.into(),
        })
}

pub fn command_name(cmd: u32) -> Result<&'static str, DecodeError> {
    CMD_NAMES
        .get(cmd as usize)
        .copied()
        .ok_or(DecodeError::OutOfRange {
            table: "command",
            index: cmd,
        })
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Opcode {
    Nop,
    Read,
    Write,
    Reserved,
}

impl Opcode {
    pub fn from_bits(bits: u32) -> Self {
        match bits & 3 {
            0 => Opcode::Nop,
            1 => Opcode::Read,
            2 => Opcode::Write,
            _ => Opcode::Reserved,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::Read => "READ",
            Opcode::Write => "WRITE",
            Opcode::Reserved => "RESERVED",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// A register address from a Type 1 header, always below 32.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct Reg(u8);

impl Reg {
    pub fn new(addr: u8) -> Result<Self, DecodeError> {
        if (addr as usize) < REG_NAMES.len() {
            Ok(Reg(addr))
        } else {
            Err(DecodeError::OutOfRange {
                table: "register",
                index: addr.into(),
            })
        }
    }

    pub fn addr(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        REG_NAMES[self.0 as usize]
    }
}

impl std::fmt::Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}
