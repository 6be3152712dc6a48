use crate::DecodeError;
use crate::bits::extract;
use crate::regs::{REG_CMD, REG_COR0, REG_COR1, REG_CTL0, REG_FAR, command_name};

/// Field name, high bit, low bit.
pub type FieldDef = (&'static str, u32, u32);

pub const FAR_FIELDS: &[FieldDef] = &[
    ("BLOCK_TYPE", 25, 23),
    ("BOTTOM", 22, 22),
    ("ROW", 21, 17),
    ("COLUMN", 16, 7),
    ("MINOR", 6, 0),
];

pub const CTL0_FIELDS: &[FieldDef] = &[
    ("EFUSE_KEY", 31, 31),
    ("ICAP_SELECT", 30, 30),
    ("OVERTEMP", 12, 12),
    ("FALLBACK", 10, 10),
    ("GLUTMASK_B", 8, 8),
    ("FARSRC", 7, 7),
    ("DEC", 6, 6),
    ("SBITS", 5, 4),
    ("PERSIST", 3, 3),
    ("GTS_USR_B", 0, 0),
];

pub const COR0_FIELDS: &[FieldDef] = &[
    ("PWRDWN_STAT", 27, 27),
    ("DONE_PIPE", 25, 25),
    ("DRIVE_DONE", 24, 24),
    ("SINGLE", 23, 23),
    ("OSCFSEL", 22, 17),
    ("SSCLKSRC", 16, 15),
    ("DONE_CYCLE", 14, 12),
    ("MATCH_CYCLE", 11, 9),
    ("LOCK_CYCLE", 8, 6),
    ("GTS_CYCLE", 5, 3),
    ("GWE_CYCLE", 2, 0),
];

pub const COR1_FIELDS: &[FieldDef] = &[
    ("PERSIST", 17, 17),
    ("RBCRC_ACTION", 16, 15),
    ("RBCRC_NO_PIN", 9, 9),
    ("RBCRC_EN", 8, 8),
    ("BPI_1ST", 3, 2),
    ("BPI_PAGE_SIZE", 1, 0),
];

// CMD values at or above this are shown raw rather than looked up.
const CMD_LOOKUP_LIMIT: u32 = 24;

/// Decoded payload of a single-word Type 1 packet.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RegValue {
    Cmd { value: u32, name: &'static str },
    Fields(Vec<(&'static str, u32)>),
    Raw([u8; 4]),
}

impl RegValue {
    /// Looks up a field produced by a field breakdown.
    pub fn field(&self, name: &str) -> Option<u32> {
        match self {
            RegValue::Fields(fields) => fields.iter().find(|f| f.0 == name).map(|f| f.1),
            _ => None,
        }
    }
}

fn split_fields(val: u32, defs: &[FieldDef]) -> Result<RegValue, DecodeError> {
    let fields = defs
        .iter()
        .map(|&(name, high, low)| extract(val, high, low).map(|v| (name, v)))
        .collect::<Result<_, _>>()?;
    Ok(RegValue::Fields(fields))
}

pub fn decode_value(addr: u8, payload: [u8; 4]) -> Result<RegValue, DecodeError> {
    let val = u32::from_be_bytes(payload);
    match addr {
        REG_CMD if val < CMD_LOOKUP_LIMIT => Ok(RegValue::Cmd {
            value: val,
            name: command_name(val)?,
        }),
        REG_FAR => split_fields(val, FAR_FIELDS),
        REG_CTL0 => split_fields(val, CTL0_FIELDS),
        REG_COR0 => split_fields(val, COR0_FIELDS),
        REG_COR1 => split_fields(val, COR1_FIELDS),
        _ => Ok(RegValue::Raw(payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regs::REG_IDCODE;
    use assert_matches::assert_matches;

    #[test]
    fn cmd_start() {
        assert_eq!(
            decode_value(REG_CMD, [0, 0, 0, 5]),
            Ok(RegValue::Cmd {
                value: 5,
                name: "START"
            })
        );
    }

    #[test]
    fn cmd_unknown() {
        assert_matches!(
            decode_value(REG_CMD, [0, 0, 0, 21]),
            Err(DecodeError::OutOfRange {
                table: "command",
                index: 21
            })
        );
        assert_eq!(
            decode_value(REG_CMD, [0, 0, 0, 24]),
            Ok(RegValue::Raw([0, 0, 0, 24]))
        );
        assert_eq!(
            decode_value(REG_CMD, [1, 0, 0, 5]),
            Ok(RegValue::Raw([1, 0, 0, 5]))
        );
    }

    #[test]
    fn far() {
        // 0x02345678 = 0b0000_0010_0011_0100_0101_0110_0111_1000
        let val = decode_value(REG_FAR, [0x02, 0x34, 0x56, 0x78]).unwrap();
        assert_eq!(
            val,
            RegValue::Fields(vec![
                ("BLOCK_TYPE", 4),
                ("BOTTOM", 0),
                ("ROW", 0x1a),
                ("COLUMN", 0xac),
                ("MINOR", 0x78),
            ])
        );
        assert_eq!(val.field("ROW"), Some(0x0234_5678 >> 17 & 0x1f));
        assert_eq!(val.field("COLUMN"), Some(0x0234_5678 >> 7 & 0x3ff));
        assert_eq!(val.field("BOGUS"), None);
    }

    #[test]
    fn ctl0() {
        let val = decode_value(REG_CTL0, 0x8000_0531u32.to_be_bytes()).unwrap();
        assert_eq!(val.field("EFUSE_KEY"), Some(1));
        assert_eq!(val.field("ICAP_SELECT"), Some(0));
        assert_eq!(val.field("FALLBACK"), Some(1));
        assert_eq!(val.field("GLUTMASK_B"), Some(1));
        assert_eq!(val.field("SBITS"), Some(3));
        assert_eq!(val.field("GTS_USR_B"), Some(1));
        assert_eq!(val.field("PERSIST"), Some(0));
    }

    #[test]
    fn cor0() {
        let val = decode_value(REG_COR0, 0x0200_3fe5u32.to_be_bytes()).unwrap();
        assert_eq!(val.field("DONE_PIPE"), Some(1));
        assert_eq!(val.field("OSCFSEL"), Some(0));
        assert_eq!(val.field("DONE_CYCLE"), Some(3));
        assert_eq!(val.field("MATCH_CYCLE"), Some(7));
        assert_eq!(val.field("LOCK_CYCLE"), Some(7));
        assert_eq!(val.field("GTS_CYCLE"), Some(4));
        assert_eq!(val.field("GWE_CYCLE"), Some(5));
    }

    #[test]
    fn cor1() {
        let val = decode_value(REG_COR1, 0x0002_830cu32.to_be_bytes()).unwrap();
        assert_eq!(val.field("PERSIST"), Some(1));
        assert_eq!(val.field("RBCRC_ACTION"), Some(1));
        assert_eq!(val.field("RBCRC_NO_PIN"), Some(1));
        assert_eq!(val.field("RBCRC_EN"), Some(1));
        assert_eq!(val.field("BPI_1ST"), Some(3));
        assert_eq!(val.field("BPI_PAGE_SIZE"), Some(0));
    }

    #[test]
    fn raw() {
        assert_eq!(
            decode_value(REG_IDCODE, [0x03, 0x62, 0xd0, 0x93]),
            Ok(RegValue::Raw([0x03, 0x62, 0xd0, 0x93]))
        );
    }

    #[test]
    fn deterministic() {
        for addr in [REG_CMD, REG_FAR, REG_CTL0, REG_COR0, REG_COR1] {
            let payload = [0x00, 0x00, 0x00, 0x07];
            assert_eq!(decode_value(addr, payload), decode_value(addr, payload));
        }
    }
}
