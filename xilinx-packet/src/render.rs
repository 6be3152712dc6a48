//! Text rendering of decoded packets, one line per record.

use std::fmt::{Display, Formatter, Result};

use crate::packet::Record;
use crate::value::RegValue;

impl Display for RegValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            RegValue::Cmd { name, .. } => write!(f, "{name:<9}"),
            RegValue::Fields(fields) => {
                for (name, val) in fields {
                    write!(f, "{name}({val}) ")?;
                }
                Ok(())
            }
            RegValue::Raw(raw) => f.write_str(&hex::encode(raw)),
        }
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} ", hex::encode(self.header()))?;
        match self {
            Record::Type1Empty { opcode, reg, .. } => write!(f, "Type 1: {opcode} {reg:<8}"),
            Record::Type1Single {
                opcode, reg, value, ..
            } => write!(f, "Type 1: {opcode} {reg:<8} {value}"),
            Record::Type1Undecoded {
                opcode,
                reg,
                payload,
                ..
            } => write!(f, "Type 1: {opcode} {reg:<8} {}", hex::encode(payload)),
            Record::Type1Multi {
                opcode,
                reg,
                word_count,
                ..
            } => write!(f, "Type 1: {opcode} {reg:<8} {word_count} words"),
            Record::Type2 { word_count, .. } => write!(f, "Type 2, wordcount={word_count}"),
            Record::Invalid { .. } => f.write_str("INVALID Type"),
        }
    }
}

/// Wraps a record to prefix its line with the header offset.
pub struct WithOffset<'a>(pub &'a Record);

impl Display for WithOffset<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{:08x}: {}", self.0.offset(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::packet::decode;

    fn lines(words: &[u32]) -> Vec<String> {
        let mut data = vec![0xaa, 0x99, 0x55, 0x66];
        for w in words {
            data.extend(w.to_be_bytes());
        }
        decode(&data)
            .unwrap()
            .iter()
            .map(|r| r.to_string())
            .collect()
    }

    #[test]
    fn cmd_line() {
        assert_eq!(
            lines(&[0x3000_8001, 5]),
            ["30008001 Type 1: WRITE CMD      START    "]
        );
    }

    #[test]
    fn empty_line() {
        assert_eq!(
            lines(&[0x2800_e000]),
            ["2800e000 Type 1: READ STAT    "]
        );
    }

    #[test]
    fn far_line() {
        assert_eq!(
            lines(&[0x3000_2001, 0x0234_5678]),
            ["30002001 Type 1: WRITE FAR      BLOCK_TYPE(4) BOTTOM(0) ROW(26) COLUMN(172) MINOR(120) "]
        );
    }

    #[test]
    fn raw_line() {
        assert_eq!(
            lines(&[0x3001_8001, 0x0362_d093]),
            ["30018001 Type 1: WRITE IDCODE   0362d093"]
        );
    }

    #[test]
    fn multi_and_type2_lines() {
        assert_eq!(
            lines(&[0x3000_4000, 0x5000_0001, 0, 0x3000_4002, 0, 0]),
            [
                "30004000 Type 1: WRITE FDRI    ",
                "50000001 Type 2, wordcount=1",
                "30004002 Type 1: WRITE FDRI     2 words",
            ]
        );
    }

    #[test]
    fn undecoded_line() {
        let data = [0xaa, 0x99, 0x55, 0x66, 0x30, 0x00, 0x80, 0x01, 0, 0, 0, 0x15];
        let err = decode(&data).unwrap_err();
        assert_eq!(
            err.records[0].to_string(),
            "30008001 Type 1: WRITE CMD      00000015"
        );
    }

    #[test]
    fn offset_prefix() {
        let data = [0xaa, 0x99, 0x55, 0x66, 0x30, 0x00, 0x80, 0x00];
        let recs = decode(&data).unwrap();
        assert_eq!(
            super::WithOffset(&recs[0]).to_string(),
            "00000004: 30008000 Type 1: WRITE CMD     "
        );
    }
}
