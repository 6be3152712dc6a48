use arrayref::array_ref;
use log::{debug, trace, warn};

use crate::DecodeError;
use crate::error::DecodeFailure;
use crate::regs::{Opcode, Reg};
use crate::value::{RegValue, decode_value};

pub const SYNC_WORD: [u8; 4] = [0xaa, 0x99, 0x55, 0x66];

/// Classified packet header.
///
/// ```text
/// type 1: [31:29] 001  [28:27] opcode  [17:13] register  [10:0] word count
/// type 2: [31:29] 010  [26:0] word count
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Header {
    Type1 {
        opcode: Opcode,
        reg: Reg,
        word_count: u32,
    },
    Type2 {
        word_count: u32,
    },
    Invalid,
}

impl Header {
    pub fn parse(raw: [u8; 4]) -> Result<Header, DecodeError> {
        let ph = u32::from_be_bytes(raw);
        Ok(match ph >> 29 {
            1 => Header::Type1 {
                opcode: Opcode::from_bits(ph >> 27),
                reg: Reg::new((ph >> 13 & 0x1f) as u8)?,
                word_count: ph & 0x7ff,
            },
            2 => Header::Type2 {
                word_count: ph & 0x7ff_ffff,
            },
            _ => Header::Invalid,
        })
    }
}

/// One reported packet. NOPs are never reported.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Record {
    Type1Empty {
        offset: usize,
        header: [u8; 4],
        opcode: Opcode,
        reg: Reg,
    },
    Type1Single {
        offset: usize,
        header: [u8; 4],
        opcode: Opcode,
        reg: Reg,
        value: RegValue,
    },
    /// Single-word write whose payload failed to decode; the walk stops here.
    Type1Undecoded {
        offset: usize,
        header: [u8; 4],
        opcode: Opcode,
        reg: Reg,
        payload: [u8; 4],
    },
    Type1Multi {
        offset: usize,
        header: [u8; 4],
        opcode: Opcode,
        reg: Reg,
        word_count: u32,
    },
    Type2 {
        offset: usize,
        header: [u8; 4],
        word_count: u32,
    },
    Invalid {
        offset: usize,
        header: [u8; 4],
    },
}

impl Record {
    pub fn offset(&self) -> usize {
        match *self {
            Record::Type1Empty { offset, .. }
            | Record::Type1Single { offset, .. }
            | Record::Type1Undecoded { offset, .. }
            | Record::Type1Multi { offset, .. }
            | Record::Type2 { offset, .. }
            | Record::Invalid { offset, .. } => offset,
        }
    }

    pub fn header(&self) -> [u8; 4] {
        match *self {
            Record::Type1Empty { header, .. }
            | Record::Type1Single { header, .. }
            | Record::Type1Undecoded { header, .. }
            | Record::Type1Multi { header, .. }
            | Record::Type2 { header, .. }
            | Record::Invalid { header, .. } => header,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum State {
    Unsynced,
    Synced,
    // The last record was reported, the walk fails on the next step.
    Failed(DecodeError),
    Done,
}

pub fn find_sync(data: &[u8]) -> Result<usize, DecodeError> {
    data.windows(4)
        .position(|w| w == SYNC_WORD)
        .ok_or(DecodeError::SyncNotFound)
}

/// Walks the packet stream following the sync word.
///
/// Yields one record per non-NOP packet. After the first error the parser
/// yields nothing more.
#[derive(Debug, Clone)]
pub struct PacketParser<'a> {
    data: &'a [u8],
    pos: usize,
    state: State,
}

impl<'a> PacketParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            state: State::Unsynced,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<Result<Record, DecodeError>> {
        self.clone().next()
    }

    fn fail(&mut self, err: DecodeError) -> Option<Result<Record, DecodeError>> {
        warn!("decode stopped at offset {:#x}: {err}", self.pos);
        self.state = State::Done;
        Some(Err(err))
    }

    /// Checks that `word_count` payload words follow the header at `offset`.
    fn payload_end(&self, offset: usize, word_count: u32) -> Result<usize, DecodeError> {
        let needed = 4 + word_count as usize * 4;
        let available = self.data.len() - offset;
        if needed > available {
            Err(DecodeError::TruncatedStream {
                offset,
                needed,
                available,
            })
        } else {
            Ok(offset + needed)
        }
    }

    // Reports `rec`, deferring a truncation error to the next step.
    fn emit_skipping(
        &mut self,
        rec: Record,
        end: Result<usize, DecodeError>,
    ) -> Option<Result<Record, DecodeError>> {
        match end {
            Ok(end) => self.pos = end,
            Err(err) => self.state = State::Failed(err),
        }
        Some(Ok(rec))
    }
}

impl Iterator for PacketParser<'_> {
    type Item = Result<Record, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.state, State::Synced) {
                State::Unsynced => match find_sync(self.data) {
                    Ok(pos) => {
                        debug!("sync word at {pos:#x}");
                        self.pos = pos + 4;
                    }
                    Err(err) => return self.fail(err),
                },
                State::Synced => (),
                State::Failed(err) => return self.fail(err),
                State::Done => {
                    self.state = State::Done;
                    return None;
                }
            }
            if self.pos + 4 > self.data.len() {
                debug!("end of stream at {:#x}", self.pos);
                self.state = State::Done;
                return None;
            }
            let offset = self.pos;
            let header = *array_ref!(self.data, offset, 4);
            let ph = match Header::parse(header) {
                Ok(ph) => ph,
                Err(err) => return self.fail(err),
            };
            debug!("{offset:#010x}: {} {ph:?}", hex::encode(header));
            match ph {
                Header::Type1 {
                    opcode: Opcode::Nop,
                    word_count,
                    ..
                } => {
                    match self.payload_end(offset, word_count) {
                        Ok(end) => self.pos = end,
                        Err(err) => return self.fail(err),
                    }
                    trace!("nop, skipped {word_count} words");
                }
                Header::Type1 {
                    opcode,
                    reg,
                    word_count: 0,
                } => {
                    self.pos = offset + 4;
                    return Some(Ok(Record::Type1Empty {
                        offset,
                        header,
                        opcode,
                        reg,
                    }));
                }
                Header::Type1 {
                    opcode,
                    reg,
                    word_count: 1,
                } => {
                    let end = match self.payload_end(offset, 1) {
                        Ok(end) => end,
                        Err(err) => return self.fail(err),
                    };
                    let payload = *array_ref!(self.data, offset + 4, 4);
                    let value = match decode_value(reg.addr(), payload) {
                        Ok(value) => value,
                        Err(err) => {
                            self.state = State::Failed(DecodeError::BadValue {
                                offset,
                                header,
                                source: Box::new(err),
                            });
                            return Some(Ok(Record::Type1Undecoded {
                                offset,
                                header,
                                opcode,
                                reg,
                                payload,
                            }));
                        }
                    };
                    self.pos = end;
                    return Some(Ok(Record::Type1Single {
                        offset,
                        header,
                        opcode,
                        reg,
                        value,
                    }));
                }
                Header::Type1 {
                    opcode,
                    reg,
                    word_count,
                } => {
                    trace!("skipping {word_count} words of {reg}");
                    let end = self.payload_end(offset, word_count);
                    return self.emit_skipping(
                        Record::Type1Multi {
                            offset,
                            header,
                            opcode,
                            reg,
                            word_count,
                        },
                        end,
                    );
                }
                Header::Type2 { word_count } => {
                    trace!("skipping {word_count} words of type 2 payload");
                    let end = self.payload_end(offset, word_count);
                    return self.emit_skipping(
                        Record::Type2 {
                            offset,
                            header,
                            word_count,
                        },
                        end,
                    );
                }
                Header::Invalid => {
                    self.state = State::Failed(DecodeError::InvalidHeader { offset, header });
                    return Some(Ok(Record::Invalid { offset, header }));
                }
            }
        }
    }
}

/// Decodes the whole stream.
pub fn decode(data: &[u8]) -> Result<Vec<Record>, DecodeFailure> {
    let mut records = vec![];
    for item in PacketParser::new(data) {
        match item {
            Ok(rec) => records.push(rec),
            Err(error) => return Err(DecodeFailure { records, error }),
        }
    }
    Ok(records)
}
