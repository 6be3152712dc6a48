use crate::DecodeError;

/// Returns bits `[high:low]` of `val`, right-aligned. Both ends are inclusive.
pub fn extract(val: u32, high: u32, low: u32) -> Result<u32, DecodeError> {
    if high < low || high > 31 {
        return Err(DecodeError::InvalidRange { high, low });
    }
    let width = high - low + 1;
    let mask = if width == 32 { !0 } else { (1 << width) - 1 };
    Ok(val >> low & mask)
}
