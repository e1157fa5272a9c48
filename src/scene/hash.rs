/// 32-bit polynomial string digest (`h = h * 31 + unit`) over UTF-16 code units.
///
/// Accumulation wraps in two's-complement `i32`; the result is the absolute value of the final
/// accumulator, so `i32::MIN` maps to `2^31` and the return type is `u32`.
pub fn prompt_hash(text: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in text.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    h.unsigned_abs()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/hash.rs"]
mod tests;
