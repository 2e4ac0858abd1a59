use crate::error::Result;

/// Shannon entropy in bits per byte: 0.0 for uniform data, 8.0 for random.
pub fn shannon(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] += 1;
    }
    let len = data.len() as f64;
    let mut bits = 0.0;
    for &count in &freq {
        if count > 0 {
            let p = count as f64 / len;
            bits -= p * p.log2();
        }
    }
    bits
}

/// zstd-compressed size over input size. Seeded documents land well under
/// 0.5 while ciphertext stays near 1.0.
pub fn compression_ratio(data: &[u8]) -> Result<f64> {
    if data.is_empty() {
        return Ok(1.0);
    }
    let compressed = zstd::stream::encode_all(data, 3)?;
    Ok(compressed.len() as f64 / data.len() as f64)
}
