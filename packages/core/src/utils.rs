// ABOUTME: Shared utility functions for profilekit
// ABOUTME: zlib compression, base64 transport encoding and line wrapping

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Compress data using zlib at the best compression level
pub fn compress_data(data: &[u8]) -> Result<Vec<u8>, String> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(data)
        .map_err(|e| format!("Compression failed: {}", e))?;
    encoder
        .finish()
        .map_err(|e| format!("Compression finish failed: {}", e))
}

/// Decompress zlib data
pub fn decompress_data(data: &[u8]) -> Result<Vec<u8>, String> {
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| format!("Decompression failed: {}", e))?;
    Ok(decompressed)
}

/// Encode bytes with the standard, padded base64 alphabet
pub fn encode_transport(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64, ignoring any whitespace (e.g. from `insert_newlines`)
pub fn decode_transport(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(compact)
}

/// Break a long string into lines of at most `every` characters
pub fn insert_newlines(text: &str, every: usize) -> String {
    if every == 0 {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(every)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
