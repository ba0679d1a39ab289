use pronunciation_batcher::domain::audio::{encode_wav, PcmFormat};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// 0.2s of loud 16-bit mono PCM at 24 kHz
pub fn loud_pcm() -> Vec<u8> {
    (0..4_800i16)
        .flat_map(|i| if i % 2 == 0 { 9_000i16 } else { -9_000 }.to_le_bytes())
        .collect()
}

pub fn loud_wav() -> Vec<u8> {
    encode_wav(&loud_pcm(), PcmFormat::GEMINI)
}

/// 0.5s of digital silence
pub fn silent_wav() -> Vec<u8> {
    encode_wav(&vec![0u8; 24_000], PcmFormat::GEMINI)
}

/// File entries of a zip in stored order, directories skipped
pub fn read_zip(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).expect("valid zip");
    let mut files = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("zip entry");
        if file.is_dir() {
            continue;
        }
        let mut content = Vec::new();
        file.read_to_end(&mut content).expect("zip entry content");
        files.push((file.name().to_string(), content));
    }
    files
}
