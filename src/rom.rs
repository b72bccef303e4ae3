/*!
ROM image loading.

Two shapes are supported:
- The cabinet set: four 2 KiB banks named invaders.h, invaders.g,
  invaders.f, invaders.e, concatenated in that order at $0000.
- A single CP/M diagnostic binary (cpudiag, TST8080, 8080PRE, 8080EXM,
  CPUTEST) loaded at $0100 with diagnostics mode enabled by the machine.

Loading failures carry the path that failed so startup can report it.
*/

use std::fs;
use std::path::Path;

/// Size of one cabinet ROM bank.
pub const BANK_SIZE: usize = 0x800;
/// Bank file names in load order.
pub const BANK_NAMES: [&str; 4] = ["invaders.h", "invaders.g", "invaders.f", "invaders.e"];
/// Load address for CP/M diagnostic binaries.
pub const DIAG_ORIGIN: u16 = 0x0100;

#[derive(Debug)]
pub struct RomImage {
    bytes: Vec<u8>,
    origin: u16,
}

impl RomImage {
    /// Load the four-bank Space Invaders set from `dir`.
    pub fn invaders_set(dir: &Path) -> Result<Self, String> {
        let mut bytes = Vec::with_capacity(4 * BANK_SIZE);
        for name in BANK_NAMES {
            let path = dir.join(name);
            let bank = fs::read(&path)
                .map_err(|e| format!("failed to read ROM bank {}: {e}", path.display()))?;
            if bank.len() != BANK_SIZE {
                return Err(format!(
                    "ROM bank {} is {} bytes, expected {}",
                    path.display(),
                    bank.len(),
                    BANK_SIZE
                ));
            }
            bytes.extend_from_slice(&bank);
        }
        Ok(Self { bytes, origin: 0 })
    }

    /// Load a single diagnostic binary, placed at $0100.
    pub fn diagnostic(path: &Path) -> Result<Self, String> {
        let bytes = fs::read(path)
            .map_err(|e| format!("failed to read diagnostic binary {}: {e}", path.display()))?;
        if DIAG_ORIGIN as usize + bytes.len() > 0x10000 {
            return Err(format!(
                "diagnostic binary {} is too large ({} bytes)",
                path.display(),
                bytes.len()
            ));
        }
        Ok(Self {
            bytes,
            origin: DIAG_ORIGIN,
        })
    }

    /// Build an image from raw bytes (tests and embedded programs).
    pub fn from_bytes(bytes: Vec<u8>, origin: u16) -> Self {
        Self { bytes, origin }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn origin(&self) -> u16 {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_bank_reports_its_path() {
        let err = RomImage::invaders_set(Path::new("/nonexistent")).unwrap_err();
        assert!(err.contains("invaders.h"), "{err}");
    }

    #[test]
    fn from_bytes_keeps_origin() {
        let image = RomImage::from_bytes(vec![0xC3, 0x00, 0x00], DIAG_ORIGIN);
        assert_eq!(image.origin(), 0x0100);
        assert_eq!(image.bytes(), &[0xC3, 0x00, 0x00]);
    }

    #[test]
    fn bank_size_is_checked() {
        let dir = std::env::temp_dir().join("rustvaders-rom-test");
        std::fs::create_dir_all(&dir).unwrap();
        for name in BANK_NAMES {
            std::fs::write(dir.join(name), [0u8; 16]).unwrap();
        }
        let err = RomImage::invaders_set(&dir).unwrap_err();
        assert!(err.contains("expected 2048"), "{err}");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
