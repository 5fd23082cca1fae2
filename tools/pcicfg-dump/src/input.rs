//! Loading configuration space captures.
//!
//! Two formats are understood: the raw bytes of a configuration space (as
//! read from `/sys/bus/pci/devices/*/config`), and the hex text printed by
//! `lspci -xxx` / `lspci -xxxx`:
//!
//! ```text
//! 00:1f.2 SATA controller: Intel Corporation ...
//! 00: 86 80 02 29 07 04 b0 02 02 01 01 01 00 00 00 00
//! 10: 01 d0 00 00 01 d8 00 00 01 d4 00 00 01 d8 00 00
//! ```
//!
//! Lines that are not `offset: bytes` lines (device titles, blank lines) are
//! skipped.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use pcicfg::regs;

use crate::cli::InputFormat;

/// Reads the capture at `path`.
pub fn load(path: &Path, format: InputFormat) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    decode(&bytes, format).with_context(|| format!("decoding {}", path.display()))
}

/// Decodes capture file contents.
pub fn decode(bytes: &[u8], format: InputFormat) -> Result<Vec<u8>> {
    match format {
        InputFormat::Raw => Ok(bytes.to_vec()),
        InputFormat::Hex => {
            let text = std::str::from_utf8(bytes).context("hex capture is not UTF-8 text")?;
            parse_hex(text)
        }
        InputFormat::Auto => match std::str::from_utf8(bytes) {
            Ok(text) if looks_like_hex(text) => {
                log::debug!("capture looks like lspci hex output");
                parse_hex(text)
            }
            _ => {
                log::debug!("treating capture as raw bytes");
                Ok(bytes.to_vec())
            }
        },
    }
}

fn looks_like_hex(text: &str) -> bool {
    text.lines().any(|line| split_offset_line(line).is_some())
}

/// Splits `"40: 01 50 ..."` into its offset text and byte text.
fn split_offset_line(line: &str) -> Option<(&str, &str)> {
    let (offset, rest) = line.trim_start().split_once(':')?;
    let is_offset = !offset.is_empty() && offset.bytes().all(|b| b.is_ascii_hexdigit());
    // "00:1f.2 SATA controller" has no space after the colon.
    let starts_with_space = rest.starts_with(char::is_whitespace);
    (is_offset && starts_with_space).then_some((offset, rest))
}

/// Parses `lspci -xxx` style hex text into a buffer.
///
/// Bytes land at the offset given on their line; gaps between lines are
/// zero-filled.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut lines_seen = 0usize;

    for (lineno, line) in text.lines().enumerate() {
        let Some((offset_text, rest)) = split_offset_line(line) else {
            if !line.trim().is_empty() {
                log::debug!("skipping line {}: {line:?}", lineno + 1);
            }
            continue;
        };
        lines_seen += 1;

        let offset = usize::from_str_radix(offset_text, 16)
            .with_context(|| format!("line {}: bad offset {offset_text:?}", lineno + 1))?;

        for (i, token) in rest.split_whitespace().enumerate() {
            ensure!(
                token.len() == 2,
                "line {}: expected a two-digit hex byte, found {token:?}",
                lineno + 1
            );
            let byte = u8::from_str_radix(token, 16)
                .with_context(|| format!("line {}: bad byte {token:?}", lineno + 1))?;
            let at = offset + i;
            if at >= regs::EXTENDED_SPACE_SIZE {
                bail!("line {}: byte at {at:#x} is past the end of configuration space", lineno + 1);
            }
            if data.len() <= at {
                data.resize(at + 1, 0);
            }
            data[at] = byte;
        }
    }

    ensure!(lines_seen > 0, "no `offset: bytes` lines found");
    Ok(data)
}
