//! Header report rendering.

use pcicfg::printer::{self, MAX_INDENT};
use pcicfg::{DecodeError, regs};

fn image() -> Vec<u8> {
    let mut data = vec![0u8; regs::LEGACY_SPACE_SIZE];
    data[regs::VENDOR_ID..regs::VENDOR_ID + 2].copy_from_slice(&0x8086u16.to_le_bytes());
    data[regs::DEVICE_ID..regs::DEVICE_ID + 2].copy_from_slice(&0x1234u16.to_le_bytes());
    data[regs::CLASS] = 0x05;
    data[regs::SUBCLASS] = 0x02;
    data[regs::MAX_LATENCY] = 255;
    data
}

#[test]
fn indent_above_max_matches_max() {
    let data = image();
    for indent in [33, 64, 100, usize::MAX] {
        assert_eq!(
            printer::render(Some(data.as_slice()), indent).unwrap().to_string(),
            printer::render(Some(data.as_slice()), MAX_INDENT).unwrap().to_string()
        );
    }
}

#[test]
fn fields_nest_two_deeper() {
    let data = image();
    let text = printer::render(Some(data.as_slice()), 4).unwrap().to_string();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("    PCIe Config Space HDR:"));
    assert_eq!(lines.next(), Some("      Vendor ID             0x8086"));
    assert_eq!(lines.last(), Some("      Maximum Latency       255"));
    assert_eq!(text.lines().count(), 28);
}

#[test]
fn no_line_is_indented_past_max() {
    let data = image();
    for indent in 0..=40 {
        let text = printer::render(Some(data.as_slice()), indent).unwrap().to_string();
        for line in text.lines() {
            let lead = line.len() - line.trim_start().len();
            assert!(lead <= MAX_INDENT, "indent {indent}: {line:?}");
        }
    }
}

#[test]
fn null_and_short_input() {
    assert_eq!(printer::render(None, 0).unwrap().to_string(), "");
    let data = image();
    assert!(matches!(
        printer::render(Some(&data[..63]), 0),
        Err(DecodeError::BufferTooShort { len: 63, .. })
    ));
}
