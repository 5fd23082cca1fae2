//! Full device report: header, class, and capability lists.

use std::fmt::Write;

use anyhow::Result;
use pcicfg::class::{self, CodeSpace};
use pcicfg::{ConfigSpace, printer, regs};

use crate::cli::Section;

/// Writes the requested report `sections` for `space` into `out`.
pub fn write_report(
    out: &mut String,
    space: &ConfigSpace<'_>,
    sections: &[Section],
    indent: usize,
) -> Result<()> {
    let hdr = space.header()?;
    let indent = indent.min(printer::MAX_INDENT);
    let pad = " ".repeat(indent);
    let inner = " ".repeat((indent + 2).min(printer::MAX_INDENT));

    for section in sections {
        match section {
            Section::Header => {
                write!(out, "{}", printer::HeaderReport::new(&hdr, indent))?;
            }
            Section::Class => {
                let cc = hdr.class_code();
                writeln!(out, "{pad}Class:")?;
                writeln!(out, "{inner}{:<22}{}", "Base Class", or_unknown(cc.base_name()))?;
                writeln!(out, "{inner}{:<22}{}", "Sub Class", or_unknown(cc.subclass_name()))?;
                if let Some(name) = cc.prog_if_name() {
                    writeln!(out, "{inner}{:<22}{name}", "Programming Interface")?;
                }
            }
            Section::Caps => write_capabilities(out, space, &pad, &inner)?,
            Section::Ecaps => write_extended_capabilities(out, space, &pad, &inner)?,
        }
    }
    Ok(())
}

fn or_unknown(name: Option<&'static str>) -> &'static str {
    name.unwrap_or("Unknown")
}

fn write_capabilities(
    out: &mut String,
    space: &ConfigSpace<'_>,
    pad: &str,
    inner: &str,
) -> Result<()> {
    writeln!(out, "{pad}Capabilities:")?;
    for (offset, cap) in space.capabilities() {
        let name = or_unknown(class::resolve(CodeSpace::Capability, cap.id.into()));
        writeln!(out, "{inner}[{offset:#04x}] {:#04x} {name}", cap.id)?;

        // Details are best effort; a capability that does not fit is still
        // listed.
        let detail = match cap.id {
            regs::CAP_ID_POWER_MANAGEMENT => space.power_management(offset).map(|pm| {
                format!(
                    "version {}, state {:?}, PME {}",
                    pm.pmc.version(),
                    pm.pmcsr.device_state(),
                    if pm.pmcsr.pme_enable() { "enabled" } else { "disabled" }
                )
            }),
            regs::CAP_ID_MSI => space.msi(offset).map(|msi| {
                format!(
                    "enable {}, vectors {}/{}, {}-bit, address {:#x}, data {:#06x}",
                    u8::from(msi.control.enable()),
                    msi.control.vectors_allocated(),
                    msi.control.vectors_requested(),
                    if msi.control.addr64() { 64 } else { 32 },
                    msi.address,
                    msi.data
                )
            }),
            regs::CAP_ID_MSIX => space.msix(offset).map(|msix| {
                format!(
                    "enable {}, table size {}, table BAR{} +{:#x}, PBA BAR{} +{:#x}",
                    u8::from(msix.control.enable()),
                    msix.table_size(),
                    msix.table.bir(),
                    msix.table.byte_offset(),
                    msix.pba.bir(),
                    msix.pba.byte_offset()
                )
            }),
            regs::CAP_ID_VENDOR => space
                .vendor_capability(offset)
                .map(|vendor| format!("length {}", vendor.length)),
            _ => continue,
        };
        match detail {
            Ok(detail) => writeln!(out, "{inner}  {detail}")?,
            Err(err) => log::warn!("capability at {offset:#04x}: {err}"),
        }
    }
    Ok(())
}

fn write_extended_capabilities(
    out: &mut String,
    space: &ConfigSpace<'_>,
    pad: &str,
    inner: &str,
) -> Result<()> {
    if !space.is_extended() {
        log::info!("no extended configuration space in capture");
        return Ok(());
    }
    writeln!(out, "{pad}Extended Capabilities:")?;
    for (offset, cap) in space.extended_capabilities() {
        let name = or_unknown(cap.name());
        writeln!(
            out,
            "{inner}[{offset:#05x}] {:#06x} v{} {name}",
            cap.id, cap.version
        )?;

        let detail = match cap.id {
            regs::ECAP_ID_DSN => space
                .device_serial_number(offset)
                .map(|dsn| format!("serial {dsn}")),
            regs::ECAP_ID_VSEC => space.vendor_extended_capability(offset).map(|vsec| {
                format!(
                    "id {:#06x}, rev {}, length {}",
                    vsec.header.vsec_id(),
                    vsec.header.revision(),
                    vsec.header.length()
                )
            }),
            regs::ECAP_ID_DVSEC => space.designated_vendor_capability(offset).map(|dvsec| {
                format!(
                    "vendor {:#06x}, id {:#06x}, rev {}, length {}",
                    dvsec.header.vendor_id(),
                    dvsec.dvsec_id,
                    dvsec.header.revision(),
                    dvsec.header.length()
                )
            }),
            _ => continue,
        };
        match detail {
            Ok(detail) => writeln!(out, "{inner}  {detail}")?,
            Err(err) => log::warn!("extended capability at {offset:#05x}: {err}"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn put16(data: &mut [u8], offset: usize, value: u16) {
        data[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn put32(data: &mut [u8], offset: usize, value: u32) {
        data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn device() -> Vec<u8> {
        let mut data = vec![0u8; regs::EXTENDED_SPACE_SIZE];
        put16(&mut data, regs::VENDOR_ID, 0x8086);
        put16(&mut data, regs::DEVICE_ID, 0x1234);
        put16(&mut data, regs::STATUS, regs::STATUS_CAPABILITIES_LIST);
        data[regs::CLASS] = 0x05;
        data[regs::SUBCLASS] = 0x02;
        data[regs::PROG_IF] = 0x01;
        data[regs::CAPABILITIES_PTR] = 0x50;
        // MSI, 32-bit, one vector, then an unknown capability.
        put16(&mut data, 0x50, 0x6005);
        put16(&mut data, 0x52, 0x0001);
        put32(&mut data, 0x54, 0xFEE0_0000);
        put16(&mut data, 0x58, 0x0041);
        put16(&mut data, 0x60, 0x00FE);
        // DSN.
        put32(&mut data, 0x100, 0x0001_0003);
        put32(&mut data, 0x104, 0x0000_0002);
        put32(&mut data, 0x108, 0x0000_0001);
        data
    }

    fn report(data: &[u8], sections: &[Section]) -> String {
        let mut out = String::new();
        write_report(&mut out, &ConfigSpace::new(data), sections, 0).unwrap();
        out
    }

    #[test]
    fn class_section() {
        let out = report(&device(), &[Section::Class]);
        assert_eq!(
            out,
            "Class:\n  Base Class            Memory controller\n  Sub Class             CXL Memory\n  Programming Interface CXL 2.0 or later\n"
        );
    }

    #[test]
    fn capability_sections() {
        let out = report(&device(), &[Section::Caps, Section::Ecaps]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "Capabilities:",
                "  [0x50] 0x05 Message Signaled Interrupts",
                "    enable 1, vectors 1/1, 32-bit, address 0xfee00000, data 0x0041",
                "  [0x60] 0xfe Unknown",
                "Extended Capabilities:",
                "  [0x100] 0x0003 v1 Device Serial Number",
                "    serial 00-00-00-01-00-00-00-02",
            ]
        );
    }

    #[test]
    fn header_section_matches_printer() {
        let data = device();
        let out = report(&data, &[Section::Header]);
        let expected = printer::render(Some(&data[..]), 0).unwrap().to_string();
        assert_eq!(out, expected);
    }

    #[test]
    fn legacy_capture_has_no_extended_section() {
        let data = device();
        let out = report(&data[..regs::LEGACY_SPACE_SIZE], &[Section::Ecaps]);
        assert_eq!(out, "");
    }

    #[test]
    fn short_capture_is_an_error() {
        let data = [0u8; 16];
        let mut out = String::new();
        assert!(write_report(&mut out, &ConfigSpace::new(&data), &Section::ALL, 0).is_err());
    }
}
