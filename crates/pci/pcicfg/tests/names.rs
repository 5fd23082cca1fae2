//! Every named code in every code space, with its exact description.

use pcicfg::class::{self, CodeSpace};

/// Resolves every code in `0..=last` and checks the defined codes and their
/// strings against `expected`.
fn assert_names(space: CodeSpace, last: u32, expected: &[(u32, &str)]) {
    let resolved: Vec<(u32, &str)> = (0..=last)
        .filter_map(|code| class::resolve(space, code).map(|name| (code, name)))
        .collect();
    assert_eq!(resolved, expected, "{space:?}");
}

fn assert_subclasses(base: u8, expected: &[(u32, &str)]) {
    assert_names(CodeSpace::Subclass(base), 0xFF, expected);
    assert_eq!(class::base_class_name(base).is_some(), !expected.is_empty());
    for &(sub, name) in expected {
        let sub = u8::try_from(sub).unwrap();
        assert_eq!(class::subclass_name(base, sub), Some(name));
    }
}

#[test]
fn capability_names() {
    assert_names(
        CodeSpace::Capability,
        0xFFFF,
        &[
            (0x01, "PCI Power Management Interface"),
            (0x02, "Accelerated Graphics Port"),
            (0x03, "Vital Product Data"),
            (0x04, "Slot Numbering (for Bridge)"),
            (0x05, "Message Signaled Interrupts"),
            (0x06, "CompactPCI Hot Swap"),
            (0x07, "PCI-X (Deprecated)"),
            (0x08, "HyperTransport (Deprecated)"),
            (0x09, "Vendor Specific"),
            (0x0A, "Debug port"),
            (0x0B, "CompactPCI central resource control"),
            (0x0C, "PCI Hot-Plug (Deprecated)"),
            (0x0D, "PCI Bridge Subsystem Vendor ID"),
            (0x0E, "AGP 8x (Deprecated)"),
            (0x0F, "Secure Device (Deprecated)"),
            (0x10, "PCI Express"),
            (0x11, "MSI-X"),
            (0x12, "Serial ATA Data/Index Configuration"),
            (0x13, "Conventional PCI Advanced Features (AF)"),
            (0x14, "Enhanced Allocation"),
            (0x15, "Flattening Portal Bridge"),
        ],
    );
}

#[test]
fn extended_capability_names() {
    assert_names(
        CodeSpace::ExtendedCapability,
        0xFFFF,
        &[
            (0x0001, "Advanced Error Reporting"),
            (0x0002, "Virtual Channel (VC)"),
            (0x0003, "Device Serial Number"),
            (0x0004, "Power Budgeting"),
            (0x0005, "Root Complex Link Declaration"),
            (0x0006, "Root Complex Internal Link Control"),
            (0x0007, "Root Complex Event Collector Endpoint Association"),
            (0x0008, "Multi-Function Virtual Channel (MFVC)"),
            (0x0009, "Virtual Channel (VC)"),
            (0x000A, "Root Complex Register Block (RCRB) Header"),
            (0x000B, "Vendor-Specific Extended Capability (VSEC)"),
            (0x000D, "Access Control Services (ACS)"),
            (0x000E, "Alternative Routing-ID Interpretation (ARI)"),
            (0x000F, "Address Translation Services (ATS)"),
            (0x0010, "Single Root I/O Virtualization (SR-IOV)"),
            (0x0011, "Multi-Root I/O Virtualization (MR-IOV) (Deprecated)"),
            (0x0012, "Multicast"),
            (0x0013, "Page Request Interface (PRI)"),
            (0x0015, "Resizable BAR"),
            (0x0016, "Dynamic Power Allocation (DPA)"),
            (0x0017, "TPH Requester"),
            (0x0018, "Latency Tolerance Reporting (LTR)"),
            (0x0019, "Secondary PCI Express"),
            (0x001A, "Protocol Multiplexing (PMUX)"),
            (0x001B, "Process Address Space ID (PASID)"),
            (0x001C, "LN Requester (LNR)"),
            (0x001D, "Downstream Port Containment (DPC)"),
            (0x001E, "L1 PM Substates"),
            (0x001F, "Precision Time Measurement (PTM)"),
            (0x0020, "PCI Express over M-PHY (M-PCIe)"),
            (0x0021, "FRS Queueing"),
            (0x0022, "Readiness Time Reporting"),
            (0x0023, "Designated Vendor-Specific Extended Capability"),
            (0x0024, "VF Resizable BAR"),
            (0x0025, "Data Link Feature"),
            (0x0026, "Physical Layer 16.0 GT/s"),
            (0x0027, "Lane Margining at the Receiver"),
            (0x0028, "Hierarchy ID"),
            (0x0029, "Native PCIe Enclosure Management (NPEM)"),
            (0x002A, "Physical Layer 32.0 GT/s"),
            (0x002B, "Alternate Protocol"),
            (0x002C, "System Firmware Intermediary (SFI)"),
            (0x002D, "Shadow Functions"),
            (0x002E, "Data Object Exchange"),
            (0x002F, "Device 3"),
            (0x0030, "Integrity and Data Encryption (IDE)"),
            (0x0031, "Physical Layer 64.0 GT/s Capability"),
            (0x0032, "Flit Logging"),
            (0x0033, "Flit Performance Measurement"),
            (0x0034, "Flit Error Injection"),
        ],
    );
}

#[test]
fn base_class_names() {
    assert_names(
        CodeSpace::BaseClass,
        0xFFFF,
        &[
            (0x01, "Mass Storage Controller"),
            (0x02, "Network controller"),
            (0x03, "Display controller"),
            (0x04, "Multimedia device"),
            (0x05, "Memory controller"),
            (0x06, "Bridge device"),
            (0x07, "Simple communication controllers"),
            (0x08, "Base system peripherals"),
            (0x09, "Input devices"),
            (0x0A, "Docking stations"),
            (0x0B, "Processors"),
            (0x0C, "Serial bus controllers"),
            (0x0D, "Wireless controller"),
            (0x0E, "Intelligent I/O controllers"),
            (0x0F, "Satellite communication controllers"),
            (0x10, "Encryption/Decryption controllers"),
            (0x11, "Data acquisition and signal processing controllers"),
            (0x12, "Processing accelerators"),
            (0x13, "Non-Essential Instrumentation"),
        ],
    );
}

#[test]
fn cxl_memory_prog_if_names() {
    let expected: [(u32, &str); 2] = [
        (0x00, "Vendor Specific Interface)"),
        (0x01, "CXL 2.0 or later"),
    ];
    assert_names(CodeSpace::CxlMemoryProgIf, 0xFF, &expected);
    for (pi, name) in expected {
        let pi = u8::try_from(pi).unwrap();
        assert_eq!(class::prog_if_name(0x05, 0x02, pi), Some(name));
    }
    for sub in [0x00, 0x01, 0x80] {
        assert_eq!(class::prog_if_name(0x05, sub, 0x00), None);
    }
}

#[test]
fn undefined_base_classes_have_no_subclasses() {
    for base in [0x00, 0x14, 0x80, 0xFF] {
        assert_subclasses(base, &[]);
    }
}

#[test]
fn mass_storage_subclasses() {
    assert_subclasses(
        0x01,
        &[
            (0x00, "SCSI Device or Controller"),
            (0x01, "IDE Controller"),
            (0x02, "Floppy Disk Controller - Vendor Specific Interface"),
            (0x03, "IPI Bus Controller - Vendor Specific Interface"),
            (0x04, "RAID Controller - Vendor Specific Interface"),
            (0x05, "ATA Controller"),
            (0x06, "SATA Controller"),
            (0x07, "SAS Controller"),
            (0x08, "Non-Volatile Memory Subsystem"),
            (0x09, "Universal Flash Storage Controller"),
            (0x80, "Other Mass storage Controller"),
        ],
    );
}

#[test]
fn network_subclasses() {
    assert_subclasses(
        0x02,
        &[
            (0x00, "Ethernet Controller"),
            (0x01, "Token Ring Controller"),
            (0x02, "FDDI Controller"),
            (0x03, "ATM Controller"),
            (0x04, "ISDN Controller"),
            (0x05, "WorldFip Controller"),
            (0x06, "PICMG"),
            (0x07, "InfiniBand Controller"),
            (0x08, "Host fabric Controller - Vendor Specific"),
            (0x80, "Other Network Controller"),
        ],
    );
}

#[test]
fn display_subclasses() {
    assert_subclasses(
        0x03,
        &[
            (0x00, "VGA Compatible Controller"),
            (0x01, "XGA Controller"),
            (0x02, "3D Controller"),
            (0x80, "Other Controller"),
        ],
    );
}

#[test]
fn multimedia_subclasses() {
    assert_subclasses(
        0x04,
        &[
            (0x00, "Video Device"),
            (0x01, "Audio Device"),
            (0x02, "Computer Telephone Device"),
            (0x03, "HD Audio Device"),
            (0x80, "Other Multimedia device"),
        ],
    );
}

#[test]
fn memory_subclasses() {
    assert_subclasses(
        0x05,
        &[
            (0x00, "Ram"),
            (0x01, "Flash"),
            (0x02, "CXL Memory"),
            (0x80, "Other Memory"),
        ],
    );
}

#[test]
fn bridge_subclasses() {
    assert_subclasses(
        0x06,
        &[
            (0x00, "Host Bridge"),
            (0x01, "ISA Bridge"),
            (0x02, "EISA"),
            (0x03, "MCA"),
            (0x04, "PCI-to-PCI Bridge"),
            (0x05, "PCMCIA Bridge"),
            (0x06, "NuBus Bridge"),
            (0x07, "CardBus Bridge"),
            (0x08, "RaceWay Bridge"),
            (0x09, "Semi-Transparent Bridge"),
            (0x0A, "InfiniBand to PCI Host Bridge"),
            (0x0B, "Advanced Switching to PCI Host Bridge"),
            (0x80, "Other Bridge"),
        ],
    );
}

#[test]
fn simple_communication_subclasses() {
    assert_subclasses(
        0x07,
        &[
            (0x00, "Generic XT Compatible Serial Controller"),
            (0x01, "Parallel Port"),
            (0x02, "Multi Port Serial Controller"),
            (0x03, "Generic Modem"),
            (0x04, "GPIB Controller"),
            (0x05, "SMART Card"),
            (0x80, "Other Communcations Device"),
        ],
    );
}

#[test]
fn system_peripheral_subclasses() {
    assert_subclasses(
        0x08,
        &[
            (0x00, "Programmable Interrupt Controller"),
            (0x01, "DMA Controller"),
            (0x02, "System Timer"),
            (0x03, "Generic Real Time Clock (RTC) Controller"),
            (0x04, "Generic PCI Hot Plug Contoller"),
            (0x05, "SD Host Controller"),
            (0x06, "IOMMU"),
            (0x07, "Root Complex Event Collector"),
            (0x80, "Other System Peripheral"),
        ],
    );
}

#[test]
fn input_subclasses() {
    assert_subclasses(
        0x09,
        &[
            (0x00, "Keyboard Controller"),
            (0x01, "Digitizer (pen)"),
            (0x02, "Mouse Controller"),
            (0x03, "Scanner Controller"),
            (0x04, "Gameport Controller"),
            (0x80, "Other Controller"),
        ],
    );
}

#[test]
fn docking_station_subclasses() {
    assert_subclasses(
        0x0A,
        &[
            (0x00, "Generic Docking Station"),
            (0x01, "Other type of Docking Station"),
        ],
    );
}

#[test]
fn processor_subclasses() {
    assert_subclasses(
        0x0B,
        &[
            (0x00, "386"),
            (0x01, "486"),
            (0x02, "Pentium"),
            (0x10, "Alpha"),
            (0x20, "PowerPC"),
            (0x30, "MIPS"),
            (0x40, "Co-Processor"),
            (0x80, "Other Processor"),
        ],
    );
}

#[test]
fn serial_bus_subclasses() {
    assert_subclasses(
        0x0C,
        &[
            (0x00, "Firewire"),
            (0x01, "ACCESS.bus"),
            (0x02, "SSA"),
            (0x03, "USB"),
            (0x04, "Fibre Channel"),
            (0x05, "SM Bus"),
            (0x06, "Infiniband (Depricated)"),
            (0x07, "IPMI"),
            (0x08, "SERCOS"),
            (0x09, "CANbus"),
            (0x0A, "MIPI I3C Controller"),
            (0x80, "OTher Controller"),
        ],
    );
}

#[test]
fn wireless_subclasses() {
    assert_subclasses(
        0x0D,
        &[
            (0x00, "iRDA Compatible Controller"),
            (0x01, "IR Controller"),
            (0x10, "RF Controller"),
            (0x11, "Bluetooth"),
            (0x12, "Broadband"),
            (0x20, "Ethernet 5 GHz"),
            (0x21, "Ethernet 2.4 GHz"),
            (0x40, "Cellular Controller / Modem"),
            (0x41, "Cellular Controller + Ethrenet"),
            (0x80, "Other Wireless Controller"),
        ],
    );
}

#[test]
fn intelligent_io_subclasses() {
    assert_subclasses(0x0E, &[(0x00, "Intelligent IO")]);
}

#[test]
fn satellite_subclasses() {
    assert_subclasses(
        0x0F,
        &[
            (0x01, "TV"),
            (0x02, "Audio"),
            (0x03, "Voice"),
            (0x04, "Data"),
            (0x80, "Other"),
        ],
    );
}

#[test]
fn encryption_subclasses() {
    assert_subclasses(
        0x10,
        &[
            (0x00, "Network and Computing Encryption Decryption controller"),
            (0x10, "Entertainment encryption and decryption controller"),
            (0x80, "Other encryption and decryption controller"),
        ],
    );
}

#[test]
fn data_acquisition_subclasses() {
    assert_subclasses(
        0x11,
        &[
            (0x00, "DPIO Modules"),
            (0x01, "Performance Counters"),
            (0x10, "Communications synchronization"),
            (0x20, "Management Card"),
            (0x80, "Other data acquisition controller"),
        ],
    );
}

#[test]
fn processing_accelerator_subclasses() {
    assert_subclasses(
        0x12,
        &[
            (0x00, "Processing Accelerator - Vendor Specific Interface"),
            (0x01, "SNIA Smart Data Acceleration Interface (SDXI)"),
        ],
    );
}

#[test]
fn non_essential_instrumentation_subclasses() {
    assert_subclasses(
        0x13,
        &[(0x00, "Non Essential Instrumentation - Vendor Specific Interface")],
    );
}
