//! Class code tables: base classes, subclasses, and programming interfaces.
//!
//! These spaces are sparse (subclass 0x80 "other" follows a handful of low
//! codes, wireless groups by 0x10), so each table is a list of `(code, name)`
//! pairs sorted by code and searched for an exact match.

/// A sparse code table, sorted by code with no duplicates.
pub type CodeTable = &'static [(u8, &'static str)];

/// Base class names.
pub static BASE_CLASSES: CodeTable = &[
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
];

/// Base class 0x01.
pub static MASS_STORAGE: CodeTable = &[
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
];

/// Base class 0x02.
pub static NETWORK: CodeTable = &[
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
];

/// Base class 0x03.
pub static DISPLAY: CodeTable = &[
    (0x00, "VGA Compatible Controller"),
    (0x01, "XGA Controller"),
    (0x02, "3D Controller"),
    (0x80, "Other Controller"),
];

/// Base class 0x04.
pub static MULTIMEDIA: CodeTable = &[
    (0x00, "Video Device"),
    (0x01, "Audio Device"),
    (0x02, "Computer Telephone Device"),
    (0x03, "HD Audio Device"),
    (0x80, "Other Multimedia device"),
];

/// Base class 0x05.
pub static MEMORY: CodeTable = &[
    (0x00, "Ram"),
    (0x01, "Flash"),
    (0x02, "CXL Memory"),
    (0x80, "Other Memory"),
];

/// Programming interfaces of base class 0x05, subclass 0x02 (CXL memory).
pub static CXL_MEMORY_PROG_IF: CodeTable = &[
    (0x00, "Vendor Specific Interface)"),
    (0x01, "CXL 2.0 or later"),
];

/// Base class 0x06.
pub static BRIDGE: CodeTable = &[
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
];

/// Base class 0x07.
pub static SIMPLE_COMMUNICATION: CodeTable = &[
    (0x00, "Generic XT Compatible Serial Controller"),
    (0x01, "Parallel Port"),
    (0x02, "Multi Port Serial Controller"),
    (0x03, "Generic Modem"),
    (0x04, "GPIB Controller"),
    (0x05, "SMART Card"),
    (0x80, "Other Communcations Device"),
];

/// Base class 0x08.
pub static SYSTEM_PERIPHERAL: CodeTable = &[
    (0x00, "Programmable Interrupt Controller"),
    (0x01, "DMA Controller"),
    (0x02, "System Timer"),
    (0x03, "Generic Real Time Clock (RTC) Controller"),
    (0x04, "Generic PCI Hot Plug Contoller"),
    (0x05, "SD Host Controller"),
    (0x06, "IOMMU"),
    (0x07, "Root Complex Event Collector"),
    (0x80, "Other System Peripheral"),
];

/// Base class 0x09.
pub static INPUT: CodeTable = &[
    (0x00, "Keyboard Controller"),
    (0x01, "Digitizer (pen)"),
    (0x02, "Mouse Controller"),
    (0x03, "Scanner Controller"),
    (0x04, "Gameport Controller"),
    (0x80, "Other Controller"),
];

/// Base class 0x0A.
pub static DOCKING_STATION: CodeTable = &[
    (0x00, "Generic Docking Station"),
    (0x01, "Other type of Docking Station"),
];

/// Base class 0x0B.
pub static PROCESSOR: CodeTable = &[
    (0x00, "386"),
    (0x01, "486"),
    (0x02, "Pentium"),
    (0x10, "Alpha"),
    (0x20, "PowerPC"),
    (0x30, "MIPS"),
    (0x40, "Co-Processor"),
    (0x80, "Other Processor"),
];

/// Base class 0x0C.
pub static SERIAL_BUS: CodeTable = &[
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
];

/// Base class 0x0D.
pub static WIRELESS: CodeTable = &[
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
];

/// Base class 0x0E.
pub static INTELLIGENT_IO: CodeTable = &[(0x00, "Intelligent IO")];

/// Base class 0x0F.
pub static SATELLITE: CodeTable = &[
    (0x01, "TV"),
    (0x02, "Audio"),
    (0x03, "Voice"),
    (0x04, "Data"),
    (0x80, "Other"),
];

/// Base class 0x10.
pub static ENCRYPTION: CodeTable = &[
    (0x00, "Network and Computing Encryption Decryption controller"),
    (0x10, "Entertainment encryption and decryption controller"),
    (0x80, "Other encryption and decryption controller"),
];

/// Base class 0x11.
pub static DATA_ACQUISITION: CodeTable = &[
    (0x00, "DPIO Modules"),
    (0x01, "Performance Counters"),
    (0x10, "Communications synchronization"),
    (0x20, "Management Card"),
    (0x80, "Other data acquisition controller"),
];

/// Base class 0x12.
pub static PROCESSING_ACCELERATOR: CodeTable = &[
    (0x00, "Processing Accelerator - Vendor Specific Interface"),
    (0x01, "SNIA Smart Data Acceleration Interface (SDXI)"),
];

/// Base class 0x13.
pub static NON_ESSENTIAL_INSTRUMENTATION: CodeTable = &[(
    0x00,
    "Non Essential Instrumentation - Vendor Specific Interface",
)];

/// Returns the subclass table of `base`, if the base class is defined.
#[must_use]
pub fn subclass_table(base: u8) -> Option<CodeTable> {
    let table = match base {
        0x01 => MASS_STORAGE,
        0x02 => NETWORK,
        0x03 => DISPLAY,
        0x04 => MULTIMEDIA,
        0x05 => MEMORY,
        0x06 => BRIDGE,
        0x07 => SIMPLE_COMMUNICATION,
        0x08 => SYSTEM_PERIPHERAL,
        0x09 => INPUT,
        0x0A => DOCKING_STATION,
        0x0B => PROCESSOR,
        0x0C => SERIAL_BUS,
        0x0D => WIRELESS,
        0x0E => INTELLIGENT_IO,
        0x0F => SATELLITE,
        0x10 => ENCRYPTION,
        0x11 => DATA_ACQUISITION,
        0x12 => PROCESSING_ACCELERATOR,
        0x13 => NON_ESSENTIAL_INSTRUMENTATION,
        _ => return None,
    };
    Some(table)
}

/// Exact-match lookup in a sorted table. Codes that do not fit in a byte
/// never match.
#[must_use]
pub fn lookup(table: CodeTable, code: u32) -> Option<&'static str> {
    let code = u8::try_from(code).ok()?;
    table
        .binary_search_by_key(&code, |&(c, _)| c)
        .ok()
        .map(|i| table[i].1)
}
