//! Capability ID tables.
//!
//! Both ID spaces are dense: every code below the bound has a slot, so lookup
//! is a bounds check plus an index.

/// One past the highest defined capability ID.
pub const CAPABILITY_ID_MAX: u32 = 0x16;

/// One past the highest defined extended capability ID.
pub const EXTENDED_CAPABILITY_ID_MAX: u32 = 0x35;

/// Capability names for IDs 0x01..0x16, slot `i` holding ID `i + 1`.
pub static CAPABILITY_NAMES: [&str; (CAPABILITY_ID_MAX - 1) as usize] = [
    "PCI Power Management Interface",
    "Accelerated Graphics Port",
    "Vital Product Data",
    "Slot Numbering (for Bridge)",
    "Message Signaled Interrupts",
    "CompactPCI Hot Swap",
    "PCI-X (Deprecated)",
    "HyperTransport (Deprecated)",
    "Vendor Specific",
    "Debug port",
    "CompactPCI central resource control",
    "PCI Hot-Plug (Deprecated)",
    "PCI Bridge Subsystem Vendor ID",
    "AGP 8x (Deprecated)",
    "Secure Device (Deprecated)",
    "PCI Express",
    "MSI-X",
    "Serial ATA Data/Index Configuration",
    "Conventional PCI Advanced Features (AF)",
    "Enhanced Allocation",
    "Flattening Portal Bridge",
];

/// Extended capability names for IDs 0x0001..0x0035, slot `i` holding ID
/// `i + 1`. Reserved IDs hold `None`.
pub static EXTENDED_CAPABILITY_NAMES: [Option<&str>; (EXTENDED_CAPABILITY_ID_MAX - 1) as usize] = [
    Some("Advanced Error Reporting"),
    Some("Virtual Channel (VC)"),
    Some("Device Serial Number"),
    Some("Power Budgeting"),
    Some("Root Complex Link Declaration"),
    Some("Root Complex Internal Link Control"),
    Some("Root Complex Event Collector Endpoint Association"),
    Some("Multi-Function Virtual Channel (MFVC)"),
    Some("Virtual Channel (VC)"),
    Some("Root Complex Register Block (RCRB) Header"),
    Some("Vendor-Specific Extended Capability (VSEC)"),
    // 0x000C: Configuration Access Correlation, withdrawn.
    None,
    Some("Access Control Services (ACS)"),
    Some("Alternative Routing-ID Interpretation (ARI)"),
    Some("Address Translation Services (ATS)"),
    Some("Single Root I/O Virtualization (SR-IOV)"),
    Some("Multi-Root I/O Virtualization (MR-IOV) (Deprecated)"),
    Some("Multicast"),
    Some("Page Request Interface (PRI)"),
    // 0x0014: reserved for AMD.
    None,
    Some("Resizable BAR"),
    Some("Dynamic Power Allocation (DPA)"),
    Some("TPH Requester"),
    Some("Latency Tolerance Reporting (LTR)"),
    Some("Secondary PCI Express"),
    Some("Protocol Multiplexing (PMUX)"),
    Some("Process Address Space ID (PASID)"),
    Some("LN Requester (LNR)"),
    Some("Downstream Port Containment (DPC)"),
    Some("L1 PM Substates"),
    Some("Precision Time Measurement (PTM)"),
    Some("PCI Express over M-PHY (M-PCIe)"),
    Some("FRS Queueing"),
    Some("Readiness Time Reporting"),
    Some("Designated Vendor-Specific Extended Capability"),
    Some("VF Resizable BAR"),
    Some("Data Link Feature"),
    Some("Physical Layer 16.0 GT/s"),
    Some("Lane Margining at the Receiver"),
    Some("Hierarchy ID"),
    Some("Native PCIe Enclosure Management (NPEM)"),
    Some("Physical Layer 32.0 GT/s"),
    Some("Alternate Protocol"),
    Some("System Firmware Intermediary (SFI)"),
    Some("Shadow Functions"),
    Some("Data Object Exchange"),
    Some("Device 3"),
    Some("Integrity and Data Encryption (IDE)"),
    Some("Physical Layer 64.0 GT/s Capability"),
    Some("Flit Logging"),
    Some("Flit Performance Measurement"),
    Some("Flit Error Injection"),
];

/// Looks up a capability ID.
#[must_use]
pub fn capability_name(id: u32) -> Option<&'static str> {
    if id == 0 || id >= CAPABILITY_ID_MAX {
        return None;
    }
    CAPABILITY_NAMES.get(id as usize - 1).copied()
}

/// Looks up an extended capability ID.
#[must_use]
pub fn extended_capability_name(id: u32) -> Option<&'static str> {
    if id == 0 || id >= EXTENDED_CAPABILITY_ID_MAX {
        return None;
    }
    EXTENDED_CAPABILITY_NAMES.get(id as usize - 1).copied().flatten()
}
