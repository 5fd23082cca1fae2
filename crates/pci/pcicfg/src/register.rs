//! Bit-field registers of the configuration space.
//!
//! Every register is declared with [`bitfield!`], lowest bit first. The macro
//! refuses any layout that leaves a gap, overlaps, or does not add up to the
//! register width, so reserved ranges are spelled out as fields and survive a
//! decode/encode cycle.

use pcicfg_bitfield::bitfield;

// ---- Header registers -------------------------------------------------------

bitfield! {
    /// Command register (header offset 0x04).
    pub CommandRegister: u16 {
        /// Respond to I/O space accesses.
        [0] io_space,
        /// Respond to memory space accesses.
        [1] memory_space,
        /// Act as a bus master.
        [2] bus_master,
        /// Monitor special cycles.
        [3] special_cycles,
        /// Memory Write and Invalidate enable.
        [4] memory_write_invalidate,
        /// VGA palette snoop.
        [5] vga_palette_snoop,
        /// Parity error response.
        [6] parity_error_response,
        /// IDSEL stepping / wait cycle control.
        [7] stepping,
        /// SERR# driver enable.
        [8] serr_enable,
        /// Fast back-to-back transactions enable.
        [9] fast_back_to_back,
        /// `INTx` emulation disable.
        [10] interrupt_disable,
        /// Reserved.
        [11..16] reserved,
    }
}

bitfield! {
    /// Status register (header offset 0x06).
    pub StatusRegister: u16 {
        /// Reserved.
        [0..3] reserved0,
        /// `INTx` interrupt pending.
        [3] interrupt_status,
        /// A capability list starts at the Capabilities Pointer.
        [4] capabilities_list,
        /// 66MHz capable.
        [5] capable_66mhz,
        /// Reserved.
        [6] reserved1,
        /// Fast back-to-back capable.
        [7] fast_back_to_back_capable,
        /// Master data parity error.
        [8] master_data_parity_error,
        /// DEVSEL# timing.
        [9..11] devsel_timing,
        /// Signaled target abort.
        [11] signaled_target_abort,
        /// Received target abort.
        [12] received_target_abort,
        /// Received master abort.
        [13] received_master_abort,
        /// Signaled system error.
        [14] signaled_system_error,
        /// Detected parity error.
        [15] detected_parity_error,
    }
}

bitfield! {
    /// Header Type register (header offset 0x0E).
    pub HeaderType: u8 {
        /// Configuration header layout.
        [0..7] layout,
        /// The device implements more than one function.
        [7] multi_function,
    }
}

bitfield! {
    /// Built-in self test register (header offset 0x0F).
    pub Bist: u8 {
        /// Completion code; zero means the test passed.
        [0..4] completion_code,
        /// Reserved.
        [4..6] reserved,
        /// Write 1 to start the self test; cleared on completion.
        [6] start,
        /// The device supports BIST.
        [7] capable,
    }
}

// ---- Capability node headers ------------------------------------------------

bitfield! {
    /// Legacy capability node header.
    pub CapabilityHeader: u16 {
        /// Capability ID.
        [0..8] id,
        /// Offset of the next node, 0 ends the list.
        [8..16] next,
    }
}

bitfield! {
    /// `PCIe` extended capability node header.
    pub ExtendedCapabilityHeader: u32 {
        /// Extended capability ID.
        [0..16] id,
        /// Capability structure version.
        [16..20] version,
        /// Offset of the next node, 0 ends the list.
        [20..32] next,
    }
}

// ---- Power management -------------------------------------------------------

bitfield! {
    /// Power Management Capabilities (PMC), capability offset +2.
    pub PowerManagementCapabilities: u16 {
        /// Version of the power management interface.
        [0..3] version,
        /// PME clock required.
        [3] pme_clock,
        /// Reserved.
        [4] reserved,
        /// Device-specific initialization required.
        [5] device_specific_init,
        /// 3.3Vaux current requirement.
        [6..9] aux_current,
        /// D1 supported.
        [9] d1_support,
        /// D2 supported.
        [10] d2_support,
        /// Power states PME# can be asserted from (D0, D1, D2, D3hot, D3cold).
        [11..16] pme_support,
    }
}

bitfield! {
    /// Power Management Control/Status (PMCSR), capability offset +4.
    pub PowerManagementControlStatus: u16 {
        /// Current power state (0 = D0 .. 3 = D3hot).
        [0..2] power_state,
        /// Reserved.
        [2] reserved0,
        /// The function keeps its state across D3hot to D0.
        [3] no_soft_reset,
        /// Reserved.
        [4..8] reserved1,
        /// PME# generation enable.
        [8] pme_enable,
        /// Selects what the Data register reports.
        [9..13] data_select,
        /// Scale factor of the Data register.
        [13..15] data_scale,
        /// PME# asserted.
        [15] pme_status,
    }
}

bitfield! {
    /// PMCSR Bridge Support Extensions, capability offset +6.
    pub BridgeSupportExtension: u8 {
        /// Reserved.
        [0..6] reserved,
        /// B2/B3 support for D3hot.
        [6] b2_b3,
        /// Bus power/clock control enable.
        [7] bus_power_clock_control,
    }
}

// ---- MSI / MSI-X ------------------------------------------------------------

bitfield! {
    /// MSI Message Control, capability offset +2.
    pub MsiMessageControl: u16 {
        /// MSI enable.
        [0] enable,
        /// log2 of the vectors the function requests.
        [1..4] multiple_message_capable,
        /// log2 of the vectors software allocated.
        [4..7] multiple_message_enable,
        /// 64-bit message address capable.
        [7] addr64,
        /// Per-vector masking capable.
        [8] per_vector_masking,
        /// Reserved.
        [9..16] reserved,
    }
}

impl MsiMessageControl {
    /// Number of vectors the function requests.
    #[must_use]
    pub const fn vectors_requested(self) -> u32 {
        1 << self.multiple_message_capable()
    }

    /// Number of vectors software allocated.
    #[must_use]
    pub const fn vectors_allocated(self) -> u32 {
        1 << self.multiple_message_enable()
    }
}

bitfield! {
    /// MSI-X Message Control, capability offset +2.
    pub MsixMessageControl: u16 {
        /// Table size minus one.
        [0..11] table_size,
        /// Reserved.
        [11..14] reserved,
        /// Masks every vector of the function.
        [14] function_mask,
        /// MSI-X enable.
        [15] enable,
    }
}

bitfield! {
    /// MSI-X Table or PBA location dword (capability offset +4 / +8).
    pub MsixLocation: u32 {
        /// BAR indicator.
        [0..3] bir,
        /// Offset into the BAR, in units of 8 bytes.
        [3..32] qword_offset,
    }
}

impl MsixLocation {
    /// Byte offset into the BAR selected by [`bir`](Self::bir).
    #[must_use]
    pub const fn byte_offset(self) -> u32 {
        self.bits() & !0x7
    }
}

// ---- Vendor-specific extended capabilities ----------------------------------

bitfield! {
    /// VSEC header, extended capability offset +4.
    pub VsecHeader: u32 {
        /// Vendor-defined ID.
        [0..16] vsec_id,
        /// Vendor-defined revision.
        [16..20] revision,
        /// Length of the whole structure in bytes, header included.
        [20..32] length,
    }
}

bitfield! {
    /// DVSEC header 1, extended capability offset +4.
    pub DvsecHeader1: u32 {
        /// Vendor that defined the structure.
        [0..16] vendor_id,
        /// Vendor-defined revision.
        [16..20] revision,
        /// Length of the whole structure in bytes, header included.
        [20..32] length,
    }
}
