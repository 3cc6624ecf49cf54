use bitflags::bitflags;

bitflags! {
    /// `DISPLAY_DEVICE.StateFlags` as reported by display enumeration.
    ///
    /// Only [`ATTACHED_TO_DESKTOP`](Self::ATTACHED_TO_DESKTOP) drives any
    /// decision; the remaining bits are carried for the diagnostic log.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DisplayStateFlags: u32 {
        const ATTACHED_TO_DESKTOP = 0x0000_0001;
        const MULTI_DRIVER        = 0x0000_0002;
        const PRIMARY_DEVICE      = 0x0000_0004;
        const MIRRORING_DRIVER    = 0x0000_0008;
        const VGA_COMPATIBLE      = 0x0000_0010;
        const REMOVABLE           = 0x0000_0020;
        const DISCONNECT          = 0x0200_0000;
        const REMOTE              = 0x0400_0000;
        const MODES_PRUNED        = 0x0800_0000;
    }
}

impl DisplayStateFlags {
    /// Build from the raw OS bitmask, keeping bits with no name.
    pub fn from_raw(raw: u32) -> Self {
        Self::from_bits_retain(raw)
    }

    /// Whether the device is part of the active desktop.
    pub fn is_attached(self) -> bool {
        self.contains(Self::ATTACHED_TO_DESKTOP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attached_ignores_other_bits() {
        let flags = DisplayStateFlags::PRIMARY_DEVICE | DisplayStateFlags::REMOVABLE;
        assert!(!flags.is_attached());
        assert!((flags | DisplayStateFlags::ATTACHED_TO_DESKTOP).is_attached());
    }

    #[test]
    fn unknown_bits_are_retained() {
        let flags = DisplayStateFlags::from_raw(0x0001_0001);
        assert!(flags.is_attached());
        assert_eq!(flags.bits(), 0x0001_0001);
    }
}
