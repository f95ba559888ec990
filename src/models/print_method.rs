use serde::{Deserialize, Serialize};

/// Print methods known to the catalog, keyed by their numeric ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrintMethod {
    Default,
    AutoPressApparel,
    Brother,
    CDigital,
    Debossing,
    DirectPrintUV,
    Embroidery,
    GauntletPress,
    Laser,
    ManualPressApparel,
    PadPrint,
    ScreenPrintPens,
    Transfers,
    VendorPrintingPO,
    Digital,
    FMTransfer,
    Sublimation,
    DigitalUV,
}

/// Visual effect applied to artwork for a print method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    None,
    LaserEngraved,
    Embroidery,
    Debossing,
}

impl PrintMethod {
    /// Look up a print method by id
    pub fn from_id(id: u32) -> Option<Self> {
        let method = match id {
            0 => Self::Default,
            1 => Self::AutoPressApparel,
            3 => Self::Brother,
            4 => Self::CDigital,
            7 => Self::Debossing,
            10 => Self::DirectPrintUV,
            12 => Self::Embroidery,
            14 => Self::GauntletPress,
            16 => Self::Laser,
            20 => Self::ManualPressApparel,
            22 => Self::PadPrint,
            26 => Self::ScreenPrintPens,
            30 => Self::Transfers,
            33 => Self::VendorPrintingPO,
            44 => Self::Digital,
            47 => Self::FMTransfer,
            49 => Self::Sublimation,
            56 => Self::DigitalUV,
            _ => return None,
        };
        Some(method)
    }

    /// Numeric id of this method
    pub fn id(self) -> u32 {
        match self {
            Self::Default => 0,
            Self::AutoPressApparel => 1,
            Self::Brother => 3,
            Self::CDigital => 4,
            Self::Debossing => 7,
            Self::DirectPrintUV => 10,
            Self::Embroidery => 12,
            Self::GauntletPress => 14,
            Self::Laser => 16,
            Self::ManualPressApparel => 20,
            Self::PadPrint => 22,
            Self::ScreenPrintPens => 26,
            Self::Transfers => 30,
            Self::VendorPrintingPO => 33,
            Self::Digital => 44,
            Self::FMTransfer => 47,
            Self::Sublimation => 49,
            Self::DigitalUV => 56,
        }
    }

    /// The effect used to preview artwork for this method
    pub fn effect(self) -> Effect {
        match self {
            Self::Laser => Effect::LaserEngraved,
            Self::Embroidery => Effect::Embroidery,
            Self::Debossing => Effect::Debossing,
            _ => Effect::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for id in [0, 1, 3, 4, 7, 10, 12, 14, 16, 20, 22, 26, 30, 33, 44, 47, 49, 56] {
            let method = PrintMethod::from_id(id).unwrap();
            assert_eq!(method.id(), id);
        }
    }

    #[test]
    fn test_unknown_ids() {
        assert_eq!(PrintMethod::from_id(2), None);
        assert_eq!(PrintMethod::from_id(57), None);
    }

    #[test]
    fn test_effect_mapping() {
        assert_eq!(PrintMethod::Laser.effect(), Effect::LaserEngraved);
        assert_eq!(PrintMethod::Embroidery.effect(), Effect::Embroidery);
        assert_eq!(PrintMethod::Debossing.effect(), Effect::Debossing);
        assert_eq!(PrintMethod::PadPrint.effect(), Effect::None);
        assert_eq!(PrintMethod::Default.effect(), Effect::None);
    }
}
