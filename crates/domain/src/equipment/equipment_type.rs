use serde::{Deserialize, Serialize};

/// Kind of installed equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentType {
    Hvac,
    Lighting,
    Server,
    NetworkSwitch,
    Ups,
    Generator,
    Elevator,
    Pump,
    Chiller,
    Boiler,
    AirHandler,
    Transformer,
    ElectricalPanel,
    FireSuppression,
    SecurityCamera,
    AccessControl,
    Computer,
    Printer,
    Projector,
    Refrigerator,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 20] = [
        Self::Hvac,
        Self::Lighting,
        Self::Server,
        Self::NetworkSwitch,
        Self::Ups,
        Self::Generator,
        Self::Elevator,
        Self::Pump,
        Self::Chiller,
        Self::Boiler,
        Self::AirHandler,
        Self::Transformer,
        Self::ElectricalPanel,
        Self::FireSuppression,
        Self::SecurityCamera,
        Self::AccessControl,
        Self::Computer,
        Self::Printer,
        Self::Projector,
        Self::Refrigerator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hvac => "HVAC",
            Self::Lighting => "Lighting",
            Self::Server => "Server",
            Self::NetworkSwitch => "NetworkSwitch",
            Self::Ups => "UPS",
            Self::Generator => "Generator",
            Self::Elevator => "Elevator",
            Self::Pump => "Pump",
            Self::Chiller => "Chiller",
            Self::Boiler => "Boiler",
            Self::AirHandler => "AirHandler",
            Self::Transformer => "Transformer",
            Self::ElectricalPanel => "ElectricalPanel",
            Self::FireSuppression => "FireSuppression",
            Self::SecurityCamera => "SecurityCamera",
            Self::AccessControl => "AccessControl",
            Self::Computer => "Computer",
            Self::Printer => "Printer",
            Self::Projector => "Projector",
            Self::Refrigerator => "Refrigerator",
        }
    }
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
