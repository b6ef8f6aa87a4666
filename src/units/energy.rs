use serde::{Deserialize, Serialize};

/// 에너지 단위. 내부 기준은 MJ이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyUnit {
    MegaJoule,
    KilowattHour,
    KiloCalorie,
}

impl EnergyUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            EnergyUnit::MegaJoule => "MJ",
            EnergyUnit::KilowattHour => "kWh",
            EnergyUnit::KiloCalorie => "kcal",
        }
    }
}

fn to_mj(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::MegaJoule => value,
        EnergyUnit::KilowattHour => value * 3.6,
        EnergyUnit::KiloCalorie => value * 0.004184,
    }
}

fn from_mj(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::MegaJoule => value,
        EnergyUnit::KilowattHour => value / 3.6,
        EnergyUnit::KiloCalorie => value / 0.004184,
    }
}

/// 에너지를 변환한다.
pub fn convert_energy(value: f64, from: EnergyUnit, to: EnergyUnit) -> f64 {
    let mj = to_mj(value, from);
    from_mj(mj, to)
}
