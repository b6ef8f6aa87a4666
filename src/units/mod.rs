//! 표시용 단위 정의 및 변환 모듈 모음. 계산 엔진 내부는 항상 SI를 사용한다.

pub mod energy;
pub mod mass;
pub mod temperature;

pub use energy::{convert_energy, EnergyUnit};
pub use mass::{convert_mass, MassUnit};
pub use temperature::{convert_temperature, TemperatureUnit};
