pub mod identifier;
pub mod params;
pub mod results;
pub mod sex;
