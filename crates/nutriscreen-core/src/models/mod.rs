pub mod assessment;
pub mod classification;
pub mod indicator;
pub mod measurement;
pub mod sex;
