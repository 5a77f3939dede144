pub mod athlete;
pub mod category;
pub mod integrity;
pub mod reference;
pub mod training_center;
