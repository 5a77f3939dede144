pub mod athletes;
pub mod categories;
pub mod training_centers;
