mod beverage;
mod pet;

pub use beverage::{BeverageOrder, Drink, YesNo};
pub use pet::{Pet, PetKind};
