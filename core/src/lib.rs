pub mod inventory;
pub mod mail;
pub mod pipeline;
pub mod probe;
pub mod roster;
