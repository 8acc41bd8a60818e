pub mod certification;
pub mod education;
pub mod experience;
pub mod patch;
pub mod portfolio;
pub mod project;
pub mod skill;
