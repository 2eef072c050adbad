pub mod groups;
pub mod instance;
pub mod multiframe;
