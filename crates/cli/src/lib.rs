// gridclip CLI library: demo grid and row path addressing

pub mod demo;
pub mod path;
