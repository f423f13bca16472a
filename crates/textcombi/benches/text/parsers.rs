pub mod chumsky;
pub mod handrolled;
pub mod textcombi;
