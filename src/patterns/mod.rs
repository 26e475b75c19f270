//! Gang-of-Four design patterns grouped by family.

pub mod behavioral;
pub mod creational;
pub mod structural;
