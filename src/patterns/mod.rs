pub mod behavioral;
pub mod creational;
pub mod structural;
