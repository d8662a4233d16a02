pub mod cli;
pub mod elf;
